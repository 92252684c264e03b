//! Board module - manages the game grid
//!
//! The board is a 10x20 grid of [`Cell`]s stored in a flat array.
//! Coordinates: (x, y) where x ranges 0..9 (left to right) and y ranges 0..19
//! (bottom to top). Nothing is ever stored above row 19; pieces that still
//! protrude above the grid simply lose those cells when placed.

use arrayvec::ArrayVec;

use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Row indices, bottom to top. Sized for the worst case of every row.
pub type RowList = ArrayVec<usize, { BOARD_HEIGHT as usize }>;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Flat array of cells, row-major from the bottom (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [Cell::EMPTY; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and non-empty)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(cell) if !cell.is_empty())
    }

    /// Slice of one row, or None past the top
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= BOARD_HEIGHT as usize {
            return None;
        }
        let start = y * BOARD_WIDTH as usize;
        Some(&self.cells[start..start + BOARD_WIDTH as usize])
    }

    /// A row is full iff every cell in it is non-empty
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .map(|row| row.iter().all(|cell| !cell.is_empty()))
            .unwrap_or(false)
    }

    /// Indices of every full row, bottom to top
    pub fn full_rows(&self) -> RowList {
        (0..BOARD_HEIGHT as usize)
            .filter(|&y| self.is_row_full(y))
            .collect()
    }

    /// Overwrite the color of every cell in row `y`, keeping ids
    pub fn paint_row(&mut self, y: usize, color: u8) {
        if y >= BOARD_HEIGHT as usize {
            return;
        }
        let start = y * BOARD_WIDTH as usize;
        for cell in &mut self.cells[start..start + BOARD_WIDTH as usize] {
            cell.color = color;
        }
    }

    /// Remove the given rows and compact the rest downward
    ///
    /// `rows` must be sorted bottom to top. Every surviving row moves down by
    /// the number of removed rows beneath it; the vacated rows at the top are
    /// emptied. Uses a two-pointer pass with no allocation.
    pub fn remove_rows(&mut self, rows: &[usize]) {
        let width = BOARD_WIDTH as usize;
        let mut write_y = 0usize;
        let mut pending = rows.iter().peekable();

        for read_y in 0..BOARD_HEIGHT as usize {
            if pending.peek() == Some(&&read_y) {
                pending.next();
                continue;
            }
            if write_y != read_y {
                let src_start = read_y * width;
                self.cells
                    .copy_within(src_start..src_start + width, write_y * width);
            }
            write_y += 1;
        }

        for cell in &mut self.cells[write_y * width..] {
            *cell = Cell::EMPTY;
        }
    }

    /// Number of non-empty cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Cell::is_empty)
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
