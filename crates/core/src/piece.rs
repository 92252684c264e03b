//! Piece module - a movable tetromino instance
//!
//! A piece is a shape (fixed for its lifetime), a rotation index and an
//! anchor at the bottom-left of its 4x4 frame. Only the rotation and the
//! anchor ever change.

use crate::rng::BlockSource;
use crate::shapes;
use crate::types::{Cell, PieceError, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, NUM_ROTATIONS};
use crate::Board;

/// Active or upcoming falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    /// Cell written to the board for every occupied square
    pub block: Cell,
    /// Rotation index in 0..4
    pub rotation: u8,
    pub x: i8,
    pub y: i8,
}

/// Anchor every piece spawns at: horizontally centered, astride the top
pub const SPAWN_POSITION: (i8, i8) = ((BOARD_WIDTH / 2) as i8, BOARD_HEIGHT as i8);

impl Piece {
    /// Create a piece of `kind` at the spawn anchor
    pub fn new(kind: PieceKind) -> Self {
        Self::with_block(kind, Cell::new(kind.id() as u32, kind.id()))
    }

    fn with_block(kind: PieceKind, block: Cell) -> Self {
        Self {
            kind,
            block,
            rotation: 0,
            x: SPAWN_POSITION.0,
            y: SPAWN_POSITION.1,
        }
    }

    /// Piece for a block id: `color = id mod 7 + 1`, shape = color
    pub fn from_block_id(id: u32) -> Self {
        let kind = PieceKind::from_block_id(id);
        Self::with_block(kind, Cell::new(id, kind.id()))
    }

    /// Spawn a fresh piece from the given source
    pub fn spawn(source: &mut dyn BlockSource) -> Self {
        Self::from_block_id(source.next_block_id())
    }

    /// Move the anchor, keeping shape and rotation
    pub fn at(mut self, x: i8, y: i8) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn with_rotation(mut self, rotation: u8) -> Self {
        self.rotation = rotation % NUM_ROTATIONS;
        self
    }

    fn rotated(&self, dr: i8) -> u8 {
        (self.rotation as i8 + dr).rem_euclid(NUM_ROTATIONS as i8) as u8
    }

    /// Board coordinates of every occupied cell at the current position
    ///
    /// Coordinates saturate at the `i8` range; such cells are off the board
    /// either way.
    pub fn board_cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        shapes::cells(self.kind.id(), self.rotation)
            .map(move |(lx, ly)| (self.x.saturating_add(lx), self.y.saturating_add(ly)))
    }

    /// The piece's cell at local `(x, y)`, or the empty cell
    pub fn cell_at(&self, x: i8, y: i8) -> Result<Cell, PieceError> {
        let on = shapes::occupied(self.kind.id(), self.rotation as i8, x, y)?;
        Ok(if on { self.block } else { Cell::EMPTY })
    }

    /// Would the piece collide after rotating by `dr` then moving `(dx, dy)`?
    ///
    /// Cells at or above the top of the board never collide so pieces can
    /// fall in from above the visible grid.
    pub fn intersects(&self, board: &Board, dx: i8, dy: i8, dr: i8) -> bool {
        let rotation = self.rotated(dr);
        shapes::cells(self.kind.id(), rotation).any(|(lx, ly)| {
            let x = self.x as i16 + dx as i16 + lx as i16;
            let y = self.y as i16 + dy as i16 + ly as i16;
            if x < 0 || x >= BOARD_WIDTH as i16 || y < 0 {
                return true;
            }
            if y >= BOARD_HEIGHT as i16 {
                return false;
            }
            // Both now lie inside the board
            board.is_occupied(x as i8, y as i8)
        })
    }

    /// Apply the move if it does not collide; returns whether it did
    pub fn try_move(&mut self, board: &Board, dx: i8, dy: i8, dr: i8) -> bool {
        if self.intersects(board, dx, dy, dr) {
            return false;
        }
        self.rotation = self.rotated(dr);
        self.x = self.x.saturating_add(dx);
        self.y = self.y.saturating_add(dy);
        true
    }

    /// Drop as far as possible, returning the distance fallen
    pub fn drop_to_floor(&mut self, board: &Board) -> u32 {
        let mut distance = 0;
        while self.try_move(board, 0, -1, 0) {
            distance += 1;
        }
        distance
    }

    /// Write the piece into the board at its anchor
    ///
    /// Cells outside the board are skipped. Returns how many cells were
    /// actually written.
    pub fn place(&self, board: &mut Board) -> usize {
        let mut written = 0;
        for (x, y) in self.board_cells() {
            if board.set(x, y, self.block) {
                written += 1;
            }
        }
        written
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedSource;

    #[test]
    fn test_new_spawns_centered_above_board() {
        let piece = Piece::new(PieceKind::T);
        assert_eq!((piece.x, piece.y), (5, 20));
        assert_eq!(piece.rotation, 0);
        assert_eq!(piece.block.color, PieceKind::T.id());
    }

    #[test]
    fn test_block_id_derives_color() {
        let piece = Piece::from_block_id(13);
        // 13 mod 7 + 1 = 7
        assert_eq!(piece.kind, PieceKind::S);
        assert_eq!(piece.block, Cell::new(13, 7));
    }

    #[test]
    fn test_spawn_uses_source() {
        let mut src = ScriptedSource::repeat(PieceKind::L);
        let piece = Piece::spawn(&mut src);
        assert_eq!(piece.kind, PieceKind::L);
    }

    #[test]
    fn test_cell_at() {
        let piece = Piece::new(PieceKind::O);
        assert_eq!(piece.cell_at(0, 0), Ok(piece.block));
        assert_eq!(piece.cell_at(3, 3), Ok(Cell::EMPTY));
        assert!(piece.cell_at(4, 0).is_err());
    }

    #[test]
    fn test_rotation_wraps() {
        let board = Board::new();
        let mut piece = Piece::new(PieceKind::T).at(3, 5);
        assert!(piece.try_move(&board, 0, 0, -1));
        assert_eq!(piece.rotation, 3);
        assert!(piece.try_move(&board, 0, 0, 1));
        assert_eq!(piece.rotation, 0);
    }

    #[test]
    fn test_walls_and_floor_intersect() {
        let board = Board::new();
        let piece = Piece::new(PieceKind::I).at(0, 0);
        assert!(piece.intersects(&board, -1, 0, 0));
        assert!(piece.intersects(&board, 0, -1, 0));
        assert!(!piece.intersects(&board, 6, 0, 0));
        assert!(piece.intersects(&board, 7, 0, 0));
    }

    #[test]
    fn test_above_top_is_free() {
        let mut board = Board::new();
        for x in 0..10 {
            board.set(x, 19, Cell::new(1, 1));
        }
        let piece = Piece::new(PieceKind::O).at(4, 20);
        assert!(!piece.intersects(&board, 0, 0, 0));
        assert!(piece.intersects(&board, 0, -1, 0));
    }

    #[test]
    fn test_rotation_applies_before_translation() {
        let mut board = Board::new();
        // Vertical I at rotation 1 lives in column x+1
        board.set(2, 0, Cell::new(1, 1));
        let piece = Piece::new(PieceKind::I).at(0, 0).with_rotation(0);
        // Rotate to vertical (column 1) then shift right by one: column 2, blocked
        assert!(piece.intersects(&board, 1, 0, 1));
        // Shift right by two: column 3, free
        assert!(!piece.intersects(&board, 2, 0, 1));
    }

    #[test]
    fn test_extreme_anchors_do_not_overflow() {
        let board = Board::new();
        let far_right = Piece::new(PieceKind::I).at(126, 0);
        assert!(far_right.intersects(&board, 1, 0, 0));
        assert!(far_right.board_cells().all(|(x, _)| x >= 126));

        let far_left = Piece::new(PieceKind::T).at(i8::MIN, 0);
        assert!(far_left.intersects(&board, -1, 0, 0));

        // Far above the board nothing collides, and moving up saturates
        let mut high = Piece::new(PieceKind::O).at(4, i8::MAX);
        assert!(!high.intersects(&board, 0, 1, 0));
        assert!(high.try_move(&board, 0, 1, 0));
        assert_eq!(high.y, i8::MAX);

        let mut placed = Board::new();
        assert_eq!(high.place(&mut placed), 0);
        assert_eq!(far_right.place(&mut placed), 0);
    }

    #[test]
    fn test_failed_move_does_not_mutate() {
        let board = Board::new();
        let mut piece = Piece::new(PieceKind::J).at(0, 0);
        let before = piece;
        assert!(!piece.try_move(&board, -1, 0, 0));
        assert_eq!(piece, before);
    }

    #[test]
    fn test_place_skips_cells_above_board() {
        let mut board = Board::new();
        // Vertical I with its bottom at row 18: rows 18..21
        let piece = Piece::new(PieceKind::I).with_rotation(1).at(0, 18);
        assert_eq!(piece.place(&mut board), 2);
        assert_eq!(board.filled_count(), 2);
        assert!(board.is_occupied(1, 18));
        assert!(board.is_occupied(1, 19));
    }
}
