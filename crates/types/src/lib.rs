//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! Everything here is plain data usable from the core, the controller and the
//! terminal collaborators alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, bottom to top)
//! - **Spawn anchor**: (5, 20), astride the visible top of the board
//!
//! # Timing Constants
//!
//! Timing is counted in ticks, not milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_TICK_HZ` | 60 | Controller tick frequency |
//! | `DROP_MAX` | 100 | Drop threshold before any level adjustment |
//! | `DROP_STEP_PER_LEVEL` | 5 | Threshold reduction per level |
//! | `CLEAR_ANIMATION_TICKS` | 7 | Blink frames before full rows collapse |
//!
//! # Examples
//!
//! ```
//! use rt_tetris_types::{Cell, Command, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(Command::from_code(1), Ok(Command::Left));
//! assert_eq!(Command::Pause.code(), 6);
//!
//! let kind = PieceKind::from_id(1).unwrap();
//! assert_eq!(kind, PieceKind::I);
//!
//! assert!(Cell::EMPTY.is_empty());
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use thiserror::Error;

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Number of distinct piece colors (one per shape)
pub const NUM_COLORS: u8 = 7;

/// Side of the square frame every piece lives in
pub const PIECE_FRAME: u8 = 4;

/// Number of rotation states per piece
pub const NUM_ROTATIONS: u8 = 4;

/// Default controller tick frequency
pub const DEFAULT_TICK_HZ: u32 = 60;

/// Drop threshold (ticks) before level adjustment
pub const DROP_MAX: u32 = 100;

/// Drop threshold reduction per level
pub const DROP_STEP_PER_LEVEL: u32 = 5;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Blink frames shown before full rows are removed
pub const CLEAR_ANIMATION_TICKS: u8 = 7;

/// Default bounded capacity of the command channel
///
/// Holds a burst of 50 movement commands plus a trailing PAUSE without
/// rejecting any of them.
pub const COMMAND_QUEUE_CAPACITY: usize = 64;


/// The seven tetromino shapes
///
/// Discriminants are the shape ids used by the occupancy table; id 0 is
/// reserved for "no shape". The shape id doubles as the cell color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    I = 1,
    T = 2,
    O = 3,
    L = 4,
    J = 5,
    Z = 6,
    S = 7,
}

impl PieceKind {
    /// All kinds in id order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::T,
        PieceKind::O,
        PieceKind::L,
        PieceKind::J,
        PieceKind::Z,
        PieceKind::S,
    ];

    /// Look up a kind by shape id (1..=7)
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(PieceKind::I),
            2 => Some(PieceKind::T),
            3 => Some(PieceKind::O),
            4 => Some(PieceKind::L),
            5 => Some(PieceKind::J),
            6 => Some(PieceKind::Z),
            7 => Some(PieceKind::S),
            _ => None,
        }
    }

    /// Shape id, also the cell color
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Kind derived from a block id: `color = id mod 7 + 1`
    pub fn from_block_id(block_id: u32) -> Self {
        let color = (block_id % NUM_COLORS as u32) as u8 + 1;
        // color is always in 1..=7
        Self::from_id(color).unwrap_or(PieceKind::I)
    }

}

/// A cell on the game board
///
/// `color == 0` means empty. `id` tells apart cells that belong to different
/// pieces of the same color and takes part in equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    pub id: u32,
    pub color: u8,
}

impl Cell {
    pub const EMPTY: Cell = Cell { id: 0, color: 0 };

    pub const fn new(id: u32, color: u8) -> Self {
        Self { id, color }
    }

    pub fn is_empty(&self) -> bool {
        self.color == 0
    }
}

/// Abstract player commands carried by the command channel
///
/// The wire representation is the small integer code returned by
/// [`Command::code`]; producers that only have raw codes can push those
/// directly and the controller decodes them on drain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Command {
    /// No-op
    None = 0,
    /// Move piece one cell left
    Left = 1,
    /// Move piece one cell right
    Right = 2,
    /// Rotate counter-clockwise
    RotateLeft = 3,
    /// Rotate clockwise
    RotateRight = 4,
    /// Hard drop and lock
    Down = 5,
    /// Toggle pause, or restart after game over
    Pause = 6,
}

impl Command {
    /// Decode a raw command code
    pub fn from_code(code: u8) -> Result<Self, CommandError> {
        match code {
            0 => Ok(Command::None),
            1 => Ok(Command::Left),
            2 => Ok(Command::Right),
            3 => Ok(Command::RotateLeft),
            4 => Ok(Command::RotateRight),
            5 => Ok(Command::Down),
            6 => Ok(Command::Pause),
            other => Err(CommandError::UnknownCode(other)),
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Command {
    type Error = CommandError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Command::from_code(code)
    }
}

/// Errors decoding command codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command code {0}")]
    UnknownCode(u8),
}

/// Errors from piece occupancy queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PieceError {
    /// Query outside the 4x4 frame or the 4 rotations
    #[error("{what} out of range: {value}")]
    OutOfRange { what: &'static str, value: i32 },
}

/// Producer-side errors from the command channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SendError {
    /// Queue saturated; the command was dropped
    #[error("command queue full, dropped code {0}")]
    Full(u8),
    /// Consumer side is gone
    #[error("command queue closed")]
    Closed,
}
