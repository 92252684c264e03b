//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the rules of the game with no threads, locks or I/O:
//!
//! - [`shapes`]: static occupancy table for the seven shapes in four rotations
//! - [`piece`]: movable piece instance with collision and placement
//! - [`board`]: fixed 10x20 grid with full-row detection and compaction
//! - [`game_state`]: the value type shared with readers
//! - [`scoring`]: points, level and drop threshold rules
//! - [`rng`]: injectable block id sources
//!
//! # Example
//!
//! ```
//! use rt_tetris_core::{Board, Piece};
//! use rt_tetris_core::types::PieceKind;
//!
//! let mut board = Board::new();
//! let mut piece = Piece::new(PieceKind::I).at(3, 16);
//!
//! assert_eq!(piece.drop_to_floor(&board), 16);
//! assert_eq!(piece.place(&mut board), 4);
//! assert!(!board.is_row_full(0));
//! assert_eq!(board.filled_count(), 4);
//! ```

pub mod board;
pub mod game_state;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod shapes;

pub use rt_tetris_types as types;

pub use board::{Board, RowList};
pub use game_state::GameState;
pub use piece::{Piece, SPAWN_POSITION};
pub use rng::{BlockSource, ScriptedSource, SimpleRng};
pub use scoring::{drop_threshold, level_for_lines, lock_score};
pub use shapes::{occupied, validate_shape_table};
