//! Terminal input mapping.
//!
//! Translates `crossterm` key events into the controller's [`Command`]
//! vocabulary. It holds no state: repeat timing is left to the terminal, and
//! every mapped key becomes exactly one command.
//!
//! [`Command`]: crate::types::Command

pub mod map;

pub use rt_tetris_types as types;

pub use map::{map_key, should_quit};
