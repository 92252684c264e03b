//! Terminal front end.
//!
//! A small game-oriented renderer: [`GameView`] draws a [`GameState`] into a
//! [`FrameBuffer`] with no I/O, and [`TerminalRenderer`] flushes frames to the
//! terminal through `crossterm`.
//!
//! [`GameState`]: crate::core::GameState

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use rt_tetris_core as core;
pub use rt_tetris_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{palette, GameView, Viewport};
pub use renderer::{encode_frame, TerminalRenderer};
