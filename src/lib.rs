//! Real-time falling-block game (workspace facade crate).
//!
//! Re-exports the member crates under one name so that the binary, the
//! integration tests and the benches can use `rt_tetris::{core, engine, ...}`.

pub use rt_tetris_core as core;
pub use rt_tetris_engine as engine;
pub use rt_tetris_input as input;
pub use rt_tetris_term as term;
pub use rt_tetris_types as types;
