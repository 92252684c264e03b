//! Real-time game controller.
//!
//! Wraps the pure rules from `rt-tetris-core` in the pieces a long-running
//! process needs:
//!
//! - [`channel`]: bounded, non-blocking command queue from input producers
//! - [`controller`]: the mutex-guarded owner of live state, `tick` and
//!   `snapshot`
//! - [`machine`]: per-tick state machine (Paused, Active, Clearing, GameOver)
//! - [`ticker`]: fixed-period scheduler thread
//! - [`config`]: defaults and environment overrides
//!
//! # Example
//!
//! ```
//! use rt_tetris_engine::{Controller, ControllerConfig, Phase};
//! use rt_tetris_engine::types::Command;
//!
//! let (controller, commands) = Controller::new(ControllerConfig::default().with_seed(1));
//! assert_eq!(controller.phase(), Phase::Paused);
//!
//! commands.send(Command::Pause).unwrap();
//! controller.tick();
//! assert_eq!(controller.phase(), Phase::Active);
//!
//! let snapshot = controller.snapshot();
//! assert!(!snapshot.paused);
//! ```

pub mod channel;
pub mod config;
pub mod controller;
pub mod machine;
pub mod ticker;

pub use rt_tetris_core as core;
pub use rt_tetris_types as types;

pub use channel::{command_channel, CommandReceiver, CommandSender};
pub use config::ControllerConfig;
pub use controller::Controller;
pub use machine::Phase;
pub use ticker::{spawn_ticker, TickHandle};
