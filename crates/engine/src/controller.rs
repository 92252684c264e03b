//! Controller - the single owner of live game state.
//!
//! All mutation happens in [`Controller::tick`]; all reads go through
//! [`Controller::snapshot`]. Both take the same mutex for their whole critical
//! section, so a reader sees the state either entirely before or entirely
//! after a tick, never in between. Nothing inside the lock blocks: the
//! command drain is bounded and non-blocking.

use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rt_tetris_core::{validate_shape_table, BlockSource, GameState, RowList, SimpleRng};

use crate::channel::{command_channel, CommandSender};
use crate::config::ControllerConfig;
use crate::machine::{GameMachine, Phase};
use crate::ticker::{spawn_ticker, TickHandle};

pub struct Controller {
    machine: Mutex<GameMachine>,
    config: ControllerConfig,
}

impl Controller {
    /// Controller seeded from `config.seed` (or the clock), plus the
    /// producer end of its command channel
    pub fn new(config: ControllerConfig) -> (Self, CommandSender) {
        let rng = match config.seed {
            Some(seed) => SimpleRng::new(seed),
            None => SimpleRng::from_time(),
        };
        Self::with_source(config, Box::new(rng))
    }

    /// Controller drawing pieces from a caller-supplied source
    pub fn with_source(
        config: ControllerConfig,
        source: Box<dyn BlockSource>,
    ) -> (Self, CommandSender) {
        debug_assert_eq!(validate_shape_table(), Ok(()));

        let (tx, rx) = command_channel(config.queue_capacity);
        let machine = GameMachine::new(source, rx, config.clear_animation_ticks);
        let controller = Self {
            machine: Mutex::new(machine),
            config,
        };
        (controller, tx)
    }

    fn lock(&self) -> MutexGuard<'_, GameMachine> {
        // A panic elsewhere must not stop the game; the state is still whole
        // because every tick step leaves it consistent.
        self.machine.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Advance the game by one tick
    pub fn tick(&self) {
        self.lock().tick();
    }

    /// Point-in-time copy of the game state
    pub fn snapshot(&self) -> GameState {
        self.lock().state.clone()
    }

    pub fn phase(&self) -> Phase {
        self.lock().phase()
    }

    /// Rows currently blinking before removal, bottom to top
    pub fn pending_rows(&self) -> RowList {
        self.lock().pending_rows.clone()
    }

    /// Start ticking on a dedicated thread at the configured rate
    pub fn start(self: &Arc<Self>) -> io::Result<TickHandle> {
        let controller = Arc::clone(self);
        spawn_ticker("game-tick", self.config.tick_period(), move || {
            controller.tick();
        })
    }
}
