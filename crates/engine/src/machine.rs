//! Tick-level state machine.
//!
//! `GameMachine` owns everything the tick mutates: the game state, the rows
//! waiting to collapse, the fall and animation counters, the block source and
//! the consuming end of the command channel. It has no lock of its own; the
//! [`Controller`](crate::Controller) keeps it behind one mutex.

use rt_tetris_core::{level_for_lines, lock_score, BlockSource, GameState, Piece, RowList};

use crate::channel::CommandReceiver;
use crate::types::{Command, BOARD_HEIGHT, NUM_COLORS};

/// Where the game is, derived from the flags and the pending rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Paused,
    Active,
    Clearing,
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Paused => "paused",
            Phase::Active => "active",
            Phase::Clearing => "clearing",
            Phase::GameOver => "gameOver",
        }
    }
}

pub(crate) struct GameMachine {
    pub(crate) state: GameState,
    pub(crate) pending_rows: RowList,
    pub(crate) fall_ticks: u32,
    pub(crate) clear_frame: u8,
    clear_ticks: u8,
    source: Box<dyn BlockSource>,
    commands: CommandReceiver,
}

impl GameMachine {
    pub(crate) fn new(
        mut source: Box<dyn BlockSource>,
        commands: CommandReceiver,
        clear_ticks: u8,
    ) -> Self {
        let state = GameState::new(source.as_mut());
        Self {
            state,
            pending_rows: RowList::new(),
            fall_ticks: 0,
            clear_frame: 0,
            clear_ticks: clear_ticks.max(1),
            source,
            commands,
        }
    }

    pub(crate) fn phase(&self) -> Phase {
        if self.state.game_over {
            Phase::GameOver
        } else if self.state.paused {
            Phase::Paused
        } else if !self.pending_rows.is_empty() {
            Phase::Clearing
        } else {
            Phase::Active
        }
    }

    /// One tick: drain commands, then advance the animation or gravity
    pub(crate) fn tick(&mut self) {
        let before = self.phase();
        self.drain_commands();

        match self.phase() {
            Phase::Paused | Phase::GameOver => {}
            Phase::Clearing => self.advance_clear(),
            Phase::Active => self.advance_fall(),
        }

        let after = self.phase();
        if after != before {
            log::debug!("phase {} -> {}", before.as_str(), after.as_str());
        }
    }

    fn drain_commands(&mut self) {
        for _ in 0..self.commands.capacity() {
            let Some(code) = self.commands.try_recv() else {
                break;
            };
            match Command::from_code(code) {
                Ok(command) => self.apply(command),
                Err(err) => log::debug!("ignoring input: {}", err),
            }
        }
    }

    pub(crate) fn apply(&mut self, command: Command) {
        match self.phase() {
            Phase::GameOver => {
                if command == Command::Pause {
                    self.reset();
                }
            }
            Phase::Paused => {
                if command == Command::Pause {
                    self.state.paused = false;
                }
            }
            Phase::Clearing => {
                // Movement is ignored while rows blink
                if command == Command::Pause {
                    self.state.paused = true;
                }
            }
            Phase::Active => self.apply_active(command),
        }
    }

    fn apply_active(&mut self, command: Command) {
        let board = &self.state.board;
        let active = &mut self.state.active;
        match command {
            Command::None => {}
            Command::Left => {
                active.try_move(board, -1, 0, 0);
            }
            Command::Right => {
                active.try_move(board, 1, 0, 0);
            }
            Command::RotateLeft => {
                active.try_move(board, 0, 0, -1);
            }
            Command::RotateRight => {
                active.try_move(board, 0, 0, 1);
            }
            Command::Down => {
                active.drop_to_floor(board);
                self.lock_active();
            }
            Command::Pause => self.state.paused = true,
        }
    }

    fn advance_clear(&mut self) {
        self.clear_frame = self.clear_frame.saturating_add(1);

        if self.clear_frame < self.clear_ticks {
            let color = (self.clear_frame - 1) % NUM_COLORS + 1;
            for &y in &self.pending_rows {
                self.state.board.paint_row(y, color);
            }
            return;
        }

        self.state.board.remove_rows(&self.pending_rows);
        log::debug!("removed rows {:?}", self.pending_rows.as_slice());
        self.pending_rows.clear();
        self.clear_frame = 0;
    }

    fn advance_fall(&mut self) {
        self.fall_ticks += 1;
        if self.fall_ticks <= self.state.drop_threshold() {
            return;
        }

        if !self.state.active.try_move(&self.state.board, 0, -1, 0) {
            self.lock_active();
        }
        self.fall_ticks = 0;
    }

    /// Write the active piece into the board and bring in the next one
    fn lock_active(&mut self) {
        let active = self.state.active;
        let protruding = active.board_cells().any(|(_, y)| y >= BOARD_HEIGHT as i8);
        active.place(&mut self.state.board);
        self.fall_ticks = 0;

        if protruding || self.state.next.intersects(&self.state.board, 0, 0, 0) {
            self.state.game_over = true;
            log::info!(
                "game over: score {} level {} lines {}",
                self.state.score,
                self.state.level,
                self.state.lines_cleared
            );
            return;
        }

        self.state.active = self.state.next;
        self.state.next = Piece::spawn(self.source.as_mut());

        self.pending_rows = self.state.board.full_rows();
        let cleared = self.pending_rows.len() as u32;
        self.state.lines_cleared += cleared;
        self.state.score += lock_score(cleared);
        self.state.level = level_for_lines(self.state.lines_cleared);

        if cleared > 0 {
            log::debug!(
                "locked {:?}, {} full rows, score {}",
                active.kind,
                cleared,
                self.state.score
            );
        }
    }

    fn reset(&mut self) {
        self.state.reset(self.source.as_mut());
        self.pending_rows.clear();
        self.fall_ticks = 0;
        self.clear_frame = 0;
        log::info!("game reset");
    }
}
