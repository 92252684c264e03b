//! Game state module - the value handed to readers
//!
//! `GameState` is plain data: the board, the active and next pieces, and the
//! score counters. It carries no lock and no RNG; whoever owns it decides how
//! it is shared. Readers always receive it by value.

use crate::rng::BlockSource;
use crate::scoring::{drop_threshold, level_for_lines};
use crate::{Board, Piece};

/// Complete game state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub board: Board,
    pub active: Piece,
    pub next: Piece,
    pub score: u32,
    pub level: u32,
    pub lines_cleared: u32,
    pub paused: bool,
    pub game_over: bool,
}

impl GameState {
    /// A paused game on an empty board
    pub fn new(source: &mut dyn BlockSource) -> Self {
        let active = Piece::spawn(source);
        let next = Piece::spawn(source);
        Self {
            board: Board::new(),
            active,
            next,
            score: 0,
            level: level_for_lines(0),
            lines_cleared: 0,
            paused: true,
            game_over: false,
        }
    }

    /// Reinitialize every field for a new game
    pub fn reset(&mut self, source: &mut dyn BlockSource) {
        *self = Self::new(source);
    }

    /// Ticks before the next automatic fall at the current level
    pub fn drop_threshold(&self) -> u32 {
        drop_threshold(self.level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{ScriptedSource, SimpleRng};
    use crate::types::{Cell, PieceKind};

    #[test]
    fn test_new_game_state() {
        let mut rng = SimpleRng::new(12345);
        let state = GameState::new(&mut rng);

        assert!(state.board.is_empty());
        assert!(state.paused);
        assert!(!state.game_over);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.lines_cleared, 0);
        assert_eq!(state.drop_threshold(), 95);
        assert_eq!((state.active.x, state.active.y), (5, 20));
    }

    #[test]
    fn test_active_and_next_come_from_source() {
        let mut src = ScriptedSource::new(vec![PieceKind::Z, PieceKind::O]);
        let state = GameState::new(&mut src);
        assert_eq!(state.active.kind, PieceKind::Z);
        assert_eq!(state.next.kind, PieceKind::O);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut rng = SimpleRng::new(9);
        let mut state = GameState::new(&mut rng);
        state.board.set(0, 0, Cell::new(1, 1));
        state.score = 500;
        state.level = 4;
        state.lines_cleared = 33;
        state.paused = false;
        state.game_over = true;

        state.reset(&mut rng);

        assert!(state.board.is_empty());
        assert!(state.paused);
        assert!(!state.game_over);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.lines_cleared, 0);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut rng = SimpleRng::new(3);
        let mut state = GameState::new(&mut rng);
        let copy = state.clone();
        state.board.set(1, 1, Cell::new(4, 4));
        assert!(copy.board.is_empty());
    }
}
