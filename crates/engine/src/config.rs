//! Controller configuration.
//!
//! Defaults match the classic 60 Hz cabinet timing. Every field can be
//! overridden from the environment:
//!
//! - `TETRIS_TICK_HZ`: tick frequency (default: 60)
//! - `TETRIS_QUEUE_CAPACITY`: command channel capacity (default: 64)
//! - `TETRIS_CLEAR_TICKS`: blink frames before full rows collapse (default: 7)
//! - `TETRIS_SEED`: fixed RNG seed; unset means seeded from the clock
//!
//! Unparseable or zero values fall back to the default.

use std::time::Duration;

use crate::types::{CLEAR_ANIMATION_TICKS, COMMAND_QUEUE_CAPACITY, DEFAULT_TICK_HZ};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    pub tick_hz: u32,
    pub queue_capacity: usize,
    pub clear_animation_ticks: u8,
    pub seed: Option<u32>,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            tick_hz: DEFAULT_TICK_HZ,
            queue_capacity: COMMAND_QUEUE_CAPACITY,
            clear_animation_ticks: CLEAR_ANIMATION_TICKS,
            seed: None,
        }
    }
}

impl ControllerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the environment, a map in tests)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let tick_hz = lookup("TETRIS_TICK_HZ")
            .and_then(|s| s.trim().parse().ok())
            .filter(|&hz: &u32| hz > 0)
            .unwrap_or(defaults.tick_hz);

        let queue_capacity = lookup("TETRIS_QUEUE_CAPACITY")
            .and_then(|s| s.trim().parse().ok())
            .filter(|&cap: &usize| cap > 0)
            .unwrap_or(defaults.queue_capacity);

        let clear_animation_ticks = lookup("TETRIS_CLEAR_TICKS")
            .and_then(|s| s.trim().parse().ok())
            .filter(|&ticks: &u8| ticks > 0)
            .unwrap_or(defaults.clear_animation_ticks);

        let seed = lookup("TETRIS_SEED")
            .and_then(|s| s.trim().parse().ok())
            .filter(|&seed: &u32| seed > 0);

        Self {
            tick_hz,
            queue_capacity,
            clear_animation_ticks,
            seed,
        }
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity.max(1);
        self
    }

    /// Wall-clock period between ticks
    pub fn tick_period(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / self.tick_hz.max(1) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = ControllerConfig::default();
        assert_eq!(config.tick_hz, 60);
        assert_eq!(config.queue_capacity, 64);
        assert_eq!(config.clear_animation_ticks, 7);
        assert_eq!(config.seed, None);
        assert_eq!(config.tick_period(), Duration::from_nanos(16_666_666));
    }

    #[test]
    fn overrides_from_lookup() {
        let config = ControllerConfig::from_lookup(lookup_from(&[
            ("TETRIS_TICK_HZ", "120"),
            ("TETRIS_QUEUE_CAPACITY", " 64 "),
            ("TETRIS_CLEAR_TICKS", "3"),
            ("TETRIS_SEED", "42"),
        ]));
        assert_eq!(config.tick_hz, 120);
        assert_eq!(config.queue_capacity, 64);
        assert_eq!(config.clear_animation_ticks, 3);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn bad_values_fall_back() {
        let config = ControllerConfig::from_lookup(lookup_from(&[
            ("TETRIS_TICK_HZ", "0"),
            ("TETRIS_QUEUE_CAPACITY", "lots"),
            ("TETRIS_CLEAR_TICKS", "999"),
            ("TETRIS_SEED", "-1"),
        ]));
        assert_eq!(config, ControllerConfig::default());
    }
}
