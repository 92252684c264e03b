//! RNG module - injectable block id sources
//!
//! New pieces draw a block id from a [`BlockSource`]. The id is kept on every
//! cell the piece writes and its color (and therefore its shape) is derived
//! as `id mod 7 + 1`, so a uniform id stream yields uniform shapes.
//!
//! [`SimpleRng`] is the default source. [`ScriptedSource`] replays a fixed
//! sequence of shapes for deterministic tests and demos.

use crate::types::{PieceKind, NUM_COLORS};

/// Anything that can hand out block ids for newly spawned pieces
pub trait BlockSource: Send {
    fn next_block_id(&mut self) -> u32;
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Seed from the wall clock, for normal play
    pub fn from_time() -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
            .unwrap_or(1);
        Self::new(nanos)
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are the well-mixed ones
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Current internal state
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl BlockSource for SimpleRng {
    fn next_block_id(&mut self) -> u32 {
        // Keep the id compatible with `color = id mod 7 + 1` while drawing the
        // shape from the high bits.
        let shape = self.next_range(NUM_COLORS as u32);
        let serial = self.next_u32() >> 4;
        serial - serial % NUM_COLORS as u32 + shape
    }
}

/// Replays a fixed cycle of shapes
///
/// Each call returns a fresh id (a running serial) whose derived color is the
/// next shape in the cycle.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    kinds: Vec<PieceKind>,
    index: usize,
    serial: u32,
}

impl ScriptedSource {
    pub fn new(kinds: impl Into<Vec<PieceKind>>) -> Self {
        let mut kinds = kinds.into();
        if kinds.is_empty() {
            kinds.push(PieceKind::I);
        }
        Self {
            kinds,
            index: 0,
            serial: 0,
        }
    }

    /// Same shape forever
    pub fn repeat(kind: PieceKind) -> Self {
        Self::new(vec![kind])
    }
}

impl BlockSource for ScriptedSource {
    fn next_block_id(&mut self) -> u32 {
        let kind = self.kinds[self.index];
        self.index = (self.index + 1) % self.kinds.len();
        self.serial = self.serial.wrapping_add(1);
        self.serial
            .wrapping_mul(NUM_COLORS as u32)
            .wrapping_add(kind.id() as u32 - 1)
    }
}
