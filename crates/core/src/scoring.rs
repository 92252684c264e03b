//! Scoring module - points, levels and drop speed
//!
//! Every lock is worth one point; clearing `n` rows with that lock adds
//! `n * n * 10` on top. The level advances every ten lines and each level
//! shortens the drop threshold by five ticks.

use crate::types::{DROP_MAX, DROP_STEP_PER_LEVEL, LINES_PER_LEVEL};

/// Points for a lock that clears `lines` rows at once
pub fn lock_score(lines: u32) -> u32 {
    lines * lines * 10 + 1
}

/// Level for a running line total (levels start at 1)
pub fn level_for_lines(lines_cleared: u32) -> u32 {
    lines_cleared / LINES_PER_LEVEL + 1
}

/// Ticks of dwell before an automatic one-row fall
pub fn drop_threshold(level: u32) -> u32 {
    DROP_MAX.saturating_sub(level.saturating_mul(DROP_STEP_PER_LEVEL))
}
