//! Scoring module - line-clear points and level progression
//!
//! Rules:
//! - A lock that clears `n` rows scores `LINE_SCORES[n] * level`, using the
//!   level in effect before this lock's level-up check.
//! - After a clearing lock, once total lines reach `level * 10` the level goes
//!   up by one (at most once per lock) and gravity speeds up by 100ms, never
//!   below the 100ms floor.

use crate::types::{
    DROP_INTERVAL_FLOOR_MS, DROP_INTERVAL_STEP_MS, LINES_PER_LEVEL, LINE_SCORES,
};

/// Outcome of applying one lock's line clears to the running totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub drop_interval_ms: u32,
    /// Points awarded by this lock.
    pub gained: u32,
    pub leveled_up: bool,
}

/// Calculate line clear score
/// rows: number of rows cleared at once (1-4)
/// level: current level (1-based)
pub fn line_clear_score(rows: usize, level: u32) -> u32 {
    LINE_SCORES
        .get(rows)
        .copied()
        .unwrap_or(0)
        .saturating_mul(level)
}

/// Whether the accumulated line count has reached the next level threshold.
pub fn reaches_next_level(total_lines: u32, level: u32) -> bool {
    total_lines >= level.saturating_mul(LINES_PER_LEVEL)
}

/// Gravity interval after one level-up.
pub fn next_drop_interval_ms(current_ms: u32) -> u32 {
    current_ms
        .saturating_sub(DROP_INTERVAL_STEP_MS)
        .max(DROP_INTERVAL_FLOOR_MS)
}

/// Fold one lock's cleared row count into the running totals.
pub fn apply_line_clear(
    rows: usize,
    score: u32,
    level: u32,
    lines: u32,
    drop_interval_ms: u32,
) -> Progress {
    let mut progress = Progress {
        score,
        level,
        lines,
        drop_interval_ms,
        gained: 0,
        leveled_up: false,
    };
    if rows == 0 {
        return progress;
    }

    progress.gained = line_clear_score(rows, level);
    progress.score = score.saturating_add(progress.gained);
    progress.lines = lines.saturating_add(rows as u32);

    if reaches_next_level(progress.lines, level) {
        progress.level = level + 1;
        progress.drop_interval_ms = next_drop_interval_ms(drop_interval_ms);
        progress.leveled_up = true;
    }

    progress
}
