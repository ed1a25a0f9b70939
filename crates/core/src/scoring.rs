//! Scoring module - line-clear points, level and gravity progression
//!
//! Every cleared line is worth a flat 50 points. The level is derived from the
//! cumulative line count (one level per 10 lines, starting at 1) and the
//! gravity interval is recomputed from the level each time, never decremented
//! in place.

use crate::types::{
    BASE_FALL_INTERVAL_MS, FALL_INTERVAL_STEP_MS, LINES_PER_LEVEL, MIN_FALL_INTERVAL_MS,
    POINTS_PER_LINE, START_LEVEL,
};

/// Outcome of scoring a single lock event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Points awarded for this event
    pub points: u32,
    /// Cumulative lines after this event
    pub total_lines: u32,
    pub level: u32,
    pub fall_interval_ms: u32,
    pub level_up: bool,
}

/// Points for clearing `lines` rows in one lock
pub fn line_clear_points(lines: u32) -> u32 {
    lines.saturating_mul(POINTS_PER_LINE)
}

/// Level for a cumulative line count
pub fn level_for_lines(total_lines: u32) -> u32 {
    START_LEVEL + total_lines / LINES_PER_LEVEL
}

/// Gravity interval for a level, clamped at `MIN_FALL_INTERVAL_MS`
pub fn fall_interval_ms(level: u32) -> u32 {
    let steps = level.saturating_sub(START_LEVEL);
    BASE_FALL_INTERVAL_MS
        .saturating_sub(steps.saturating_mul(FALL_INTERVAL_STEP_MS))
        .max(MIN_FALL_INTERVAL_MS)
}

/// Score one lock event given the cumulative line count before it
pub fn score_lock(lines_cleared: u32, lines_before: u32) -> ScoreResult {
    let total_lines = lines_before.saturating_add(lines_cleared);
    let level = level_for_lines(total_lines);
    ScoreResult {
        points: line_clear_points(lines_cleared),
        total_lines,
        level,
        fall_interval_ms: fall_interval_ms(level),
        level_up: level > level_for_lines(lines_before),
    }
}
