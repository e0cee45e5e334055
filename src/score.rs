//! Score formula for a single Blink Maze run.
//!
//! IMPORTANT: these constants are a contract shared with the client-side
//! score preview. Changing any of them is a breaking change, not tuning.

pub const SCORE_BASE: i64 = 6000;
pub const TIME_PENALTY_PER_SEC: i64 = 10;
pub const BLINK_PENALTY: i64 = 160;
pub const MOVE_PENALTY: i64 = 4;
pub const INVALID_PENALTY: i64 = 14;

/// Maps raw play telemetry to the final score.
/// Deterministic, never negative. Whole elapsed seconds only (floor).
pub fn compute_score(time_ms: i64, blinks: i64, moves: i64, invalid_moves: i64) -> i64 {
    let seconds = time_ms.max(0) / 1000;
    let score = SCORE_BASE
        - seconds * TIME_PENALTY_PER_SEC
        - blinks * BLINK_PENALTY
        - moves * MOVE_PENALTY
        - invalid_moves * INVALID_PENALTY;
    score.max(0)
}
