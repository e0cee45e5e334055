use rocket::serde::{Deserialize, Serialize};

use super::RequestError;

pub const NAME_MAX_CHARS: usize = 18;
pub const FALLBACK_NAME: &str = "Guest";

pub const MIN_TIME_MS: i64 = 400;
pub const MAX_TIME_MS: i64 = 30 * 60 * 1000;
pub const MAX_BLINKS: i64 = 9999;
pub const MAX_MOVES: i64 = 999_999;
pub const MAX_INVALID_MOVES: i64 = 999_999;

pub const DEFAULT_LIMIT: i64 = 20;
pub const MAX_LIMIT: i64 = 50;

/// Game variant. Each (mode, seed) pair is its own leaderboard partition.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum Mode {
    Daily,
    Random,
}

impl Mode {
    /// Anything that is not exactly `"random"` is the daily puzzle.
    /// Coercion, never an error; matches the client's loose mode field.
    pub fn coerce(raw: Option<&str>) -> Self {
        match raw {
            Some("random") => Self::Random,
            _ => Self::Daily,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Random => "random",
        }
    }
}

/// Raw submission body as sent by the client. Absent fields fall back to
/// the historical defaults; present fields must carry the right JSON type.
#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
#[serde(crate = "rocket::serde")]
pub struct Submission {
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub seed: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "timeMs", default)]
    pub time_ms: Option<i64>,
    #[serde(default)]
    pub blinks: Option<i64>,
    #[serde(default)]
    pub moves: Option<i64>,
    #[serde(rename = "invalidMoves", default)]
    pub invalid_moves: Option<i64>,
}

/// A submission that passed every range check and is ready to persist.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ValidSubmission {
    pub mode: Mode,
    pub seed: String,
    pub name: String,
    pub time_ms: i64,
    pub blinks: i64,
    pub moves: i64,
    pub invalid_moves: i64,
}

impl Submission {
    /// Normalizes and range-checks the raw body. Check order (and therefore
    /// which error code wins when several fields are bad) is fixed.
    pub fn validate(self) -> Result<ValidSubmission, RequestError> {
        let mode = Mode::coerce(self.mode.as_deref());

        let seed = self.seed.unwrap_or_default();
        if seed.is_empty() {
            return Err(RequestError::SeedRequired);
        }

        let name = sanitize_name(self.name.as_deref().unwrap_or(""));

        let time_ms = self.time_ms.unwrap_or(0);
        let blinks = self.blinks.unwrap_or(0);
        let moves = self.moves.unwrap_or(0);
        let invalid_moves = self.invalid_moves.unwrap_or(0);

        if time_ms <= 0 {
            return Err(RequestError::InvalidTime);
        }
        if !(MIN_TIME_MS..=MAX_TIME_MS).contains(&time_ms) {
            return Err(RequestError::TimeOutOfRange);
        }
        if !(0..=MAX_BLINKS).contains(&blinks) {
            return Err(RequestError::InvalidBlinks);
        }
        if !(0..=MAX_MOVES).contains(&moves) {
            return Err(RequestError::InvalidMoves);
        }
        if !(0..=MAX_INVALID_MOVES).contains(&invalid_moves) {
            return Err(RequestError::InvalidInvalidMoves);
        }

        Ok(ValidSubmission {
            mode,
            seed,
            name,
            time_ms,
            blinks,
            moves,
            invalid_moves,
        })
    }
}

/// Trims, keeps only letters, digits, `_`, space, `.` and `-` (any script),
/// truncates to [`NAME_MAX_CHARS`], and falls back to [`FALLBACK_NAME`]
/// when nothing survives.
pub fn sanitize_name(raw: &str) -> String {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '_' | ' ' | '.' | '-'))
        .take(NAME_MAX_CHARS)
        .collect();
    if cleaned.is_empty() {
        FALLBACK_NAME.to_owned()
    } else {
        cleaned
    }
}

/// Clamps a requested leaderboard page size into [1, MAX_LIMIT],
/// defaulting when the parameter is absent or unparsable.
pub fn clamp_limit(requested: Option<i64>) -> i64 {
    requested.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

/// One leaderboard row as returned to the client.
#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
#[serde(crate = "rocket::serde")]
pub struct ScoreRow {
    pub name: String,
    pub score: i64,
    pub time_ms: i64,
    pub blinks: i64,
    pub moves: i64,
    pub invalid_moves: i64,
    pub created_at: i64,
}
