use rocket::serde::{Deserialize, Serialize};

/// A submission or query rejected before touching storage.
/// Surfaced to the client as `{ "ok": false, "error": "<code>" }`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestError {
    SeedRequired,
    InvalidTime,
    TimeOutOfRange,
    InvalidBlinks,
    InvalidMoves,
    InvalidInvalidMoves,
}

impl RequestError {
    /// Stable wire code. Part of the client contract, like the score
    /// constants.
    pub fn code(self) -> &'static str {
        match self {
            Self::SeedRequired => "seed_required",
            Self::InvalidTime => "invalid_time",
            Self::TimeOutOfRange => "time_out_of_range",
            Self::InvalidBlinks => "invalid_blinks",
            Self::InvalidMoves => "invalid_moves",
            Self::InvalidInvalidMoves => "invalid_invalidMoves",
        }
    }
}

impl std::error::Error for RequestError {}

impl std::fmt::Display for RequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SeedRequired => write!(f, "a non-empty seed is required"),
            Self::InvalidTime => write!(f, "elapsed time must be positive"),
            Self::TimeOutOfRange => write!(f, "elapsed time is outside the accepted range"),
            Self::InvalidBlinks => write!(f, "blink count is outside the accepted range"),
            Self::InvalidMoves => write!(f, "move count is outside the accepted range"),
            Self::InvalidInvalidMoves => {
                write!(f, "invalid-move count is outside the accepted range")
            }
        }
    }
}

/// JSON body for every rejected request.
#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
#[serde(crate = "rocket::serde")]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,
}

impl From<RequestError> for ErrorResponse {
    fn from(error: RequestError) -> Self {
        Self {
            ok: false,
            error: error.code().to_owned(),
        }
    }
}

/// Validation failures are answered in-band; only storage failures escape
/// as a 500 through `rocket::response::Debug`.
pub type RequestResult<T, E = rocket::response::Debug<sqlx::Error>> = std::result::Result<T, E>;
