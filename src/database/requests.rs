use std::time::{SystemTime, UNIX_EPOCH};

use rocket::serde::{Deserialize, Serialize};

use super::*;
use crate::score::compute_score;

/// JSON body for an accepted submission.
#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
#[serde(crate = "rocket::serde")]
pub struct SubmitReceipt {
    pub ok: bool,
    pub score: i64,
    pub rank: i64,
    pub id: ScoreId,
}

#[derive(Clone, Serialize, PartialEq, Debug)]
#[serde(crate = "rocket::serde", untagged)]
pub enum SubmitResponse {
    Accepted(SubmitReceipt),
    Rejected(ErrorResponse),
}

/// JSON body for a leaderboard query.
#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
#[serde(crate = "rocket::serde")]
pub struct LeaderboardPage {
    pub ok: bool,
    pub mode: Mode,
    pub seed: String,
    pub rows: Vec<ScoreRow>,
}

#[derive(Clone, Serialize, PartialEq, Debug)]
#[serde(crate = "rocket::serde", untagged)]
pub enum LeaderboardResponse {
    Page(LeaderboardPage),
    Rejected(ErrorResponse),
}

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}

/// Validates a submission, persists it, and reports the score and the
/// 1-based rank within its (mode, seed) partition.
///
/// The rank is counted in a second query after the insert. A concurrent
/// submission landing between the two can make the reported rank stale
/// immediately; callers accept that.
#[post("/submit", format = "json", data = "<submission>")]
pub async fn submit(
    submission: Json<Submission>,
    database: &State<DatabasePool>,
) -> RequestResult<Json<SubmitResponse>> {
    let valid = match submission.0.validate() {
        Ok(valid) => valid,
        Err(error) => return Ok(Json(SubmitResponse::Rejected(error.into()))),
    };

    let score = compute_score(valid.time_ms, valid.blinks, valid.moves, valid.invalid_moves);

    let id: ScoreId = sqlx::query_scalar(
        "INSERT INTO scores \
            (mode, seed, name, score, time_ms, blinks, moves, invalid_moves, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) \
         RETURNING id",
    )
    .bind(valid.mode.as_str())
    .bind(&valid.seed)
    .bind(&valid.name)
    .bind(score)
    .bind(valid.time_ms)
    .bind(valid.blinks)
    .bind(valid.moves)
    .bind(valid.invalid_moves)
    .bind(now_millis())
    .fetch_one(database.inner())
    .await?;

    // Strictly-better predicate against the row's own values, so the row
    // never counts itself.
    let better: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM scores \
         WHERE mode = ? AND seed = ? \
           AND (score > ? OR (score = ? AND time_ms < ?))",
    )
    .bind(valid.mode.as_str())
    .bind(&valid.seed)
    .bind(score)
    .bind(score)
    .bind(valid.time_ms)
    .fetch_one(database.inner())
    .await?;

    Ok(Json(SubmitResponse::Accepted(SubmitReceipt {
        ok: true,
        score,
        rank: better + 1,
        id,
    })))
}

/// Fetches the top rows of one (mode, seed) partition, best first.
#[get("/leaderboard?<mode>&<seed>&<limit>")]
pub async fn leaderboard(
    mode: Option<&str>,
    seed: Option<&str>,
    limit: Option<i64>,
    database: &State<DatabasePool>,
) -> RequestResult<Json<LeaderboardResponse>> {
    let mode = Mode::coerce(mode);
    let limit = clamp_limit(limit);

    let seed = seed.unwrap_or_default();
    if seed.is_empty() {
        return Ok(Json(LeaderboardResponse::Rejected(
            RequestError::SeedRequired.into(),
        )));
    }

    let rows = sqlx::query(
        "SELECT name, score, time_ms, blinks, moves, invalid_moves, created_at \
         FROM scores \
         WHERE mode = ? AND seed = ? \
         ORDER BY score DESC, time_ms ASC \
         LIMIT ?",
    )
    .bind(mode.as_str())
    .bind(seed)
    .bind(limit)
    .fetch_all(database.inner())
    .await?;

    let rows = rows
        .into_iter()
        .map(|row| {
            Ok(ScoreRow {
                name: row.try_get(0)?,
                score: row.try_get(1)?,
                time_ms: row.try_get(2)?,
                blinks: row.try_get(3)?,
                moves: row.try_get(4)?,
                invalid_moves: row.try_get(5)?,
                created_at: row.try_get(6)?,
            })
        })
        .collect::<Result<Vec<ScoreRow>, sqlx::Error>>()?;

    Ok(Json(LeaderboardResponse::Page(LeaderboardPage {
        ok: true,
        mode,
        seed: seed.to_owned(),
        rows,
    })))
}
