use std::str::FromStr;

use rocket::*;
use sqlx::sqlite::SqliteConnectOptions;

use database::DatabasePool;

mod database;
mod score;

#[launch]
async fn rocket() -> _ {
    // Open the database and bring the schema up to date before serving
    // anything. Both are fatal on failure.
    dotenv::dotenv().ok();
    let database_url =
        dotenv::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://blinkmaze.sqlite".to_owned());

    let options = SqliteConnectOptions::from_str(&database_url)
        .expect("DATABASE_URL is not a valid sqlite connection string")
        .create_if_missing(true);
    let database_pool = DatabasePool::connect_with(options)
        .await
        .expect("failed to open the database");

    database::init_database(&database_pool)
        .await
        .expect("failed to initialize the database schema");

    build_rocket(database_pool)
}

fn build_rocket(database_pool: DatabasePool) -> Rocket<Build> {
    rocket::build()
        .mount(
            "/",
            routes![
                index,
                database::requests::submit,
                database::requests::leaderboard
            ],
        )
        .manage::<DatabasePool>(database_pool)
}

#[get("/")]
fn index() -> &'static str {
    "This is the Blink Maze leaderboard server!"
}
