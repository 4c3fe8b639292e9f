//! Stand-alone migrator for the expense tracker schema.
//!
//! `DATABASE_URL` selects the store, the first argument selects the action.

use sea_orm::Database;
use sea_orm_migration::prelude::*;

const DEFAULT_DATABASE_URL: &str = "sqlite:./expense_tracker.db?mode=rwc";
const USAGE: &str = "Usage: cargo run -p migration -- [up|down|refresh|fresh|status]";

enum Action {
    Up,
    Down,
    Refresh,
    Fresh,
    Status,
}

impl Action {
    fn parse(value: Option<&str>) -> Option<Self> {
        match value.unwrap_or("up") {
            "up" => Some(Self::Up),
            "down" => Some(Self::Down),
            "refresh" => Some(Self::Refresh),
            "fresh" => Some(Self::Fresh),
            "status" => Some(Self::Status),
            _ => None,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let arg = std::env::args().nth(1);
    let Some(action) = Action::parse(arg.as_deref()) else {
        eprintln!("{USAGE}");
        std::process::exit(2);
    };

    let db_url = std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
    let db = Database::connect(&db_url).await?;

    match action {
        Action::Up => migration::Migrator::up(&db, None).await?,
        // Roll back every applied migration, not only the latest one.
        Action::Down => migration::Migrator::down(&db, None).await?,
        Action::Refresh => migration::Migrator::refresh(&db).await?,
        Action::Fresh => migration::Migrator::fresh(&db).await?,
        Action::Status => migration::Migrator::status(&db).await?,
    }

    Ok(())
}
