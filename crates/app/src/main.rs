use std::time::Duration;

use migration::{Migrator, MigratorTrait};
use sea_orm::ConnectOptions;
use settings::Database;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "expense_tracker={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let server_settings = settings.server;
    let db = parse_database(&server_settings.database, server_settings.max_connections).await?;
    let engine = engine::Engine::builder().database(db).build().await?;

    let addr = format!("{}:{}", server_settings.bind, server_settings.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    server::run_with_listener(engine, listener).await?;

    Ok(())
}

/// Connections to an in-memory store are never recycled: closing the last one
/// drops the database along with its schema.
const PINNED_CONNECTION_LIFETIME: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

fn connect_options(config: &Database, max_connections: Option<u32>) -> ConnectOptions {
    let url = match config {
        Database::Memory => String::from("sqlite::memory:"),
        Database::Sqlite(path) => format!("sqlite:{}?mode=rwc", path),
    };

    let mut options = ConnectOptions::new(url);
    options.sqlx_logging(false);
    match (config, max_connections) {
        // Every connection to an in-memory SQLite store sees its own empty database.
        (Database::Memory, _) => {
            options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(PINNED_CONNECTION_LIFETIME)
                .max_lifetime(PINNED_CONNECTION_LIFETIME);
        }
        (Database::Sqlite(_), Some(max)) => {
            options.max_connections(max);
        }
        (Database::Sqlite(_), None) => {}
    }
    options
}

async fn parse_database(
    config: &Database,
    max_connections: Option<u32>,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let database = sea_orm::Database::connect(connect_options(config, max_connections)).await?;
    Migrator::up(&database, None).await?;
    tracing::info!("database ready");
    Ok(database)
}

#[cfg(test)]
mod tests {
    use sea_orm::{ConnectionTrait, Statement};

    use super::*;

    #[test]
    fn memory_store_keeps_its_only_connection() {
        let options = connect_options(&Database::Memory, Some(8));
        assert_eq!(options.get_max_connections(), Some(1));
        assert_eq!(options.get_min_connections(), Some(1));
        assert_eq!(options.get_idle_timeout(), Some(PINNED_CONNECTION_LIFETIME));
        assert_eq!(options.get_max_lifetime(), Some(PINNED_CONNECTION_LIFETIME));
    }

    #[test]
    fn file_store_uses_the_configured_pool() {
        let options = connect_options(&Database::Sqlite("expenses.db".to_string()), Some(4));
        assert_eq!(options.get_url(), "sqlite:expenses.db?mode=rwc");
        assert_eq!(options.get_max_connections(), Some(4));
        assert_eq!(options.get_idle_timeout(), None);
    }

    #[tokio::test]
    async fn memory_store_is_migrated_on_connect() {
        let db = parse_database(&Database::Memory, None).await.unwrap();
        let backend = db.get_database_backend();
        let row = db
            .query_one(Statement::from_string(backend, "SELECT COUNT(*) AS n FROM expenses"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(row.try_get::<i64>("", "n").unwrap(), 0);
    }
}
