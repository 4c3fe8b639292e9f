//! Handles settings for the application.
//!
//! Values are layered: built-in defaults, then the TOML file (default
//! `config/server.toml`, see `--config`), then `EXPENSE_TRACKER__*`
//! environment variables (e.g. `EXPENSE_TRACKER__SERVER__PORT=8080`).
use clap::Parser;
use config::{Config, ConfigError, Environment, File, builder::DefaultState};
use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "config/server.toml";

#[derive(Debug, Parser)]
#[command(name = "expense_tracker", version)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long, env = "EXPENSE_TRACKER_CONFIG")]
    config: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct App {
    pub level: String,
}

#[derive(Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub database: Database,
    pub bind: String,
    pub port: u16,
    /// Pool size; SQLite connections default to a single one.
    pub max_connections: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Server,
}

fn defaults() -> Result<config::ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("app.level", "info")?
        .set_default("server.bind", "127.0.0.1")?
        .set_default("server.port", 5000)?
        .set_default("server.database", "memory")
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let args = Args::parse();
        let path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);

        defaults()?
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("EXPENSE_TRACKER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    fn from_toml(toml: &str) -> Settings {
        defaults()
            .unwrap()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn defaults_serve_an_in_memory_store() {
        let settings = from_toml("");
        assert_eq!(settings.app.level, "info");
        assert_eq!(settings.server.bind, "127.0.0.1");
        assert_eq!(settings.server.port, 5000);
        assert_eq!(settings.server.database, Database::Memory);
        assert_eq!(settings.server.max_connections, None);
    }

    #[test]
    fn file_overrides_defaults() {
        let settings = from_toml(
            r#"
            [app]
            level = "debug"

            [server]
            port = 8080
            max_connections = 4
            database = { sqlite = "expenses.db" }
            "#,
        );
        assert_eq!(settings.app.level, "debug");
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.server.max_connections, Some(4));
        assert_eq!(
            settings.server.database,
            Database::Sqlite("expenses.db".to_string())
        );
    }
}
