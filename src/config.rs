use clap::{Args, Parser, ValueEnum};
use std::time::Duration;

#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Config {
    #[command(flatten)]
    pub database: DatabaseConfig,

    #[command(flatten)]
    pub server: ServerConfig,

    #[command(flatten)]
    pub telemetry: TelemetryConfig,
}

#[derive(Clone, Debug, Args)]
pub struct DatabaseConfig {
    /// MongoDB connection string
    #[arg(long = "database-url", env = "USERS_DATABASE_URL", default_value = "mongodb://localhost:27017")]
    pub url: String,

    /// Database holding the users collection
    #[arg(long = "database-name", env = "USERS_DATABASE_NAME", default_value = "users_server")]
    pub name: String,

    /// Collection that stores user documents
    #[arg(long, env = "USERS_COLLECTION", default_value = "users")]
    pub collection: String,

    /// Upper bound for a single read or write
    #[arg(long, env = "USERS_REQUEST_TIMEOUT_SECS", default_value_t = 5)]
    pub request_timeout_secs: u64,

    /// Upper bound for the connectivity check at startup
    #[arg(long, env = "USERS_CONNECT_TIMEOUT_SECS", default_value_t = 10)]
    pub connect_timeout_secs: u64,
}

impl DatabaseConfig {
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

#[derive(Clone, Debug, Args)]
pub struct ServerConfig {
    /// Host to listen on
    #[arg(long, env = "USERS_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "USERS_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Port for the health probes
    #[arg(long, env = "USERS_MGMT_PORT", default_value_t = 9090)]
    pub mgmt_port: u16,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Debug, Args)]
pub struct TelemetryConfig {
    /// Log output format
    #[arg(long, env = "USERS_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl Config {
    #[must_use]
    pub fn load() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["users-server"]).unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.collection, "users");
        assert_eq!(config.database.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.database.connect_timeout(), Duration::from_secs(10));
        assert_eq!(config.telemetry.log_format, LogFormat::Text);
    }

    #[test]
    fn test_flags_override_defaults() {
        let config = Config::try_parse_from([
            "users-server",
            "--database-url",
            "mongodb://db.internal:27017",
            "--port",
            "3000",
            "--log-format",
            "json",
        ])
        .unwrap();

        assert_eq!(config.database.url, "mongodb://db.internal:27017");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_format, LogFormat::Json);
    }
}
