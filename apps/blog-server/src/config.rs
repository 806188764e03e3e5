//! Application configuration loaded from environment variables.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use folio_infra::database::DatabaseConfig;

/// Posts per page on the home listing.
pub const DEFAULT_POSTS_PER_PAGE: u64 = 3;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} has invalid value '{value}': {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Deployment environment, read from `APP_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppEnvironment {
    #[default]
    Local,
    Testing,
    Production,
}

impl AppEnvironment {
    pub fn is_production(self) -> bool {
        self == AppEnvironment::Production
    }
}

impl FromStr for AppEnvironment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" | "development" | "dev" => Ok(Self::Local),
            "testing" | "test" => Ok(Self::Testing),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(()),
        }
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AppEnvironment::Local => "local",
            AppEnvironment::Testing => "testing",
            AppEnvironment::Production => "production",
        };
        f.write_str(name)
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: AppEnvironment,
    pub posts_per_page: u64,
    pub database: Option<DatabaseConfig>,
    pub seed_file: Option<PathBuf>,
    /// Emit JSON log lines instead of pretty output.
    pub json_logs: bool,
    pub service_name: String,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let environment = match lookup("APP_ENV") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                key: "APP_ENV",
                value,
                reason: "expected local, testing or production",
            })?,
            None => AppEnvironment::default(),
        };

        let posts_per_page = parse_or(&lookup, "POSTS_PER_PAGE", DEFAULT_POSTS_PER_PAGE)?;
        if posts_per_page == 0 {
            return Err(ConfigError::Invalid {
                key: "POSTS_PER_PAGE",
                value: "0".to_string(),
                reason: "must be at least 1",
            });
        }

        let database = match lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()) {
            Some(url) => Some(DatabaseConfig {
                url,
                max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 10)?,
                min_connections: parse_or(&lookup, "DB_MIN_CONNECTIONS", 1)?,
                connect_timeout: Duration::from_secs(parse_or(
                    &lookup,
                    "DB_CONNECT_TIMEOUT_SECS",
                    10,
                )?),
            }),
            None => None,
        };

        // LOG_FORMAT wins; otherwise production logs JSON.
        let json_logs = match lookup("LOG_FORMAT") {
            Some(format) => match format.trim().to_ascii_lowercase().as_str() {
                "json" => true,
                "pretty" | "text" => false,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "LOG_FORMAT",
                        value: format,
                        reason: "expected json or pretty",
                    });
                }
            },
            None => environment.is_production(),
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or(&lookup, "PORT", 8080)?,
            environment,
            posts_per_page,
            database,
            seed_file: lookup("POSTS_SEED_FILE")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            json_logs,
            service_name: lookup("SERVICE_NAME")
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| "folio".to_string()),
        })
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            key,
            value,
            reason: "not a valid number",
        }),
        None => Ok(default),
    }
}
