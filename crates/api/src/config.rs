//! Server settings read from the environment.
//!
//! | Variable | Default |
//! |---|---|
//! | `API_HOST` | `0.0.0.0` |
//! | `API_PORT` | `3000` |
//! | `DATABASE_URL` | required |
//! | `DATABASE_MAX_CONNECTIONS` | `5` |
//! | `LOG_LEVEL` | `info` |
//! | `API_CORS_ORIGINS` | unset, comma separated |
//! | `API_REQUEST_TIMEOUT_SECONDS` | `30` |

use eyre::{Result, WrapErr};
use std::{env, str::FromStr};
use tracing::Level;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub database_max_connections: u32,
    pub log_level: Level,
    /// `None` leaves CORS off entirely
    pub cors_origins: Option<Vec<String>>,
    /// Seconds before a request is answered with 408
    pub request_timeout: u64,
}

/// Reads `name`, falling back to `default` when unset.
fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Parses `name` (or `default`), naming the variable on failure.
fn parse_var<T>(name: &str, default: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    var_or(name, default)
        .parse()
        .wrap_err_with(|| format!("Invalid {name} value"))
}

impl ApiConfig {
    /// Fails when `DATABASE_URL` is missing or a numeric setting does not parse.
    pub fn from_env() -> Result<Self> {
        let database_url = env::var("DATABASE_URL")
            .wrap_err("DATABASE_URL environment variable must be set")?;

        // unknown levels fall back to info
        let log_level = Level::from_str(&var_or("LOG_LEVEL", "info")).unwrap_or(Level::INFO);

        let cors_origins = env::var("API_CORS_ORIGINS").ok().map(|origins| {
            origins
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(String::from)
                .collect()
        });

        Ok(Self {
            host: var_or("API_HOST", "0.0.0.0"),
            port: parse_var("API_PORT", "3000")?,
            database_url,
            database_max_connections: parse_var("DATABASE_MAX_CONNECTIONS", "5")?,
            log_level,
            cors_origins,
            request_timeout: parse_var("API_REQUEST_TIMEOUT_SECONDS", "30").unwrap_or(30),
        })
    }

    /// `host:port`, ready for `TcpListener::bind`.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
