//! Runtime configuration, read from the environment at startup.
//!
//! A `.env` file in the working directory is honoured for local development.

use chrono::Duration;
use std::net::SocketAddr;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub database_url: String,
    pub max_connections: u32,
    pub jwt_secret: String,
    pub access_token_ttl: Duration,
    pub refresh_token_ttl: Duration,
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key/value source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| lookup(key).ok_or_else(|| ConfigError::MissingVar(key.to_owned()));

        let bind_address: SocketAddr = parse_or(&lookup, "BIND_ADDRESS", "0.0.0.0:3000".parse().ok())?;
        let database_url = required("DATABASE_URL")?;
        let max_connections: u32 = parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", Some(10))?;

        let jwt_secret = required("JWT_SECRET")?;
        if jwt_secret.is_empty() {
            return Err(ConfigError::InvalidValue(
                "JWT_SECRET".to_owned(),
                "must not be empty".to_owned(),
            ));
        }

        let access_days: i64 = parse_or(&lookup, "ACCESS_TOKEN_TTL_DAYS", Some(10))?;
        let refresh_days: i64 = parse_or(&lookup, "REFRESH_TOKEN_TTL_DAYS", Some(30))?;
        for (key, days) in [
            ("ACCESS_TOKEN_TTL_DAYS", access_days),
            ("REFRESH_TOKEN_TTL_DAYS", refresh_days),
        ] {
            if days <= 0 {
                return Err(ConfigError::InvalidValue(
                    key.to_owned(),
                    format!("'{days}' is not a positive number of days"),
                ));
            }
        }

        let run_migrations: bool = parse_or(&lookup, "RUN_MIGRATIONS", Some(true))?;

        Ok(Self {
            bind_address,
            database_url,
            max_connections,
            jwt_secret,
            access_token_ttl: Duration::days(access_days),
            refresh_token_ttl: Duration::days(refresh_days),
            run_migrations,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: Option<T>) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidValue(key.to_owned(), e.to_string())),
        None => default.ok_or_else(|| ConfigError::MissingVar(key.to_owned())),
    }
}
