// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is read from the environment at startup, after loading an
//! optional `.env` file from the working directory.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `DATABASE_URL` | PostgreSQL connection URL | Built from `DB_*` |
//! | `DB_HOST` | Database host | Required without `DATABASE_URL` |
//! | `DB_PORT` | Database port | `5432` |
//! | `DB_USER` | Database user | Required without `DATABASE_URL` |
//! | `DB_PASSWORD` | Database password, used verbatim | None |
//! | `DB_NAME` | Database name | Required without `DATABASE_URL` |
//! | `SSL_MODE` | libpq `sslmode` | `disable` |
//! | `DB_MAX_CONNECTIONS` | Pool size | `10` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `SERVER_PORT` | Server bind port | `8080` |
//! | `ACCESS_TOKEN_SECRET` | HMAC secret for bearer tokens | Required |
//! | `TOKEN_TTL` | Lifetime of minted tokens, seconds | `86400` |
//! | `JWT_LEEWAY_SECS` | Clock skew tolerance, seconds | `60` |
//! | `REQUEST_TIMEOUT_SECS` | Per-request timeout, seconds | `30` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::{net::SocketAddr, str::FromStr, time::Duration};

use sqlx::postgres::{PgConnectOptions, PgSslMode};

pub const DATABASE_URL_ENV: &str = "DATABASE_URL";
pub const DB_HOST_ENV: &str = "DB_HOST";
pub const DB_PORT_ENV: &str = "DB_PORT";
pub const DB_USER_ENV: &str = "DB_USER";
pub const DB_PASSWORD_ENV: &str = "DB_PASSWORD";
pub const DB_NAME_ENV: &str = "DB_NAME";
pub const SSL_MODE_ENV: &str = "SSL_MODE";
pub const DB_MAX_CONNECTIONS_ENV: &str = "DB_MAX_CONNECTIONS";
pub const HOST_ENV: &str = "HOST";
pub const SERVER_PORT_ENV: &str = "SERVER_PORT";

/// Environment variable name for the token signing secret.
///
/// Shared with the identity service that issues tokens. Never logged.
pub const ACCESS_TOKEN_SECRET_ENV: &str = "ACCESS_TOKEN_SECRET";
pub const TOKEN_TTL_ENV: &str = "TOKEN_TTL";
pub const JWT_LEEWAY_ENV: &str = "JWT_LEEWAY_SECS";
pub const REQUEST_TIMEOUT_ENV: &str = "REQUEST_TIMEOUT_SECS";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Default tracing filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// Configuration errors reported at startup.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    Missing(&'static str),
    #[error("{name} has invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
    /// The value may hold credentials, so only the parser's reason is kept.
    #[error("{name} is malformed: {reason}")]
    Malformed { name: &'static str, reason: String },
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Signing secret and lifetime for access tokens.
#[derive(Clone)]
pub struct TokenSettings {
    pub secret: String,
    /// Lifetime of tokens minted by `mint-token`.
    pub ttl_secs: i64,
}

impl std::fmt::Debug for TokenSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSettings")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

impl TokenSettings {
    /// Load `.env` (if present) and read the token variables only.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup(ACCESS_TOKEN_SECRET_ENV)
            .filter(|secret| !secret.is_empty())
            .ok_or(ConfigError::Missing(ACCESS_TOKEN_SECRET_ENV))?;

        Ok(Self {
            secret,
            ttl_secs: parse_or(&lookup, TOKEN_TTL_ENV, 86_400)?,
        })
    }
}

/// Service configuration.
#[derive(Clone)]
pub struct Config {
    pub database: PgConnectOptions,
    pub db_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub token: TokenSettings,
    pub jwt_leeway_secs: u64,
    pub request_timeout: Duration,
    pub log_format: LogFormat,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("db_host", &self.database.get_host())
            .field("db_port", &self.database.get_port())
            .field("db_name", &self.database.get_database())
            .field("db_max_connections", &self.db_max_connections)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("token", &self.token)
            .field("jwt_leeway_secs", &self.jwt_leeway_secs)
            .field("request_timeout", &self.request_timeout)
            .field("log_format", &self.log_format)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Load `.env` (if present) and read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is normal in containers.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database = match lookup(DATABASE_URL_ENV) {
            Some(url) => {
                PgConnectOptions::from_str(&url).map_err(|e| ConfigError::Malformed {
                    name: DATABASE_URL_ENV,
                    reason: e.to_string(),
                })?
            }
            None => database_options_from_parts(&lookup)?,
        };

        let token = TokenSettings::from_lookup(&lookup)?;

        let log_format = match lookup(LOG_FORMAT_ENV).as_deref() {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: LOG_FORMAT_ENV,
                    value: other.to_string(),
                })
            }
        };

        Ok(Self {
            database,
            db_max_connections: parse_or(&lookup, DB_MAX_CONNECTIONS_ENV, 10)?,
            host: lookup(HOST_ENV).unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, SERVER_PORT_ENV, 8080)?,
            token,
            jwt_leeway_secs: parse_or(&lookup, JWT_LEEWAY_ENV, 60)?,
            request_timeout: Duration::from_secs(parse_or(&lookup, REQUEST_TIMEOUT_ENV, 30)?),
            log_format,
        })
    }

    /// Socket address to bind.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse().map_err(|_| ConfigError::Invalid {
            name: HOST_ENV,
            value: addr,
        })
    }
}

/// Connection options from the `DB_*` variables. Values are passed through
/// as-is, so passwords need no URL escaping.
fn database_options_from_parts<F>(lookup: &F) -> Result<PgConnectOptions, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let host = lookup(DB_HOST_ENV).ok_or(ConfigError::Missing(DB_HOST_ENV))?;
    let user = lookup(DB_USER_ENV).ok_or(ConfigError::Missing(DB_USER_ENV))?;
    let name = lookup(DB_NAME_ENV).ok_or(ConfigError::Missing(DB_NAME_ENV))?;
    let port: u16 = parse_or(lookup, DB_PORT_ENV, 5432)?;

    let ssl_mode = match lookup(SSL_MODE_ENV) {
        None => PgSslMode::Disable,
        Some(value) => PgSslMode::from_str(&value).map_err(|_| ConfigError::Invalid {
            name: SSL_MODE_ENV,
            value,
        })?,
    };

    let mut options = PgConnectOptions::new()
        .host(&host)
        .port(port)
        .username(&user)
        .database(&name)
        .ssl_mode(ssl_mode);
    if let Some(password) = lookup(DB_PASSWORD_ENV) {
        options = options.password(&password);
    }

    Ok(options)
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}
