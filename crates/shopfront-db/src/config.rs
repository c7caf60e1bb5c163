//! Database configuration loaded from environment variables.
//!
//! | Variable                          | Default          |
//! |-----------------------------------|------------------|
//! | `SHOPFRONT_DB_PATH`               | `./shopfront.db` |
//! | `SHOPFRONT_DB_MAX_CONNECTIONS`    | `5`              |
//! | `SHOPFRONT_DB_RUN_MIGRATIONS`     | `true`           |
//! | `SHOPFRONT_COUPON_CODE_MATCHING`  | `exact`          |

use std::env;

use shopfront_core::CodeMatching;

use crate::pool::DbConfig;

pub const ENV_DB_PATH: &str = "SHOPFRONT_DB_PATH";
pub const ENV_DB_MAX_CONNECTIONS: &str = "SHOPFRONT_DB_MAX_CONNECTIONS";
pub const ENV_DB_RUN_MIGRATIONS: &str = "SHOPFRONT_DB_RUN_MIGRATIONS";
pub const ENV_CODE_MATCHING: &str = "SHOPFRONT_COUPON_CODE_MATCHING";

const DEFAULT_DB_PATH: &str = "./shopfront.db";

impl DbConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = lookup(ENV_DB_PATH).unwrap_or_else(|| DEFAULT_DB_PATH.to_string());
        if path.trim().is_empty() {
            return Err(ConfigError::MissingRequired(ENV_DB_PATH.to_string()));
        }

        let mut config = DbConfig::new(path);

        if let Some(v) = lookup(ENV_DB_MAX_CONNECTIONS) {
            let max: u32 = v
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue(ENV_DB_MAX_CONNECTIONS.to_string()))?;
            if max == 0 {
                return Err(ConfigError::InvalidValue(ENV_DB_MAX_CONNECTIONS.to_string()));
            }
            let min = config.min_connections.min(max);
            config = config.max_connections(max).min_connections(min);
        }

        if let Some(v) = lookup(ENV_DB_RUN_MIGRATIONS) {
            let run: bool = v
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue(ENV_DB_RUN_MIGRATIONS.to_string()))?;
            config = config.run_migrations(run);
        }

        if let Some(v) = lookup(ENV_CODE_MATCHING) {
            let matching: CodeMatching = v
                .parse()
                .map_err(|_| ConfigError::InvalidValue(ENV_CODE_MATCHING.to_string()))?;
            config = config.code_matching(matching);
        }

        Ok(config)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
