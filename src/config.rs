//! Process configuration read from the environment (and `.env` via dotenvy).

use std::env;
use std::path::PathBuf;

use crate::error::StakingError;

pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_PORT: &str = "PORT";
pub const ENV_PROTOCOL_REGISTRY_PATH: &str = "PROTOCOL_REGISTRY_PATH";
pub const ENV_TOKEN_BUNDLE_PATH: &str = "TOKEN_BUNDLE_PATH";
pub const ENV_RUN_MIGRATIONS: &str = "RUN_MIGRATIONS";

const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// JSON registry of staking contracts to poll; the built-in table is used when unset
    pub protocol_registry_path: Option<PathBuf>,
    /// JSON token descriptor bundle served on `/token`; the built-in bundle is used when unset
    pub token_bundle_path: Option<PathBuf>,
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, StakingError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, StakingError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = non_empty(ENV_DATABASE_URL)
            .ok_or_else(|| StakingError::Config(format!("{} must be set", ENV_DATABASE_URL)))?;

        let port = match non_empty(ENV_PORT) {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| {
                StakingError::Config(format!("{} must be a valid port ({}): {}", ENV_PORT, raw, e))
            })?,
            None => DEFAULT_PORT,
        };

        let run_migrations = match non_empty(ENV_RUN_MIGRATIONS) {
            Some(raw) => parse_bool(&raw).ok_or_else(|| {
                StakingError::Config(format!(
                    "{} must be true or false, got {}",
                    ENV_RUN_MIGRATIONS, raw
                ))
            })?,
            None => true,
        };

        Ok(Self {
            database_url,
            port,
            protocol_registry_path: non_empty(ENV_PROTOCOL_REGISTRY_PATH).map(PathBuf::from),
            token_bundle_path: non_empty(ENV_TOKEN_BUNDLE_PATH).map(PathBuf::from),
            run_migrations,
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}
