//! Protocol registry
//!
//! The fixed set of staking contracts polled by the refresh job. Loaded once
//! at start-up from a JSON table (the built-in `config/protocols.json` unless
//! `PROTOCOL_REGISTRY_PATH` points elsewhere).

use serde::Deserialize;
use std::env;
use std::path::Path;
use tracing::{info, warn};

use crate::error::StakingError;

/// Token symbol flagged as stablecoin on created records
pub const STABLECOIN_SYMBOL: &str = "EDU";

const BUILTIN_REGISTRY: &str = include_str!("../../config/protocols.json");

/// One staking contract deployment to poll.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolSource {
    pub name_token: String,
    pub address_token: String,
    pub address_staking: String,
    pub name_project: String,
    pub chain: String,
    /// Empty when the configured RPC variable is unset; such entries are skipped
    pub rpc_url: String,
    pub logo: String,
}

impl ProtocolSource {
    /// Natural key of the persisted record: "<nameProject>_<chain>"
    pub fn id_protocol(&self) -> String {
        format!("{}_{}", self.name_project, self.chain)
    }

    pub fn is_stablecoin(&self) -> bool {
        self.name_token == STABLECOIN_SYMBOL
    }

    /// Always two entries; the second is empty for non-stablecoin tokens.
    pub fn categories(&self) -> Vec<String> {
        let second = if self.is_stablecoin() { "Stablecoin" } else { "" };
        vec!["Staking".to_string(), second.to_string()]
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegistryFile {
    logo: String,
    protocols: Vec<RegistryEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegistryEntry {
    name_token: String,
    token: String,
    staking: String,
    name_project: String,
    chain: String,
    /// Name of the environment variable holding the chain's RPC URL
    rpc_env: String,
    logo: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ProtocolRegistry {
    sources: Vec<ProtocolSource>,
}

impl ProtocolRegistry {
    pub fn new(sources: Vec<ProtocolSource>) -> Self {
        Self { sources }
    }

    /// Load from `path`, or from the built-in table when `None`.
    /// RPC URLs are resolved from the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, StakingError> {
        let raw = match path {
            Some(path) => std::fs::read_to_string(path).map_err(|e| {
                StakingError::Config(format!(
                    "Failed to read protocol registry {}: {}",
                    path.display(),
                    e
                ))
            })?,
            None => BUILTIN_REGISTRY.to_string(),
        };

        let registry = Self::from_json(&raw, |key| env::var(key).ok())?;

        info!(
            source = %path.map(|p| p.display().to_string()).unwrap_or_else(|| "built-in".to_string()),
            protocols = registry.len(),
            "Protocol registry loaded"
        );

        Ok(registry)
    }

    /// Parse a registry table, resolving each entry's `rpcEnv` through `lookup`.
    pub fn from_json<F>(raw: &str, lookup: F) -> Result<Self, StakingError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file: RegistryFile = serde_json::from_str(raw)
            .map_err(|e| StakingError::Config(format!("Invalid protocol registry: {}", e)))?;

        let sources = file
            .protocols
            .into_iter()
            .map(|entry| {
                let rpc_url = lookup(&entry.rpc_env)
                    .map(|url| url.trim().to_string())
                    .unwrap_or_default();

                if rpc_url.is_empty() {
                    warn!(
                        project = %entry.name_project,
                        chain = %entry.chain,
                        rpc_env = %entry.rpc_env,
                        "RPC URL not configured, entry will be skipped on refresh"
                    );
                }

                ProtocolSource {
                    name_token: entry.name_token,
                    address_token: entry.token,
                    address_staking: entry.staking,
                    name_project: entry.name_project,
                    chain: entry.chain,
                    rpc_url,
                    logo: entry.logo.unwrap_or_else(|| file.logo.clone()),
                }
            })
            .collect();

        Ok(Self { sources })
    }

    pub fn sources(&self) -> &[ProtocolSource] {
        &self.sources
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
