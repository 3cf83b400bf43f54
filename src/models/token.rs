//! Static token descriptors served on `GET /token`.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::StakingError;

const BUILTIN_TOKENS: &str = include_str!("../../config/tokens.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenDescriptor {
    pub id: i32,
    pub address_token: String,
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
    pub chain: String,
    pub logo: String,
    /// Not computed; always zero
    #[serde(rename = "priceChange24H")]
    pub price_change_24h: f64,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenBundle {
    pub tokens: Vec<TokenDescriptor>,
}

impl TokenBundle {
    pub fn load(path: Option<&Path>) -> Result<Self, StakingError> {
        match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|e| {
                    StakingError::Config(format!(
                        "Failed to read token bundle {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                Self::from_json(&raw)
            }
            None => Self::builtin(),
        }
    }

    pub fn builtin() -> Result<Self, StakingError> {
        Self::from_json(BUILTIN_TOKENS)
    }

    pub fn from_json(raw: &str) -> Result<Self, StakingError> {
        serde_json::from_str(raw)
            .map_err(|e| StakingError::Config(format!("Invalid token bundle: {}", e)))
    }
}
