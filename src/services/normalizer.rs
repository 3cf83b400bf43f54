//! Conversion of raw contract values into plain numbers.

use alloy::primitives::{utils::format_units, U256};

use crate::error::StakingError;

/// Decimals used by the staked tokens
pub const TOKEN_DECIMALS: u8 = 18;

/// `totalAmountStaked()` in base units -> token quantity
pub fn normalize_total_staked(raw: U256) -> Result<f64, StakingError> {
    let formatted = format_units(raw, TOKEN_DECIMALS)
        .map_err(|e| StakingError::chain_call("totalAmountStaked", e))?;

    formatted
        .parse::<f64>()
        .map_err(|e| StakingError::chain_call("totalAmountStaked", e))
}

/// `fixedAPY()` is stored as reported by the contract.
pub fn normalize_apy(raw: u8) -> f64 {
    f64::from(raw)
}
