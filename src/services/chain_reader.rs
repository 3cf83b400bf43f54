//! Chain reader
//!
//! Read-only access to staking contracts over JSON-RPC. Both view calls are
//! zero-argument; no retries are attempted, a failed call fails the read.

use alloy::{
    primitives::{Address, U256},
    providers::{ProviderBuilder, RootProvider},
    sol,
    transports::http::{Client, Http},
};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::str::FromStr;
use tracing::debug;

use crate::error::StakingError;

// Minimal staking contract interface
sol! {
    #[sol(rpc)]
    interface IStaking {
        function fixedAPY() external view returns (uint8);
        function totalAmountStaked() external view returns (uint256);
    }
}

/// Raw values returned by the staking contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawStakingState {
    pub fixed_apy: u8,
    /// Base units, 18 decimals
    pub total_staked: U256,
}

#[async_trait]
pub trait ChainReader: Send + Sync {
    async fn read_staking_state(
        &self,
        rpc_url: &str,
        staking_address: &str,
    ) -> Result<RawStakingState, StakingError>;
}

type HttpProvider = RootProvider<Http<Client>>;

/// `ChainReader` backed by alloy HTTP providers, one per RPC URL.
#[derive(Default)]
pub struct AlloyChainReader {
    providers: Mutex<HashMap<String, HttpProvider>>,
}

impl AlloyChainReader {
    pub fn new() -> Self {
        Self::default()
    }

    fn provider_for(&self, rpc_url: &str) -> Result<HttpProvider, StakingError> {
        let mut providers = self.providers.lock();

        if let Some(provider) = providers.get(rpc_url) {
            return Ok(provider.clone());
        }

        let provider = ProviderBuilder::new().on_http(rpc_url.parse().map_err(|e| {
            StakingError::chain_call(rpc_url, format!("Invalid RPC URL: {}", e))
        })?);

        debug!(rpc = %rpc_url, "Created RPC provider");
        providers.insert(rpc_url.to_string(), provider.clone());

        Ok(provider)
    }
}

#[async_trait]
impl ChainReader for AlloyChainReader {
    async fn read_staking_state(
        &self,
        rpc_url: &str,
        staking_address: &str,
    ) -> Result<RawStakingState, StakingError> {
        let address = Address::from_str(staking_address).map_err(|e| {
            StakingError::chain_call(staking_address, format!("Invalid staking address: {}", e))
        })?;

        let provider = self.provider_for(rpc_url)?;
        let staking = IStaking::new(address, &provider);

        let fixed_apy = staking
            .fixedAPY()
            .call()
            .await
            .map_err(|e| StakingError::chain_call(format!("{} fixedAPY", staking_address), e))?
            ._0;

        let total_staked = staking
            .totalAmountStaked()
            .call()
            .await
            .map_err(|e| {
                StakingError::chain_call(format!("{} totalAmountStaked", staking_address), e)
            })?
            ._0;

        debug!(
            staking = %staking_address,
            fixed_apy = fixed_apy,
            total_staked = %total_staked,
            "Read staking contract state"
        );

        Ok(RawStakingState {
            fixed_apy,
            total_staked,
        })
    }
}
