#![allow(dead_code)]

use alloy::primitives::U256;
use async_trait::async_trait;
use parking_lot::Mutex;
use sea_orm::{Database, DatabaseConnection, DbErr};
use std::collections::HashMap;
use std::env;
use std::str::FromStr;
use std::sync::Arc;

use staking_backend::entities::staking;
use staking_backend::error::StakingError;
use staking_backend::models::token::TokenBundle;
use staking_backend::services::chain_reader::{ChainReader, RawStakingState};
use staking_backend::services::registry::{ProtocolRegistry, ProtocolSource};
use staking_backend::services::staking_refresh::StakingRefresher;
use staking_backend::services::staking_store::{NewStakingRecord, StakingStore, StakingUpdate};
use staking_backend::AppState;

pub const EDU_CHAIN: &str = "EDU Chain Testnet";
pub const EDU_RPC: &str = "http://edu-rpc.test";
pub const DEAD_RPC: &str = "http://unreachable-rpc.test";

/// 1000 tokens with 18 decimals
pub const THOUSAND_TOKENS: &str = "1000000000000000000000";

/// Set up test database connection
/// Uses TEST_DATABASE_URL environment variable or falls back to default
pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let database_url = env::var("TEST_DATABASE_URL").unwrap_or_else(|_| {
        "postgresql://staking_user@localhost:5432/staking_test".to_string()
    });

    Database::connect(&database_url).await
}

pub fn source(name_project: &str, name_token: &str, staking: &str, rpc_url: &str) -> ProtocolSource {
    ProtocolSource {
        name_token: name_token.to_string(),
        address_token: "0x13BFA5eaE397e36593E788176C2FddcFffEC5075".to_string(),
        address_staking: staking.to_string(),
        name_project: name_project.to_string(),
        chain: EDU_CHAIN.to_string(),
        rpc_url: rpc_url.to_string(),
        logo: "https://example.com/edu.png".to_string(),
    }
}

pub fn three_protocols() -> ProtocolRegistry {
    ProtocolRegistry::new(vec![
        source("BlendFinance", "EDU", "0x91F048130C88C1f759A9bdC19883559d3Dc275a6", EDU_RPC),
        source("SailFish", "WEDU", "0xD95d2F7C38bfA2f9d7A618474Bc619470f01001F", EDU_RPC),
        source("Camelot", "EDU", "0x763A03a3328e475f75EE2Dd0329b27F02EeD2443", EDU_RPC),
    ])
}

/// `StakingStore` over a vector, same upsert semantics as the SeaORM store.
#[derive(Default)]
pub struct InMemoryStakingStore {
    records: Mutex<Vec<staking::Model>>,
}

impl InMemoryStakingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<staking::Model> {
        self.records.lock().clone()
    }
}

#[async_trait]
impl StakingStore for InMemoryStakingStore {
    async fn find_all(&self) -> Result<Vec<staking::Model>, StakingError> {
        Ok(self.records())
    }

    async fn find_by_id_protocol(
        &self,
        id_protocol: &str,
    ) -> Result<Vec<staking::Model>, StakingError> {
        Ok(self
            .records
            .lock()
            .iter()
            .filter(|r| r.id_protocol == id_protocol)
            .cloned()
            .collect())
    }

    async fn upsert(
        &self,
        key: &str,
        update: StakingUpdate,
        create: NewStakingRecord,
    ) -> Result<(), StakingError> {
        let mut records = self.records.lock();

        if let Some(existing) = records.iter_mut().find(|r| r.id_protocol == key) {
            existing.tvl = update.tvl;
            existing.apy = update.apy;
            existing.updated_at = update.updated_at.fixed_offset();
            return Ok(());
        }

        let now = update.updated_at.fixed_offset();
        let id = records.len() as i32 + 1;
        records.push(staking::Model {
            id,
            id_protocol: create.id_protocol,
            address_token: create.address_token,
            address_staking: create.address_staking,
            name_token: create.name_token,
            name_project: create.name_project,
            chain: create.chain,
            apy: create.apy,
            tvl: create.tvl,
            stablecoin: create.stablecoin,
            categories: serde_json::json!(create.categories),
            logo: create.logo,
            created_at: now,
            updated_at: now,
        });
        Ok(())
    }
}

/// Store whose every call fails, as an unreachable database would.
pub struct FailingStakingStore;

#[async_trait]
impl StakingStore for FailingStakingStore {
    async fn find_all(&self) -> Result<Vec<staking::Model>, StakingError> {
        Err(DbErr::Custom("connection refused".to_string()).into())
    }

    async fn find_by_id_protocol(&self, _: &str) -> Result<Vec<staking::Model>, StakingError> {
        Err(DbErr::Custom("connection refused".to_string()).into())
    }

    async fn upsert(
        &self,
        _: &str,
        _: StakingUpdate,
        _: NewStakingRecord,
    ) -> Result<(), StakingError> {
        Err(DbErr::Custom("connection refused".to_string()).into())
    }
}

/// `ChainReader` answering from a fixed table keyed by staking address.
/// Any call to `DEAD_RPC` fails like an unreachable endpoint.
#[derive(Default)]
pub struct FakeChainReader {
    states: Mutex<HashMap<String, RawStakingState>>,
    calls: Mutex<Vec<String>>,
}

impl FakeChainReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(self, staking_address: &str, fixed_apy: u8, total_staked: &str) -> Self {
        self.set_state(staking_address, fixed_apy, total_staked);
        self
    }

    pub fn set_state(&self, staking_address: &str, fixed_apy: u8, total_staked: &str) {
        self.states.lock().insert(
            staking_address.to_string(),
            RawStakingState {
                fixed_apy,
                total_staked: U256::from_str(total_staked).expect("valid U256"),
            },
        );
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl ChainReader for FakeChainReader {
    async fn read_staking_state(
        &self,
        rpc_url: &str,
        staking_address: &str,
    ) -> Result<RawStakingState, StakingError> {
        self.calls.lock().push(staking_address.to_string());

        if rpc_url == DEAD_RPC {
            return Err(StakingError::chain_call(rpc_url, "error sending request: connection refused"));
        }

        self.states
            .lock()
            .get(staking_address)
            .copied()
            .ok_or_else(|| StakingError::chain_call(staking_address, "execution reverted"))
    }
}

pub fn reader_for_three() -> FakeChainReader {
    FakeChainReader::new()
        .with_state("0x91F048130C88C1f759A9bdC19883559d3Dc275a6", 12, THOUSAND_TOKENS)
        .with_state("0xD95d2F7C38bfA2f9d7A618474Bc619470f01001F", 8, "2500000000000000000")
        .with_state("0x763A03a3328e475f75EE2Dd0329b27F02EeD2443", 5, "0")
}

pub fn app_state(
    registry: ProtocolRegistry,
    reader: Arc<dyn ChainReader>,
    store: Arc<dyn StakingStore>,
) -> AppState {
    let refresher = StakingRefresher::new(Arc::new(registry), reader, store.clone());
    AppState {
        store,
        refresher: Arc::new(refresher),
        tokens: Arc::new(TokenBundle::builtin().expect("built-in token bundle")),
    }
}
