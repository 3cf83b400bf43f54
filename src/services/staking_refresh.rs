//! Staking refresh
//!
//! Reads every registry entry's staking contract concurrently and upserts the
//! normalized values. Entries are independent: a failure is logged and
//! reported for that entry only, never aborting the batch. Entries without an
//! RPC URL are skipped and counted as neither success nor failure.

use chrono::Utc;
use futures_util::future::join_all;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::error::StakingError;
use crate::services::chain_reader::ChainReader;
use crate::services::normalizer::{normalize_apy, normalize_total_staked};
use crate::services::registry::{ProtocolRegistry, ProtocolSource};
use crate::services::staking_store::{NewStakingRecord, StakingStore, StakingUpdate};

/// Settlement of one registry entry.
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    Updated { id_protocol: String, apy: f64, tvl: f64 },
    Skipped {
        id_protocol: String,
        name_project: String,
        chain: String,
        reason: String,
    },
    Failed {
        id_protocol: String,
        name_project: String,
        chain: String,
        error: String,
    },
}

/// All outcomes of one batch, in registry order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RefreshReport {
    pub outcomes: Vec<RefreshOutcome>,
}

impl RefreshReport {
    pub fn updated(&self) -> impl Iterator<Item = &RefreshOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, RefreshOutcome::Updated { .. }))
    }

    pub fn skipped(&self) -> impl Iterator<Item = &RefreshOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, RefreshOutcome::Skipped { .. }))
    }

    pub fn failed(&self) -> impl Iterator<Item = &RefreshOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, RefreshOutcome::Failed { .. }))
    }

    pub fn failed_count(&self) -> usize {
        self.failed().count()
    }
}

pub struct StakingRefresher {
    registry: Arc<ProtocolRegistry>,
    reader: Arc<dyn ChainReader>,
    store: Arc<dyn StakingStore>,
}

impl StakingRefresher {
    pub fn new(
        registry: Arc<ProtocolRegistry>,
        reader: Arc<dyn ChainReader>,
        store: Arc<dyn StakingStore>,
    ) -> Self {
        Self {
            registry,
            reader,
            store,
        }
    }

    /// Refresh every registry entry concurrently and wait for all to settle.
    pub async fn refresh_all(&self) -> RefreshReport {
        info!(protocols = self.registry.len(), "Starting staking refresh");

        let futures: Vec<_> = self
            .registry
            .sources()
            .iter()
            .map(|source| self.refresh_one(source))
            .collect();

        let report = RefreshReport {
            outcomes: join_all(futures).await,
        };

        let failed = report.failed_count();
        if failed > 0 {
            warn!(failed = failed, "Some staking updates failed");
        }

        info!(
            updated = report.updated().count(),
            failed = failed,
            skipped = report.skipped().count(),
            "Staking refresh completed"
        );

        report
    }

    async fn refresh_one(&self, source: &ProtocolSource) -> RefreshOutcome {
        let id_protocol = source.id_protocol();

        if source.rpc_url.is_empty() {
            warn!(
                project = %source.name_project,
                chain = %source.chain,
                "Missing RPC URL, skipping"
            );
            return RefreshOutcome::Skipped {
                id_protocol,
                name_project: source.name_project.clone(),
                chain: source.chain.clone(),
                reason: "Missing RPC URL".to_string(),
            };
        }

        match self.refresh_source(source, &id_protocol).await {
            Ok((apy, tvl)) => {
                info!(
                    project = %source.name_project,
                    chain = %source.chain,
                    apy = apy,
                    tvl = tvl,
                    "Updated staking data"
                );
                RefreshOutcome::Updated {
                    id_protocol,
                    apy,
                    tvl,
                }
            }
            Err(e) => {
                error!(
                    project = %source.name_project,
                    chain = %source.chain,
                    error = %e,
                    "Failed to update staking data"
                );
                RefreshOutcome::Failed {
                    id_protocol,
                    name_project: source.name_project.clone(),
                    chain: source.chain.clone(),
                    error: e.to_string(),
                }
            }
        }
    }

    async fn refresh_source(
        &self,
        source: &ProtocolSource,
        id_protocol: &str,
    ) -> Result<(f64, f64), StakingError> {
        let raw = self
            .reader
            .read_staking_state(&source.rpc_url, &source.address_staking)
            .await?;

        let apy = normalize_apy(raw.fixed_apy);
        let tvl = normalize_total_staked(raw.total_staked)?;

        let update = StakingUpdate {
            tvl,
            apy,
            updated_at: Utc::now(),
        };

        let create = NewStakingRecord {
            id_protocol: id_protocol.to_string(),
            address_token: source.address_token.clone(),
            address_staking: source.address_staking.clone(),
            name_token: source.name_token.clone(),
            name_project: source.name_project.clone(),
            chain: source.chain.clone(),
            apy,
            tvl,
            stablecoin: source.is_stablecoin(),
            categories: source.categories(),
            logo: source.logo.clone(),
        };

        self.store.upsert(id_protocol, update, create).await?;

        Ok((apy, tvl))
    }
}
