//! Staking record store
//!
//! Access to the `staking` table. Rows are keyed by `id_protocol`; `upsert`
//! updates the on-chain fields in place or inserts a new row.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::debug;

use crate::entities::{prelude::*, staking};
use crate::error::StakingError;

/// Fields refreshed on an existing row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StakingUpdate {
    pub tvl: f64,
    pub apy: f64,
    pub updated_at: DateTime<Utc>,
}

/// Full row content used when no row exists for the key.
#[derive(Debug, Clone, PartialEq)]
pub struct NewStakingRecord {
    pub id_protocol: String,
    pub address_token: String,
    pub address_staking: String,
    pub name_token: String,
    pub name_project: String,
    pub chain: String,
    pub apy: f64,
    pub tvl: f64,
    pub stablecoin: bool,
    pub categories: Vec<String>,
    pub logo: String,
}

impl NewStakingRecord {
    pub fn into_active_model(self, now: DateTime<Utc>) -> staking::ActiveModel {
        staking::ActiveModel {
            id_protocol: Set(self.id_protocol),
            address_token: Set(self.address_token),
            address_staking: Set(self.address_staking),
            name_token: Set(self.name_token),
            name_project: Set(self.name_project),
            chain: Set(self.chain),
            apy: Set(self.apy),
            tvl: Set(self.tvl),
            stablecoin: Set(self.stablecoin),
            categories: Set(serde_json::json!(self.categories)),
            logo: Set(self.logo),
            created_at: Set(now.fixed_offset()),
            updated_at: Set(now.fixed_offset()),
            ..Default::default()
        }
    }
}

#[async_trait]
pub trait StakingStore: Send + Sync {
    async fn find_all(&self) -> Result<Vec<staking::Model>, StakingError>;

    /// Zero or one rows given the unique key, returned as a list.
    async fn find_by_id_protocol(
        &self,
        id_protocol: &str,
    ) -> Result<Vec<staking::Model>, StakingError>;

    /// Apply `update` to the row keyed by `key`, or insert `create` when absent.
    async fn upsert(
        &self,
        key: &str,
        update: StakingUpdate,
        create: NewStakingRecord,
    ) -> Result<(), StakingError>;
}

#[derive(Clone)]
pub struct SeaOrmStakingStore {
    db: DatabaseConnection,
}

impl SeaOrmStakingStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StakingStore for SeaOrmStakingStore {
    async fn find_all(&self) -> Result<Vec<staking::Model>, StakingError> {
        let records = Staking::find()
            .order_by_asc(staking::Column::Id)
            .all(&self.db)
            .await?;
        Ok(records)
    }

    async fn find_by_id_protocol(
        &self,
        id_protocol: &str,
    ) -> Result<Vec<staking::Model>, StakingError> {
        let records = Staking::find()
            .filter(staking::Column::IdProtocol.eq(id_protocol))
            .all(&self.db)
            .await?;
        Ok(records)
    }

    async fn upsert(
        &self,
        key: &str,
        update: StakingUpdate,
        create: NewStakingRecord,
    ) -> Result<(), StakingError> {
        let txn = self.db.begin().await?;

        let result = Staking::update_many()
            .col_expr(staking::Column::Tvl, Expr::value(update.tvl))
            .col_expr(staking::Column::Apy, Expr::value(update.apy))
            .col_expr(
                staking::Column::UpdatedAt,
                Expr::value(update.updated_at.fixed_offset()),
            )
            .filter(staking::Column::IdProtocol.eq(key))
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            // A concurrent batch may have inserted the same key since the update
            Staking::insert(create.into_active_model(update.updated_at))
                .on_conflict(
                    OnConflict::column(staking::Column::IdProtocol)
                        .update_columns([
                            staking::Column::Tvl,
                            staking::Column::Apy,
                            staking::Column::UpdatedAt,
                        ])
                        .to_owned(),
                )
                .exec_without_returning(&txn)
                .await?;
            debug!(id_protocol = %key, "Inserted staking record");
        } else {
            debug!(id_protocol = %key, rows = result.rows_affected, "Updated staking record");
        }

        txn.commit().await?;
        Ok(())
    }
}
