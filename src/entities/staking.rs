//! `SeaORM` Entity for the staking table
//!
//! One row per protocol deployment on one chain. Serialized as-is by the
//! `/staking` endpoints.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "staking")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// "<nameProject>_<chain>", e.g. "BlendFinance_EDU Chain Testnet"
    #[sea_orm(unique)]
    pub id_protocol: String,
    pub address_token: String,
    pub address_staking: String,
    pub name_token: String,
    pub name_project: String,
    pub chain: String,
    /// Raw `fixedAPY()` value, no unit scaling
    #[sea_orm(column_type = "Double")]
    pub apy: f64,
    /// `totalAmountStaked()` normalized with 18 decimals
    #[sea_orm(column_type = "Double")]
    pub tvl: f64,
    pub stablecoin: bool,
    /// Tag list as JSON array
    #[sea_orm(column_type = "JsonBinary")]
    pub categories: Json,
    #[sea_orm(column_type = "Text")]
    pub logo: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
