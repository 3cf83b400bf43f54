// src/lib.rs

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use models::token::TokenBundle;
use services::{staking_refresh::StakingRefresher, staking_store::StakingStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn StakingStore>,
    pub refresher: Arc<StakingRefresher>,
    pub tokens: Arc<TokenBundle>,
}

pub mod entities {
    pub mod prelude;
    pub mod staking;
}

pub mod services {
    pub mod chain_reader;
    pub mod normalizer;
    pub mod registry;
    pub mod staking_refresh;
    pub mod staking_store;
}

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;

/// HTTP surface with CORS open to all origins.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(hello_staking))
        .route("/staking", get(handlers::staking::get_staking))
        .route(
            "/staking/protocol/{id_protocol}",
            get(handlers::staking::get_staking_by_protocol),
        )
        .route("/staking/update", post(handlers::staking::update_staking))
        .route("/token", get(handlers::token::get_tokens))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn hello_staking() -> &'static str {
    "Staking backend is running"
}
