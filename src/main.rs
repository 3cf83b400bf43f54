use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use staking_backend::config::Config;
use staking_backend::models::token::TokenBundle;
use staking_backend::services::chain_reader::AlloyChainReader;
use staking_backend::services::registry::ProtocolRegistry;
use staking_backend::services::staking_refresh::StakingRefresher;
use staking_backend::services::staking_store::SeaOrmStakingStore;
use staking_backend::{router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,staking_backend=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // Connect to database
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url).await?;

    if config.run_migrations {
        tracing::info!("Running migrations...");
        migration::Migrator::up(&db, None).await?;
    }

    let registry = Arc::new(ProtocolRegistry::load(
        config.protocol_registry_path.as_deref(),
    )?);
    let tokens = Arc::new(TokenBundle::load(config.token_bundle_path.as_deref())?);

    let store = Arc::new(SeaOrmStakingStore::new(db));
    let refresher = Arc::new(StakingRefresher::new(
        registry,
        Arc::new(AlloyChainReader::new()),
        store.clone(),
    ));

    let state = AppState {
        store,
        refresher,
        tokens,
    };

    let app = router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
