//! Staking handlers
//!
//! GET /staking, GET /staking/protocol/{id_protocol}, POST /staking/update

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::{error, info};

use crate::entities::staking;
use crate::error::StakingError;
use crate::models::staking::{ErrorResponse, RefreshResponse};
use crate::AppState;

const FETCH_ERROR: &str = "Failed to fetch staking data";

fn internal_error(e: StakingError) -> (StatusCode, Json<ErrorResponse>) {
    error!(error = %e, "Staking query failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: FETCH_ERROR.to_string(),
        }),
    )
}

/// GET /staking
pub async fn get_staking(
    State(state): State<AppState>,
) -> Result<Json<Vec<staking::Model>>, (StatusCode, Json<ErrorResponse>)> {
    let records = state.store.find_all().await.map_err(internal_error)?;
    Ok(Json(records))
}

/// GET /staking/protocol/{id_protocol}
///
/// Responds 404 with an empty array when no record matches.
pub async fn get_staking_by_protocol(
    State(state): State<AppState>,
    Path(id_protocol): Path<String>,
) -> Result<(StatusCode, Json<Vec<staking::Model>>), (StatusCode, Json<ErrorResponse>)> {
    let records = state
        .store
        .find_by_id_protocol(&id_protocol)
        .await
        .map_err(internal_error)?;

    if records.is_empty() {
        info!(id_protocol = %id_protocol, "Staking data not found");
        return Ok((StatusCode::NOT_FOUND, Json(records)));
    }

    Ok((StatusCode::OK, Json(records)))
}

/// POST /staking/update
///
/// Always 200 once the batch has settled; per-entry failures are listed in
/// `failedUpdates`.
pub async fn update_staking(State(state): State<AppState>) -> Json<RefreshResponse> {
    let report = state.refresher.refresh_all().await;
    Json(RefreshResponse::from(report))
}
