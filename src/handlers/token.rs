use axum::{extract::State, Json};

use crate::models::token::TokenBundle;
use crate::AppState;

/// GET /token
pub async fn get_tokens(State(state): State<AppState>) -> Json<TokenBundle> {
    Json(state.tokens.as_ref().clone())
}
