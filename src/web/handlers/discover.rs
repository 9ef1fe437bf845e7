//! Device discovery and status documents

use axum::{Json, extract::State, response::IntoResponse};

use crate::web::AppState;

/// `GET /discover.json`
pub async fn discover(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.emulator.discover())
}

/// `GET /lineup_status.json`
pub async fn lineup_status(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.emulator.lineup_status())
}
