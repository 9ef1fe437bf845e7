//! Channel lineup handler

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};

use super::{FALLBACK_HEADER, fallback_header_value};
use crate::device::LineupOutcome;
use crate::errors::AppError;
use crate::web::AppState;

/// `GET /lineup.json`
///
/// A failing source degrades to the fallback channel, flagged with the
/// `X-Tuner-Fallback` header, unless the fallback is disabled.
pub async fn lineup(State(state): State<AppState>) -> Response {
    match state.emulator.lineup().await {
        Ok(LineupOutcome::Live(entries)) => Json(entries).into_response(),
        Ok(LineupOutcome::Fallback { entries, .. }) => {
            ([(FALLBACK_HEADER, fallback_header_value())], Json(entries)).into_response()
        }
        Err(e) => AppError::from(e).into_response(),
    }
}
