//! Tuner stream resolution

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::device::parse_tuner_channel;
use crate::errors::AppError;
use crate::web::AppState;

/// `GET /auto/v{n}`
///
/// Re-fetches the playlist and answers `302 Found` with the channel's
/// upstream URL. Malformed paths, unknown ordinals and an unavailable source
/// all answer 404.
pub async fn tune(State(state): State<AppState>, Path(segment): Path<String>) -> Response {
    let resolved = match parse_tuner_channel(&segment) {
        Ok(ordinal) => state.emulator.resolve_stream(ordinal).await,
        Err(e) => Err(e),
    };

    match resolved {
        Ok(url) => {
            debug!("Tuner {} redirecting to upstream stream", segment);
            (StatusCode::FOUND, [(header::LOCATION, url)]).into_response()
        }
        Err(e) => AppError::from(e).into_response(),
    }
}
