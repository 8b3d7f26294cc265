use axum::{Json, extract::Path, response::IntoResponse};
use serde_json::json;

use crate::{curriculum::Track, error::AppError};

/// Lists the available tracks with their sizes.
pub async fn list_tracks() -> impl IntoResponse {
    let tracks: Vec<_> = Track::ALL
        .into_iter()
        .map(|t| json!({ "track": t, "steps": t.steps().len() }))
        .collect();

    Json(tracks)
}

/// Ordered worksheet steps of one track.
pub async fn get_track(Path(track): Path<String>) -> Result<impl IntoResponse, AppError> {
    let track: Track = track.parse().map_err(AppError::NotFound)?;
    Ok(Json(track.steps()))
}
