use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use sqlx::PgPool;

use crate::{
    curriculum::Track,
    error::AppError,
    handlers::profile::fetch_profile,
    models::submission::{PracticeData, Submission},
    utils::jwt::Claims,
};

/// Server data load for a practice page.
///
/// Returns the caller's profile (if any) and their submissions restricted to
/// the worksheets of the requested track, newest first.
pub async fn load_practice(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
    Path(track): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let track: Track = track.parse().map_err(AppError::NotFound)?;
    let user_id = claims.user_id()?;

    // The two reads are independent.
    let (profile, submissions) = tokio::try_join!(
        fetch_profile(&pool, user_id),
        async {
            sqlx::query_as::<_, Submission>(
                r#"
                SELECT id, user_id, worksheet_id, score, steadiness, accuracy,
                       feedback, image_path, created_at
                FROM submissions
                WHERE user_id = $1 AND worksheet_id = ANY($2)
                ORDER BY created_at DESC
                "#,
            )
            .bind(user_id)
            .bind(track.worksheet_ids())
            .fetch_all(&pool)
            .await
            .map_err(AppError::from)
        }
    )?;

    Ok(Json(PracticeData {
        profile,
        submissions,
    }))
}
