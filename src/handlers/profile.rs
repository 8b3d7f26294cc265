use axum::{Extension, Json, extract::State, response::IntoResponse};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{error::AppError, models::profile::Profile, utils::jwt::Claims};

/// Loads a user's profile row, if one exists.
pub(crate) async fn fetch_profile(pool: &PgPool, user_id: Uuid) -> Result<Option<Profile>, AppError> {
    let profile = sqlx::query_as::<_, Profile>(
        r#"
        SELECT id, display_mode, xp, streak, last_practice_on
        FROM profiles
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(profile)
}

/// Get current user's profile (display mode, XP and streak).
pub async fn get_me(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;

    let profile = fetch_profile(&pool, user_id)
        .await?
        .ok_or(AppError::NotFound("Profile not found".to_string()))?;

    Ok(Json(profile))
}
