use std::sync::Arc;

use axum::{Extension, Json, extract::State, response::IntoResponse};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppError,
    models::submission::{DeleteSubmissionRequest, Submission},
    services::storage::{ObjectStore, StorageError},
    utils::jwt::Claims,
};

/// Only the owner may delete a submission.
pub(crate) fn ensure_owner(submission: &Submission, caller: Uuid) -> Result<(), AppError> {
    if submission.user_id != caller {
        return Err(AppError::Forbidden(
            "You can only delete your own submissions".to_string(),
        ));
    }
    Ok(())
}

/// Deletes a submission row and its stored image.
///
/// The row and the object are removed concurrently and the call succeeds
/// only if both do. There is no rollback: if one side fails the other may
/// already be gone, and the failure is reported as a 500.
pub async fn delete_submission(
    State(pool): State<PgPool>,
    State(storage): State<Arc<dyn ObjectStore>>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<DeleteSubmissionRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }
    let (Some(raw_id), Some(image_path)) = (payload.submission_id, payload.image_path) else {
        return Err(AppError::BadRequest(
            "submissionId and imagePath are required".to_string(),
        ));
    };
    let submission_id: Uuid = raw_id
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid submissionId '{}'", raw_id)))?;

    let user_id = claims.user_id()?;

    let submission = sqlx::query_as::<_, Submission>(
        r#"
        SELECT id, user_id, worksheet_id, score, steadiness, accuracy,
               feedback, image_path, created_at
        FROM submissions
        WHERE id = $1
        "#,
    )
    .bind(submission_id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("Submission not found".to_string()))?;

    ensure_owner(&submission, user_id)?;

    if submission.image_path != image_path {
        tracing::warn!(
            "Delete of {} named image {} but the row stores {}; removing the stored one",
            submission_id,
            image_path,
            submission.image_path
        );
    }

    let (row_result, object_result) = tokio::join!(
        sqlx::query("DELETE FROM submissions WHERE id = $1 AND user_id = $2")
            .bind(submission_id)
            .bind(user_id)
            .execute(&pool),
        storage.remove(&submission.image_path),
    );

    if let Err(e) = row_result {
        tracing::error!("Failed to delete submission {}: {:?}", submission_id, e);
        return Err(AppError::InternalServerError(e.to_string()));
    }
    match object_result {
        Ok(()) => {}
        // Nothing left to remove is not a failure.
        Err(StorageError::NotFound(_)) => {
            tracing::warn!("Image {} was already gone", submission.image_path);
        }
        Err(e) => {
            tracing::error!("Failed to remove image {}: {}", submission.image_path, e);
            return Err(AppError::InternalServerError(e.to_string()));
        }
    }

    tracing::info!("Deleted submission {} for user {}", submission_id, user_id);

    Ok(Json(json!({
        "success": true,
        "submissionId": submission_id,
    })))
}
