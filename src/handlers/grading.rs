use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Multipart, State},
    response::IntoResponse,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    curriculum::find_step,
    error::AppError,
    models::{profile::Profile, submission::GradeResponse},
    services::{
        grading::{Grader, GradingRequest},
        progress::{Progress, award},
        storage::ObjectStore,
    },
    utils::{
        html::clean_feedback,
        jwt::Claims,
        upload::{extension_for, validate_image},
    },
};

/// A parsed `POST /api/grade` form.
struct UploadForm {
    file_name: String,
    content_type: String,
    bytes: Vec<u8>,
    worksheet_id: String,
}

async fn read_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut file: Option<(String, String, Vec<u8>)> = None;
    let mut worksheet_id: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or("worksheet").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                file = Some((file_name, content_type, data.to_vec()));
            }
            "worksheetId" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                worksheet_id = Some(text.trim().to_string());
            }
            _ => {} // ignore unknown fields
        }
    }

    let (file_name, content_type, bytes) =
        file.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;
    let worksheet_id = worksheet_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing required 'worksheetId' field".into()))?;

    Ok(UploadForm {
        file_name,
        content_type,
        bytes,
        worksheet_id,
    })
}

/// Grades an uploaded worksheet photo.
///
/// * Validates the image (type and size) and the worksheet id.
/// * Sends it to the grading service; failures come back as 502 with the
///   service's own message.
/// * Stores the image, records the submission and awards XP / streak.
pub async fn grade_submission(
    State(pool): State<PgPool>,
    State(grader): State<Arc<dyn Grader>>,
    State(storage): State<Arc<dyn ObjectStore>>,
    Extension(claims): Extension<Claims>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;
    let form = read_form(multipart).await?;

    validate_image(&form.content_type, form.bytes.len())
        .map_err(|rejection| AppError::BadRequest(rejection.to_string()))?;

    if find_step(&form.worksheet_id).is_none() {
        return Err(AppError::BadRequest(format!(
            "Unknown worksheet '{}'",
            form.worksheet_id
        )));
    }

    let report = grader
        .grade(GradingRequest {
            worksheet_id: &form.worksheet_id,
            file_name: &form.file_name,
            content_type: &form.content_type,
            bytes: &form.bytes,
        })
        .await?;

    let submission_id = Uuid::new_v4();
    let image_path = format!(
        "{}/{}/{}.{}",
        user_id,
        form.worksheet_id,
        submission_id,
        extension_for(&form.content_type)
    );
    storage.put(&image_path, &form.bytes).await?;

    let feedback = report.feedback.as_deref().map(clean_feedback);

    if let Err(e) = record_submission(
        &pool,
        user_id,
        submission_id,
        &form.worksheet_id,
        report.score,
        report.steadiness,
        report.accuracy,
        feedback.as_deref(),
        &image_path,
    )
    .await
    {
        if let Err(cleanup) = storage.remove(&image_path).await {
            tracing::warn!("Failed to remove orphaned image {}: {}", image_path, cleanup);
        }
        return Err(e);
    }

    tracing::info!(
        "Graded {} for user {}: score {:.1}",
        form.worksheet_id,
        user_id,
        report.score
    );

    Ok(Json(GradeResponse {
        submission_id,
        score: report.score,
        steadiness: report.steadiness,
        accuracy: report.accuracy,
        feedback,
        image_path,
    }))
}

/// Inserts the submission and updates the profile's XP and streak in one
/// transaction.
#[allow(clippy::too_many_arguments)]
async fn record_submission(
    pool: &PgPool,
    user_id: Uuid,
    submission_id: Uuid,
    worksheet_id: &str,
    score: f64,
    steadiness: f64,
    accuracy: f64,
    feedback: Option<&str>,
    image_path: &str,
) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO submissions
            (id, user_id, worksheet_id, score, steadiness, accuracy, feedback, image_path)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(submission_id)
    .bind(user_id)
    .bind(worksheet_id)
    .bind(score)
    .bind(steadiness)
    .bind(accuracy)
    .bind(feedback)
    .bind(image_path)
    .execute(&mut *tx)
    .await
    .map_err(|e| {
        tracing::error!("Failed to insert submission: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    let current = sqlx::query_as::<_, Profile>(
        r#"
        SELECT id, display_mode, xp, streak, last_practice_on
        FROM profiles
        WHERE id = $1
        FOR UPDATE
        "#,
    )
    .bind(user_id)
    .fetch_optional(&mut *tx)
    .await?
    .map(|p| p.progress())
    .unwrap_or(Progress {
        xp: 0,
        streak: 0,
        last_practice_on: None,
    });
    let next = award(current, score, chrono::Utc::now().date_naive());

    sqlx::query(
        r#"
        INSERT INTO profiles (id, xp, streak, last_practice_on)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (id) DO UPDATE SET
            xp = EXCLUDED.xp,
            streak = EXCLUDED.streak,
            last_practice_on = EXCLUDED.last_practice_on,
            updated_at = CURRENT_TIMESTAMP
        "#,
    )
    .bind(user_id)
    .bind(next.xp)
    .bind(next.streak)
    .bind(next.last_practice_on)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(())
}
