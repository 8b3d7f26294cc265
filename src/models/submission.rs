// src/models/submission.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::models::profile::Profile;

/// Represents the 'submissions' table. One row per graded upload.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Submission {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Id of a curriculum step, e.g. `letter-a`.
    pub worksheet_id: String,
    pub score: f64,
    pub steadiness: f64,
    pub accuracy: f64,
    pub feedback: Option<String>,
    /// Object store key of the uploaded photo.
    pub image_path: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Body of `DELETE /api/submissions`.
///
/// Fields are optional so a missing one becomes a 400 with a readable
/// message instead of a deserialization rejection.
#[derive(Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSubmissionRequest {
    #[validate(required(message = "submissionId is required"))]
    pub submission_id: Option<String>,
    #[validate(
        required(message = "imagePath is required"),
        length(min = 1, max = 512, message = "imagePath must not be empty")
    )]
    pub image_path: Option<String>,
}

/// Response of `POST /api/grade`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeResponse {
    pub submission_id: Uuid,
    pub score: f64,
    pub steadiness: f64,
    pub accuracy: f64,
    pub feedback: Option<String>,
    pub image_path: String,
}

/// Everything a practice page needs on first render.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PracticeData {
    pub profile: Option<Profile>,
    /// Newest first, restricted to the requested track.
    pub submissions: Vec<Submission>,
}
