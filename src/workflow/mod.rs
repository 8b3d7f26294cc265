//! Client-side practice workflow.
//!
//! A [`PracticeController`] drives one curriculum track: step navigation,
//! picking a worksheet photo, sending it for grading, showing the result and
//! managing submission history. The hosting shell renders
//! [`PracticeState`] snapshots and calls the controller's operations.

mod controller;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::Serialize;

use crate::{models::submission::GradeResponse, utils::upload::content_type_for};

pub use controller::{DeleteOutcome, PracticeController, PracticeState, UploadOutcome};

/// A worksheet photo picked by the user, not yet uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Reads a photo from disk, guessing its type from the extension.
    pub async fn from_path(path: impl AsRef<std::path::Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "worksheet".to_string());
        let content_type = content_type_for(&name);

        Ok(Self::new(name, content_type, bytes))
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// `data:` URL for showing the photo next to its grade without a round trip.
    pub fn preview_url(&self) -> String {
        format!("data:{};base64,{}", self.content_type, STANDARD.encode(&self.bytes))
    }
}

/// A grade waiting for the user to acknowledge it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    /// Worksheet the photo was uploaded for.
    pub worksheet_id: String,
    #[serde(flatten)]
    pub grade: GradeResponse,
    pub preview_url: String,
}

/// Where the current step is in its upload cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    FileSelected,
    Uploading,
    GradingDisplayed,
    /// Grade acknowledged, waiting for the auto-advance.
    Acknowledged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// UI services the controller needs from whatever hosts it.
pub trait HostShell: Send + Sync {
    /// Asks the user to confirm a destructive action.
    fn confirm(&self, prompt: &str) -> bool;

    /// Asks the host to re-fetch profile and submissions and call
    /// [`PracticeController::sync`] with the result.
    fn request_refresh(&self);
}
