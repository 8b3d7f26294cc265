//! Client side of the practice API.
//!
//! [`PracticeApi`] is the seam the practice controller talks through;
//! [`HttpPracticeApi`] is the production implementation on top of `reqwest`.

mod http;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    curriculum::Track,
    models::submission::{GradeResponse, PracticeData},
    workflow::SelectedFile,
};

pub use http::HttpPracticeApi;

/// Errors from the practice API client.
///
/// `Display` is the message shown to the user.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("Could not reach the server. Please try again.")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// A 2xx response whose body could not be read.
    #[error("Unexpected response from the server: {0}")]
    Decode(String),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[async_trait]
pub trait PracticeApi: Send + Sync {
    /// Fetches the profile and the track's submissions.
    async fn load_practice(&self, track: Track) -> Result<PracticeData, ClientError>;

    /// Uploads one worksheet photo for grading.
    async fn grade(&self, file: &SelectedFile, worksheet_id: &str) -> Result<GradeResponse, ClientError>;

    /// Deletes a submission and its stored image.
    async fn delete_submission(&self, submission_id: Uuid, image_path: &str) -> Result<(), ClientError>;
}
