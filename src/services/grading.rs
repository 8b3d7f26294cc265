//! Client for the remote handwriting grading service.
//!
//! The service accepts a multipart form (`file`, `worksheetId`) and answers
//! with a JSON report. Older deployments name the score `overall_score` and
//! the feedback `message`; both spellings are accepted.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};

/// Errors from the grading service client.
#[derive(Debug, thiserror::Error)]
pub enum GraderError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("grading request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with a non-2xx status. `body` is its message.
    #[error("{body}")]
    Rejected { status: u16, body: String },

    /// The service answered 2xx but the report could not be read.
    #[error("malformed grading report: {0}")]
    Malformed(String),
}

/// Normalised grading report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGradingReport")]
pub struct GradingReport {
    pub score: f64,
    /// Percentage, 0-100.
    pub steadiness: f64,
    /// Percentage, 0-100.
    pub accuracy: f64,
    pub feedback: Option<String>,
}

/// Wire shape, before primary/fallback keys are resolved.
#[derive(Deserialize)]
struct RawGradingReport {
    score: Option<f64>,
    overall_score: Option<f64>,
    steadiness: Option<f64>,
    accuracy: Option<f64>,
    feedback: Option<String>,
    message: Option<String>,
}

impl TryFrom<RawGradingReport> for GradingReport {
    type Error = String;

    fn try_from(raw: RawGradingReport) -> Result<Self, Self::Error> {
        let score = raw
            .score
            .or(raw.overall_score)
            .ok_or("missing score")?;
        let steadiness = raw.steadiness.ok_or("missing steadiness")?;
        let accuracy = raw.accuracy.ok_or("missing accuracy")?;

        for (name, value) in [("score", score), ("steadiness", steadiness), ("accuracy", accuracy)] {
            if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                return Err(format!("{name} out of range: {value}"));
            }
        }

        Ok(GradingReport {
            score,
            steadiness,
            accuracy,
            feedback: raw.feedback.or(raw.message),
        })
    }
}

/// An image ready to be graded.
#[derive(Debug, Clone, Copy)]
pub struct GradingRequest<'a> {
    pub worksheet_id: &'a str,
    pub file_name: &'a str,
    pub content_type: &'a str,
    pub bytes: &'a [u8],
}

#[async_trait]
pub trait Grader: Send + Sync {
    async fn grade(&self, request: GradingRequest<'_>) -> Result<GradingReport, GraderError>;
}

/// HTTP implementation of [`Grader`].
pub struct HttpGrader {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpGrader {
    /// * `endpoint` - Full URL the multipart form is posted to.
    pub fn new(endpoint: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }
}

#[async_trait]
impl Grader for HttpGrader {
    async fn grade(&self, request: GradingRequest<'_>) -> Result<GradingReport, GraderError> {
        let part = Part::bytes(request.bytes.to_vec())
            .file_name(request.file_name.to_string())
            .mime_str(request.content_type)?;
        let form = Form::new()
            .part("file", part)
            .text("worksheetId", request.worksheet_id.to_string());

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(GraderError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        parse_report(&body)
    }
}

/// Parses a 2xx grading response body.
pub fn parse_report(body: &str) -> Result<GradingReport, GraderError> {
    serde_json::from_str(body).map_err(|e| GraderError::Malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_primary_keys() {
        let report = parse_report(
            r#"{"score": 87.5, "steadiness": 90, "accuracy": 80, "feedback": "Nice loops"}"#,
        )
        .unwrap();
        assert_eq!(report.score, 87.5);
        assert_eq!(report.steadiness, 90.0);
        assert_eq!(report.accuracy, 80.0);
        assert_eq!(report.feedback.as_deref(), Some("Nice loops"));
    }

    #[test]
    fn falls_back_to_legacy_keys() {
        let report = parse_report(
            r#"{"overall_score": 72, "steadiness": 60, "accuracy": 75, "message": "Keep going"}"#,
        )
        .unwrap();
        assert_eq!(report.score, 72.0);
        assert_eq!(report.feedback.as_deref(), Some("Keep going"));
    }

    #[test]
    fn primary_key_wins_over_fallback() {
        let report = parse_report(
            r#"{"score": 50, "overall_score": 10, "steadiness": 1, "accuracy": 2}"#,
        )
        .unwrap();
        assert_eq!(report.score, 50.0);
        assert_eq!(report.feedback, None);
    }

    #[test]
    fn missing_score_is_malformed() {
        let err = parse_report(r#"{"steadiness": 1, "accuracy": 2}"#).unwrap_err();
        assert!(matches!(err, GraderError::Malformed(msg) if msg.contains("missing score")));
    }

    #[test]
    fn out_of_range_values_are_malformed() {
        for body in [
            r#"{"score": 1e300, "steadiness": 50, "accuracy": 50}"#,
            r#"{"score": 80, "steadiness": -1, "accuracy": 50}"#,
            r#"{"overall_score": 80, "steadiness": 50, "accuracy": 100.5}"#,
        ] {
            let err = parse_report(body).unwrap_err();
            assert!(matches!(err, GraderError::Malformed(msg) if msg.contains("out of range")));
        }
        assert!(parse_report(r#"{"score": 100, "steadiness": 0, "accuracy": 0}"#).is_ok());
    }

    #[test]
    fn rejection_displays_upstream_body() {
        let err = GraderError::Rejected {
            status: 503,
            body: "grading service unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "grading service unavailable");
    }
}
