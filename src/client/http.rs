use async_trait::async_trait;
use reqwest::{
    RequestBuilder, StatusCode,
    multipart::{Form, Part},
};
use serde::de::DeserializeOwned;
use serde_json::json;
use uuid::Uuid;

use super::{ClientError, PracticeApi};
use crate::{
    curriculum::Track,
    models::submission::{GradeResponse, PracticeData},
    workflow::SelectedFile,
};

/// HTTP client for the practice API.
#[derive(Debug, Clone)]
pub struct HttpPracticeApi {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpPracticeApi {
    /// * `base_url` - Server root, e.g. `http://localhost:3000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Attaches a bearer token to every subsequent request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Signs in and keeps the returned token.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<(), ClientError> {
        #[derive(serde::Deserialize)]
        struct LoginResponse {
            token: String,
        }

        let response = self
            .client
            .post(self.url("/api/auth/login"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await?;

        let body: LoginResponse = parse_json(response).await?;
        self.token = Some(body.token);
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl PracticeApi for HttpPracticeApi {
    async fn load_practice(&self, track: Track) -> Result<PracticeData, ClientError> {
        let response = self
            .authorized(self.client.get(self.url(&format!("/api/practice/{}", track.slug()))))
            .send()
            .await?;

        parse_json(response).await
    }

    async fn grade(&self, file: &SelectedFile, worksheet_id: &str) -> Result<GradeResponse, ClientError> {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.content_type)?;
        let form = Form::new()
            .part("file", part)
            .text("worksheetId", worksheet_id.to_string());

        let response = self
            .authorized(self.client.post(self.url("/api/grade")))
            .multipart(form)
            .send()
            .await?;

        parse_json(response).await
    }

    async fn delete_submission(&self, submission_id: Uuid, image_path: &str) -> Result<(), ClientError> {
        let response = self
            .authorized(self.client.delete(self.url("/api/submissions")))
            .json(&json!({
                "submissionId": submission_id,
                "imagePath": image_path,
            }))
            .send()
            .await?;

        ensure_success(response).await?;
        Ok(())
    }
}

/// Turns a non-2xx response into [`ClientError::Api`].
async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Api {
        status: status.as_u16(),
        message: error_message(status, &body),
    })
}

async fn parse_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let response = ensure_success(response).await?;
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
}

/// The server's `error` field when the body is JSON, the raw body otherwise.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(serde_json::Value::String(message)) = map.get("error") {
            return message.clone();
        }
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }

    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()))
}
