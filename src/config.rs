// src/config.rs

use std::{env, path::PathBuf, time::Duration};
use dotenvy::dotenv;
use url::Url;

/// Largest image accepted by the upload widget and the grading endpoint (10 MiB).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// MIME types accepted for worksheet photos.
pub const ACCEPTED_IMAGE_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

/// Pause between acknowledging a grade and advancing to the next worksheet.
pub const ACKNOWLEDGE_DELAY: Duration = Duration::from_secs(2);

/// Flat experience awarded for every graded submission.
pub const XP_PER_SUBMISSION: i64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    /// Token lifetime in seconds.
    pub jwt_expiration: u64,
    pub rust_log: String,
    /// Base URL of the remote grading service.
    pub grading_service_url: String,
    /// Directory the local object store writes uploaded images into.
    pub storage_root: PathBuf,
    pub bind_addr: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .expect("DATABASE_URL must be set");

        let jwt_secret = env::var("JWT_SECRET")
            .expect("JWT_SECRET must be set");

        let jwt_expiration = env::var("JWT_EXPIRATION")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(86_400);

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        let grading_service_url = env::var("GRADING_SERVICE_URL")
            .expect("GRADING_SERVICE_URL must be set");
        Url::parse(&grading_service_url)
            .expect("GRADING_SERVICE_URL must be an absolute URL");

        let storage_root = env::var("STORAGE_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("uploads"));

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        Self {
            database_url,
            jwt_secret,
            jwt_expiration,
            rust_log,
            grading_service_url,
            storage_root,
            bind_addr,
        }
    }
}
