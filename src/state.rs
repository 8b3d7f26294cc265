use std::sync::Arc;

use crate::config::Config;
use crate::services::{grading::Grader, storage::ObjectStore};
use axum::extract::FromRef;
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Config,
    pub grader: Arc<dyn Grader>,
    pub storage: Arc<dyn ObjectStore>,
}

impl FromRef<AppState> for PgPool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for Arc<dyn Grader> {
    fn from_ref(state: &AppState) -> Self {
        state.grader.clone()
    }
}

impl FromRef<AppState> for Arc<dyn ObjectStore> {
    fn from_ref(state: &AppState) -> Self {
        state.storage.clone()
    }
}
