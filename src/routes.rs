// src/routes.rs

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::Method,
    middleware,
    routing::{delete, get, post},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::{
    config::MAX_UPLOAD_BYTES,
    handlers::{auth, curriculum, grading, practice, profile, submissions},
    state::AppState,
    utils::jwt::auth_middleware,
};

/// Room for the multipart framing and the `worksheetId` field on top of the image.
const UPLOAD_BODY_LIMIT: usize = MAX_UPLOAD_BYTES + 64 * 1024;

/// Assembles the main application router.
///
/// * Public: auth, curriculum, stored images.
/// * Protected (bearer token): profile, practice data, grading, deletion.
/// * Applies global middleware (Trace, CORS).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        "http://localhost:3000".parse().unwrap(),
        "http://127.0.0.1:3000".parse().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login));

    let curriculum_routes = Router::new()
        .route("/", get(curriculum::list_tracks))
        .route("/{track}", get(curriculum::get_track));

    let protected_routes = Router::new()
        .route("/profile/me", get(profile::get_me))
        .route("/practice/{track}", get(practice::load_practice))
        .route(
            "/grade",
            post(grading::grade_submission).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/submissions", delete(submissions::delete_submission))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    let uploads = ServeDir::new(&state.config.storage_root);

    Router::new()
        .nest("/api/auth", auth_routes)
        .nest("/api/curriculum", curriculum_routes)
        .nest("/api", protected_routes)
        .nest_service("/uploads", uploads)
        // Global Middleware (applied from outside in)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
