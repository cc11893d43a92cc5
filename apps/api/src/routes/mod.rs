pub mod health;

use applicant_form::MAX_FILE_BYTES;
use axum::{
    extract::DefaultBodyLimit,
    http::Uri,
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::errors::AppError;
use crate::state::AppState;
use crate::submissions::handlers;

/// Two files at the per-file limit plus room for text fields and part headers.
const MAX_BODY_BYTES: usize = 2 * MAX_FILE_BYTES + 1024 * 1024;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}

pub fn build_router(state: AppState) -> Router {
    // Stored files are served read-only under their stored names.
    let uploads = ServeDir::new(state.uploads.path());

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/submit-form",
            post(handlers::handle_submit_form).layer(DefaultBodyLimit::max(MAX_BODY_BYTES)),
        )
        .nest_service("/uploads", uploads)
        .fallback(not_found)
        .with_state(state)
}
