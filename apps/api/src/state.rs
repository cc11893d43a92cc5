use std::sync::Arc;

use crate::submissions::storage::UploadDir;
use crate::submissions::store::SubmissionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Record store. `PgSubmissionStore` in production.
    pub store: Arc<dyn SubmissionStore>,
    pub uploads: UploadDir,
}
