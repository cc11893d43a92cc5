use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One persisted application. `resume` and `photo` hold stored file names under
/// the upload directory, never file contents.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SubmissionRow {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub email: String,
    pub gender: String,
    pub degree: String,
    pub resume: String,
    pub photo: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A validated submission whose files are already on disk.
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub email: String,
    pub gender: String,
    pub degree: String,
    pub resume: String,
    pub photo: Option<String>,
}
