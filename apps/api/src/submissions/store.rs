//! Submission persistence behind a trait, so the endpoint can run against
//! PostgreSQL in production and an in-memory store in tests.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::submission::{NewSubmission, SubmissionRow};

/// Carried in `AppState` as `Arc<dyn SubmissionStore>`.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Inserts one submission. Rows are never updated or deleted.
    async fn insert(&self, submission: NewSubmission) -> Result<SubmissionRow, AppError>;
}

pub struct PgSubmissionStore {
    pool: PgPool,
}

impl PgSubmissionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubmissionStore for PgSubmissionStore {
    async fn insert(&self, submission: NewSubmission) -> Result<SubmissionRow, AppError> {
        let row = sqlx::query_as::<_, SubmissionRow>(
            r#"
            INSERT INTO submissions
                (id, name, phone, address, email, gender, degree, resume, photo)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&submission.name)
        .bind(&submission.phone)
        .bind(&submission.address)
        .bind(&submission.email)
        .bind(&submission.gender)
        .bind(&submission.degree)
        .bind(&submission.resume)
        .bind(&submission.photo)
        .fetch_one(&self.pool)
        .await?;

        info!("Inserted submission {} (resume {})", row.id, row.resume);
        Ok(row)
    }
}
