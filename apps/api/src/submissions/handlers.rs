use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::state::AppState;
use crate::submissions::service::save_submission;
use crate::submissions::upload::read_submission;

#[derive(Debug, Serialize)]
pub struct SubmitFormResponse {
    pub message: &'static str,
}

/// POST /api/submit-form
///
/// Accepts `multipart/form-data` with `name, phone, address, email, gender,
/// degree` and file parts `resume` (required) and `photo` (optional).
/// 201 `{"message":"Submitted"}` on success, 400 `{"error":"Error saving form"}` otherwise.
pub async fn handle_submit_form(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<SubmitFormResponse>), AppError> {
    // A body that is not multipart still gets the generic 400 body.
    let values = read_submission(multipart?).await?;
    let row = save_submission(state.store.as_ref(), &state.uploads, values).await?;

    info!("Accepted submission {}", row.id);
    Ok((
        StatusCode::CREATED,
        Json(SubmitFormResponse {
            message: "Submitted",
        }),
    ))
}
