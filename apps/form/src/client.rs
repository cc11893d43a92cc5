//! HTTP submitter: turns a [`SubmissionRequest`] into one multipart POST.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::state::{FormState, SubmissionRequest, SubmitAttempt, SubmitOutcome};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:4000/api/submit-form";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server rejected submission (status {status}): {body}")]
    Status { status: u16, body: String },
}

/// Body of a successful response. Any 2xx counts as accepted, so the
/// confirmation message is best-effort.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmitResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FormClient {
    client: Client,
    endpoint: String,
}

impl FormClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, SubmitError> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends the submission as `multipart/form-data`.
    pub async fn submit(&self, request: &SubmissionRequest) -> Result<SubmitResponse, SubmitError> {
        let form = multipart_form(request)?;

        let response = self.client.post(&self.endpoint).multipart(form).send().await?;
        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                debug!("Could not read response body (status {status}): {e}");
                String::new()
            }
        };

        if !status.is_success() {
            return Err(SubmitError::Status {
                status: status.as_u16(),
                body,
            });
        }

        debug!("Submission accepted with status {status}");
        Ok(serde_json::from_str(&body).unwrap_or_default())
    }
}

fn multipart_form(request: &SubmissionRequest) -> Result<Form, SubmitError> {
    let mut form = Form::new();
    for (field, value) in &request.fields {
        form = form.text(field.as_str(), value.clone());
    }
    for (field, file) in &request.files {
        let part = Part::stream_with_length(file.bytes.clone(), file.size() as u64)
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type)?;
        form = form.part(field.as_str(), part);
    }
    Ok(form)
}

/// Runs one full submit cycle: validate, send, then apply the outcome.
///
/// Returns the state unchanged (with errors surfaced) when submission is
/// blocked or another request is already pending.
pub async fn submit_form(state: FormState, client: &FormClient) -> FormState {
    let (state, request) = match state.begin_submit() {
        SubmitAttempt::Ready { state, request } => (state, request),
        SubmitAttempt::Blocked(state) => {
            debug!("Submission blocked by {} field error(s)", state.errors().count());
            return state;
        }
        SubmitAttempt::Unavailable(state) => return state,
    };

    match client.submit(&request).await {
        Ok(response) => {
            info!(
                "Submitted to {}: {}",
                client.endpoint(),
                response.message.as_deref().unwrap_or("ok")
            );
            state.finish_submit(SubmitOutcome::Accepted)
        }
        Err(e) => {
            warn!("Submission to {} failed: {e}", client.endpoint());
            state.finish_submit(SubmitOutcome::Failed)
        }
    }
}
