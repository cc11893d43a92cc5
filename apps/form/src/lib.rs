//! Applicant form: field rules, immutable form state and the multipart submitter.
//!
//! The same rules are reused by the submission endpoint to re-check whatever a
//! client sends.

pub mod client;
pub mod fields;
pub mod state;
pub mod validation;

pub use client::{submit_form, FormClient, SubmitError, SubmitResponse, DEFAULT_ENDPOINT};
pub use fields::{Field, FileField, FileInput, Gender, TextField, DEGREES, MAX_FILE_BYTES};
pub use state::{FormState, FormValues, Phase, SubmissionRequest, SubmitAttempt, SubmitOutcome};
