//! Form state as an immutable value.
//!
//! Every transition consumes the current [`FormState`] and returns the next one,
//! so there is no shared mutable form anywhere. Validation runs on each change
//! and again, for all fields, on every submit attempt.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::fields::{Field, FileField, FileInput, TextField};
use crate::validation::{validate_all, validate_field};

/// Generic notice shown after a rejected or failed submission.
pub const FAILURE_NOTICE: &str = "Submission failed. Please try again.";

/// Raw field values as entered by the applicant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormValues {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub gender: String,
    pub degree: String,
    pub resume: Option<FileInput>,
    pub photo: Option<FileInput>,
}

impl FormValues {
    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::Name => &self.name,
            TextField::Email => &self.email,
            TextField::Phone => &self.phone,
            TextField::Address => &self.address,
            TextField::Gender => &self.gender,
            TextField::Degree => &self.degree,
        }
    }

    pub fn file(&self, field: FileField) -> Option<&FileInput> {
        match field {
            FileField::Resume => self.resume.as_ref(),
            FileField::Photo => self.photo.as_ref(),
        }
    }

    pub fn text_mut(&mut self, field: TextField) -> &mut String {
        match field {
            TextField::Name => &mut self.name,
            TextField::Email => &mut self.email,
            TextField::Phone => &mut self.phone,
            TextField::Address => &mut self.address,
            TextField::Gender => &mut self.gender,
            TextField::Degree => &mut self.degree,
        }
    }

    pub fn file_mut(&mut self, field: FileField) -> &mut Option<FileInput> {
        match field {
            FileField::Resume => &mut self.resume,
            FileField::Photo => &mut self.photo,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Accepting edits; the submit control is enabled.
    #[default]
    Editing,
    /// A request is in flight; further submit attempts are refused.
    Submitting,
    /// The last submission was accepted; the confirmation view is shown.
    Submitted,
}

/// The multipart payload for one submission: only non-empty fields are included.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionRequest {
    pub fields: Vec<(TextField, String)>,
    pub files: Vec<(FileField, FileInput)>,
}

impl SubmissionRequest {
    fn from_values(values: &FormValues) -> Self {
        let fields = TextField::ALL
            .into_iter()
            .filter_map(|f| {
                let value = values.text(f);
                (!value.is_empty()).then(|| (f, value.to_string()))
            })
            .collect();
        let files = FileField::ALL
            .into_iter()
            .filter_map(|f| values.file(f).map(|file| (f, file.clone())))
            .collect();
        Self { fields, files }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The server answered with a 2xx status.
    Accepted,
    /// Non-2xx status or a transport error.
    Failed,
}

/// Result of a submit attempt.
#[derive(Debug)]
pub enum SubmitAttempt {
    /// All fields passed; the form is now `Submitting` and the request is ready to send.
    Ready {
        state: FormState,
        request: SubmissionRequest,
    },
    /// At least one field has an error; every error is now surfaced.
    Blocked(FormState),
    /// The form is not in the editing phase (a request is pending or the
    /// confirmation view is showing).
    Unavailable(FormState),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    values: FormValues,
    errors: BTreeMap<Field, String>,
    phase: Phase,
    notice: Option<&'static str>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Generic failure notice from the last submission, if any.
    pub fn notice(&self) -> Option<&'static str> {
        self.notice
    }

    /// Current error for a field; an empty string means valid or not yet checked.
    pub fn error(&self, field: impl Into<Field>) -> &str {
        self.errors
            .get(&field.into())
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Fields with a non-empty error, in form order.
    pub fn errors(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors
            .iter()
            .filter(|(_, message)| !message.is_empty())
            .map(|(field, message)| (*field, message.as_str()))
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn can_submit(&self) -> bool {
        self.phase == Phase::Editing
    }

    /// Sets a text field and immediately re-validates it.
    pub fn with_text(mut self, field: TextField, value: impl Into<String>) -> Self {
        *self.values.text_mut(field) = value.into();
        self.revalidate(field.into())
    }

    /// Sets (or clears) a file field and immediately re-validates it.
    pub fn with_file(mut self, field: FileField, file: Option<FileInput>) -> Self {
        *self.values.file_mut(field) = file;
        self.revalidate(field.into())
    }

    /// Recomputes the error of every field regardless of prior state.
    pub fn validate_all(mut self) -> Self {
        self.errors = validate_all(&self.values);
        self
    }

    pub fn begin_submit(self) -> SubmitAttempt {
        if self.phase != Phase::Editing {
            debug!("submit refused in phase {:?}", self.phase);
            return SubmitAttempt::Unavailable(self);
        }

        let mut state = self.validate_all();
        state.notice = None;
        if state.has_errors() {
            return SubmitAttempt::Blocked(state);
        }

        let request = SubmissionRequest::from_values(&state.values);
        state.phase = Phase::Submitting;
        SubmitAttempt::Ready { state, request }
    }

    /// Applies the server's answer to a pending submission.
    ///
    /// Accepted: every field is reset and the confirmation phase begins.
    /// Failed: values are kept so the applicant can retry.
    pub fn finish_submit(self, outcome: SubmitOutcome) -> Self {
        if self.phase != Phase::Submitting {
            warn!("finish_submit called in phase {:?}; ignoring", self.phase);
            return self;
        }

        match outcome {
            SubmitOutcome::Accepted => FormState {
                phase: Phase::Submitted,
                ..FormState::default()
            },
            SubmitOutcome::Failed => FormState {
                phase: Phase::Editing,
                notice: Some(FAILURE_NOTICE),
                ..self
            },
        }
    }

    /// Leaves the confirmation view for a fresh, empty form.
    pub fn start_new(self) -> Self {
        match self.phase {
            Phase::Submitted => FormState::default(),
            _ => self,
        }
    }

    fn revalidate(mut self, field: Field) -> Self {
        let message = validate_field(field, &self.values).unwrap_or_default();
        self.errors.insert(field, message.to_string());
        self
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::fields::PDF_CONTENT_TYPE;
    use crate::validation::{NAME_INVALID, PHONE_INVALID, RESUME_NOT_PDF, RESUME_REQUIRED};

    pub(crate) fn jane_doe() -> FormState {
        FormState::new()
            .with_text(TextField::Name, "Jane Doe")
            .with_text(TextField::Email, "jane@x.com")
            .with_text(TextField::Phone, "9876543210")
            .with_text(TextField::Address, "1 Main St")
            .with_text(TextField::Gender, "female")
            .with_text(TextField::Degree, "MCA")
            .with_file(
                FileField::Resume,
                Some(FileInput::new(
                    "My Resume.pdf",
                    PDF_CONTENT_TYPE,
                    vec![b'%'; 1024 * 1024],
                )),
            )
    }

    fn ready(state: FormState) -> (FormState, SubmissionRequest) {
        match state.begin_submit() {
            SubmitAttempt::Ready { state, request } => (state, request),
            other => panic!("expected Ready, got {other:?}"),
        }
    }

    #[test]
    fn test_change_validates_only_that_field() {
        let state = FormState::new().with_text(TextField::Name, "J4ne");
        assert_eq!(state.error(TextField::Name), NAME_INVALID);
        assert_eq!(state.error(TextField::Email), "");
        assert_eq!(state.errors().count(), 1);
    }

    #[test]
    fn test_fixing_a_field_clears_its_error() {
        let state = FormState::new()
            .with_text(TextField::Phone, "12345")
            .with_text(TextField::Phone, "9876543210");
        assert_eq!(state.error(TextField::Phone), "");
        assert!(!state.has_errors());
    }

    #[test]
    fn test_submit_on_empty_form_is_blocked_with_all_errors() {
        match FormState::new().begin_submit() {
            SubmitAttempt::Blocked(state) => {
                assert_eq!(state.errors().count(), 7);
                assert_eq!(state.error(FileField::Resume), RESUME_REQUIRED);
                assert_eq!(state.phase(), Phase::Editing);
            }
            other => panic!("expected Blocked, got {other:?}"),
        }
    }

    #[test]
    fn test_submit_revalidates_untouched_fields() {
        let state = jane_doe().with_file(FileField::Resume, None);
        // Forget recorded errors so only the submit-time pass can catch the missing resume.
        let state = FormState {
            errors: BTreeMap::new(),
            ..state
        };
        match state.begin_submit() {
            SubmitAttempt::Blocked(state) => {
                assert_eq!(state.error(FileField::Resume), RESUME_REQUIRED);
                assert_eq!(state.errors().count(), 1);
            }
            other => panic!("expected Blocked, got {other:?}"),
        }
    }

    #[test]
    fn test_png_resume_blocks_submission() {
        let state = jane_doe().with_file(
            FileField::Resume,
            Some(FileInput::new("resume.png", "image/png", vec![0u8; 100])),
        );
        assert_eq!(state.error(FileField::Resume), RESUME_NOT_PDF);
        assert!(matches!(state.begin_submit(), SubmitAttempt::Blocked(_)));
    }

    #[test]
    fn test_valid_form_builds_request_without_photo() {
        let (state, request) = ready(jane_doe());
        assert_eq!(state.phase(), Phase::Submitting);
        assert!(!state.can_submit());
        assert_eq!(request.fields.len(), 6);
        assert_eq!(request.files.len(), 1);
        assert_eq!(request.files[0].0, FileField::Resume);
        assert_eq!(request.files[0].1.file_name, "My Resume.pdf");
    }

    #[test]
    fn test_photo_is_sent_when_present() {
        let state = jane_doe().with_file(
            FileField::Photo,
            Some(FileInput::new("me.jpg", "image/jpeg", vec![1u8; 64])),
        );
        let (_, request) = ready(state);
        let files: Vec<_> = request.files.iter().map(|(f, _)| *f).collect();
        assert_eq!(files, [FileField::Resume, FileField::Photo]);
    }

    #[test]
    fn test_second_submit_while_pending_is_refused() {
        let (state, _) = ready(jane_doe());
        match state.begin_submit() {
            SubmitAttempt::Unavailable(state) => assert_eq!(state.phase(), Phase::Submitting),
            other => panic!("expected Unavailable, got {other:?}"),
        }
    }

    #[test]
    fn test_accepted_submission_resets_form_and_confirms() {
        let (state, _) = ready(jane_doe());
        let state = state.finish_submit(SubmitOutcome::Accepted);
        assert_eq!(state.phase(), Phase::Submitted);
        assert_eq!(state.values(), &FormValues::default());
        assert!(!state.has_errors());

        let state = state.start_new();
        assert_eq!(state, FormState::new());
    }

    #[test]
    fn test_failed_submission_keeps_values_and_shows_notice() {
        let (state, _) = ready(jane_doe());
        let state = state.finish_submit(SubmitOutcome::Failed);
        assert_eq!(state.phase(), Phase::Editing);
        assert_eq!(state.notice(), Some(FAILURE_NOTICE));
        assert_eq!(state.values().name, "Jane Doe");
        assert!(state.values().resume.is_some());

        // Retrying clears the notice.
        let (state, _) = ready(state);
        assert_eq!(state.notice(), None);
    }

    #[test]
    fn test_finish_without_pending_request_is_ignored() {
        let state = jane_doe();
        let after = state.clone().finish_submit(SubmitOutcome::Accepted);
        assert_eq!(after, state);
    }

    #[test]
    fn test_phone_error_surfaces_on_submit() {
        let state = jane_doe().with_text(TextField::Phone, "5876543210");
        match state.begin_submit() {
            SubmitAttempt::Blocked(state) => {
                assert_eq!(state.error(TextField::Phone), PHONE_INVALID)
            }
            other => panic!("expected Blocked, got {other:?}"),
        }
    }
}
