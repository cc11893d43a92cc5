use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::fields::{
    Field, FileField, FileInput, Gender, TextField, DEGREES, MAX_FILE_BYTES, PDF_CONTENT_TYPE,
};
use crate::state::FormValues;

pub const NAME_REQUIRED: &str = "Name is required";
pub const NAME_INVALID: &str = "Name must be 2-30 letters only";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Invalid email format";
pub const PHONE_REQUIRED: &str = "Phone is required";
pub const PHONE_INVALID: &str = "Enter valid 10-digit mobile number";
pub const ADDRESS_REQUIRED: &str = "Address is required";
pub const GENDER_REQUIRED: &str = "Please select gender";
pub const DEGREE_REQUIRED: &str = "Please select degree";
pub const RESUME_REQUIRED: &str = "Resume is required";
pub const RESUME_NOT_PDF: &str = "Resume must be PDF";
pub const FILE_TOO_LARGE: &str = "File size must be less than 5MB";

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z\s]{2,30}$").expect("name pattern is valid"));
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[6-9][0-9]{9}$").expect("phone pattern is valid"));

/// Validates a single text field. Returns the message to show, or `None` when valid.
///
/// Only the empty string counts as missing; whitespace is left to the pattern rules.
pub fn validate_text(field: TextField, value: &str) -> Option<&'static str> {
    match field {
        TextField::Name => {
            required(value, NAME_REQUIRED).or_else(|| matches(&NAME_RE, value, NAME_INVALID))
        }
        TextField::Email => {
            required(value, EMAIL_REQUIRED).or_else(|| matches(&EMAIL_RE, value, EMAIL_INVALID))
        }
        TextField::Phone => {
            required(value, PHONE_REQUIRED).or_else(|| matches(&PHONE_RE, value, PHONE_INVALID))
        }
        TextField::Address => required(value, ADDRESS_REQUIRED),
        TextField::Gender => value.parse::<Gender>().err().map(|_| GENDER_REQUIRED),
        TextField::Degree => (!DEGREES.contains(&value)).then_some(DEGREE_REQUIRED),
    }
}

/// Validates a file field.
///
/// Resume: required, declared as `application/pdf`, at most [`MAX_FILE_BYTES`].
/// Photo: optional, at most [`MAX_FILE_BYTES`].
pub fn validate_file(field: FileField, file: Option<&FileInput>) -> Option<&'static str> {
    match (field, file) {
        (FileField::Resume, None) => Some(RESUME_REQUIRED),
        (FileField::Resume, Some(f)) if f.content_type != PDF_CONTENT_TYPE => {
            Some(RESUME_NOT_PDF)
        }
        (FileField::Photo, None) => None,
        (_, Some(f)) if f.size() > MAX_FILE_BYTES => Some(FILE_TOO_LARGE),
        (_, Some(_)) => None,
    }
}

/// Validates one field against the current form values.
pub fn validate_field(field: Field, values: &FormValues) -> Option<&'static str> {
    match field {
        Field::Text(f) => validate_text(f, values.text(f)),
        Field::File(f) => validate_file(f, values.file(f)),
    }
}

/// Computes the error for every field. Valid fields map to an empty string.
pub fn validate_all(values: &FormValues) -> BTreeMap<Field, String> {
    Field::all()
        .map(|field| {
            let message = validate_field(field, values).unwrap_or_default();
            (field, message.to_string())
        })
        .collect()
}

fn required(value: &str, message: &'static str) -> Option<&'static str> {
    value.is_empty().then_some(message)
}

fn matches(pattern: &Regex, value: &str, message: &'static str) -> Option<&'static str> {
    (!pattern.is_match(value)).then_some(message)
}
