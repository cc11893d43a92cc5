use std::fmt;
use std::str::FromStr;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound for any single uploaded file (resume or photo): 5 MiB.
pub const MAX_FILE_BYTES: usize = 5 * 1024 * 1024;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Degrees an applicant may pick from.
pub const DEGREES: &[&str] = &[
    "B.Tech Computer Science",
    "B.Tech Electronics",
    "B.Sc Computer Science",
    "BCA",
    "MCA",
    "MBA",
];

#[derive(Debug, Error)]
#[error("unknown form field '{0}'")]
pub struct UnknownField(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextField {
    Name,
    Email,
    Phone,
    Address,
    Gender,
    Degree,
}

impl TextField {
    pub const ALL: [TextField; 6] = [
        TextField::Name,
        TextField::Email,
        TextField::Phone,
        TextField::Address,
        TextField::Gender,
        TextField::Degree,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TextField::Name => "name",
            TextField::Email => "email",
            TextField::Phone => "phone",
            TextField::Address => "address",
            TextField::Gender => "gender",
            TextField::Degree => "degree",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileField {
    Resume,
    Photo,
}

impl FileField {
    pub const ALL: [FileField; 2] = [FileField::Resume, FileField::Photo];

    pub fn as_str(&self) -> &'static str {
        match self {
            FileField::Resume => "resume",
            FileField::Photo => "photo",
        }
    }
}

/// Any field of the application form, text or file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Text(TextField),
    File(FileField),
}

impl Field {
    pub fn all() -> impl Iterator<Item = Field> {
        TextField::ALL
            .into_iter()
            .map(Field::Text)
            .chain(FileField::ALL.into_iter().map(Field::File))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Text(f) => f.as_str(),
            Field::File(f) => f.as_str(),
        }
    }
}

impl From<TextField> for Field {
    fn from(field: TextField) -> Self {
        Field::Text(field)
    }
}

impl From<FileField> for Field {
    fn from(field: FileField) -> Self {
        Field::File(field)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::all()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl FromStr for Gender {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            other => Err(UnknownField(other.to_string())),
        }
    }
}

/// A file picked for upload: its client-side name, declared content type and bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct FileInput {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl FileInput {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}
