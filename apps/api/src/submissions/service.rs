use applicant_form::validation::validate_all;
use applicant_form::FormValues;
use tracing::info;

use crate::errors::AppError;
use crate::models::submission::{NewSubmission, SubmissionRow};
use crate::submissions::storage::UploadDir;
use crate::submissions::store::SubmissionStore;

/// Validates, writes the files, then inserts the record.
///
/// Terminal on the first error. Files written for this request are removed
/// again if a later step fails, so a failed submission leaves nothing behind.
pub async fn save_submission(
    store: &dyn SubmissionStore,
    uploads: &UploadDir,
    values: FormValues,
) -> Result<SubmissionRow, AppError> {
    // 1. Validate: the resume part must be present, then the same rules the form applies.
    let resume = values.resume.as_ref().ok_or(AppError::MissingFile("resume"))?;
    let problems: Vec<String> = validate_all(&values)
        .into_iter()
        .filter(|(_, message)| !message.is_empty())
        .map(|(field, message)| format!("{field}: {message}"))
        .collect();
    if !problems.is_empty() {
        return Err(AppError::Validation(problems.join("; ")));
    }

    // 2. Write files
    let resume_name = uploads.store(resume).await?;
    let photo_name = match values.photo.as_ref() {
        Some(photo) => match uploads.store(photo).await {
            Ok(name) => Some(name),
            Err(e) => {
                uploads.discard(&[resume_name.as_str()]).await;
                return Err(e.into());
            }
        },
        None => None,
    };

    // 3. Insert the record
    let FormValues {
        name,
        email,
        phone,
        address,
        gender,
        degree,
        ..
    } = values;
    let submission = NewSubmission {
        name,
        phone,
        address,
        email,
        gender,
        degree,
        resume: resume_name.clone(),
        photo: photo_name.clone(),
    };

    match store.insert(submission).await {
        Ok(row) => {
            info!("Saved submission {} with resume {}", row.id, row.resume);
            Ok(row)
        }
        Err(e) => {
            let written: Vec<&str> = std::iter::once(resume_name.as_str())
                .chain(photo_name.as_deref())
                .collect();
            uploads.discard(&written).await;
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use applicant_form::{FileInput, MAX_FILE_BYTES};

    use super::*;
    use crate::submissions::store::testing::MemoryStore;

    fn jane_doe() -> FormValues {
        FormValues {
            name: "Jane Doe".into(),
            email: "jane@x.com".into(),
            phone: "9876543210".into(),
            address: "1 Main St".into(),
            gender: "female".into(),
            degree: "MCA".into(),
            resume: Some(FileInput::new(
                "My Resume.pdf",
                "application/pdf",
                vec![b'%'; 1024 * 1024],
            )),
            photo: None,
        }
    }

    async fn upload_dir() -> (tempfile::TempDir, UploadDir) {
        let dir = tempfile::tempdir().unwrap();
        let uploads = UploadDir::create(dir.path()).await.unwrap();
        (dir, uploads)
    }

    fn stored_files(uploads: &UploadDir) -> Vec<String> {
        std::fs::read_dir(uploads.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect()
    }

    #[tokio::test]
    async fn test_saves_record_referencing_stored_names() {
        let (_dir, uploads) = upload_dir().await;
        let store = MemoryStore::default();

        let row = save_submission(&store, &uploads, jane_doe()).await.unwrap();
        assert!(row.resume.ends_with("-MyResume.pdf"));
        assert_eq!(row.photo, None);
        assert_eq!(row.degree, "MCA");
        assert_eq!(stored_files(&uploads), vec![row.resume.clone()]);
        assert_eq!(store.rows().len(), 1);
    }

    #[tokio::test]
    async fn test_photo_is_stored_too() {
        let (_dir, uploads) = upload_dir().await;
        let store = MemoryStore::default();
        let values = FormValues {
            photo: Some(FileInput::new("me.png", "image/png", vec![7u8; 256])),
            ..jane_doe()
        };

        let row = save_submission(&store, &uploads, values).await.unwrap();
        let photo = row.photo.unwrap();
        assert!(photo.ends_with("-me.png"));
        assert_eq!(stored_files(&uploads).len(), 2);
    }

    #[tokio::test]
    async fn test_missing_resume_is_rejected_before_writing() {
        let (_dir, uploads) = upload_dir().await;
        let store = MemoryStore::default();
        let values = FormValues {
            resume: None,
            ..jane_doe()
        };

        let err = save_submission(&store, &uploads, values).await.unwrap_err();
        assert!(matches!(err, AppError::MissingFile("resume")));
        assert!(stored_files(&uploads).is_empty());
        assert!(store.rows().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_fields_are_rejected() {
        let (_dir, uploads) = upload_dir().await;
        let store = MemoryStore::default();
        let values = FormValues {
            phone: "12345".into(),
            photo: Some(FileInput::new("me.png", "image/png", vec![0u8; MAX_FILE_BYTES + 1])),
            ..jane_doe()
        };

        match save_submission(&store, &uploads, values).await {
            Err(AppError::Validation(msg)) => {
                assert!(msg.contains("phone: Enter valid 10-digit mobile number"));
                assert!(msg.contains("photo: File size must be less than 5MB"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(stored_files(&uploads).is_empty());
    }

    #[tokio::test]
    async fn test_failed_insert_removes_written_files() {
        let (_dir, uploads) = upload_dir().await;
        let store = MemoryStore::failing();
        let values = FormValues {
            photo: Some(FileInput::new("me.png", "image/png", vec![7u8; 256])),
            ..jane_doe()
        };

        let err = save_submission(&store, &uploads, values).await.unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
        assert!(stored_files(&uploads).is_empty());
    }
}
