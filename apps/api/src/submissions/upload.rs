use applicant_form::{Field, FileInput, FormValues, MAX_FILE_BYTES};
use axum::extract::multipart::{Field as Part, Multipart};
use bytes::BytesMut;
use tracing::debug;

use crate::errors::AppError;

/// Reads a `multipart/form-data` submission into form values.
///
/// Each file part is streamed and rejected as soon as it exceeds
/// [`MAX_FILE_BYTES`]. A file field may appear at most once. Unknown parts are
/// skipped.
pub async fn read_submission(mut multipart: Multipart) -> Result<FormValues, AppError> {
    let mut values = FormValues::default();

    while let Some(mut part) = multipart.next_field().await? {
        let Some(name) = part.name().map(str::to_owned) else {
            continue;
        };

        match name.parse::<Field>() {
            Ok(Field::Text(field)) => {
                *values.text_mut(field) = part.text().await?;
            }
            Ok(Field::File(field)) => {
                if values.file(field).is_some() {
                    return Err(AppError::UnexpectedPart(name));
                }
                let file_name = part
                    .file_name()
                    .map(str::to_owned)
                    .ok_or_else(|| AppError::UnexpectedPart(name.clone()))?;
                let content_type = part
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_owned();
                let bytes = read_limited(&mut part, field.as_str(), MAX_FILE_BYTES).await?;
                debug!("Received {name} part '{file_name}' ({} bytes)", bytes.len());
                *values.file_mut(field) = Some(FileInput::new(file_name, content_type, bytes));
            }
            Err(_) => debug!("Skipping unknown multipart part '{name}'"),
        }
    }

    Ok(values)
}

async fn read_limited(
    part: &mut Part<'_>,
    field: &'static str,
    limit: usize,
) -> Result<bytes::Bytes, AppError> {
    let mut buf = BytesMut::new();
    while let Some(chunk) = part.chunk().await? {
        if buf.len() + chunk.len() > limit {
            return Err(AppError::FileTooLarge { field, limit });
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(buf.freeze())
}
