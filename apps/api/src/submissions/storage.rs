use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use applicant_form::FileInput;
use chrono::Utc;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// The directory uploaded files are written to and later served from.
#[derive(Debug, Clone)]
pub struct UploadDir {
    root: Arc<PathBuf>,
}

impl UploadDir {
    /// Opens the upload directory, creating it if needed.
    pub async fn create(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        info!("Upload directory ready at {}", root.display());
        Ok(Self {
            root: Arc::new(root),
        })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Writes the file under a fresh name and returns that name.
    ///
    /// `create_new` guarantees an existing upload is never overwritten.
    pub async fn store(&self, file: &FileInput) -> io::Result<String> {
        let stored_name = stored_file_name(
            &file.file_name,
            Utc::now().timestamp_millis(),
            Uuid::new_v4(),
        );
        let target = self.root.join(&stored_name);

        let mut out = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
            .await?;
        out.write_all(&file.bytes).await?;
        out.flush().await?;

        debug!("Stored {} ({} bytes) as {stored_name}", file.file_name, file.size());
        Ok(stored_name)
    }

    /// Best-effort removal of files written for a request that did not complete.
    pub async fn discard(&self, stored_names: &[&str]) {
        for name in stored_names {
            match tokio::fs::remove_file(self.root.join(name)).await {
                Ok(()) => debug!("Removed orphaned upload {name}"),
                Err(e) => warn!("Failed to remove orphaned upload {name}: {e}"),
            }
        }
    }
}

/// `<millis>-<uuid>-<original name without whitespace>`.
///
/// The timestamp keeps a directory listing in upload order; the UUID makes two
/// uploads of the same name in the same millisecond distinct.
pub fn stored_file_name(original: &str, millis: i64, id: Uuid) -> String {
    format!("{millis}-{}-{}", id.simple(), sanitize_file_name(original))
}

/// Keeps only the final path component and strips all whitespace.
pub fn sanitize_file_name(original: &str) -> String {
    let base = original.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_removes_whitespace() {
        assert_eq!(sanitize_file_name("My  Resume 2024.pdf"), "MyResume2024.pdf");
        assert_eq!(sanitize_file_name("tab\tand\nnewline.pdf"), "tabandnewline.pdf");
    }

    #[test]
    fn test_sanitize_drops_directories() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name(r"C:\Users\jane\cv.pdf"), "cv.pdf");
        assert_eq!(sanitize_file_name("dir/"), "upload");
        assert_eq!(sanitize_file_name("   "), "upload");
    }

    #[test]
    fn test_stored_name_layout() {
        let id = Uuid::nil();
        assert_eq!(
            stored_file_name("My Resume.pdf", 1_700_000_000_000, id),
            "1700000000000-00000000000000000000000000000000-MyResume.pdf"
        );
    }

    #[test]
    fn test_same_millisecond_same_name_do_not_collide() {
        let a = stored_file_name("cv.pdf", 42, Uuid::new_v4());
        let b = stored_file_name("cv.pdf", 42, Uuid::new_v4());
        assert_ne!(a, b);
        assert!(a.ends_with("-cv.pdf") && b.ends_with("-cv.pdf"));
    }

    #[tokio::test]
    async fn test_store_and_discard() {
        let dir = tempfile::tempdir().unwrap();
        let uploads = UploadDir::create(dir.path().join("uploads")).await.unwrap();
        let file = FileInput::new("My Resume.pdf", "application/pdf", b"%PDF-1.4".to_vec());

        let name = uploads.store(&file).await.unwrap();
        assert!(name.ends_with("-MyResume.pdf"));
        let written = tokio::fs::read(uploads.path().join(&name)).await.unwrap();
        assert_eq!(written, b"%PDF-1.4");

        uploads.discard(&[name.as_str()]).await;
        assert!(!uploads.path().join(&name).exists());
    }
}
