//! Upload staging directories.

use std::path::{Path, PathBuf};

use lecta_models::LectureId;
use tracing::{debug, warn};

use crate::error::{StorageError, StorageResult};

/// Default root for staged uploads.
const DEFAULT_UPLOAD_ROOT: &str = "temp_uploads";

/// Staging area for uploaded files.
///
/// Lecture audio is staged under `<root>/lecture_<id>/<filename>` and
/// deleted once the pipeline finishes; syllabus documents go under
/// `<root>/syllabus/`.
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
}

/// Strip a client-supplied filename down to a safe basename.
///
/// Path separators and parent references never survive; every character
/// outside `[A-Za-z0-9._-]` becomes `_`, and leading dots are dropped.
pub fn sanitize_filename(raw: &str) -> StorageResult<String> {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or(raw);

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.trim_start_matches('.').to_string();
    if cleaned.is_empty() {
        return Err(StorageError::invalid_filename(raw));
    }
    Ok(cleaned)
}

impl UploadStore {
    /// Create a store rooted at the given directory, creating it if needed.
    pub fn new(root: impl Into<PathBuf>) -> StorageResult<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Create from the `LECTA_UPLOAD_ROOT` environment variable.
    pub fn from_env() -> StorageResult<Self> {
        let root =
            std::env::var("LECTA_UPLOAD_ROOT").unwrap_or_else(|_| DEFAULT_UPLOAD_ROOT.to_string());
        Self::new(root)
    }

    /// Root directory for all staged uploads.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Staging directory for one lecture.
    pub fn lecture_dir(&self, id: LectureId) -> PathBuf {
        self.root.join(format!("lecture_{id}"))
    }

    /// Write uploaded lecture audio to its staging directory.
    pub async fn stage_lecture(
        &self,
        id: LectureId,
        filename: &str,
        data: &[u8],
    ) -> StorageResult<PathBuf> {
        let filename = sanitize_filename(filename)?;
        let dir = self.lecture_dir(id);
        tokio::fs::create_dir_all(&dir).await?;

        let path = dir.join(filename);
        tokio::fs::write(&path, data).await?;
        debug!("Staged lecture {} upload at {}", id, path.display());
        Ok(path)
    }

    /// Write an uploaded syllabus document to the syllabus staging directory.
    pub async fn stage_syllabus(&self, filename: &str, data: &[u8]) -> StorageResult<PathBuf> {
        let filename = sanitize_filename(filename)?;
        let dir = self.root.join("syllabus");
        tokio::fs::create_dir_all(&dir).await?;

        let path = dir.join(filename);
        tokio::fs::write(&path, data).await?;
        debug!("Staged syllabus upload at {}", path.display());
        Ok(path)
    }

    /// Delete a lecture's staging directory and everything in it.
    ///
    /// Missing directories are fine; anything else is logged and ignored
    /// so cleanup never fails a finished job.
    pub async fn remove_lecture_dir(&self, id: LectureId) {
        let dir = self.lecture_dir(id);
        match tokio::fs::remove_dir_all(&dir).await {
            Ok(()) => debug!("Cleaned up {}", dir.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to clean up {}: {}", dir.display(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn sanitize_keeps_simple_names() {
        assert_eq!(sanitize_filename("lecture01.mp3").unwrap(), "lecture01.mp3");
        assert_eq!(sanitize_filename("week 2 (final).pdf").unwrap(), "week_2__final_.pdf");
    }

    #[test]
    fn sanitize_strips_path_components() {
        assert_eq!(sanitize_filename("../../etc/passwd").unwrap(), "passwd");
        assert_eq!(sanitize_filename("c:\\uploads\\a.docx").unwrap(), "a.docx");
        assert_eq!(sanitize_filename(".hidden").unwrap(), "hidden");
    }

    #[test]
    fn sanitize_rejects_empty_results() {
        assert!(sanitize_filename("").is_err());
        assert!(sanitize_filename("...").is_err());
        assert!(sanitize_filename("///").is_err());
    }

    #[tokio::test]
    async fn stage_and_cleanup_lecture() {
        let tmp = TempDir::new().unwrap();
        let store = UploadStore::new(tmp.path()).unwrap();
        let id = LectureId(7);

        let path = store.stage_lecture(id, "audio.wav", b"RIFF").await.unwrap();
        assert!(path.exists());
        assert!(path.starts_with(store.lecture_dir(id)));

        store.remove_lecture_dir(id).await;
        assert!(!store.lecture_dir(id).exists());

        // Removing again is a no-op
        store.remove_lecture_dir(id).await;
    }

    #[tokio::test]
    async fn stage_syllabus_lands_in_syllabus_dir() {
        let tmp = TempDir::new().unwrap();
        let store = UploadStore::new(tmp.path()).unwrap();

        let path = store.stage_syllabus("cs101.pdf", b"%PDF-").await.unwrap();
        assert!(path.exists());
        assert!(path.starts_with(tmp.path().join("syllabus")));
    }
}
