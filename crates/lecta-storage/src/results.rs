//! Syllabus result archive.
//!
//! Every processed syllabus produces one timestamped JSON file; readers
//! always want the most recent one.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{StorageError, StorageResult};
use crate::uploads::sanitize_filename;

/// Default directory for saved coverage results.
const DEFAULT_RESULTS_DIR: &str = "temp_uploads/syllabus_results";

/// Archive of syllabus coverage results on local disk.
#[derive(Debug, Clone)]
pub struct ResultsStore {
    dir: PathBuf,
}

impl ResultsStore {
    /// Create an archive rooted at the given directory, creating it if needed.
    pub fn new(dir: impl Into<PathBuf>) -> StorageResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Create from the `LECTA_RESULTS_DIR` environment variable.
    pub fn from_env() -> StorageResult<Self> {
        let dir =
            std::env::var("LECTA_RESULTS_DIR").unwrap_or_else(|_| DEFAULT_RESULTS_DIR.to_string());
        Self::new(dir)
    }

    /// Archive directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Save a result under `<stem>_<YYYYmmdd_HHMMSS>.json`.
    pub async fn save<T: Serialize>(
        &self,
        result: &T,
        source_filename: &str,
    ) -> StorageResult<PathBuf> {
        let source = sanitize_filename(source_filename)?;
        let stem = source.rsplit_once('.').map(|(s, _)| s).unwrap_or(&source);

        let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
        let path = self.dir.join(format!("{stem}_{timestamp}.json"));

        let json = serde_json::to_vec_pretty(result)?;
        tokio::fs::write(&path, json).await?;

        debug!("Saved syllabus result to {}", path.display());
        Ok(path)
    }

    /// Load the most recently written result as `(filename, data)`.
    pub async fn load_latest(&self) -> StorageResult<Option<(String, Value)>> {
        let mut latest: Option<(std::time::SystemTime, PathBuf)> = None;

        let mut entries = tokio::fs::read_dir(&self.dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let modified = entry.metadata().await?.modified()?;
            if latest.as_ref().map(|(m, _)| modified > *m).unwrap_or(true) {
                latest = Some((modified, path));
            }
        }

        let Some((_, path)) = latest else {
            return Ok(None);
        };

        let raw = tokio::fs::read(&path).await?;
        let data: Value = serde_json::from_slice(&raw)?;
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .ok_or(StorageError::NoResult)?;

        Ok(Some((filename, data)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn save_then_load_latest_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let store = ResultsStore::new(tmp.path()).unwrap();

        let result = json!({"coverage_stats": {"total_topics": 3}});
        let path = store.save(&result, "cs101_fall.pdf").await.unwrap();
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("cs101_fall_"));
        assert!(name.ends_with(".json"));

        let (filename, data) = store.load_latest().await.unwrap().unwrap();
        assert_eq!(filename, name);
        assert_eq!(data["coverage_stats"]["total_topics"], 3);
    }

    #[tokio::test]
    async fn load_latest_prefers_newest_file() {
        let tmp = TempDir::new().unwrap();
        let store = ResultsStore::new(tmp.path()).unwrap();

        store.save(&json!({"n": 1}), "first.pdf").await.unwrap();
        // Force distinct mtimes even on coarse filesystems
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        store.save(&json!({"n": 2}), "second.pdf").await.unwrap();

        let (_, data) = store.load_latest().await.unwrap().unwrap();
        assert_eq!(data["n"], 2);
    }

    #[tokio::test]
    async fn load_latest_on_empty_dir_is_none() {
        let tmp = TempDir::new().unwrap();
        let store = ResultsStore::new(tmp.path()).unwrap();
        assert!(store.load_latest().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn non_json_files_are_ignored() {
        let tmp = TempDir::new().unwrap();
        let store = ResultsStore::new(tmp.path()).unwrap();
        tokio::fs::write(tmp.path().join("notes.txt"), b"not a result")
            .await
            .unwrap();

        assert!(store.load_latest().await.unwrap().is_none());
    }
}
