//! Worker configuration.

use std::path::PathBuf;

/// Worker configuration.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Max jobs processed concurrently
    pub max_concurrent_jobs: usize,
    /// SQLite database file (shared with the API)
    pub database_path: PathBuf,
    /// Idle time before a pending job is claimed from a dead worker, in ms
    pub claim_min_idle_ms: u64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_jobs: 2,
            database_path: PathBuf::from("lecta.db"),
            claim_min_idle_ms: 300_000,
        }
    }
}

impl WorkerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_concurrent_jobs: std::env::var("WORKER_MAX_CONCURRENT_JOBS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_concurrent_jobs),
            database_path: std::env::var("LECTA_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),
            claim_min_idle_ms: std::env::var("WORKER_CLAIM_MIN_IDLE_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.claim_min_idle_ms),
        }
    }
}
