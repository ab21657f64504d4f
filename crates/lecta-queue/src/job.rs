//! Job types for the queue.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use lecta_models::{JobId, LectureId};

/// Job to run the full processing pipeline for one uploaded lecture.
///
/// Carries the staged audio path; the worker transcribes it, runs the
/// analysis passes, persists the results and removes the staging
/// directory when done.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessLectureJob {
    /// Unique job ID
    pub job_id: JobId,
    /// Lecture row to process
    pub lecture_id: LectureId,
    /// Staged audio file on local disk
    pub audio_path: PathBuf,
    /// When the job was created
    pub created_at: DateTime<Utc>,
}

impl ProcessLectureJob {
    /// Create a new processing job.
    pub fn new(lecture_id: LectureId, audio_path: impl Into<PathBuf>) -> Self {
        Self {
            job_id: JobId::new(),
            lecture_id,
            audio_path: audio_path.into(),
            created_at: Utc::now(),
        }
    }

    /// Generate idempotency key for deduplication.
    ///
    /// Each lecture row is processed at most once, so the lecture id
    /// alone identifies the work.
    pub fn idempotency_key(&self) -> String {
        format!("process:{}", self.lecture_id)
    }
}

/// Generic job wrapper for queue storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QueueJob {
    /// Pipeline job: transcribe, analyze and persist one lecture
    ProcessLecture(ProcessLectureJob),
}

impl QueueJob {
    pub fn job_id(&self) -> &JobId {
        match self {
            QueueJob::ProcessLecture(j) => &j.job_id,
        }
    }

    pub fn lecture_id(&self) -> LectureId {
        match self {
            QueueJob::ProcessLecture(j) => j.lecture_id,
        }
    }

    pub fn idempotency_key(&self) -> String {
        match self {
            QueueJob::ProcessLecture(j) => j.idempotency_key(),
        }
    }
}
