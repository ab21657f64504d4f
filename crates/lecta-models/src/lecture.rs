//! Lecture record models.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Row id of a lecture in the relational store.
///
/// Lecture ids are assigned by the database (autoincrement), so unlike
/// job ids they are never generated client-side.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct LectureId(pub i64);

impl LectureId {
    /// Get the inner integer.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for LectureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for LectureId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Unique identifier for a queued processing job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    /// Generate a new random job ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lecture processing status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum LectureStatus {
    /// Upload accepted, pipeline not finished yet
    #[default]
    Processing,
    /// Transcription and analysis persisted
    Done,
    /// Pipeline failed, error recorded
    Failed,
}

impl LectureStatus {
    /// Get string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            LectureStatus::Processing => "processing",
            LectureStatus::Done => "done",
            LectureStatus::Failed => "failed",
        }
    }

    /// Parse from the stored string form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "processing" => Some(Self::Processing),
            "done" => Some(Self::Done),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }

    /// Check if this is a terminal state (no more updates expected).
    pub fn is_terminal(&self) -> bool {
        matches!(self, LectureStatus::Done | LectureStatus::Failed)
    }
}

impl fmt::Display for LectureStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A full lecture row as persisted in the store.
///
/// The analysis columns hold the raw JSON fragments returned by the LLM,
/// exactly as stored; callers parse the sections they care about.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LectureRecord {
    /// Database-assigned lecture id
    pub id: LectureId,
    /// Current processing status
    pub status: LectureStatus,
    /// Raw speech-to-text output
    pub transcript: Option<String>,
    /// JSON: `summaryInsight` object
    pub summary: Option<String>,
    /// JSON: `topicsCovered` array
    pub topics_json: Option<String>,
    /// JSON: `questionsAsked` array
    pub quiz_json: Option<String>,
    /// JSON: `keyPoints` array
    pub key_points_json: Option<String>,
    /// JSON: `examplesUsed` array
    pub examples_json: Option<String>,
    /// JSON: array of formatted LDA topic strings
    pub lda_topics_json: Option<String>,
    /// JSON: full pedagogical notes document
    pub notes_json: Option<String>,
    /// Sanitized failure reason, set when status is `failed`
    pub error_message: Option<String>,
    /// When the row was inserted
    pub created_at: DateTime<Utc>,
    /// When the row was last written
    pub updated_at: DateTime<Utc>,
}

/// Public projection of a lecture returned by `GET /lecture/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LectureResponse {
    pub id: LectureId,
    pub status: LectureStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topics_json: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiz_json: Option<String>,
}

impl From<&LectureRecord> for LectureResponse {
    fn from(record: &LectureRecord) -> Self {
        Self {
            id: record.id,
            status: record.status,
            transcript: record.transcript.clone(),
            summary: record.summary.clone(),
            topics_json: record.topics_json.clone(),
            quiz_json: record.quiz_json.clone(),
        }
    }
}

/// Response body for `POST /upload/`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UploadResponse {
    pub lecture_id: LectureId,
    pub status: LectureStatus,
}
