//! Lecture repository.

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::SqlitePool;
use std::path::Path;
use tracing::debug;

use lecta_models::{LectureId, LectureRecord, LectureStatus};

use crate::db;
use crate::error::{StoreError, StoreResult};

/// All analysis sections persisted together when a pipeline run completes.
///
/// Each field holds the raw JSON fragment for its column; `None` leaves
/// the column untouched (used for notes when generation failed).
#[derive(Debug, Clone, Default)]
pub struct AnalysisSections {
    pub summary: Option<String>,
    pub topics_json: Option<String>,
    pub quiz_json: Option<String>,
    pub key_points_json: Option<String>,
    pub examples_json: Option<String>,
    pub lda_topics_json: Option<String>,
    pub notes_json: Option<String>,
}

/// Repository over the `lectures` table.
#[derive(Clone)]
pub struct LectureStore {
    pool: SqlitePool,
}

/// Current UTC time in the stored wire format (RFC 3339, second precision).
fn now_string() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn parse_timestamp(raw: &str) -> StoreResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| StoreError::InvalidTimestamp(raw.to_string()))
}

#[derive(sqlx::FromRow)]
struct LectureRow {
    id: i64,
    status: String,
    transcript: Option<String>,
    summary: Option<String>,
    topics_json: Option<String>,
    quiz_json: Option<String>,
    key_points_json: Option<String>,
    examples_json: Option<String>,
    lda_topics_json: Option<String>,
    notes_json: Option<String>,
    error_message: Option<String>,
    created_at: String,
    updated_at: String,
}

impl LectureRow {
    fn into_record(self) -> StoreResult<LectureRecord> {
        let status = LectureStatus::parse(&self.status)
            .ok_or_else(|| StoreError::InvalidStatus(self.status.clone()))?;

        Ok(LectureRecord {
            id: LectureId(self.id),
            status,
            transcript: self.transcript,
            summary: self.summary,
            topics_json: self.topics_json,
            quiz_json: self.quiz_json,
            key_points_json: self.key_points_json,
            examples_json: self.examples_json,
            lda_topics_json: self.lda_topics_json,
            notes_json: self.notes_json,
            error_message: self.error_message,
            created_at: parse_timestamp(&self.created_at)?,
            updated_at: parse_timestamp(&self.updated_at)?,
        })
    }
}

const SELECT_COLUMNS: &str = "id, status, transcript, summary, topics_json, quiz_json, \
     key_points_json, examples_json, lda_topics_json, notes_json, error_message, \
     created_at, updated_at";

impl LectureStore {
    /// Open (or create) the database at the given path.
    pub async fn connect(db_path: &Path) -> StoreResult<Self> {
        let pool = db::init_database(db_path).await?;
        Ok(Self { pool })
    }

    /// In-memory store for tests.
    pub async fn in_memory() -> StoreResult<Self> {
        let pool = db::init_in_memory().await?;
        Ok(Self { pool })
    }

    /// Wrap an existing pool.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Access the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Insert a new lecture row in `processing` state and return its id.
    pub async fn create_lecture(&self) -> StoreResult<LectureId> {
        let now = now_string();
        let result = sqlx::query(
            "INSERT INTO lectures (status, created_at, updated_at) VALUES (?, ?, ?)",
        )
        .bind(LectureStatus::Processing.as_str())
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        let id = LectureId(result.last_insert_rowid());
        debug!("Created lecture {}", id);
        Ok(id)
    }

    /// Fetch a lecture by id.
    pub async fn get_lecture(&self, id: LectureId) -> StoreResult<Option<LectureRecord>> {
        let row: Option<LectureRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM lectures WHERE id = ?"
        ))
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.map(LectureRow::into_record).transpose()
    }

    /// Persist the transcript as soon as transcription finishes.
    pub async fn set_transcript(&self, id: LectureId, transcript: &str) -> StoreResult<()> {
        let affected = sqlx::query(
            "UPDATE lectures SET transcript = ?, updated_at = ? WHERE id = ?",
        )
        .bind(transcript)
        .bind(now_string())
        .bind(id.as_i64())
        .execute(&self.pool)
        .await?
        .rows_affected();

        if affected == 0 {
            return Err(StoreError::LectureNotFound(id.as_i64()));
        }
        Ok(())
    }

    /// Store all analysis sections and flip the lecture to `done`.
    pub async fn complete_analysis(
        &self,
        id: LectureId,
        sections: &AnalysisSections,
    ) -> StoreResult<()> {
        let affected = sqlx::query(
            r#"
            UPDATE lectures SET
                status = ?,
                summary = COALESCE(?, summary),
                topics_json = COALESCE(?, topics_json),
                quiz_json = COALESCE(?, quiz_json),
                key_points_json = COALESCE(?, key_points_json),
                examples_json = COALESCE(?, examples_json),
                lda_topics_json = COALESCE(?, lda_topics_json),
                notes_json = COALESCE(?, notes_json),
                error_message = NULL,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(LectureStatus::Done.as_str())
        .bind(&sections.summary)
        .bind(&sections.topics_json)
        .bind(&sections.quiz_json)
        .bind(&sections.key_points_json)
        .bind(&sections.examples_json)
        .bind(&sections.lda_topics_json)
        .bind(&sections.notes_json)
        .bind(now_string())
        .bind(id.as_i64())
        .execute(&self.pool)
        .await?
        .rows_affected();

        if affected == 0 {
            return Err(StoreError::LectureNotFound(id.as_i64()));
        }
        debug!("Lecture {} marked done", id);
        Ok(())
    }

    /// Flip the lecture to `failed` and record the error.
    pub async fn mark_failed(&self, id: LectureId, error: &str) -> StoreResult<()> {
        let affected = sqlx::query(
            "UPDATE lectures SET status = ?, error_message = ?, updated_at = ? WHERE id = ?",
        )
        .bind(LectureStatus::Failed.as_str())
        .bind(error)
        .bind(now_string())
        .bind(id.as_i64())
        .execute(&self.pool)
        .await?
        .rows_affected();

        if affected == 0 {
            return Err(StoreError::LectureNotFound(id.as_i64()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_and_get_roundtrip() {
        let store = LectureStore::in_memory().await.unwrap();

        let id = store.create_lecture().await.unwrap();
        let record = store.get_lecture(id).await.unwrap().unwrap();

        assert_eq!(record.id, id);
        assert_eq!(record.status, LectureStatus::Processing);
        assert!(record.transcript.is_none());
        assert!(record.error_message.is_none());
    }

    #[tokio::test]
    async fn get_unknown_lecture_is_none() {
        let store = LectureStore::in_memory().await.unwrap();
        assert!(store.get_lecture(LectureId(999)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn transcript_then_complete_flow() {
        let store = LectureStore::in_memory().await.unwrap();
        let id = store.create_lecture().await.unwrap();

        store.set_transcript(id, "hello class").await.unwrap();

        let sections = AnalysisSections {
            summary: Some(r#"{"mainIdeas":["a"],"keyTakeaway":"b"}"#.to_string()),
            topics_json: Some(r#"[{"topic":"Queues","subtopics":["FIFO"]}]"#.to_string()),
            quiz_json: Some("[]".to_string()),
            key_points_json: Some("[]".to_string()),
            examples_json: Some("[]".to_string()),
            lda_topics_json: Some(r#"["Topic 1: ..."]"#.to_string()),
            notes_json: None,
        };
        store.complete_analysis(id, &sections).await.unwrap();

        let record = store.get_lecture(id).await.unwrap().unwrap();
        assert_eq!(record.status, LectureStatus::Done);
        assert_eq!(record.transcript.as_deref(), Some("hello class"));
        assert!(record.topics_json.is_some());
        // notes were None, column stays empty
        assert!(record.notes_json.is_none());
    }

    #[tokio::test]
    async fn mark_failed_records_error() {
        let store = LectureStore::in_memory().await.unwrap();
        let id = store.create_lecture().await.unwrap();

        store.mark_failed(id, "transcription timed out").await.unwrap();

        let record = store.get_lecture(id).await.unwrap().unwrap();
        assert_eq!(record.status, LectureStatus::Failed);
        assert_eq!(
            record.error_message.as_deref(),
            Some("transcription timed out")
        );
    }

    #[tokio::test]
    async fn updates_on_missing_rows_surface_not_found() {
        let store = LectureStore::in_memory().await.unwrap();
        let err = store
            .set_transcript(LectureId(42), "text")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::LectureNotFound(42)));
    }
}
