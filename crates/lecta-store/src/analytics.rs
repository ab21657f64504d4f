//! Analytics queries over completed lectures.
//!
//! Counting that SQLite can do directly (JSON array lengths, word counts,
//! dates) is pushed into SQL; section shapes the database cannot see
//! (topic/subtopic nesting, summary fields) are decoded in Rust with
//! malformed JSON counting as zero rather than failing the request.

use std::collections::HashSet;

use sqlx::{Row, SqlitePool};

use lecta_models::{
    DashboardMetrics, LectureId, LectureStatus, QuestionsPerClassEntry, SummaryInsight,
    SummaryMetricsEntry, SyllabusCoverageEstimate, TimelineEntry, TopicEntry, TopicsOverviewEntry,
    TranscriptLengthEntry,
};

use crate::error::StoreResult;

/// Read-only analytics over the `lectures` table.
#[derive(Clone)]
pub struct Analytics {
    pool: SqlitePool,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl Analytics {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Number of questions captured per lecture.
    pub async fn questions_per_class(&self) -> StoreResult<Vec<QuestionsPerClassEntry>> {
        let rows = sqlx::query(
            "SELECT id, COALESCE(json_array_length(quiz_json), 0) AS question_count
             FROM lectures WHERE status = ? ORDER BY id",
        )
        .bind(LectureStatus::Done.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| QuestionsPerClassEntry {
                class_id: LectureId(row.get::<i64, _>("id")),
                questions: row.get::<i64, _>("question_count") as u64,
            })
            .collect())
    }

    /// Topic and subtopic counts per lecture.
    pub async fn topics_overview(&self) -> StoreResult<Vec<TopicsOverviewEntry>> {
        let rows = sqlx::query(
            "SELECT id, topics_json FROM lectures WHERE status = ? ORDER BY id",
        )
        .bind(LectureStatus::Done.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let topics: Vec<TopicEntry> = row
                    .get::<Option<String>, _>("topics_json")
                    .and_then(|raw| serde_json::from_str(&raw).ok())
                    .unwrap_or_default();

                TopicsOverviewEntry {
                    class_id: LectureId(row.get::<i64, _>("id")),
                    topics: topics.len(),
                    subtopics: topics.iter().map(|t| t.subtopics.len()).sum(),
                }
            })
            .collect())
    }

    /// Transcript word count per lecture.
    pub async fn transcript_lengths(&self) -> StoreResult<Vec<TranscriptLengthEntry>> {
        let rows = sqlx::query(
            "SELECT id,
                    COALESCE(length(transcript) - length(replace(transcript, ' ', '')) + 1, 0)
                        AS word_count
             FROM lectures WHERE status = ? ORDER BY id",
        )
        .bind(LectureStatus::Done.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| TranscriptLengthEntry {
                class_id: LectureId(row.get::<i64, _>("id")),
                word_count: row.get::<i64, _>("word_count").max(0) as u64,
            })
            .collect())
    }

    /// Main-idea counts and takeaway presence per lecture.
    pub async fn summary_metrics(&self) -> StoreResult<Vec<SummaryMetricsEntry>> {
        let rows = sqlx::query(
            "SELECT id, summary FROM lectures WHERE status = ? ORDER BY id",
        )
        .bind(LectureStatus::Done.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let summary: SummaryInsight = row
                    .get::<Option<String>, _>("summary")
                    .and_then(|raw| serde_json::from_str(&raw).ok())
                    .unwrap_or_default();

                SummaryMetricsEntry {
                    class_id: LectureId(row.get::<i64, _>("id")),
                    main_ideas_count: summary.main_ideas.len(),
                    has_takeaway: !summary.key_takeaway.is_empty(),
                }
            })
            .collect())
    }

    /// Course-wide coverage estimate: unique main topics across all lectures.
    pub async fn syllabus_coverage_estimate(&self) -> StoreResult<SyllabusCoverageEstimate> {
        let rows = sqlx::query("SELECT topics_json FROM lectures WHERE status = ?")
            .bind(LectureStatus::Done.as_str())
            .fetch_all(&self.pool)
            .await?;

        let lectures_count = rows.len();
        let mut unique_topics = HashSet::new();

        for row in &rows {
            let topics: Vec<TopicEntry> = row
                .get::<Option<String>, _>("topics_json")
                .and_then(|raw| serde_json::from_str(&raw).ok())
                .unwrap_or_default();
            for entry in topics {
                if !entry.topic.is_empty() {
                    unique_topics.insert(entry.topic);
                }
            }
        }

        let avg = if lectures_count > 0 {
            round2(unique_topics.len() as f64 / lectures_count as f64)
        } else {
            0.0
        };

        Ok(SyllabusCoverageEstimate {
            unique_topics_covered: unique_topics.len(),
            lectures_count,
            avg_topics_per_class: avg,
        })
    }

    /// Lecture creation dates, oldest first.
    pub async fn lecture_timeline(&self) -> StoreResult<Vec<TimelineEntry>> {
        let rows = sqlx::query(
            "SELECT id, date(created_at) AS date
             FROM lectures WHERE status = ? ORDER BY created_at",
        )
        .bind(LectureStatus::Done.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| TimelineEntry {
                class_id: LectureId(row.get::<i64, _>("id")),
                date: row.get::<Option<String>, _>("date").unwrap_or_default(),
            })
            .collect())
    }

    /// Every topic and subtopic from completed lectures, trimmed and
    /// lowercased, for syllabus coverage reconciliation.
    pub async fn covered_topic_set(&self) -> StoreResult<HashSet<String>> {
        let rows = sqlx::query("SELECT topics_json FROM lectures WHERE status = ?")
            .bind(LectureStatus::Done.as_str())
            .fetch_all(&self.pool)
            .await?;

        let mut covered = HashSet::new();
        for row in &rows {
            let topics: Vec<TopicEntry> = row
                .get::<Option<String>, _>("topics_json")
                .and_then(|raw| serde_json::from_str(&raw).ok())
                .unwrap_or_default();

            for entry in topics {
                covered.insert(entry.topic.trim().to_lowercase());
                for sub in entry.subtopics {
                    covered.insert(sub.trim().to_lowercase());
                }
            }
        }
        covered.remove("");
        Ok(covered)
    }

    /// All metrics combined for the main dashboard.
    pub async fn dashboard(&self) -> StoreResult<DashboardMetrics> {
        Ok(DashboardMetrics {
            questions_per_class: self.questions_per_class().await?,
            topics_overview: self.topics_overview().await?,
            transcript_length: self.transcript_lengths().await?,
            summary_metrics: self.summary_metrics().await?,
            syllabus_coverage: self.syllabus_coverage_estimate().await?,
            lecture_timeline: self.lecture_timeline().await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lectures::{AnalysisSections, LectureStore};

    async fn seed_done_lecture(
        store: &LectureStore,
        topics_json: &str,
        quiz_json: &str,
        summary: &str,
        transcript: &str,
    ) -> LectureId {
        let id = store.create_lecture().await.unwrap();
        store.set_transcript(id, transcript).await.unwrap();
        let sections = AnalysisSections {
            summary: Some(summary.to_string()),
            topics_json: Some(topics_json.to_string()),
            quiz_json: Some(quiz_json.to_string()),
            key_points_json: Some("[]".to_string()),
            examples_json: Some("[]".to_string()),
            lda_topics_json: Some("[]".to_string()),
            notes_json: None,
        };
        store.complete_analysis(id, &sections).await.unwrap();
        id
    }

    #[tokio::test]
    async fn questions_per_class_counts_json_arrays() {
        let store = LectureStore::in_memory().await.unwrap();
        let analytics = Analytics::new(store.pool().clone());

        let id = seed_done_lecture(
            &store,
            "[]",
            r#"[{"question":"q1"},{"question":"q2"}]"#,
            "{}",
            "words here",
        )
        .await;

        // A still-processing lecture must not show up
        store.create_lecture().await.unwrap();

        let entries = analytics.questions_per_class().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].class_id, id);
        assert_eq!(entries[0].questions, 2);
    }

    #[tokio::test]
    async fn topics_overview_sums_subtopics() {
        let store = LectureStore::in_memory().await.unwrap();
        let analytics = Analytics::new(store.pool().clone());

        seed_done_lecture(
            &store,
            r#"[{"topic":"A","subtopics":["a1","a2"]},{"topic":"B","subtopics":["b1"]}]"#,
            "[]",
            "{}",
            "t",
        )
        .await;

        let entries = analytics.topics_overview().await.unwrap();
        assert_eq!(entries[0].topics, 2);
        assert_eq!(entries[0].subtopics, 3);
    }

    #[tokio::test]
    async fn malformed_topics_json_counts_zero() {
        let store = LectureStore::in_memory().await.unwrap();
        let analytics = Analytics::new(store.pool().clone());

        seed_done_lecture(&store, "not json {", "[]", "{}", "t").await;

        let entries = analytics.topics_overview().await.unwrap();
        assert_eq!(entries[0].topics, 0);
        assert_eq!(entries[0].subtopics, 0);
    }

    #[tokio::test]
    async fn transcript_word_count_matches_spaces() {
        let store = LectureStore::in_memory().await.unwrap();
        let analytics = Analytics::new(store.pool().clone());

        seed_done_lecture(&store, "[]", "[]", "{}", "four words in here").await;

        let entries = analytics.transcript_lengths().await.unwrap();
        assert_eq!(entries[0].word_count, 4);
    }

    #[tokio::test]
    async fn summary_metrics_reads_main_ideas_and_takeaway() {
        let store = LectureStore::in_memory().await.unwrap();
        let analytics = Analytics::new(store.pool().clone());

        seed_done_lecture(
            &store,
            "[]",
            "[]",
            r#"{"mainIdeas":["x","y","z"],"keyTakeaway":"remember this"}"#,
            "t",
        )
        .await;

        let entries = analytics.summary_metrics().await.unwrap();
        assert_eq!(entries[0].main_ideas_count, 3);
        assert!(entries[0].has_takeaway);
    }

    #[tokio::test]
    async fn coverage_estimate_dedupes_topics_across_lectures() {
        let store = LectureStore::in_memory().await.unwrap();
        let analytics = Analytics::new(store.pool().clone());

        seed_done_lecture(
            &store,
            r#"[{"topic":"Queues","subtopics":[]},{"topic":"Stacks","subtopics":[]}]"#,
            "[]",
            "{}",
            "t",
        )
        .await;
        seed_done_lecture(
            &store,
            r#"[{"topic":"Queues","subtopics":[]}]"#,
            "[]",
            "{}",
            "t",
        )
        .await;

        let estimate = analytics.syllabus_coverage_estimate().await.unwrap();
        assert_eq!(estimate.unique_topics_covered, 2);
        assert_eq!(estimate.lectures_count, 2);
        assert_eq!(estimate.avg_topics_per_class, 1.0);
    }

    #[tokio::test]
    async fn covered_topic_set_normalizes_case_and_whitespace() {
        let store = LectureStore::in_memory().await.unwrap();
        let analytics = Analytics::new(store.pool().clone());

        seed_done_lecture(
            &store,
            r#"[{"topic":" Process Scheduling ","subtopics":["Round Robin"]}]"#,
            "[]",
            "{}",
            "t",
        )
        .await;

        let covered = analytics.covered_topic_set().await.unwrap();
        assert!(covered.contains("process scheduling"));
        assert!(covered.contains("round robin"));
        assert_eq!(covered.len(), 2);
    }

    #[tokio::test]
    async fn dashboard_combines_all_sections() {
        let store = LectureStore::in_memory().await.unwrap();
        let analytics = Analytics::new(store.pool().clone());

        seed_done_lecture(
            &store,
            r#"[{"topic":"A","subtopics":["a"]}]"#,
            r#"[{"question":"q"}]"#,
            r#"{"mainIdeas":["i"],"keyTakeaway":"k"}"#,
            "one two three",
        )
        .await;

        let dashboard = analytics.dashboard().await.unwrap();
        assert_eq!(dashboard.questions_per_class.len(), 1);
        assert_eq!(dashboard.topics_overview.len(), 1);
        assert_eq!(dashboard.transcript_length[0].word_count, 3);
        assert_eq!(dashboard.syllabus_coverage.lectures_count, 1);
        assert_eq!(dashboard.lecture_timeline.len(), 1);
        assert!(!dashboard.lecture_timeline[0].date.is_empty());
    }
}
