//! Analytics response payloads.
//!
//! Every entry type keys its lecture by `class_id`, matching the
//! dashboard contract.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::lecture::LectureId;

/// Question count for one lecture.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct QuestionsPerClassEntry {
    pub class_id: LectureId,
    pub questions: u64,
}

/// Topic and subtopic counts for one lecture.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct TopicsOverviewEntry {
    pub class_id: LectureId,
    pub topics: usize,
    pub subtopics: usize,
}

/// Transcript word count for one lecture.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct TranscriptLengthEntry {
    pub class_id: LectureId,
    pub word_count: u64,
}

/// Summary-section metrics for one lecture.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SummaryMetricsEntry {
    pub class_id: LectureId,
    pub main_ideas_count: usize,
    pub has_takeaway: bool,
}

/// Rough course-wide coverage estimate from stored lectures alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SyllabusCoverageEstimate {
    pub unique_topics_covered: usize,
    pub lectures_count: usize,
    /// unique topics / lectures, rounded to 2 decimals; 0 with no lectures
    pub avg_topics_per_class: f64,
}

/// Lecture creation date for charting course progression.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct TimelineEntry {
    pub class_id: LectureId,
    /// Calendar date (YYYY-MM-DD)
    pub date: String,
}

/// All analytics combined, served by `GET /analytics/dashboard`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DashboardMetrics {
    pub questions_per_class: Vec<QuestionsPerClassEntry>,
    pub topics_overview: Vec<TopicsOverviewEntry>,
    pub transcript_length: Vec<TranscriptLengthEntry>,
    pub summary_metrics: Vec<SummaryMetricsEntry>,
    pub syllabus_coverage: SyllabusCoverageEstimate,
    pub lecture_timeline: Vec<TimelineEntry>,
}
