//! Shared data models for the Lecta backend.
//!
//! This crate provides Serde-serializable types for:
//! - Lecture records and processing status
//! - LLM analysis document shapes (topics, key points, questions, examples, summary)
//! - Syllabus roadmaps and coverage reports
//! - Analytics response payloads

pub mod analysis;
pub mod analytics;
pub mod lecture;
pub mod syllabus;

// Re-export common types
pub use analysis::{
    ExampleEntry, KeyPointEntry, LectureAnalysis, QuestionEntry, SummaryInsight, TopicEntry,
};
pub use analytics::{
    DashboardMetrics, QuestionsPerClassEntry, SummaryMetricsEntry, SyllabusCoverageEstimate,
    TimelineEntry, TopicsOverviewEntry, TranscriptLengthEntry,
};
pub use lecture::{JobId, LectureId, LectureRecord, LectureResponse, LectureStatus, UploadResponse};
pub use syllabus::{CoverageStats, RoadmapDay, SyllabusReport, SyllabusTopicsEntry};
