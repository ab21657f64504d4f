//! LLM analysis document shapes.
//!
//! These types mirror the JSON structure the analysis prompt asks the
//! model to emit. Every field is `#[serde(default)]` tolerant: a missing
//! or partially-filled section must never fail persistence, so absent
//! keys decode to empty collections and unknown keys are ignored.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One entry of the `topicsCovered` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct TopicEntry {
    /// The primary subject or concept discussed
    #[serde(default)]
    pub topic: String,
    /// Subthemes in the order presented during the lecture
    #[serde(default)]
    pub subtopics: Vec<String>,
}

/// One entry of the `keyPoints` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct KeyPointEntry {
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub points: Vec<String>,
}

/// One entry of the `questionsAsked` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct QuestionEntry {
    #[serde(default)]
    pub question: String,
    /// Who asked: "Student" or "Instructor"
    #[serde(default)]
    pub who_asked: String,
    #[serde(default)]
    pub who_answered: String,
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub answer: String,
    #[serde(default, rename = "learningValue")]
    pub learning_value: String,
}

/// One entry of the `examplesUsed` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ExampleEntry {
    #[serde(default)]
    pub example: String,
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub explanation: String,
    #[serde(default, rename = "connectionToConcept")]
    pub connection_to_concept: String,
}

/// The `summaryInsight` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct SummaryInsight {
    #[serde(default, rename = "mainIdeas")]
    pub main_ideas: Vec<String>,
    #[serde(default, rename = "keyTakeaway")]
    pub key_takeaway: String,
    #[serde(default, rename = "connectionToBroaderCourseThemes")]
    pub connection_to_broader_course_themes: String,
}

/// Full structured-analysis document as returned by the LLM.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct LectureAnalysis {
    #[serde(default, rename = "topicsCovered")]
    pub topics_covered: Vec<TopicEntry>,
    #[serde(default, rename = "keyPoints")]
    pub key_points: Vec<KeyPointEntry>,
    #[serde(default, rename = "questionsAsked")]
    pub questions_asked: Vec<QuestionEntry>,
    #[serde(default, rename = "examplesUsed")]
    pub examples_used: Vec<ExampleEntry>,
    #[serde(default, rename = "summaryInsight")]
    pub summary_insight: SummaryInsight,
}
