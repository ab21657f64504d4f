//! Syllabus roadmap and coverage models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One instructional day from the LLM-generated course roadmap.
///
/// Only `day`, `main_topic` and `subtopics` are interpreted by the
/// backend; the remaining fields are free-form planning detail that the
/// model fills in inconsistently (string vs. array), so they are kept as
/// raw JSON and passed through to clients untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct RoadmapDay {
    /// Sequential instructional day number, starting at 1
    #[serde(default)]
    pub day: u32,
    /// Date string if present in the syllabus
    #[serde(default)]
    pub date: Option<Value>,
    /// The curriculum subject taught that day
    #[serde(default)]
    pub main_topic: String,
    /// Lesson modules, sections and demos for that day
    #[serde(default)]
    pub subtopics: Vec<String>,
    #[serde(default)]
    pub objectives: Value,
    #[serde(default)]
    pub activities: Value,
    #[serde(default)]
    pub reading: Value,
    #[serde(default)]
    pub assignments: Value,
    #[serde(default)]
    pub assessment_type: Value,
    #[serde(default)]
    pub resources: Value,
    #[serde(default)]
    pub learning_outcomes: Value,
}

/// Coverage reconciliation result.
///
/// Topic strings are reported in their original (un-normalized) form;
/// matching is done on the trimmed, lowercased form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct CoverageStats {
    /// Number of distinct syllabus topics considered
    pub total_topics: usize,
    /// How many of them appear in stored lecture topics
    pub covered_topics: usize,
    /// covered / total * 100, rounded to 2 decimals; 0 for an empty syllabus
    pub coverage_percentage: f64,
    /// Syllabus topics with no matching lecture topic
    pub missing_topics: Vec<String>,
    /// Syllabus topics found in lecture topics
    pub matched_topics: Vec<String>,
}

/// Combined result persisted after a syllabus upload.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct SyllabusReport {
    pub coverage_stats: CoverageStats,
    pub course_roadmap: Vec<RoadmapDay>,
}

/// Projection served by `GET /syllabus/topics`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SyllabusTopicsEntry {
    pub day: u32,
    pub main_topic: String,
    pub subtopics: Vec<String>,
}

impl From<&RoadmapDay> for SyllabusTopicsEntry {
    fn from(day: &RoadmapDay) -> Self {
        Self {
            day: day.day,
            main_topic: day.main_topic.clone(),
            subtopics: day.subtopics.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roadmap_day_tolerates_free_form_fields() {
        // `reading` as a string in one entry, an array in another
        let json = r#"[
            {
                "day": 1,
                "date": "2024-09-02",
                "main_topic": "Intro to Operating Systems",
                "subtopics": ["History", "Kernel vs user space"],
                "reading": "Chapter 1",
                "objectives": ["Define an OS"]
            },
            {
                "day": 2,
                "main_topic": "Processes",
                "subtopics": [],
                "reading": ["Chapter 3", "Paper: Unix sharing"]
            }
        ]"#;

        let days: Vec<RoadmapDay> = serde_json::from_str(json).unwrap();
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].subtopics.len(), 2);
        assert!(days[0].reading.is_string());
        assert!(days[1].reading.is_array());
        assert!(days[1].assessment_type.is_null());
    }

    #[test]
    fn topics_entry_projects_roadmap_day() {
        let day = RoadmapDay {
            day: 3,
            main_topic: "Scheduling".into(),
            subtopics: vec!["Round robin".into()],
            ..Default::default()
        };

        let entry = SyllabusTopicsEntry::from(&day);
        assert_eq!(entry.day, 3);
        assert_eq!(entry.main_topic, "Scheduling");
        assert_eq!(entry.subtopics, vec!["Round robin".to_string()]);
    }
}
