//! Coverage reconciliation.
//!
//! Matching is done on the trimmed, lowercased form of each topic; the
//! report keeps the original strings so dashboards show the syllabus
//! wording, not the normalized keys.

use std::collections::HashSet;

use lecta_models::{CoverageStats, RoadmapDay};
use tracing::debug;

/// Normalized key used for topic matching.
fn normalize(topic: &str) -> String {
    topic.trim().to_lowercase()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Flatten a roadmap into the list of topics to reconcile.
///
/// Every `main_topic` plus every subtopic, deduplicated on the
/// normalized form, first occurrence wins.
pub fn flatten_roadmap(roadmap: &[RoadmapDay]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut topics = Vec::new();

    let mut push = |topic: &str| {
        if topic.trim().is_empty() {
            return;
        }
        if seen.insert(normalize(topic)) {
            topics.push(topic.to_string());
        }
    };

    for day in roadmap {
        push(&day.main_topic);
        for subtopic in &day.subtopics {
            push(subtopic);
        }
    }

    topics
}

/// Reconcile syllabus topics against the set of covered lecture topics.
///
/// `covered` must already hold normalized (trimmed, lowercased) strings,
/// as produced by the store's covered-topic query.
pub fn compute_coverage(syllabus_topics: &[String], covered: &HashSet<String>) -> CoverageStats {
    debug!(
        "Calculating coverage for {} syllabus topics against {} covered topics",
        syllabus_topics.len(),
        covered.len()
    );

    let mut matched = Vec::new();
    let mut missing = Vec::new();

    for topic in syllabus_topics {
        if covered.contains(&normalize(topic)) {
            matched.push(topic.clone());
        } else {
            missing.push(topic.clone());
        }
    }

    let total = syllabus_topics.len();
    let coverage_percentage = if total > 0 {
        round2(matched.len() as f64 / total as f64 * 100.0)
    } else {
        0.0
    };

    CoverageStats {
        total_topics: total,
        covered_topics: matched.len(),
        coverage_percentage,
        missing_topics: missing,
        matched_topics: matched,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(main_topic: &str, subtopics: &[&str]) -> RoadmapDay {
        RoadmapDay {
            day: 1,
            main_topic: main_topic.to_string(),
            subtopics: subtopics.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    fn covered(topics: &[&str]) -> HashSet<String> {
        topics.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn flatten_collects_main_topics_and_subtopics_in_order() {
        let roadmap = vec![
            day("Processes", &["Context switching", "States"]),
            day("Threads", &["Pthreads"]),
        ];

        assert_eq!(
            flatten_roadmap(&roadmap),
            vec![
                "Processes".to_string(),
                "Context switching".to_string(),
                "States".to_string(),
                "Threads".to_string(),
                "Pthreads".to_string(),
            ]
        );
    }

    #[test]
    fn flatten_dedupes_case_insensitively_keeping_first_form() {
        let roadmap = vec![
            day("Virtual Memory", &["Paging"]),
            day("virtual memory", &["PAGING", "TLBs"]),
        ];

        assert_eq!(
            flatten_roadmap(&roadmap),
            vec![
                "Virtual Memory".to_string(),
                "Paging".to_string(),
                "TLBs".to_string(),
            ]
        );
    }

    #[test]
    fn flatten_skips_blank_topics() {
        let roadmap = vec![day("", &["  ", "Deadlock"])];
        assert_eq!(flatten_roadmap(&roadmap), vec!["Deadlock".to_string()]);
    }

    #[test]
    fn coverage_matches_on_normalized_form() {
        let topics = vec![
            " Paging ".to_string(),
            "Deadlock".to_string(),
            "File Systems".to_string(),
        ];
        let covered = covered(&["paging", "deadlock"]);

        let stats = compute_coverage(&topics, &covered);
        assert_eq!(stats.total_topics, 3);
        assert_eq!(stats.covered_topics, 2);
        assert_eq!(stats.coverage_percentage, 66.67);
        assert_eq!(stats.matched_topics, vec![" Paging ", "Deadlock"]);
        assert_eq!(stats.missing_topics, vec!["File Systems"]);
    }

    #[test]
    fn coverage_of_empty_syllabus_is_zero() {
        let stats = compute_coverage(&[], &covered(&["anything"]));
        assert_eq!(stats.total_topics, 0);
        assert_eq!(stats.covered_topics, 0);
        assert_eq!(stats.coverage_percentage, 0.0);
        assert!(stats.matched_topics.is_empty());
        assert!(stats.missing_topics.is_empty());
    }

    #[test]
    fn full_coverage_is_one_hundred_percent() {
        let topics = vec!["Scheduling".to_string()];
        let stats = compute_coverage(&topics, &covered(&["scheduling"]));
        assert_eq!(stats.coverage_percentage, 100.0);
        assert!(stats.missing_topics.is_empty());
    }
}
