//! Syllabus processing service.
//!
//! Orchestrates the full syllabus flow: extract text from the uploaded
//! document, ask the LLM for a day-by-day roadmap, reconcile the
//! flattened topics against stored lecture topics, and archive the
//! combined result.

use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use lecta_ai::prompts::{roadmap_prompt, ROADMAP_SYSTEM};
use lecta_ai::{AiClient, ROADMAP_MODEL};
use lecta_models::{RoadmapDay, SyllabusReport};
use lecta_storage::ResultsStore;
use lecta_store::Analytics;
use lecta_syllabus::{compute_coverage, extract_text, flatten_roadmap};

use crate::error::{ApiError, ApiResult};
use crate::metrics;

/// End-to-end syllabus processing.
#[derive(Clone)]
pub struct SyllabusService {
    ai: Arc<AiClient>,
    analytics: Analytics,
    results: Arc<ResultsStore>,
}

impl SyllabusService {
    pub fn new(ai: Arc<AiClient>, analytics: Analytics, results: Arc<ResultsStore>) -> Self {
        Self { ai, analytics, results }
    }

    /// Process a staged syllabus document and archive the result.
    pub async fn process_syllabus_file(
        &self,
        path: &Path,
        source_filename: &str,
    ) -> ApiResult<SyllabusReport> {
        let syllabus_text = extract_text(path).await?;

        info!("Requesting roadmap for syllabus {}", source_filename);
        let roadmap_value = self
            .ai
            .chat_json(ROADMAP_MODEL, ROADMAP_SYSTEM, &roadmap_prompt(&syllabus_text))
            .await?;

        let course_roadmap: Vec<RoadmapDay> =
            serde_json::from_value(roadmap_value).map_err(|e| {
                warn!("Roadmap output did not decode as a day array: {}", e);
                ApiError::internal("Could not find valid JSON roadmap in LLM output.")
            })?;

        let syllabus_topics = flatten_roadmap(&course_roadmap);
        let covered = self.analytics.covered_topic_set().await?;
        let coverage_stats = compute_coverage(&syllabus_topics, &covered);

        let result = SyllabusReport {
            coverage_stats,
            course_roadmap,
        };

        self.results.save(&result, source_filename).await?;
        metrics::record_syllabus_processed();

        info!(
            "Syllabus {} processed: {}/{} topics covered",
            source_filename, result.coverage_stats.covered_topics, result.coverage_stats.total_topics
        );
        Ok(result)
    }
}
