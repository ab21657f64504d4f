//! Lecture processing pipeline.

use tracing::{info, warn};

use lecta_ai::prompts::{analysis_prompt, notes_prompt, ANALYSIS_SYSTEM, NOTES_SYSTEM};
use lecta_ai::{AiClient, ANALYSIS_MODEL};
use lecta_models::LectureAnalysis;
use lecta_queue::ProcessLectureJob;
use lecta_storage::UploadStore;
use lecta_store::{AnalysisSections, LectureStore};

use crate::config::WorkerConfig;
use crate::error::{WorkerError, WorkerResult};
use crate::lda;

/// Shared resources for pipeline runs.
pub struct ProcessingContext {
    pub config: WorkerConfig,
    pub store: LectureStore,
    pub uploads: UploadStore,
    pub ai: AiClient,
}

impl ProcessingContext {
    /// Create a new processing context from the worker config.
    pub async fn new(config: WorkerConfig) -> WorkerResult<Self> {
        let store = LectureStore::connect(&config.database_path).await?;
        let uploads = UploadStore::from_env()?;
        let ai = AiClient::from_env()?;

        Ok(Self {
            config,
            store,
            uploads,
            ai,
        })
    }

    /// Mark a lecture failed and drop its staged upload.
    ///
    /// Called when the executor gives up on a job; never fails the caller.
    pub async fn fail_lecture(&self, job: &ProcessLectureJob, error: &str) {
        if let Err(e) = self.store.mark_failed(job.lecture_id, error).await {
            warn!("Failed to mark lecture {} failed: {}", job.lecture_id, e);
        }
        self.uploads.remove_lecture_dir(job.lecture_id).await;
    }
}

/// Run the full pipeline for one uploaded lecture.
///
/// On success the staged upload is removed and the lecture flips to
/// `done`. Errors propagate to the executor, which decides between
/// redelivery (staging kept) and permanent failure.
pub async fn process_lecture(ctx: &ProcessingContext, job: &ProcessLectureJob) -> WorkerResult<()> {
    info!(
        "Starting processing for lecture {} at {}",
        job.lecture_id,
        job.audio_path.display()
    );

    // The row can be gone if the database was reset since enqueueing;
    // nothing to report to anyone in that case.
    if ctx.store.get_lecture(job.lecture_id).await?.is_none() {
        warn!("Lecture {} no longer exists, dropping job", job.lecture_id);
        ctx.uploads.remove_lecture_dir(job.lecture_id).await;
        return Ok(());
    }

    // 1. Transcribe and persist the transcript as soon as it exists
    let transcript = ctx.ai.transcribe(&job.audio_path).await?;
    ctx.store.set_transcript(job.lecture_id, &transcript).await?;
    info!("Lecture {}: transcript saved", job.lecture_id);

    // 2. Structured analysis
    let analysis_value = ctx
        .ai
        .chat_json(ANALYSIS_MODEL, ANALYSIS_SYSTEM, &analysis_prompt(&transcript))
        .await?;
    let analysis: LectureAnalysis = serde_json::from_value(analysis_value)
        .map_err(|e| WorkerError::analysis_failed(format!("analysis did not decode: {e}")))?;

    // 3. Pedagogical notes; a failure here degrades the lecture rather
    //    than failing it
    let notes_json = match ctx
        .ai
        .chat_json(ANALYSIS_MODEL, NOTES_SYSTEM, &notes_prompt(&transcript))
        .await
    {
        Ok(notes) => Some(serde_json::to_string(&notes)?),
        Err(e) => {
            warn!("Lecture {}: notes generation failed: {}", job.lecture_id, e);
            None
        }
    };

    // 4. LDA topic modeling (local, never fails the pipeline)
    let lda_topics = lda::lda_topics(&transcript);

    // 5. Persist everything and mark done
    let sections = AnalysisSections {
        summary: Some(serde_json::to_string(&analysis.summary_insight)?),
        topics_json: Some(serde_json::to_string(&analysis.topics_covered)?),
        quiz_json: Some(serde_json::to_string(&analysis.questions_asked)?),
        key_points_json: Some(serde_json::to_string(&analysis.key_points)?),
        examples_json: Some(serde_json::to_string(&analysis.examples_used)?),
        lda_topics_json: Some(serde_json::to_string(&lda_topics)?),
        notes_json,
    };
    ctx.store.complete_analysis(job.lecture_id, &sections).await?;

    ctx.uploads.remove_lecture_dir(job.lecture_id).await;
    info!("Successfully processed lecture {}", job.lecture_id);
    Ok(())
}
