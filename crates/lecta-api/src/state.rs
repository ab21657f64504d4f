//! Application state.

use std::sync::Arc;

use lecta_ai::AiClient;
use lecta_queue::JobQueue;
use lecta_storage::{ResultsStore, UploadStore};
use lecta_store::{Analytics, LectureStore};

use crate::config::ApiConfig;
use crate::services::SyllabusService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub store: LectureStore,
    pub analytics: Analytics,
    pub uploads: Arc<UploadStore>,
    pub results: Arc<ResultsStore>,
    pub queue: Arc<JobQueue>,
    pub ai: Arc<AiClient>,
    pub syllabus: SyllabusService,
}

impl AppState {
    /// Create new application state.
    pub async fn new(config: ApiConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let store = LectureStore::connect(&config.database_path).await?;
        let analytics = Analytics::new(store.pool().clone());
        let uploads = Arc::new(UploadStore::from_env()?);
        let results = Arc::new(ResultsStore::from_env()?);
        let queue = Arc::new(JobQueue::from_env()?);
        let ai = Arc::new(AiClient::from_env()?);

        let syllabus = SyllabusService::new(
            Arc::clone(&ai),
            analytics.clone(),
            Arc::clone(&results),
        );

        Ok(Self {
            config,
            store,
            analytics,
            uploads,
            results,
            queue,
            ai,
            syllabus,
        })
    }
}
