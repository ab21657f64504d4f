//! Dashboard analytics handlers.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use lecta_models::{
    DashboardMetrics, QuestionsPerClassEntry, SummaryMetricsEntry, SyllabusCoverageEstimate,
    TopicsOverviewEntry,
};

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Serialize)]
pub struct QuestionsResponse {
    pub questions_per_class: Vec<QuestionsPerClassEntry>,
}

/// `GET /analytics/questions` - total questions for each lecture.
pub async fn get_questions_per_class(
    State(state): State<AppState>,
) -> ApiResult<Json<QuestionsResponse>> {
    let questions_per_class = state.analytics.questions_per_class().await?;
    Ok(Json(QuestionsResponse { questions_per_class }))
}

#[derive(Serialize)]
pub struct TopicsOverviewResponse {
    pub topics_overview: Vec<TopicsOverviewEntry>,
}

/// `GET /analytics/topics` - topic and subtopic counts per lecture.
pub async fn get_topics_overview(
    State(state): State<AppState>,
) -> ApiResult<Json<TopicsOverviewResponse>> {
    let topics_overview = state.analytics.topics_overview().await?;
    Ok(Json(TopicsOverviewResponse { topics_overview }))
}

#[derive(Serialize)]
pub struct SummaryMetricsResponse {
    pub summary_metrics: Vec<SummaryMetricsEntry>,
}

/// `GET /analytics/summary` - main idea counts and key takeaway presence.
pub async fn get_summary_metrics(
    State(state): State<AppState>,
) -> ApiResult<Json<SummaryMetricsResponse>> {
    let summary_metrics = state.analytics.summary_metrics().await?;
    Ok(Json(SummaryMetricsResponse { summary_metrics }))
}

#[derive(Serialize)]
pub struct SyllabusCoverageResponse {
    pub syllabus_coverage: SyllabusCoverageEstimate,
}

/// `GET /analytics/syllabus` - unique topics covered so far.
pub async fn get_syllabus_coverage(
    State(state): State<AppState>,
) -> ApiResult<Json<SyllabusCoverageResponse>> {
    let syllabus_coverage = state.analytics.syllabus_coverage_estimate().await?;
    Ok(Json(SyllabusCoverageResponse { syllabus_coverage }))
}

/// `GET /analytics/dashboard` - all key metrics combined.
pub async fn get_dashboard_metrics(
    State(state): State<AppState>,
) -> ApiResult<Json<DashboardMetrics>> {
    let dashboard = state.analytics.dashboard().await?;
    Ok(Json(dashboard))
}
