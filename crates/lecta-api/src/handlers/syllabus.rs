//! Syllabus upload and coverage handlers.

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use lecta_models::{RoadmapDay, SyllabusReport, SyllabusTopicsEntry};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Response for `POST /upload_syllabus/`.
#[derive(Serialize)]
pub struct SyllabusUploadResponse {
    pub filename: String,
    pub coverage_result: SyllabusReport,
}

/// `POST /upload_syllabus/` - upload a syllabus (PDF or DOCX) and compute
/// coverage stats against stored lecture topics.
pub async fn upload_syllabus(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<SyllabusUploadResponse>> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let filename = field
                .file_name()
                .map(str::to_string)
                .ok_or_else(|| ApiError::bad_request("Missing filename in upload"))?;
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::bad_request(format!("Failed to read upload: {e}")))?;
            upload = Some((filename, data.to_vec()));
        }
    }

    let (filename, data) =
        upload.ok_or_else(|| ApiError::bad_request("Missing 'file' field in upload"))?;

    let path = state.uploads.stage_syllabus(&filename, &data).await?;
    let coverage_result = state.syllabus.process_syllabus_file(&path, &filename).await?;

    info!("Processed syllabus upload {}", filename);
    Ok(Json(SyllabusUploadResponse {
        filename,
        coverage_result,
    }))
}

/// Response for `GET /syllabus_result/`.
#[derive(Serialize)]
pub struct LatestSyllabusResponse {
    pub filename: String,
    pub data: Value,
}

/// `GET /syllabus_result/` - the most recently saved coverage result.
pub async fn get_latest_syllabus_result(
    State(state): State<AppState>,
) -> ApiResult<Json<LatestSyllabusResponse>> {
    let (filename, data) = state
        .results
        .load_latest()
        .await?
        .ok_or_else(|| ApiError::not_found("No syllabus result found yet."))?;

    Ok(Json(LatestSyllabusResponse { filename, data }))
}

/// `GET /syllabus/topics` - main topics and subtopics from the latest
/// processed syllabus.
pub async fn get_syllabus_topics(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<SyllabusTopicsEntry>>> {
    let (_, data) = state
        .results
        .load_latest()
        .await?
        .ok_or_else(|| {
            ApiError::not_found("No syllabus result found yet. Please upload one first.")
        })?;

    let roadmap: Vec<RoadmapDay> = data
        .get("course_roadmap")
        .cloned()
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_default();

    let topics: Vec<SyllabusTopicsEntry> =
        roadmap.iter().map(SyllabusTopicsEntry::from).collect();
    Ok(Json(topics))
}
