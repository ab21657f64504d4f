//! Lecture upload and status handlers.

use axum::extract::{Multipart, Path, State};
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use lecta_models::{LectureId, LectureResponse, LectureStatus, UploadResponse};
use lecta_queue::ProcessLectureJob;

use crate::error::{ApiError, ApiResult};
use crate::metrics;
use crate::state::AppState;

/// Greeting response for the service root.
#[derive(Serialize)]
pub struct RootResponse {
    pub message: String,
}

/// `GET /` - service banner.
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Hello Professors! This API provides class analytics.".to_string(),
    })
}

/// `POST /upload/` - accept a lecture recording and start processing.
///
/// Creates the lecture row first so the returned id is immediately
/// pollable, stages the audio on disk, then enqueues the pipeline job.
pub async fn upload_lecture(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<UploadResponse>> {
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
    if data.is_empty() {
        return Err(ApiError::bad_request("Uploaded file is empty"));
    }

    let lecture_id = state.store.create_lecture().await?;

    let audio_path = match state.uploads.stage_lecture(lecture_id, &filename, &data).await {
        Ok(path) => path,
        Err(e) => {
            warn!("Failed to stage upload for lecture {}: {}", lecture_id, e);
            state
                .store
                .mark_failed(lecture_id, "Failed to store uploaded file")
                .await?;
            return Err(e.into());
        }
    };

    let job = ProcessLectureJob::new(lecture_id, &audio_path);
    if let Err(e) = state.queue.enqueue_process(job).await {
        warn!("Failed to enqueue processing for lecture {}: {}", lecture_id, e);
        state
            .store
            .mark_failed(lecture_id, "Failed to enqueue processing job")
            .await?;
        state.uploads.remove_lecture_dir(lecture_id).await;
        return Err(e.into());
    }

    metrics::record_lecture_uploaded();
    metrics::record_job_enqueued("process_lecture");
    info!("Accepted lecture {} upload ({} bytes)", lecture_id, data.len());

    Ok(Json(UploadResponse {
        lecture_id,
        status: LectureStatus::Processing,
    }))
}

/// `GET /lecture/{id}` - current status and stored fields.
pub async fn get_lecture_status(
    State(state): State<AppState>,
    Path(lecture_id): Path<i64>,
) -> ApiResult<Json<LectureResponse>> {
    let record = state
        .store
        .get_lecture(LectureId(lecture_id))
        .await?
        .ok_or_else(|| ApiError::not_found("Lecture not found"))?;

    Ok(Json(LectureResponse::from(&record)))
}

/// `GET /lecture/{id}/notes` - the full pedagogical notes document.
pub async fn get_lecture_notes(
    State(state): State<AppState>,
    Path(lecture_id): Path<i64>,
) -> ApiResult<Json<Value>> {
    let record = state
        .store
        .get_lecture(LectureId(lecture_id))
        .await?
        .ok_or_else(|| ApiError::not_found("Lecture not found"))?;

    if record.status == LectureStatus::Processing {
        return Err(ApiError::bad_request(
            "Lecture is still processing. Notes are not yet available.",
        ));
    }

    let raw = record.notes_json.ok_or_else(|| {
        ApiError::not_found("Notes were not found or could not be generated for this lecture.")
    })?;

    let notes: Value = serde_json::from_str(&raw)
        .map_err(|_| ApiError::internal("Failed to parse the stored notes JSON."))?;

    Ok(Json(notes))
}
