//! Router-level integration tests.
//!
//! These run against the real router with an in-memory database and
//! temp-dir storage. Endpoints that need Redis or the AI service are
//! exercised only when those are available (marked ignored).

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use lecta_ai::{AiClient, AiConfig};
use lecta_api::{create_router, ApiConfig, AppState, SyllabusService};
use lecta_models::LectureId;
use lecta_queue::{JobQueue, QueueConfig};
use lecta_storage::{ResultsStore, UploadStore};
use lecta_store::{AnalysisSections, Analytics, LectureStore};

struct TestApp {
    app: Router,
    store: LectureStore,
    results: Arc<ResultsStore>,
    _tmp: TempDir,
}

async fn test_app() -> TestApp {
    let tmp = TempDir::new().unwrap();

    let store = LectureStore::in_memory().await.unwrap();
    let analytics = Analytics::new(store.pool().clone());
    let uploads = Arc::new(UploadStore::new(tmp.path().join("uploads")).unwrap());
    let results = Arc::new(ResultsStore::new(tmp.path().join("results")).unwrap());
    let queue = Arc::new(JobQueue::new(QueueConfig::default()).unwrap());
    let ai = Arc::new(
        AiClient::new(AiConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            api_key: "test-key".to_string(),
            max_retries: 0,
            retry_base_delay: Duration::from_millis(1),
            request_timeout: Duration::from_secs(1),
        })
        .unwrap(),
    );
    let syllabus = SyllabusService::new(Arc::clone(&ai), analytics.clone(), Arc::clone(&results));

    let state = AppState {
        config: ApiConfig::default(),
        store: store.clone(),
        analytics,
        uploads,
        results: Arc::clone(&results),
        queue,
        ai,
        syllabus,
    };

    TestApp {
        app: create_router(state, None),
        store,
        results,
        _tmp: tmp,
    }
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn seed_done_lecture(store: &LectureStore) -> LectureId {
    let id = store.create_lecture().await.unwrap();
    store.set_transcript(id, "some spoken words here").await.unwrap();
    let sections = AnalysisSections {
        summary: Some(r#"{"mainIdeas":["idea"],"keyTakeaway":"remember"}"#.to_string()),
        topics_json: Some(r#"[{"topic":"Paging","subtopics":["TLB"]}]"#.to_string()),
        quiz_json: Some(r#"[{"question":"why?"}]"#.to_string()),
        key_points_json: Some("[]".to_string()),
        examples_json: Some("[]".to_string()),
        lda_topics_json: Some(r#"["Topic 1: 0.5*\"paging\""]"#.to_string()),
        notes_json: Some(r#"{"main_topic":"Paging","key_takeaways":["swap is slow"]}"#.to_string()),
    };
    store.complete_analysis(id, &sections).await.unwrap();
    id
}

#[tokio::test]
async fn root_returns_greeting() {
    let t = test_app().await;
    let (status, body) = get(&t.app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["message"],
        "Hello Professors! This API provides class analytics."
    );
}

#[tokio::test]
async fn health_endpoint_is_ok() {
    let t = test_app().await;
    let (status, body) = get(&t.app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn unknown_lecture_is_404() {
    let t = test_app().await;
    let (status, body) = get(&t.app, "/lecture/999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["detail"].as_str().unwrap().contains("Lecture not found"));
}

#[tokio::test]
async fn lecture_status_reflects_store() {
    let t = test_app().await;
    let id = t.store.create_lecture().await.unwrap();

    let (status, body) = get(&t.app, &format!("/lecture/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id.as_i64());
    assert_eq!(body["status"], "processing");
    assert!(body.get("transcript").is_none());
}

#[tokio::test]
async fn notes_while_processing_is_400() {
    let t = test_app().await;
    let id = t.store.create_lecture().await.unwrap();

    let (status, body) = get(&t.app, &format!("/lecture/{id}/notes")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("still processing"));
}

#[tokio::test]
async fn notes_for_done_lecture_roundtrip() {
    let t = test_app().await;
    let id = seed_done_lecture(&t.store).await;

    let (status, body) = get(&t.app, &format!("/lecture/{id}/notes")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["main_topic"], "Paging");
    assert_eq!(body["key_takeaways"][0], "swap is slow");
}

#[tokio::test]
async fn missing_notes_is_404() {
    let t = test_app().await;
    let id = t.store.create_lecture().await.unwrap();
    t.store.mark_failed(id, "boom").await.unwrap();

    let (status, _) = get(&t.app, &format!("/lecture/{id}/notes")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn analytics_endpoints_reflect_seeded_lecture() {
    let t = test_app().await;
    let id = seed_done_lecture(&t.store).await;

    let (status, body) = get(&t.app, "/analytics/questions").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["questions_per_class"][0]["class_id"], id.as_i64());
    assert_eq!(body["questions_per_class"][0]["questions"], 1);

    let (status, body) = get(&t.app, "/analytics/topics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["topics_overview"][0]["topics"], 1);
    assert_eq!(body["topics_overview"][0]["subtopics"], 1);

    let (status, body) = get(&t.app, "/analytics/summary").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary_metrics"][0]["main_ideas_count"], 1);
    assert_eq!(body["summary_metrics"][0]["has_takeaway"], true);

    let (status, body) = get(&t.app, "/analytics/syllabus").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["syllabus_coverage"]["unique_topics_covered"], 1);
    assert_eq!(body["syllabus_coverage"]["lectures_count"], 1);
}

#[tokio::test]
async fn dashboard_combines_sections() {
    let t = test_app().await;
    seed_done_lecture(&t.store).await;

    let (status, body) = get(&t.app, "/analytics/dashboard").await;
    assert_eq!(status, StatusCode::OK);
    for key in [
        "questions_per_class",
        "topics_overview",
        "transcript_length",
        "summary_metrics",
        "syllabus_coverage",
        "lecture_timeline",
    ] {
        assert!(body.get(key).is_some(), "dashboard missing {key}");
    }
    assert_eq!(body["transcript_length"][0]["word_count"], 4);
}

#[tokio::test]
async fn syllabus_result_before_any_upload_is_404() {
    let t = test_app().await;

    let (status, body) = get(&t.app, "/syllabus_result/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["detail"].as_str().unwrap().contains("No syllabus result"));

    let (status, _) = get(&t.app, "/syllabus/topics").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn syllabus_topics_project_latest_result() {
    let t = test_app().await;

    let saved = serde_json::json!({
        "coverage_stats": {
            "total_topics": 2,
            "covered_topics": 1,
            "coverage_percentage": 50.0,
            "missing_topics": ["Deadlock"],
            "matched_topics": ["Paging"]
        },
        "course_roadmap": [
            {"day": 1, "main_topic": "Paging", "subtopics": ["TLB"]},
            {"day": 2, "main_topic": "Deadlock", "subtopics": []}
        ]
    });
    t.results.save(&saved, "cs402.pdf").await.unwrap();

    let (status, body) = get(&t.app, "/syllabus_result/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["filename"].as_str().unwrap().starts_with("cs402_"));
    assert_eq!(body["data"]["coverage_stats"]["covered_topics"], 1);

    let (status, body) = get(&t.app, "/syllabus/topics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["main_topic"], "Paging");
    assert_eq!(body[0]["subtopics"][0], "TLB");
    assert_eq!(body[1]["day"], 2);
}

#[tokio::test]
async fn responses_carry_security_headers_and_request_id() {
    let t = test_app().await;

    let response = t
        .app
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let headers = response.headers();
    assert_eq!(headers.get("X-Content-Type-Options").unwrap(), "nosniff");
    assert_eq!(headers.get("X-Frame-Options").unwrap(), "DENY");
    assert!(headers.get("X-Request-ID").is_some());
}

#[tokio::test]
#[ignore = "requires a local Redis for the job queue"]
async fn upload_accepts_multipart_audio() {
    let t = test_app().await;

    let boundary = "lecta-test-boundary";
    let body = format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"lecture.mp3\"\r\nContent-Type: audio/mpeg\r\n\r\nfake audio bytes\r\n--{boundary}--\r\n"
    );

    let response = t
        .app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/upload/")
                .header(
                    "Content-Type",
                    format!("multipart/form-data; boundary={boundary}"),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
