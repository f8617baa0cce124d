//! Controller driven end to end against the mock backend over HTTP.

mod common;

use common::{MockBackend, MockResponse, RecordedRequest};
use jobdash_core::view::{Block, PageSkeleton, Region, StatCard};
use jobdash_core::{ApiClient, Dashboard, Document};
use std::sync::Arc;
use std::time::Duration;

fn route(request: &RecordedRequest) -> MockResponse {
    let path = request.path.split('?').next().unwrap_or_default();
    match path {
        "/api/health" => MockResponse::json(r#"{"status": "healthy"}"#),
        "/api/stats" => MockResponse::json(
            r#"{"status": "success", "data": {"total_jobs": 1234, "processed_jobs": 12, "total_cvs": 3, "avg_match_score": null}}"#,
        ),
        "/api/agent/status" => MockResponse::json(r#"{"status": "idle", "message": "Agent idle"}"#),
        "/api/jobs" => MockResponse::json(
            r#"{"jobs": [{"job_id": 5, "title": "Platform Engineer", "company": "Initech", "link": "https://jobs.example/5", "source": "indeed", "is_processed": true}], "total": 1, "message": "ok"}"#,
        ),
        "/api/cvs/9/download" => MockResponse::binary(b"%PDF", Some("application/pdf"))
            .with_delay(Duration::from_millis(500)),
        _ => MockResponse::status(404),
    }
}

async fn start() -> (MockBackend, Arc<Document>, Dashboard) {
    let backend = MockBackend::start(route).await;
    let config = backend
        .config()
        .with_request_timeout(Duration::from_millis(200));
    let api = Arc::new(ApiClient::new(&config).unwrap());
    let document = Arc::new(Document::new());
    let dashboard = Dashboard::new(api, document.clone(), config);
    (backend, document, dashboard)
}

#[tokio::test]
async fn test_dashboard_and_jobs_over_http() {
    let (backend, document, dashboard) = start().await;
    dashboard.init().await.unwrap();

    match document.block(Region::StatsGrid) {
        Some(Block::StatCards(cards)) => {
            assert_eq!(cards[0], StatCard::new("1,234", "Total Jobs Found"));
            assert_eq!(cards[3], StatCard::new("0%", "Avg Match Score"));
        }
        other => panic!("unexpected stats block: {:?}", other),
    }
    assert!(document
        .toasts()
        .iter()
        .all(|toast| toast.message != "Failed to load dashboard statistics"));

    dashboard.navigate("#/jobs").await.unwrap();
    assert_eq!(document.page(), Some(PageSkeleton::Jobs));
    let html = document.html(Region::Content).unwrap();
    assert!(html.contains("Platform Engineer"));
    assert!(html.contains(r#"<span class="badge badge-success">Processed</span>"#));

    assert!(dashboard.set_source_filter("indeed").await);
    let paths: Vec<String> = backend.requests().into_iter().map(|r| r.path).collect();
    assert!(paths.contains(&"/api/jobs?source=indeed".to_string()));

    dashboard.destroy();
}

#[tokio::test]
async fn test_timed_out_download_toasts() {
    let (_backend, document, dashboard) = start().await;

    assert!(dashboard.download_cv(9).await.is_none());

    let toasts = document.toasts();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].message, "Request timed out");
    assert!(!document.is_loading());
}

#[tokio::test]
async fn test_unknown_download_is_server_error() {
    let (_backend, document, dashboard) = start().await;

    assert!(dashboard.download_cv(1).await.is_none());
    assert_eq!(document.toasts()[0].message, "Server error occurred");
}
