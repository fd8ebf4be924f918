use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use std::fs;
use steam_compare::server::router;
use tempfile::TempDir;
use tower::ServiceExt;

fn dist() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("index.html"), "<!doctype html><div id=root></div>").unwrap();
    fs::write(dir.path().join("app.js"), "console.log('app')").unwrap();
    fs::write(dir.path().join("app.css"), "body{}").unwrap();
    dir
}

async fn get(dir: &TempDir, uri: &str) -> (StatusCode, Option<String>, Option<String>, Vec<u8>) {
    send(dir, Method::GET, uri).await
}

async fn send(
    dir: &TempDir,
    method: Method,
    uri: &str,
) -> (StatusCode, Option<String>, Option<String>, Vec<u8>) {
    let app = router(dir.path().to_path_buf());
    let response = app
        .oneshot(Request::builder().method(method).uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let content_type = header_value(response.headers(), header::CONTENT_TYPE);
    let cache_control = header_value(response.headers(), header::CACHE_CONTROL);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, content_type, cache_control, body.to_vec())
}

fn header_value(headers: &header::HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .map(|value| value.to_str().unwrap().to_string())
}

#[tokio::test]
async fn serves_script_with_one_hour_cache() {
    let dir = dist();
    let (status, content_type, cache_control, body) = get(&dir, "/app.js").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/javascript"));
    assert_eq!(cache_control.as_deref(), Some("public, max-age=3600"));
    assert_eq!(body, b"console.log('app')");
}

#[tokio::test]
async fn client_route_gets_entry_document() {
    let dir = dist();
    let (status, content_type, cache_control, body) =
        get(&dir, "/some/unknown/client/route").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("text/html"));
    assert_eq!(cache_control.as_deref(), Some("no-cache"));
    assert_eq!(body, b"<!doctype html><div id=root></div>");
}

#[tokio::test]
async fn query_string_is_ignored_when_resolving() {
    let dir = dist();
    let (status, content_type, _, _) = get(&dir, "/app.css?v=3").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("text/css"));
}

#[tokio::test]
async fn other_methods_resolve_like_get() {
    let dir = dist();
    let (status, content_type, _, _) = send(&dir, Method::POST, "/app.js").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/javascript"));
}

#[tokio::test]
async fn missing_entry_document_is_404() {
    let dir = TempDir::new().unwrap();
    let (status, _, cache_control, body) = get(&dir, "/dashboard").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(cache_control.is_none());
    assert_eq!(body, b"Not found");
}
