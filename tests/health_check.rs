mod common;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
};
use tempfile::tempdir;
use tower::ServiceExt;

#[tokio::test]
async fn health_check_works() {
    let dir = tempdir().unwrap();
    let app = common::test_app(
        "http://127.0.0.1:1",
        &dir.path().join("data.json"),
        &dir.path().join("uploads"),
    );

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn home_serves_chat_page() {
    let dir = tempdir().unwrap();
    let app = common::test_app(
        "http://127.0.0.1:1",
        &dir.path().join("data.json"),
        &dir.path().join("uploads"),
    );

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains(r#"id="chat-box""#));
    assert!(html.contains(r#"id="pdf-upload""#));
}
