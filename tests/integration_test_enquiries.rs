mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use common::TestApp;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn post_enquiry(app: &TestApp, payload: Value) -> axum::response::Response {
    app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/enquiries")
            .header("Content-Type", "application/json")
            .body(Body::from(payload.to_string())).unwrap()
    ).await.unwrap()
}

#[tokio::test]
async fn test_enquiry_submission_and_listing() {
    let app = TestApp::new().await;

    let res = post_enquiry(&app, json!({
        "name": "Sam",
        "email": "sam@example.com",
        "message": "Do you treat marathon runners?",
        "treatment": "sports-recovery-massage"
    })).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await["ok"], true);

    let list = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/admin/enquiries")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(list.status(), StatusCode::OK);

    let body = parse_body(list).await;
    let enquiries = body.as_array().unwrap();
    assert_eq!(enquiries.len(), 1);
    assert_eq!(enquiries[0]["name"], "Sam");
    assert_eq!(enquiries[0]["source"], "unknown", "missing source falls back to 'unknown'");
}

#[tokio::test]
async fn test_enquiry_requires_message() {
    let app = TestApp::new().await;

    let res = post_enquiry(&app, json!({
        "name": "Sam",
        "email": "sam@example.com",
        "message": "   "
    })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}
