mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{Datelike, Duration, Utc};
use common::TestApp;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// A date at least a week out whose weekday index (0=Sunday) matches, so
/// same-day past filtering never interferes.
fn upcoming(weekday: u32) -> String {
    let mut date = Utc::now().date_naive() + Duration::days(7);
    while date.weekday().num_days_from_sunday() != weekday {
        date += Duration::days(1);
    }
    date.format("%Y-%m-%d").to_string()
}

async fn get_slots(app: &TestApp, date: &str, package_id: &str) -> axum::response::Response {
    app.router.clone().oneshot(
        Request::builder()
            .method("GET")
            .uri(format!("/api/v1/availability?date={}&package_id={}", date, package_id))
            .body(Body::empty()).unwrap()
    ).await.unwrap()
}

fn slot_starts(body: &Value) -> Vec<String> {
    body["slots"].as_array().unwrap()
        .iter()
        .map(|s| s["start"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_standard_working_day() {
    let app = TestApp::new().await;
    let package_id = app.create_package("deep-tissue", 60).await;
    app.create_rule(1, 540, 1020).await; // Monday 09:00-17:00
    let date = upcoming(1);

    let res = get_slots(&app, &date, &package_id).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = parse_body(res).await;
    let starts = slot_starts(&body);

    // 09:00 through 15:45 at 15-minute steps (15:45 + 60 + 15 = 17:00)
    assert_eq!(starts.len(), 28);
    assert!(starts[0].contains("T09:00:00"));
    assert!(starts[27].contains("T15:45:00"));
    assert_eq!(body["duration_min"], 60);
    assert_eq!(body["buffer_min"], 15);
    assert_eq!(body["interval_min"], 15);
}

#[tokio::test]
async fn test_day_without_rules_is_closed() {
    let app = TestApp::new().await;
    let package_id = app.create_package("sports-recovery", 60).await;
    app.create_rule(1, 540, 1020).await; // Monday only
    let sunday = upcoming(0);

    let res = get_slots(&app, &sunday, &package_id).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = parse_body(res).await;
    assert!(body["slots"].as_array().unwrap().is_empty(), "day with no rules must be closed");
}

#[tokio::test]
async fn test_recurring_block_cuts_lunch() {
    let app = TestApp::new().await;
    let package_id = app.create_package("dry-cupping", 60).await;
    app.create_rule(1, 540, 1020).await;
    let date = upcoming(1);

    let payload = json!({
        "weekday": 1,
        "start_minutes": 720,
        "end_minutes": 780,
        "reason": "lunch"
    });
    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/admin/schedule/recurring")
            .header("Content-Type", "application/json")
            .body(Body::from(payload.to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = parse_body(get_slots(&app, &date, &package_id).await).await;
    let starts = slot_starts(&body);

    assert!(starts.iter().any(|s| s.contains("T10:45:00")), "10:45 touches the block boundary and stays");
    assert!(!starts.iter().any(|s| s.contains("T11:00:00")), "11:00 would reach into the block");
    assert!(!starts.iter().any(|s| s.contains("T12:00:00")));
    assert!(starts.iter().any(|s| s.contains("T13:00:00")), "slots resume after the block");
}

#[tokio::test]
async fn test_recurring_block_respects_effective_range() {
    let app = TestApp::new().await;
    let package_id = app.create_package("contrast-therapy", 60).await;
    app.create_rule(1, 540, 1020).await;
    let date = upcoming(1);

    // Effective window ends long before the target date: must not apply.
    let payload = json!({
        "weekday": 1,
        "start_minutes": 540,
        "end_minutes": 1020,
        "starts_on": "2020-01-01",
        "ends_on": "2020-12-31"
    });
    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/admin/schedule/recurring")
            .header("Content-Type", "application/json")
            .body(Body::from(payload.to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = parse_body(get_slots(&app, &date, &package_id).await).await;
    assert_eq!(body["slots"].as_array().unwrap().len(), 28, "expired recurring block must not cut anything");
}

#[tokio::test]
async fn test_one_off_block_closes_afternoon() {
    let app = TestApp::new().await;
    let package_id = app.create_package("full-reset", 60).await;
    app.create_rule(1, 540, 1020).await;
    let date = upcoming(1);

    let payload = json!({
        "start": format!("{}T13:00:00Z", date),
        "end": format!("{}T17:00:00Z", date),
        "reason": "appointment"
    });
    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/admin/schedule/blocks")
            .header("Content-Type", "application/json")
            .body(Body::from(payload.to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = parse_body(get_slots(&app, &date, &package_id).await).await;
    let starts = slot_starts(&body);

    assert!(starts.iter().any(|s| s.contains("T09:00:00")));
    // Last viable start is 11:45: 11:45 + 60 + 15 = 13:00.
    assert!(starts.iter().any(|s| s.contains("T11:45:00")));
    assert!(!starts.iter().any(|s| s.contains("T12:00:00")));
    assert!(!starts.iter().any(|s| s.contains("T14:00:00")));
}

#[tokio::test]
async fn test_booking_consumes_slots_with_buffer() {
    let app = TestApp::new().await;
    let package_id = app.create_package("wet-cupping", 60).await;
    app.create_rule(1, 540, 1020).await;
    let date = upcoming(1);

    // Book 11:00-12:00; with the 15 min buffer it occupies [11:00, 12:15).
    let payload = json!({
        "package_id": package_id,
        "start": format!("{}T11:00:00Z", date),
        "name": "T",
        "email": "t@t.com"
    });
    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/bookings")
            .header("Content-Type", "application/json")
            .body(Body::from(payload.to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = parse_body(get_slots(&app, &date, &package_id).await).await;
    let starts = slot_starts(&body);

    assert!(!starts.iter().any(|s| s.contains("T11:00:00")), "booked slot is gone");
    assert!(!starts.iter().any(|s| s.contains("T10:00:00")), "a 60+15 occupation from 10:00 would hit the booking");
    assert!(!starts.iter().any(|s| s.contains("T12:00:00")), "buffer after the booking blocks 12:00");
    assert!(starts.iter().any(|s| s.contains("T09:45:00")), "09:45 ends (with buffer) exactly at the booking start");
    assert!(starts.iter().any(|s| s.contains("T12:15:00")), "12:15 is the first slot after the buffer");
}

#[tokio::test]
async fn test_availability_validation_errors() {
    let app = TestApp::new().await;
    let package_id = app.create_package("slug-a", 60).await;

    let missing_date = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri(format!("/api/v1/availability?package_id={}", package_id))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(missing_date.status(), StatusCode::BAD_REQUEST);

    let bad_date = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri(format!("/api/v1/availability?date=junk&package_id={}", package_id))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(bad_date.status(), StatusCode::BAD_REQUEST);

    let unknown_package = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri("/api/v1/availability?date=2030-01-07&package_id=nope")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(unknown_package.status(), StatusCode::NOT_FOUND);
}
