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

fn upcoming_monday() -> String {
    let mut date = Utc::now().date_naive() + Duration::days(7);
    while date.weekday().num_days_from_sunday() != 1 {
        date += Duration::days(1);
    }
    date.format("%Y-%m-%d").to_string()
}

fn booking_payload(package_id: &str, start: &str) -> Value {
    json!({
        "package_id": package_id,
        "start": start,
        "name": "Jamie",
        "email": "jamie@example.com",
        "phone": "+44 7000 000000",
        "notes": "first visit"
    })
}

async fn post_booking(app: &TestApp, payload: &Value) -> axum::response::Response {
    app.router.clone().oneshot(
        Request::builder()
            .method("POST")
            .uri("/api/v1/bookings")
            .header("Content-Type", "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap()
    ).await.unwrap()
}

#[tokio::test]
async fn test_create_booking_happy_path() {
    let app = TestApp::new().await;
    let package_id = app.create_package("deep-tissue", 60).await;
    let date = upcoming_monday();

    let res = post_booking(&app, &booking_payload(&package_id, &format!("{}T10:00:00Z", date))).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = parse_body(res).await;
    assert_eq!(body["status"], "pending");
    assert_eq!(body["customer_name"], "Jamie");
    assert!(body["start_time"].as_str().unwrap().contains("T10:00:00"));
    assert!(body["end_time"].as_str().unwrap().contains("T11:00:00"));
}

#[tokio::test]
async fn test_double_booking_is_rejected() {
    let app = TestApp::new().await;
    let package_id = app.create_package("deep-tissue", 60).await;
    let date = upcoming_monday();
    let start = format!("{}T10:00:00Z", date);

    let first = post_booking(&app, &booking_payload(&package_id, &start)).await;
    assert_eq!(first.status(), StatusCode::OK);

    let second = post_booking(&app, &booking_payload(&package_id, &start)).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let body = parse_body(second).await;
    assert_eq!(body["error"], "Slot taken");
}

#[tokio::test]
async fn test_overlapping_booking_is_rejected() {
    let app = TestApp::new().await;
    let package_id = app.create_package("deep-tissue", 60).await;
    let date = upcoming_monday();

    let first = post_booking(&app, &booking_payload(&package_id, &format!("{}T10:00:00Z", date))).await;
    assert_eq!(first.status(), StatusCode::OK);

    // 10:30 lands inside the existing 10:00-11:00 booking.
    let overlap = post_booking(&app, &booking_payload(&package_id, &format!("{}T10:30:00Z", date))).await;
    assert_eq!(overlap.status(), StatusCode::CONFLICT);

    // 11:00 would leave no buffer after the new booking's own window but is
    // clear of the existing one; the guard window is [start, end + buffer).
    // 11:15 is what availability would offer; both must clear the guard.
    let after_buffer = post_booking(&app, &booking_payload(&package_id, &format!("{}T11:15:00Z", date))).await;
    assert_eq!(after_buffer.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_booking_just_before_existing_respects_buffer() {
    let app = TestApp::new().await;
    let package_id = app.create_package("deep-tissue", 60).await;
    let date = upcoming_monday();

    let first = post_booking(&app, &booking_payload(&package_id, &format!("{}T12:00:00Z", date))).await;
    assert_eq!(first.status(), StatusCode::OK);

    // 11:00-12:00 plus the trailing buffer reaches 12:15, into the booking.
    let too_close = post_booking(&app, &booking_payload(&package_id, &format!("{}T11:00:00Z", date))).await;
    assert_eq!(too_close.status(), StatusCode::CONFLICT);

    // 10:45-11:45 plus buffer ends exactly at 12:00; touching is not overlap.
    let touching = post_booking(&app, &booking_payload(&package_id, &format!("{}T10:45:00Z", date))).await;
    assert_eq!(touching.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_concurrent_submissions_yield_one_success() {
    let app = TestApp::new().await;
    let package_id = app.create_package("deep-tissue", 60).await;
    let date = upcoming_monday();
    let payload = booking_payload(&package_id, &format!("{}T14:00:00Z", date));

    let (a, b) = tokio::join!(
        post_booking(&app, &payload),
        post_booking(&app, &payload),
    );

    let statuses = [a.status(), b.status()];
    let successes = statuses.iter().filter(|s| s.is_success()).count();
    let conflicts = statuses.iter().filter(|s| **s == StatusCode::CONFLICT).count();

    assert_eq!(successes, 1, "exactly one concurrent submission may win, got {:?}", statuses);
    assert_eq!(conflicts, 1);
}

#[tokio::test]
async fn test_cancelled_booking_frees_the_slot() {
    let app = TestApp::new().await;
    let package_id = app.create_package("deep-tissue", 60).await;
    let date = upcoming_monday();
    let start = format!("{}T10:00:00Z", date);

    let first = post_booking(&app, &booking_payload(&package_id, &start)).await;
    assert_eq!(first.status(), StatusCode::OK);
    let booking_id = parse_body(first).await["id"].as_str().unwrap().to_string();

    let retry = post_booking(&app, &booking_payload(&package_id, &start)).await;
    assert_eq!(retry.status(), StatusCode::CONFLICT);

    let cancel = app.router.clone().oneshot(
        Request::builder().method("PATCH")
            .uri(format!("/api/v1/admin/bookings/{}", booking_id))
            .header("Content-Type", "application/json")
            .body(Body::from(json!({"status": "cancelled"}).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(cancel.status(), StatusCode::OK);

    let rebook = post_booking(&app, &booking_payload(&package_id, &start)).await;
    assert_eq!(rebook.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_status_transitions_and_listing() {
    let app = TestApp::new().await;
    let package_id = app.create_package("deep-tissue", 60).await;
    let date = upcoming_monday();

    let res = post_booking(&app, &booking_payload(&package_id, &format!("{}T09:00:00Z", date))).await;
    let booking_id = parse_body(res).await["id"].as_str().unwrap().to_string();

    let confirm = app.router.clone().oneshot(
        Request::builder().method("PATCH")
            .uri(format!("/api/v1/admin/bookings/{}", booking_id))
            .header("Content-Type", "application/json")
            .body(Body::from(json!({"status": "confirmed"}).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(confirm.status(), StatusCode::OK);
    assert_eq!(parse_body(confirm).await["status"], "confirmed");

    let bad_status = app.router.clone().oneshot(
        Request::builder().method("PATCH")
            .uri(format!("/api/v1/admin/bookings/{}", booking_id))
            .header("Content-Type", "application/json")
            .body(Body::from(json!({"status": "archived"}).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(bad_status.status(), StatusCode::BAD_REQUEST);

    let missing = app.router.clone().oneshot(
        Request::builder().method("PATCH")
            .uri("/api/v1/admin/bookings/not-a-booking")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({"status": "confirmed"}).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let list = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/admin/bookings")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    let bookings = parse_body(list).await;
    assert_eq!(bookings.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_booking_validation_errors() {
    let app = TestApp::new().await;
    let package_id = app.create_package("deep-tissue", 60).await;
    let date = upcoming_monday();

    let unknown_package = post_booking(&app, &booking_payload("nope", &format!("{}T10:00:00Z", date))).await;
    assert_eq!(unknown_package.status(), StatusCode::NOT_FOUND);

    let mut blank_name = booking_payload(&package_id, &format!("{}T10:00:00Z", date));
    blank_name["name"] = json!("   ");
    let res = post_booking(&app, &blank_name).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let bad_start = post_booking(&app, &booking_payload(&package_id, "next tuesday")).await;
    assert_eq!(bad_start.status(), StatusCode::BAD_REQUEST);
}
