use axum::{
    body::Body,
    extract::Request,
    routing::{delete, get, patch, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{availability, booking, enquiry, health, package, schedule};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Public catalogue
        .route("/api/v1/packages", get(package::list_packages))
        .route("/api/v1/packages/{slug}", get(package::get_package))

        // Public booking flow
        .route("/api/v1/availability", get(availability::get_availability))
        .route("/api/v1/bookings", post(booking::create_booking))

        // Enquiries
        .route("/api/v1/enquiries", post(enquiry::create_enquiry))

        // Admin schedule management
        .route("/api/v1/admin/schedule", get(schedule::get_schedule))
        .route("/api/v1/admin/schedule/rules", post(schedule::create_rule))
        .route("/api/v1/admin/schedule/rules/{rule_id}", put(schedule::update_rule).delete(schedule::delete_rule))
        .route("/api/v1/admin/schedule/weekly", put(schedule::replace_weekly))
        .route("/api/v1/admin/schedule/recurring", post(schedule::create_recurring_block))
        .route("/api/v1/admin/schedule/recurring/{block_id}", put(schedule::update_recurring_block).delete(schedule::delete_recurring_block))
        .route("/api/v1/admin/schedule/blocks", post(schedule::create_time_block))
        .route("/api/v1/admin/schedule/blocks/{block_id}", delete(schedule::delete_time_block))

        // Admin bookings
        .route("/api/v1/admin/bookings", get(booking::list_bookings))
        .route("/api/v1/admin/bookings/{booking_id}", patch(booking::update_booking_status))

        // Admin catalogue
        .route("/api/v1/admin/packages", post(package::create_package))
        .route("/api/v1/admin/packages/{package_id}", put(package::update_package).delete(package::delete_package))

        // Admin enquiries
        .route("/api/v1/admin/enquiries", get(enquiry::list_enquiries))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}
