use axum::{extract::{Path, State}, response::IntoResponse, Json};
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tracing::{info, warn};

use crate::api::dtos::requests::{CreateBookingRequest, UpdateBookingStatusRequest};
use crate::domain::models::booking::{is_valid_status, Booking, NewBookingParams};
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.name.trim().is_empty() || payload.email.trim().is_empty() {
        return Err(AppError::Validation("Missing required fields".into()));
    }

    let package = state.package_repo.find_by_id(&payload.package_id).await?
        .ok_or(AppError::NotFound("Package not found".into()))?;

    let start = DateTime::parse_from_rfc3339(&payload.start)
        .map_err(|_| AppError::Validation("Invalid start time (RFC 3339 expected)".into()))?
        .with_timezone(&Utc);

    let booking = Booking::new(NewBookingParams {
        package_id: package.id.clone(),
        start,
        duration_min: package.duration_min,
        name: payload.name,
        email: payload.email,
        phone: payload.phone,
        note: payload.notes,
    });

    // The availability read and this write are separate requests; the
    // repository re-checks the padded window against live bookings in the
    // same critical section as the insert.
    let guard_end = booking.end_time + Duration::minutes(state.config.buffer_min as i64);

    let created = match state.booking_repo.create_if_free(&booking, booking.start_time, guard_end).await {
        Ok(created) => created,
        Err(AppError::Conflict(msg)) => {
            warn!("Booking rejected for {} at {}: slot taken", package.slug, booking.start_time);
            return Err(AppError::Conflict(msg));
        }
        Err(e) => return Err(e),
    };

    info!("Booking created: {} for package {} at {}", created.id, package.slug, created.start_time);
    Ok(Json(created))
}

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let bookings = state.booking_repo.list().await?;
    Ok(Json(bookings))
}

pub async fn update_booking_status(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<String>,
    Json(payload): Json<UpdateBookingStatusRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !is_valid_status(&payload.status) {
        return Err(AppError::Validation("Invalid status".into()));
    }

    let updated = state.booking_repo.update_status(&booking_id, &payload.status).await?;
    info!("Booking {} moved to {}", updated.id, updated.status);
    Ok(Json(updated))
}
