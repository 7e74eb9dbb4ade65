use axum::{extract::{Query, State}, response::IntoResponse, Json};
use chrono::{NaiveDate, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::responses::{AvailabilityResponse, Slot};
use crate::domain::services::availability::{
    generate_slots, resolve_free_intervals, weekday_index, DayWindow, SlotQuery,
};
use crate::error::AppError;
use crate::state::AppState;

pub async fn get_availability(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let date_str = params.get("date").ok_or(AppError::Validation("date required".into()))?;
    let package_id = params.get("package_id").ok_or(AppError::Validation("package_id required".into()))?;

    let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date format (YYYY-MM-DD)".into()))?;

    let package = state.package_repo.find_by_id(package_id).await?
        .ok_or(AppError::NotFound("Package not found".into()))?;

    let tz = state.config.timezone;
    let window = DayWindow::new(date, tz)
        .ok_or(AppError::Validation("Date has no well-defined midnight in the business timezone".into()))?;

    let weekday = weekday_index(date);
    let rules = state.schedule_repo.active_rules_for_weekday(weekday).await?;
    let recurring = state.schedule_repo.recurring_for_date(weekday, date).await?;
    let blocks = state.schedule_repo.blocks_in_range(window.start_utc, window.end_utc).await?;

    let free = resolve_free_intervals(&window, &rules, &recurring, &blocks, state.config.slot_interval_min);

    let bookings = state.booking_repo.list_active_in_range(window.start_utc, window.end_utc).await?;

    let starts = generate_slots(&window, &SlotQuery {
        free: &free,
        duration_min: package.duration_min,
        interval_min: state.config.slot_interval_min,
        buffer_min: state.config.buffer_min,
        bookings: &bookings,
        now: Utc::now(),
    });

    info!("availability: {} slots for {} on {}", starts.len(), package.slug, date);

    let slots = starts
        .into_iter()
        .map(|start| Slot {
            start: start.to_rfc3339(),
            label: start.with_timezone(&tz).format("%H:%M").to_string(),
        })
        .collect();

    Ok(Json(AvailabilityResponse {
        slots,
        buffer_min: state.config.buffer_min,
        interval_min: state.config.slot_interval_min,
        duration_min: package.duration_min,
    }))
}
