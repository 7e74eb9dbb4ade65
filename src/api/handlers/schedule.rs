use axum::{extract::{Path, State}, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{
    CreateRecurringBlockRequest, CreateRuleRequest, CreateTimeBlockRequest,
    ReplaceWeeklyRequest, UpdateRecurringBlockRequest, UpdateRuleRequest,
};
use crate::api::dtos::responses::ScheduleResponse;
use crate::domain::models::schedule::{AvailabilityRule, RecurringBlock, TimeBlock};
use crate::domain::services::availability::MINUTES_PER_DAY;
use crate::error::AppError;
use crate::state::AppState;

fn check_weekday(weekday: i32) -> Result<(), AppError> {
    if !(0..=6).contains(&weekday) {
        return Err(AppError::Validation("weekday must be 0 (Sunday) to 6 (Saturday)".into()));
    }
    Ok(())
}

fn check_window(start_minutes: i32, end_minutes: i32) -> Result<(), AppError> {
    if start_minutes < 0 || end_minutes > MINUTES_PER_DAY || start_minutes >= end_minutes {
        return Err(AppError::Validation("window must satisfy 0 <= start_minutes < end_minutes <= 1440".into()));
    }
    Ok(())
}

pub async fn get_schedule(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let rules = state.schedule_repo.list_rules().await?;
    let recurring = state.schedule_repo.list_recurring().await?;
    let blocks = state.schedule_repo.list_blocks().await?;

    Ok(Json(ScheduleResponse { rules, recurring, blocks }))
}

pub async fn create_rule(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateRuleRequest>,
) -> Result<impl IntoResponse, AppError> {
    check_weekday(payload.weekday)?;
    check_window(payload.start_minutes, payload.end_minutes)?;

    let rule = AvailabilityRule::new(
        payload.weekday,
        payload.start_minutes,
        payload.end_minutes,
        payload.is_active.unwrap_or(true),
    );

    let created = state.schedule_repo.create_rule(&rule).await?;
    info!("Availability rule created: weekday {} [{}, {})", created.weekday, created.start_minutes, created.end_minutes);
    Ok(Json(created))
}

pub async fn update_rule(
    State(state): State<Arc<AppState>>,
    Path(rule_id): Path<String>,
    Json(payload): Json<UpdateRuleRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut rule = state.schedule_repo.find_rule(&rule_id).await?
        .ok_or(AppError::NotFound("Rule not found".into()))?;

    if let Some(weekday) = payload.weekday { rule.weekday = weekday; }
    if let Some(start_minutes) = payload.start_minutes { rule.start_minutes = start_minutes; }
    if let Some(end_minutes) = payload.end_minutes { rule.end_minutes = end_minutes; }
    if let Some(is_active) = payload.is_active { rule.is_active = is_active; }

    check_weekday(rule.weekday)?;
    check_window(rule.start_minutes, rule.end_minutes)?;

    let updated = state.schedule_repo.update_rule(&rule).await?;
    Ok(Json(updated))
}

pub async fn delete_rule(
    State(state): State<Arc<AppState>>,
    Path(rule_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.schedule_repo.delete_rule(&rule_id).await?;
    Ok(Json(serde_json::json!({"status": "deleted"})))
}

/// Replace the whole weekly rule table at once. Overlapping windows within a
/// weekday are legitimate and kept as-is; the resolver unions them.
pub async fn replace_weekly(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ReplaceWeeklyRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut rules = Vec::new();
    for (weekday, windows) in &payload.weekly {
        check_weekday(*weekday)?;
        for window in windows {
            check_window(window.start_minutes, window.end_minutes)?;
            rules.push(AvailabilityRule::new(*weekday, window.start_minutes, window.end_minutes, true));
        }
    }

    let replaced = state.schedule_repo.replace_rules(&rules).await?;
    info!("Weekly schedule replaced: {} rules", replaced.len());
    Ok(Json(replaced))
}

pub async fn create_recurring_block(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateRecurringBlockRequest>,
) -> Result<impl IntoResponse, AppError> {
    check_weekday(payload.weekday)?;
    check_window(payload.start_minutes, payload.end_minutes)?;

    let starts_on = payload.starts_on
        .unwrap_or_else(|| chrono::Utc::now().with_timezone(&state.config.timezone).date_naive());

    if let Some(ends_on) = payload.ends_on {
        if ends_on < starts_on {
            return Err(AppError::Validation("ends_on must not precede starts_on".into()));
        }
    }

    let block = RecurringBlock::new(
        payload.weekday,
        payload.start_minutes,
        payload.end_minutes,
        starts_on,
        payload.ends_on,
        payload.reason,
    );

    let created = state.schedule_repo.create_recurring(&block).await?;
    Ok(Json(created))
}

pub async fn update_recurring_block(
    State(state): State<Arc<AppState>>,
    Path(block_id): Path<String>,
    Json(payload): Json<UpdateRecurringBlockRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut block = state.schedule_repo.find_recurring(&block_id).await?
        .ok_or(AppError::NotFound("Recurring block not found".into()))?;

    if let Some(weekday) = payload.weekday { block.weekday = weekday; }
    if let Some(start_minutes) = payload.start_minutes { block.start_minutes = start_minutes; }
    if let Some(end_minutes) = payload.end_minutes { block.end_minutes = end_minutes; }
    if let Some(starts_on) = payload.starts_on { block.starts_on = starts_on; }
    if let Some(ends_on) = payload.ends_on { block.ends_on = Some(ends_on); }
    if let Some(reason) = payload.reason { block.reason = Some(reason); }

    check_weekday(block.weekday)?;
    check_window(block.start_minutes, block.end_minutes)?;
    if let Some(ends_on) = block.ends_on {
        if ends_on < block.starts_on {
            return Err(AppError::Validation("ends_on must not precede starts_on".into()));
        }
    }

    let updated = state.schedule_repo.update_recurring(&block).await?;
    Ok(Json(updated))
}

pub async fn delete_recurring_block(
    State(state): State<Arc<AppState>>,
    Path(block_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.schedule_repo.delete_recurring(&block_id).await?;
    Ok(Json(serde_json::json!({"status": "deleted"})))
}

pub async fn create_time_block(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateTimeBlockRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.start >= payload.end {
        return Err(AppError::Validation("start must precede end".into()));
    }

    let block = TimeBlock::new(payload.start, payload.end, payload.reason);
    let created = state.schedule_repo.create_block(&block).await?;
    info!("Time block created: {} -> {}", created.start_time, created.end_time);
    Ok(Json(created))
}

pub async fn delete_time_block(
    State(state): State<Arc<AppState>>,
    Path(block_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.schedule_repo.delete_block(&block_id).await?;
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
