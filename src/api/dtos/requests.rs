use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Deserialize)]
pub struct CreateBookingRequest {
    pub package_id: String,
    /// RFC 3339 start instant, as returned by the availability endpoint.
    pub start: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateBookingStatusRequest {
    pub status: String,
}

#[derive(Deserialize)]
pub struct CreateEnquiryRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub treatment: Option<String>,
    pub source: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateRuleRequest {
    pub weekday: i32,
    pub start_minutes: i32,
    pub end_minutes: i32,
    pub is_active: Option<bool>,
}

#[derive(Deserialize)]
pub struct UpdateRuleRequest {
    pub weekday: Option<i32>,
    pub start_minutes: Option<i32>,
    pub end_minutes: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Deserialize)]
pub struct WeeklyWindow {
    pub start_minutes: i32,
    pub end_minutes: i32,
}

/// Full weekly replacement: weekday index (0=Sunday..6=Saturday) to open
/// windows. Weekdays absent from the map end up with no rules, i.e. closed.
#[derive(Deserialize)]
pub struct ReplaceWeeklyRequest {
    pub weekly: HashMap<i32, Vec<WeeklyWindow>>,
}

#[derive(Deserialize)]
pub struct CreateRecurringBlockRequest {
    pub weekday: i32,
    pub start_minutes: i32,
    pub end_minutes: i32,
    pub starts_on: Option<NaiveDate>,
    pub ends_on: Option<NaiveDate>,
    pub reason: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateRecurringBlockRequest {
    pub weekday: Option<i32>,
    pub start_minutes: Option<i32>,
    pub end_minutes: Option<i32>,
    pub starts_on: Option<NaiveDate>,
    pub ends_on: Option<NaiveDate>,
    pub reason: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateTimeBlockRequest {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub reason: Option<String>,
}

#[derive(Deserialize)]
pub struct CreatePackageRequest {
    pub title: String,
    pub slug: String,
    pub description: String,
    pub features: Option<Vec<String>>,
    pub price_cents: i32,
    pub duration_min: i32,
    pub tier: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdatePackageRequest {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub features: Option<Vec<String>>,
    pub price_cents: Option<i32>,
    pub duration_min: Option<i32>,
    pub tier: Option<String>,
    pub image_url: Option<String>,
}
