use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// One open working-hour window for a weekday (0 = Sunday .. 6 = Saturday),
/// as minutes since local midnight. Several windows per weekday are allowed
/// and may overlap; the resolver treats them as a union.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct AvailabilityRule {
    pub id: String,
    pub weekday: i32,
    pub start_minutes: i32,
    pub end_minutes: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl AvailabilityRule {
    pub fn new(weekday: i32, start_minutes: i32, end_minutes: i32, is_active: bool) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            weekday,
            start_minutes,
            end_minutes,
            is_active,
            created_at: Utc::now(),
        }
    }
}

/// A standing weekly closure. Applies to dates where the weekday matches,
/// `starts_on <= date` and `ends_on` is absent or `date <= ends_on`.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct RecurringBlock {
    pub id: String,
    pub weekday: i32,
    pub start_minutes: i32,
    pub end_minutes: i32,
    pub starts_on: NaiveDate,
    pub ends_on: Option<NaiveDate>,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl RecurringBlock {
    pub fn new(
        weekday: i32,
        start_minutes: i32,
        end_minutes: i32,
        starts_on: NaiveDate,
        ends_on: Option<NaiveDate>,
        reason: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            weekday,
            start_minutes,
            end_minutes,
            starts_on,
            ends_on,
            reason,
            created_at: Utc::now(),
        }
    }
}

/// An ad-hoc closure with absolute bounds (holiday, appointment). May span
/// midnight; the resolver clips it per day.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct TimeBlock {
    pub id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TimeBlock {
    pub fn new(start_time: DateTime<Utc>, end_time: DateTime<Utc>, reason: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            start_time,
            end_time,
            reason,
            created_at: Utc::now(),
        }
    }
}
