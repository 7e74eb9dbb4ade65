use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_CONFIRMED: &str = "confirmed";
pub const STATUS_CANCELLED: &str = "cancelled";

/// Bookings are never deleted; admins move them through
/// pending -> confirmed / cancelled. Only pending and confirmed
/// bookings occupy the calendar.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Booking {
    pub id: String,
    pub package_id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub customer_note: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

pub struct NewBookingParams {
    pub package_id: String,
    pub start: DateTime<Utc>,
    pub duration_min: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub note: Option<String>,
}

impl Booking {
    pub fn new(params: NewBookingParams) -> Self {
        let end_time = params.start + chrono::Duration::minutes(params.duration_min as i64);

        Self {
            id: Uuid::new_v4().to_string(),
            package_id: params.package_id,
            customer_name: params.name,
            customer_email: params.email,
            customer_phone: params.phone,
            customer_note: params.note,
            start_time: params.start,
            end_time,
            status: STATUS_PENDING.to_string(),
            created_at: Utc::now(),
        }
    }
}

pub fn is_valid_status(status: &str) -> bool {
    matches!(status, STATUS_PENDING | STATUS_CONFIRMED | STATUS_CANCELLED)
}
