use crate::domain::models::{
    booking::Booking, enquiry::Enquiry, package::Package,
    schedule::{AvailabilityRule, RecurringBlock, TimeBlock},
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

#[async_trait]
pub trait PackageRepository: Send + Sync {
    async fn create(&self, package: &Package) -> Result<Package, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Package>, AppError>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Package>, AppError>;
    async fn list(&self) -> Result<Vec<Package>, AppError>;
    async fn update(&self, package: &Package) -> Result<Package, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Atomically re-check that `[guard_start, guard_end)` overlaps no
    /// calendar-occupying booking and insert. The check and the insert must
    /// not interleave with a concurrent writer; on overlap the booking is
    /// rejected with `AppError::Conflict` and nothing is written.
    async fn create_if_free(
        &self,
        booking: &Booking,
        guard_start: DateTime<Utc>,
        guard_end: DateTime<Utc>,
    ) -> Result<Booking, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError>;
    async fn list(&self) -> Result<Vec<Booking>, AppError>;
    /// Pending/confirmed bookings whose `[start_time, end_time)` intersects
    /// the given range.
    async fn list_active_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Booking>, AppError>;
    async fn update_status(&self, id: &str, status: &str) -> Result<Booking, AppError>;
}

#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    async fn create_rule(&self, rule: &AvailabilityRule) -> Result<AvailabilityRule, AppError>;
    async fn find_rule(&self, id: &str) -> Result<Option<AvailabilityRule>, AppError>;
    async fn update_rule(&self, rule: &AvailabilityRule) -> Result<AvailabilityRule, AppError>;
    async fn delete_rule(&self, id: &str) -> Result<(), AppError>;
    async fn list_rules(&self) -> Result<Vec<AvailabilityRule>, AppError>;
    async fn active_rules_for_weekday(&self, weekday: i32) -> Result<Vec<AvailabilityRule>, AppError>;
    /// Replace the whole weekly rule table in one transaction.
    async fn replace_rules(&self, rules: &[AvailabilityRule]) -> Result<Vec<AvailabilityRule>, AppError>;

    async fn create_recurring(&self, block: &RecurringBlock) -> Result<RecurringBlock, AppError>;
    async fn find_recurring(&self, id: &str) -> Result<Option<RecurringBlock>, AppError>;
    async fn update_recurring(&self, block: &RecurringBlock) -> Result<RecurringBlock, AppError>;
    async fn delete_recurring(&self, id: &str) -> Result<(), AppError>;
    async fn list_recurring(&self) -> Result<Vec<RecurringBlock>, AppError>;
    /// Recurring blocks matching the weekday whose effective range covers `date`.
    async fn recurring_for_date(&self, weekday: i32, date: NaiveDate) -> Result<Vec<RecurringBlock>, AppError>;

    async fn create_block(&self, block: &TimeBlock) -> Result<TimeBlock, AppError>;
    async fn delete_block(&self, id: &str) -> Result<(), AppError>;
    async fn list_blocks(&self) -> Result<Vec<TimeBlock>, AppError>;
    /// One-off blocks whose absolute range intersects `[start, end)`.
    async fn blocks_in_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<TimeBlock>, AppError>;
}

#[async_trait]
pub trait EnquiryRepository: Send + Sync {
    async fn create(&self, enquiry: &Enquiry) -> Result<Enquiry, AppError>;
    async fn list(&self) -> Result<Vec<Enquiry>, AppError>;
}
