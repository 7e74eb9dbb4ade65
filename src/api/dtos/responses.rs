use serde::Serialize;

use crate::domain::models::package::Package;
use crate::domain::models::schedule::{AvailabilityRule, RecurringBlock, TimeBlock};

#[derive(Serialize)]
pub struct Slot {
    /// RFC 3339 instant, what the booking endpoint expects back.
    pub start: String,
    /// "HH:MM" in the business timezone, for display.
    pub label: String,
}

#[derive(Serialize)]
pub struct AvailabilityResponse {
    pub slots: Vec<Slot>,
    pub buffer_min: i32,
    pub interval_min: i32,
    pub duration_min: i32,
}

#[derive(Serialize)]
pub struct PackageResponse {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub features: Vec<String>,
    pub price_cents: i32,
    pub duration_min: i32,
    pub tier: Option<String>,
    pub image_url: Option<String>,
}

impl From<&Package> for PackageResponse {
    fn from(package: &Package) -> Self {
        Self {
            id: package.id.clone(),
            title: package.title.clone(),
            slug: package.slug.clone(),
            description: package.description.clone(),
            features: package.features(),
            price_cents: package.price_cents,
            duration_min: package.duration_min,
            tier: package.tier.clone(),
            image_url: package.image_url.clone(),
        }
    }
}

#[derive(Serialize)]
pub struct ScheduleResponse {
    pub rules: Vec<AvailabilityRule>,
    pub recurring: Vec<RecurringBlock>,
    pub blocks: Vec<TimeBlock>,
}
