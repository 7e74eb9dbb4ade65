use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A bookable treatment or training package. `duration_min` is fixed for the
/// life of existing bookings: changing it never rewrites booked end times.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Package {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub features_json: String,
    pub price_cents: i32,
    pub duration_min: i32,
    pub tier: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewPackageParams {
    pub title: String,
    pub slug: String,
    pub description: String,
    pub features: Vec<String>,
    pub price_cents: i32,
    pub duration_min: i32,
    pub tier: Option<String>,
    pub image_url: Option<String>,
}

impl Package {
    pub fn new(params: NewPackageParams) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: params.title,
            slug: params.slug,
            description: params.description,
            features_json: serde_json::to_string(&params.features).unwrap_or_else(|_| "[]".to_string()),
            price_cents: params.price_cents,
            duration_min: params.duration_min,
            tier: params.tier,
            image_url: params.image_url,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn features(&self) -> Vec<String> {
        serde_json::from_str(&self.features_json).unwrap_or_default()
    }

    /// Display rank for the public listing: named tiers first, unknown last.
    pub fn tier_rank(&self) -> i32 {
        match self.tier.as_deref().map(|t| t.to_lowercase()).as_deref() {
            Some("platinum") => 0,
            Some("gold") => 1,
            Some("silver") => 2,
            Some("bronze") => 3,
            _ => 999,
        }
    }
}
