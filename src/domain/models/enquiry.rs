use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Enquiry {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub treatment: Option<String>,
    pub source: String,
    pub created_at: DateTime<Utc>,
}

pub struct NewEnquiryParams {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub treatment: Option<String>,
    pub source: String,
}

impl Enquiry {
    pub fn new(params: NewEnquiryParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: params.name,
            email: params.email,
            phone: params.phone,
            message: params.message,
            treatment: params.treatment,
            source: params.source,
            created_at: Utc::now(),
        }
    }
}
