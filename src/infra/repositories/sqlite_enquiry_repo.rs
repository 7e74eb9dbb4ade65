use crate::domain::{models::enquiry::Enquiry, ports::EnquiryRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteEnquiryRepo {
    pool: SqlitePool,
}

impl SqliteEnquiryRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EnquiryRepository for SqliteEnquiryRepo {
    async fn create(&self, enquiry: &Enquiry) -> Result<Enquiry, AppError> {
        sqlx::query_as::<_, Enquiry>(
            "INSERT INTO enquiries (id, name, email, phone, message, treatment, source, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&enquiry.id).bind(&enquiry.name).bind(&enquiry.email).bind(&enquiry.phone)
            .bind(&enquiry.message).bind(&enquiry.treatment).bind(&enquiry.source).bind(enquiry.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Enquiry>, AppError> {
        sqlx::query_as::<_, Enquiry>("SELECT * FROM enquiries ORDER BY created_at DESC")
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }
}
