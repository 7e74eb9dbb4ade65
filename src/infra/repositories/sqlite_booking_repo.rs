use crate::domain::{models::booking::Booking, ports::BookingRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;
use chrono::{DateTime, Utc};

pub struct SqliteBookingRepo {
    pool: SqlitePool,
}

impl SqliteBookingRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for SqliteBookingRepo {
    async fn create_if_free(&self, booking: &Booking, guard_start: DateTime<Utc>, guard_end: DateTime<Utc>) -> Result<Booking, AppError> {
        // Single conditional INSERT: SQLite executes one statement at a time,
        // so the overlap check and the write cannot interleave with a
        // concurrent submission.
        let result = sqlx::query(
            "INSERT INTO bookings (id, package_id, customer_name, customer_email, customer_phone, customer_note, start_time, end_time, status, created_at)
             SELECT ?, ?, ?, ?, ?, ?, ?, ?, ?, ?
             WHERE NOT EXISTS (
                 SELECT 1 FROM bookings
                 WHERE status IN ('pending', 'confirmed') AND start_time < ? AND end_time > ?
             )"
        )
            .bind(&booking.id).bind(&booking.package_id)
            .bind(&booking.customer_name).bind(&booking.customer_email)
            .bind(&booking.customer_phone).bind(&booking.customer_note)
            .bind(booking.start_time).bind(booking.end_time)
            .bind(&booking.status).bind(booking.created_at)
            .bind(guard_end).bind(guard_start)
            .execute(&self.pool).await.map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::Conflict("Slot taken".to_string()));
        }

        self.find_by_id(&booking.id).await?.ok_or(AppError::Internal)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = ?")
            .bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings ORDER BY created_at DESC")
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_active_in_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE status IN ('pending', 'confirmed') AND start_time < ? AND end_time > ?"
        )
            .bind(end).bind(start)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update_status(&self, id: &str, status: &str) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>("UPDATE bookings SET status = ? WHERE id = ? RETURNING *")
            .bind(status).bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Booking not found".into()))
    }
}
