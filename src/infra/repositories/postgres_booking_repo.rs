use crate::domain::{models::booking::Booking, ports::BookingRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{PgPool, Row};
use chrono::{DateTime, Utc};

/// Advisory lock key for the single business calendar. All booking writes
/// serialize behind it, which closes the read-check/insert race window.
const CALENDAR_LOCK_KEY: i64 = 0x0b00_c417;

pub struct PostgresBookingRepo {
    pool: PgPool,
}

impl PostgresBookingRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for PostgresBookingRepo {
    async fn create_if_free(&self, booking: &Booking, guard_start: DateTime<Utc>, guard_end: DateTime<Utc>) -> Result<Booking, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(CALENDAR_LOCK_KEY)
            .execute(&mut *tx).await.map_err(AppError::Database)?;

        let overlap = sqlx::query(
            "SELECT COUNT(*) AS count FROM bookings
             WHERE status IN ('pending', 'confirmed') AND start_time < $1 AND end_time > $2"
        )
            .bind(guard_end).bind(guard_start)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;

        if overlap.get::<i64, _>("count") > 0 {
            return Err(AppError::Conflict("Slot taken".to_string()));
        }

        let created = sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, package_id, customer_name, customer_email, customer_phone, customer_note, start_time, end_time, status, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING *"
        )
            .bind(&booking.id).bind(&booking.package_id)
            .bind(&booking.customer_name).bind(&booking.customer_email)
            .bind(&booking.customer_phone).bind(&booking.customer_note)
            .bind(booking.start_time).bind(booking.end_time)
            .bind(&booking.status).bind(booking.created_at)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings ORDER BY created_at DESC")
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_active_in_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE status IN ('pending', 'confirmed') AND start_time < $1 AND end_time > $2"
        )
            .bind(end).bind(start)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update_status(&self, id: &str, status: &str) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>("UPDATE bookings SET status = $1 WHERE id = $2 RETURNING *")
            .bind(status).bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Booking not found".into()))
    }
}
