use crate::domain::{
    models::schedule::{AvailabilityRule, RecurringBlock, TimeBlock},
    ports::ScheduleRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;
use chrono::{DateTime, NaiveDate, Utc};

pub struct SqliteScheduleRepo {
    pool: SqlitePool,
}

impl SqliteScheduleRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScheduleRepository for SqliteScheduleRepo {
    async fn create_rule(&self, rule: &AvailabilityRule) -> Result<AvailabilityRule, AppError> {
        sqlx::query_as::<_, AvailabilityRule>(
            "INSERT INTO availability_rules (id, weekday, start_minutes, end_minutes, is_active, created_at)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&rule.id).bind(rule.weekday).bind(rule.start_minutes).bind(rule.end_minutes)
            .bind(rule.is_active).bind(rule.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_rule(&self, id: &str) -> Result<Option<AvailabilityRule>, AppError> {
        sqlx::query_as::<_, AvailabilityRule>("SELECT * FROM availability_rules WHERE id = ?")
            .bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn update_rule(&self, rule: &AvailabilityRule) -> Result<AvailabilityRule, AppError> {
        sqlx::query_as::<_, AvailabilityRule>(
            "UPDATE availability_rules SET weekday=?, start_minutes=?, end_minutes=?, is_active=? WHERE id=? RETURNING *"
        )
            .bind(rule.weekday).bind(rule.start_minutes).bind(rule.end_minutes).bind(rule.is_active).bind(&rule.id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn delete_rule(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM availability_rules WHERE id = ?")
            .bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Rule not found".into()));
        }
        Ok(())
    }

    async fn list_rules(&self) -> Result<Vec<AvailabilityRule>, AppError> {
        sqlx::query_as::<_, AvailabilityRule>("SELECT * FROM availability_rules ORDER BY weekday ASC, start_minutes ASC")
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn active_rules_for_weekday(&self, weekday: i32) -> Result<Vec<AvailabilityRule>, AppError> {
        sqlx::query_as::<_, AvailabilityRule>(
            "SELECT * FROM availability_rules WHERE weekday = ? AND is_active = 1 ORDER BY start_minutes ASC"
        )
            .bind(weekday).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn replace_rules(&self, rules: &[AvailabilityRule]) -> Result<Vec<AvailabilityRule>, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        sqlx::query("DELETE FROM availability_rules").execute(&mut *tx).await.map_err(AppError::Database)?;
        for rule in rules {
            sqlx::query(
                "INSERT INTO availability_rules (id, weekday, start_minutes, end_minutes, is_active, created_at) VALUES (?, ?, ?, ?, ?, ?)"
            )
                .bind(&rule.id).bind(rule.weekday).bind(rule.start_minutes).bind(rule.end_minutes)
                .bind(rule.is_active).bind(rule.created_at)
                .execute(&mut *tx).await.map_err(AppError::Database)?;
        }
        tx.commit().await.map_err(AppError::Database)?;
        self.list_rules().await
    }

    async fn create_recurring(&self, block: &RecurringBlock) -> Result<RecurringBlock, AppError> {
        sqlx::query_as::<_, RecurringBlock>(
            "INSERT INTO recurring_blocks (id, weekday, start_minutes, end_minutes, starts_on, ends_on, reason, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&block.id).bind(block.weekday).bind(block.start_minutes).bind(block.end_minutes)
            .bind(block.starts_on).bind(block.ends_on).bind(&block.reason).bind(block.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_recurring(&self, id: &str) -> Result<Option<RecurringBlock>, AppError> {
        sqlx::query_as::<_, RecurringBlock>("SELECT * FROM recurring_blocks WHERE id = ?")
            .bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn update_recurring(&self, block: &RecurringBlock) -> Result<RecurringBlock, AppError> {
        sqlx::query_as::<_, RecurringBlock>(
            "UPDATE recurring_blocks SET weekday=?, start_minutes=?, end_minutes=?, starts_on=?, ends_on=?, reason=? WHERE id=? RETURNING *"
        )
            .bind(block.weekday).bind(block.start_minutes).bind(block.end_minutes)
            .bind(block.starts_on).bind(block.ends_on).bind(&block.reason).bind(&block.id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn delete_recurring(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM recurring_blocks WHERE id = ?")
            .bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Recurring block not found".into()));
        }
        Ok(())
    }

    async fn list_recurring(&self) -> Result<Vec<RecurringBlock>, AppError> {
        sqlx::query_as::<_, RecurringBlock>("SELECT * FROM recurring_blocks ORDER BY weekday ASC, start_minutes ASC")
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn recurring_for_date(&self, weekday: i32, date: NaiveDate) -> Result<Vec<RecurringBlock>, AppError> {
        sqlx::query_as::<_, RecurringBlock>(
            "SELECT * FROM recurring_blocks WHERE weekday = ? AND starts_on <= ? AND (ends_on IS NULL OR ends_on >= ?)"
        )
            .bind(weekday).bind(date).bind(date)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn create_block(&self, block: &TimeBlock) -> Result<TimeBlock, AppError> {
        sqlx::query_as::<_, TimeBlock>(
            "INSERT INTO time_blocks (id, start_time, end_time, reason, created_at) VALUES (?, ?, ?, ?, ?) RETURNING *"
        )
            .bind(&block.id).bind(block.start_time).bind(block.end_time).bind(&block.reason).bind(block.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn delete_block(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM time_blocks WHERE id = ?")
            .bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Time block not found".into()));
        }
        Ok(())
    }

    async fn list_blocks(&self) -> Result<Vec<TimeBlock>, AppError> {
        sqlx::query_as::<_, TimeBlock>("SELECT * FROM time_blocks ORDER BY start_time ASC")
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn blocks_in_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<TimeBlock>, AppError> {
        sqlx::query_as::<_, TimeBlock>("SELECT * FROM time_blocks WHERE start_time < ? AND end_time > ?")
            .bind(end).bind(start)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }
}
