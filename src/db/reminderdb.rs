use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sqlx::Error;
use uuid::Uuid;

use super::cache::{CacheHelper, REMINDER_CACHE_TTL};
use super::db::DBClient;
use crate::models::remindermodel::Reminder;

const REMINDER_COLUMNS: &str = "id, prospect_id, created_by, reminder_date, note, \
     is_completed, completed_at, created_at";

#[async_trait]
pub trait ReminderExt {
    async fn save_reminder(
        &self,
        prospect_id: Uuid,
        created_by: Uuid,
        reminder_date: DateTime<Utc>,
        note: Option<String>,
    ) -> Result<Reminder, Error>;

    async fn get_reminder(&self, reminder_id: Uuid) -> Result<Option<Reminder>, Error>;

    /// Per-prospect view, ordered by due date ascending.
    async fn get_reminders_for_prospect(&self, prospect_id: Uuid)
        -> Result<Vec<Reminder>, Error>;

    /// Dashboard widget query: incomplete reminders due within the next 24
    /// hours (including everything already overdue), ordered ascending.
    async fn get_due_reminders(&self, now: DateTime<Utc>) -> Result<Vec<Reminder>, Error>;

    async fn complete_reminder(
        &self,
        reminder_id: Uuid,
        completed_at: DateTime<Utc>,
    ) -> Result<Reminder, Error>;

    async fn delete_reminder(&self, reminder_id: Uuid) -> Result<(), Error>;
}

#[async_trait]
impl ReminderExt for DBClient {
    async fn save_reminder(
        &self,
        prospect_id: Uuid,
        created_by: Uuid,
        reminder_date: DateTime<Utc>,
        note: Option<String>,
    ) -> Result<Reminder, Error> {
        let reminder = sqlx::query_as::<_, Reminder>(&format!(
            r#"
            INSERT INTO reminders (prospect_id, created_by, reminder_date, note)
            VALUES ($1, $2, $3, $4)
            RETURNING {REMINDER_COLUMNS}
            "#
        ))
        .bind(prospect_id)
        .bind(created_by)
        .bind(reminder_date)
        .bind(note)
        .fetch_one(&self.pool)
        .await?;

        if let Some(redis) = &self.redis_client {
            let _ = CacheHelper::invalidate_reminders(redis, prospect_id).await;
        }

        Ok(reminder)
    }

    async fn get_reminder(&self, reminder_id: Uuid) -> Result<Option<Reminder>, Error> {
        sqlx::query_as::<_, Reminder>(&format!(
            "SELECT {REMINDER_COLUMNS} FROM reminders WHERE id = $1"
        ))
        .bind(reminder_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_reminders_for_prospect(
        &self,
        prospect_id: Uuid,
    ) -> Result<Vec<Reminder>, Error> {
        let cache_key = format!("reminders:prospect:{}", prospect_id);

        if let Some(redis) = &self.redis_client {
            if let Ok(Some(cached)) = CacheHelper::get::<Vec<Reminder>>(redis, &cache_key).await {
                return Ok(cached);
            }
        }

        let reminders = sqlx::query_as::<_, Reminder>(&format!(
            r#"
            SELECT {REMINDER_COLUMNS}
            FROM reminders
            WHERE prospect_id = $1
            ORDER BY reminder_date ASC
            "#
        ))
        .bind(prospect_id)
        .fetch_all(&self.pool)
        .await?;

        if let Some(redis) = &self.redis_client {
            let _ = CacheHelper::set(redis, &cache_key, &reminders, REMINDER_CACHE_TTL).await;
        }

        Ok(reminders)
    }

    async fn get_due_reminders(&self, now: DateTime<Utc>) -> Result<Vec<Reminder>, Error> {
        let window_end = now + Duration::hours(24);

        sqlx::query_as::<_, Reminder>(&format!(
            r#"
            SELECT {REMINDER_COLUMNS}
            FROM reminders
            WHERE NOT is_completed AND reminder_date <= $1
            ORDER BY reminder_date ASC
            "#
        ))
        .bind(window_end)
        .fetch_all(&self.pool)
        .await
    }

    async fn complete_reminder(
        &self,
        reminder_id: Uuid,
        completed_at: DateTime<Utc>,
    ) -> Result<Reminder, Error> {
        let reminder = sqlx::query_as::<_, Reminder>(&format!(
            r#"
            UPDATE reminders
            SET is_completed = TRUE, completed_at = $2
            WHERE id = $1
            RETURNING {REMINDER_COLUMNS}
            "#
        ))
        .bind(reminder_id)
        .bind(completed_at)
        .fetch_one(&self.pool)
        .await?;

        if let Some(redis) = &self.redis_client {
            let _ = CacheHelper::invalidate_reminders(redis, reminder.prospect_id).await;
        }

        Ok(reminder)
    }

    async fn delete_reminder(&self, reminder_id: Uuid) -> Result<(), Error> {
        let prospect_id: Option<(Uuid,)> =
            sqlx::query_as("DELETE FROM reminders WHERE id = $1 RETURNING prospect_id")
                .bind(reminder_id)
                .fetch_optional(&self.pool)
                .await?;

        if let (Some(redis), Some((prospect_id,))) = (&self.redis_client, prospect_id) {
            let _ = CacheHelper::invalidate_reminders(redis, prospect_id).await;
        }

        Ok(())
    }
}
