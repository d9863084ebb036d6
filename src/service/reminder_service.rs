use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    db::{db::DBClient, prospectdb::ProspectExt, reminderdb::ReminderExt},
    models::remindermodel::{Reminder, ReminderQuickPick, ReminderStatus},
    service::error::ServiceError,
};

/// When a new reminder should fire: an explicit date+time, or one of the
/// quick-pick shortcuts.
#[derive(Debug, Clone, Copy)]
pub enum ReminderWhen {
    At(DateTime<Utc>),
    QuickPick(ReminderQuickPick),
}

#[derive(Debug, Serialize)]
pub struct ReminderWithStatus {
    #[serde(flatten)]
    pub reminder: Reminder,
    pub status: ReminderStatus,
}

/// Dashboard widget payload: everything due within the next 24 hours, with
/// the strictly overdue subset counted separately for the banner state.
#[derive(Debug, Serialize)]
pub struct DueSoonSummary {
    pub reminders: Vec<ReminderWithStatus>,
    pub overdue_count: usize,
    pub due_count: usize,
}

pub fn summarize_due(reminders: Vec<Reminder>, now: DateTime<Utc>) -> DueSoonSummary {
    let overdue_count = reminders.iter().filter(|r| r.is_overdue(now)).count();
    let due_count = reminders.len() - overdue_count;

    let reminders = reminders
        .into_iter()
        .map(|reminder| {
            let status = reminder.status_at(now);
            ReminderWithStatus { reminder, status }
        })
        .collect();

    DueSoonSummary {
        reminders,
        overdue_count,
        due_count,
    }
}

pub struct ReminderService {
    db_client: Arc<DBClient>,
}

impl ReminderService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    pub async fn create(
        &self,
        prospect_id: Uuid,
        created_by: Uuid,
        when: ReminderWhen,
        note: Option<String>,
    ) -> Result<Reminder, ServiceError> {
        self.db_client
            .get_prospect(prospect_id)
            .await?
            .ok_or(ServiceError::ProspectNotFound(prospect_id))?;

        let reminder_date = match when {
            ReminderWhen::At(date) => date,
            ReminderWhen::QuickPick(pick) => pick.resolve(Utc::now()),
        };

        let reminder = self
            .db_client
            .save_reminder(prospect_id, created_by, reminder_date, note)
            .await?;

        Ok(reminder)
    }

    pub async fn for_prospect(
        &self,
        prospect_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<ReminderWithStatus>, ServiceError> {
        let reminders = self
            .db_client
            .get_reminders_for_prospect(prospect_id)
            .await?;

        Ok(reminders
            .into_iter()
            .map(|reminder| {
                let status = reminder.status_at(now);
                ReminderWithStatus { reminder, status }
            })
            .collect())
    }

    pub async fn due_soon(&self, now: DateTime<Utc>) -> Result<DueSoonSummary, ServiceError> {
        let due = self.db_client.get_due_reminders(now).await?;
        Ok(summarize_due(due, now))
    }

    pub async fn complete(&self, reminder_id: Uuid) -> Result<Reminder, ServiceError> {
        self.db_client
            .get_reminder(reminder_id)
            .await?
            .ok_or(ServiceError::ReminderNotFound(reminder_id))?;

        let reminder = self
            .db_client
            .complete_reminder(reminder_id, Utc::now())
            .await?;

        Ok(reminder)
    }

    /// Reminder dates are never edited in place; the correction path is
    /// delete and recreate.
    pub async fn delete(&self, reminder_id: Uuid) -> Result<(), ServiceError> {
        self.db_client
            .get_reminder(reminder_id)
            .await?
            .ok_or(ServiceError::ReminderNotFound(reminder_id))?;

        self.db_client.delete_reminder(reminder_id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn reminder_at(date: DateTime<Utc>, completed: bool) -> Reminder {
        Reminder {
            id: Uuid::new_v4(),
            prospect_id: Uuid::new_v4(),
            created_by: Uuid::new_v4(),
            reminder_date: date,
            note: None,
            is_completed: completed,
            completed_at: completed.then(|| date),
            created_at: date - Duration::days(1),
        }
    }

    #[test]
    fn test_due_soon_splits_overdue_from_due_within_window() {
        let now = Utc.with_ymd_and_hms(2024, 6, 10, 9, 0, 0).unwrap();
        let reminders = vec![
            reminder_at(now - Duration::hours(16), false), // overdue
            reminder_at(now + Duration::hours(3), false),  // due today
            reminder_at(now + Duration::hours(23), false), // due tomorrow morning
        ];

        let summary = summarize_due(reminders, now);

        assert_eq!(summary.overdue_count, 1);
        assert_eq!(summary.due_count, 2);
        assert_eq!(summary.reminders.len(), 3);
        assert_eq!(summary.reminders[0].status, ReminderStatus::Overdue);
        assert_eq!(summary.reminders[1].status, ReminderStatus::Today);
        assert_eq!(summary.reminders[2].status, ReminderStatus::Tomorrow);
    }

    #[test]
    fn test_due_soon_empty() {
        let now = Utc.with_ymd_and_hms(2024, 6, 10, 9, 0, 0).unwrap();
        let summary = summarize_due(vec![], now);

        assert_eq!(summary.overdue_count, 0);
        assert_eq!(summary.due_count, 0);
        assert!(summary.reminders.is_empty());
    }
}
