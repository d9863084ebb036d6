use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::remindermodel::ReminderQuickPick;

/// Either an explicit `reminder_date` or a `quick_pick` shortcut must be
/// given, never both; the handler enforces that.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateReminderDto {
    pub reminder_date: Option<DateTime<Utc>>,

    pub quick_pick: Option<ReminderQuickPick>,

    #[validate(length(max = 1000, message = "Note must not exceed 1000 characters"))]
    pub note: Option<String>,
}
