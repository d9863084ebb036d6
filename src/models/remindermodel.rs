use chrono::{DateTime, Duration, Timelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, sqlx::FromRow)]
pub struct Reminder {
    pub id: Uuid,
    pub prospect_id: Uuid,
    pub created_by: Uuid,
    pub reminder_date: DateTime<Utc>,
    pub note: Option<String>,
    pub is_completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Reminder {
    pub fn status_at(&self, now: DateTime<Utc>) -> ReminderStatus {
        classify(self.is_completed, self.reminder_date, now)
    }

    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.is_completed && self.reminder_date < now
    }
}

/// Derived reminder state. Completion wins over every date-based check.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReminderStatus {
    Completed,
    Overdue,
    Today,
    Tomorrow,
    Upcoming,
}

impl ReminderStatus {
    pub fn to_str(&self) -> &str {
        match self {
            ReminderStatus::Completed => "completed",
            ReminderStatus::Overdue => "overdue",
            ReminderStatus::Today => "today",
            ReminderStatus::Tomorrow => "tomorrow",
            ReminderStatus::Upcoming => "upcoming",
        }
    }
}

pub fn classify(
    is_completed: bool,
    reminder_date: DateTime<Utc>,
    now: DateTime<Utc>,
) -> ReminderStatus {
    if is_completed {
        return ReminderStatus::Completed;
    }
    if reminder_date < now {
        return ReminderStatus::Overdue;
    }

    let due_day = reminder_date.date_naive();
    let today = now.date_naive();
    if due_day == today {
        ReminderStatus::Today
    } else if due_day == today + Duration::days(1) {
        ReminderStatus::Tomorrow
    } else {
        ReminderStatus::Upcoming
    }
}

/// Quick-pick shortcuts offered next to the explicit date picker.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReminderQuickPick {
    Today,
    Tomorrow,
    NextWeek,
}

impl ReminderQuickPick {
    /// Resolve the shortcut to a concrete reminder date. `today` lands two
    /// hours out, rounded down to the top of the hour; `tomorrow` and
    /// `next_week` keep the current wall-clock time.
    pub fn resolve(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            ReminderQuickPick::Today => {
                let t = now + Duration::hours(2);
                t.with_minute(0)
                    .and_then(|t| t.with_second(0))
                    .and_then(|t| t.with_nanosecond(0))
                    .unwrap_or(t)
            }
            ReminderQuickPick::Tomorrow => now + Duration::days(1),
            ReminderQuickPick::NextWeek => now + Duration::days(7),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn test_past_reminder_is_overdue() {
        let now = at(2024, 6, 10, 9, 0);
        assert_eq!(
            classify(false, at(2024, 6, 9, 17, 0), now),
            ReminderStatus::Overdue
        );
    }

    #[test]
    fn test_completed_wins_over_overdue() {
        let now = at(2024, 6, 10, 9, 0);
        assert_eq!(
            classify(true, at(2024, 6, 9, 17, 0), now),
            ReminderStatus::Completed
        );
    }

    #[test]
    fn test_later_same_day_is_today() {
        let now = at(2024, 6, 10, 9, 0);
        assert_eq!(
            classify(false, at(2024, 6, 10, 23, 0), now),
            ReminderStatus::Today
        );
    }

    #[test]
    fn test_next_calendar_day_is_tomorrow() {
        let now = at(2024, 6, 10, 9, 0);
        assert_eq!(
            classify(false, at(2024, 6, 11, 8, 0), now),
            ReminderStatus::Tomorrow
        );
    }

    #[test]
    fn test_further_out_is_upcoming() {
        let now = at(2024, 6, 10, 9, 0);
        assert_eq!(
            classify(false, at(2024, 6, 14, 9, 0), now),
            ReminderStatus::Upcoming
        );
    }

    #[test]
    fn test_quick_pick_today_rounds_to_the_hour() {
        let now = at(2024, 6, 10, 9, 0).with_minute(42).unwrap();
        assert_eq!(
            ReminderQuickPick::Today.resolve(now),
            at(2024, 6, 10, 11, 0)
        );
    }

    #[test]
    fn test_quick_pick_tomorrow_keeps_wall_clock_time() {
        let now = at(2024, 6, 10, 9, 30);
        assert_eq!(
            ReminderQuickPick::Tomorrow.resolve(now),
            at(2024, 6, 11, 9, 30)
        );
    }

    #[test]
    fn test_quick_pick_next_week_keeps_wall_clock_time() {
        let now = at(2024, 6, 10, 9, 30);
        assert_eq!(
            ReminderQuickPick::NextWeek.resolve(now),
            at(2024, 6, 17, 9, 30)
        );
    }
}
