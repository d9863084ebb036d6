use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use super::syncmodel::SyncTrackable;

/// Ordered hiring pipeline. `hired` is the success terminal state,
/// `rejected` is an absorbing terminal state reachable from any
/// non-terminal stage.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "candidate_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CandidateStatus {
    New,
    Screening,
    Interviewed,
    Offered,
    Hired,
    Rejected,
}

impl CandidateStatus {
    /// Pipeline column order for the Kanban board. `Rejected` sits last.
    pub const PIPELINE: [CandidateStatus; 6] = [
        CandidateStatus::New,
        CandidateStatus::Screening,
        CandidateStatus::Interviewed,
        CandidateStatus::Offered,
        CandidateStatus::Hired,
        CandidateStatus::Rejected,
    ];

    pub fn to_str(&self) -> &str {
        match self {
            CandidateStatus::New => "new",
            CandidateStatus::Screening => "screening",
            CandidateStatus::Interviewed => "interviewed",
            CandidateStatus::Offered => "offered",
            CandidateStatus::Hired => "hired",
            CandidateStatus::Rejected => "rejected",
        }
    }

    /// Parse boundary for user-supplied status values. Anything outside the
    /// six pipeline values is rejected.
    pub fn from_str(value: &str) -> Option<CandidateStatus> {
        match value {
            "new" => Some(CandidateStatus::New),
            "screening" => Some(CandidateStatus::Screening),
            "interviewed" => Some(CandidateStatus::Interviewed),
            "offered" => Some(CandidateStatus::Offered),
            "hired" => Some(CandidateStatus::Hired),
            "rejected" => Some(CandidateStatus::Rejected),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, CandidateStatus::Hired | CandidateStatus::Rejected)
    }

    /// Whether a manual or drag-drop move from `self` to `next` is allowed.
    /// Terminal states accept no further transition; non-terminal candidates
    /// may move to any stage, forward or backward, including rejection.
    pub fn can_transition_to(&self, next: CandidateStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        *self != next
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, sqlx::FromRow)]
pub struct Candidate {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub linkedin_url: Option<String>,
    pub current_title: Option<String>,
    pub current_company: Option<String>,
    pub location: Option<String>,
    pub salary_expectation: Option<i64>,
    pub notes: Option<String>,
    pub status: CandidateStatus,
    pub last_synced_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SyncTrackable for Candidate {
    fn sync_id(&self) -> Uuid {
        self.id
    }

    fn sync_action(&self) -> &'static str {
        "sync_candidate"
    }

    fn last_synced_at(&self) -> Option<DateTime<Utc>> {
        self.last_synced_at
    }

    fn last_modified_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn sync_payload(&self) -> serde_json::Value {
        json!({
            "id": self.id,
            "name": self.name,
            "email": self.email,
            "phone": self.phone,
            "linkedin_url": self.linkedin_url,
            "current_title": self.current_title,
            "current_company": self.current_company,
            "location": self.location,
            "salary_expectation": self.salary_expectation,
            "notes": self.notes,
            "status": self.status.to_str(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_accepts_all_six_values() {
        for status in CandidateStatus::PIPELINE {
            assert_eq!(CandidateStatus::from_str(status.to_str()), Some(status));
        }
    }

    #[test]
    fn test_from_str_rejects_unknown_values() {
        assert_eq!(CandidateStatus::from_str("archived"), None);
        assert_eq!(CandidateStatus::from_str("Hired"), None);
        assert_eq!(CandidateStatus::from_str(""), None);
    }

    #[test]
    fn test_terminal_states_accept_no_transition() {
        for next in CandidateStatus::PIPELINE {
            assert!(!CandidateStatus::Hired.can_transition_to(next));
            assert!(!CandidateStatus::Rejected.can_transition_to(next));
        }
    }

    #[test]
    fn test_rejected_reachable_from_any_non_terminal_stage() {
        for from in [
            CandidateStatus::New,
            CandidateStatus::Screening,
            CandidateStatus::Interviewed,
            CandidateStatus::Offered,
        ] {
            assert!(from.can_transition_to(CandidateStatus::Rejected));
        }
    }

    #[test]
    fn test_kanban_drag_can_move_backward() {
        assert!(CandidateStatus::Interviewed.can_transition_to(CandidateStatus::Screening));
        assert!(CandidateStatus::Offered.can_transition_to(CandidateStatus::New));
    }

    #[test]
    fn test_no_op_transition_is_rejected() {
        assert!(!CandidateStatus::Screening.can_transition_to(CandidateStatus::Screening));
    }
}
