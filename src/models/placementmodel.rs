use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use super::syncmodel::SyncTrackable;

/// A finalized hire linking a candidate to a job order.
#[derive(Debug, Serialize, Deserialize, Clone, sqlx::FromRow)]
pub struct Placement {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub job_order_id: Uuid,
    pub start_date: Option<NaiveDate>,
    pub salary: Option<i64>,
    pub fee_amount: Option<f64>,
    pub last_synced_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SyncTrackable for Placement {
    fn sync_id(&self) -> Uuid {
        self.id
    }

    fn sync_action(&self) -> &'static str {
        "sync_placement"
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
            "candidate_id": self.candidate_id,
            "job_order_id": self.job_order_id,
            "start_date": self.start_date,
            "salary": self.salary,
            "fee_amount": self.fee_amount,
        })
    }
}
