use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{
    placementmodel::Placement,
    syncmodel::{SyncStatus, SyncTrackable},
};

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreatePlacementDto {
    pub candidate_id: Uuid,
    pub job_order_id: Uuid,
    pub start_date: Option<NaiveDate>,

    #[validate(range(min = 0, message = "Salary must be positive"))]
    pub salary: Option<i64>,

    #[validate(range(min = 0.0, message = "Fee amount must be positive"))]
    pub fee_amount: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct PlacementQueryDto {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct PlacementResponseDto {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub job_order_id: Uuid,
    pub start_date: Option<NaiveDate>,
    pub salary: Option<i64>,
    pub fee_amount: Option<f64>,
    pub sync_status: SyncStatus,
    pub last_synced_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl PlacementResponseDto {
    pub fn from_placement(placement: &Placement) -> Self {
        Self {
            id: placement.id,
            candidate_id: placement.candidate_id,
            job_order_id: placement.job_order_id,
            start_date: placement.start_date,
            salary: placement.salary,
            fee_amount: placement.fee_amount,
            sync_status: placement.sync_status(),
            last_synced_at: placement.last_synced_at,
            created_at: placement.created_at,
        }
    }
}
