use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::service::sync_service::SyncItemResult;

#[derive(Debug, Serialize, Deserialize)]
pub struct BatchSyncDto {
    /// Explicit items to push, in order. Omitted means "everything that is
    /// currently pending".
    pub ids: Option<Vec<Uuid>>,
}

#[derive(Debug, Serialize)]
pub struct BatchSyncResponseDto {
    pub total: usize,
    pub synced: usize,
    pub failed: usize,
    pub results: Vec<SyncItemResult>,
}

impl BatchSyncResponseDto {
    pub fn from_results(results: Vec<SyncItemResult>) -> Self {
        let total = results.len();
        let synced = results.iter().filter(|r| r.synced).count();
        Self {
            total,
            synced,
            failed: total - synced,
            results,
        }
    }
}
