use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Derived synchronization state of an entity relative to the external ATS.
/// Never stored; always recomputed from the two timestamps so it cannot
/// drift from the data it describes.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    Synced,
    Pending,
    Never,
}

impl SyncStatus {
    /// Resolve the sync status from `last_synced_at` and the entity's last
    /// local modification. A timestamp tie counts as Synced so that
    /// clock-resolution ties do not produce a perpetual false-pending.
    pub fn resolve(
        last_synced_at: Option<DateTime<Utc>>,
        last_modified: DateTime<Utc>,
    ) -> SyncStatus {
        match last_synced_at {
            None => SyncStatus::Never,
            Some(synced_at) if synced_at >= last_modified => SyncStatus::Synced,
            Some(_) => SyncStatus::Pending,
        }
    }

    pub fn needs_push(&self) -> bool {
        !matches!(self, SyncStatus::Synced)
    }

    pub fn to_str(&self) -> &str {
        match self {
            SyncStatus::Synced => "synced",
            SyncStatus::Pending => "pending",
            SyncStatus::Never => "never",
        }
    }
}

/// Implemented by every entity that is mirrored into the external ATS.
pub trait SyncTrackable {
    fn sync_id(&self) -> Uuid;

    /// Action tag sent with the push request, e.g. "sync_candidate".
    fn sync_action(&self) -> &'static str;

    fn last_synced_at(&self) -> Option<DateTime<Utc>>;

    fn last_modified_at(&self) -> DateTime<Utc>;

    /// Full current field set pushed to the ATS.
    fn sync_payload(&self) -> serde_json::Value;

    fn sync_status(&self) -> SyncStatus {
        SyncStatus::resolve(self.last_synced_at(), self.last_modified_at())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_never_when_no_sync_timestamp() {
        assert_eq!(SyncStatus::resolve(None, ts(1_000)), SyncStatus::Never);
    }

    #[test]
    fn test_pending_when_modified_after_sync() {
        assert_eq!(
            SyncStatus::resolve(Some(ts(1_000)), ts(2_000)),
            SyncStatus::Pending
        );
    }

    #[test]
    fn test_synced_when_sync_is_newer() {
        assert_eq!(
            SyncStatus::resolve(Some(ts(2_000)), ts(1_000)),
            SyncStatus::Synced
        );
    }

    #[test]
    fn test_exact_tie_counts_as_synced() {
        assert_eq!(
            SyncStatus::resolve(Some(ts(1_000)), ts(1_000)),
            SyncStatus::Synced
        );
    }

    #[test]
    fn test_needs_push() {
        assert!(SyncStatus::Never.needs_push());
        assert!(SyncStatus::Pending.needs_push());
        assert!(!SyncStatus::Synced.needs_push());
    }
}
