use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    db::{
        candidatedb::CandidateExt, db::DBClient, joborderdb::JobOrderExt,
        placementdb::PlacementExt,
    },
    models::syncmodel::SyncTrackable,
    service::{
        ats_gateway::{AtsAck, AtsGateway},
        error::ServiceError,
    },
};

/// Tracks entity ids with an outstanding push so a double-click on a sync
/// button cannot dispatch the same entity twice concurrently.
#[derive(Debug, Default)]
pub struct InFlightGuard {
    ids: Mutex<HashSet<Uuid>>,
}

impl InFlightGuard {
    /// Returns false if a push for this id is already outstanding.
    pub fn begin(&self, id: Uuid) -> bool {
        self.ids.lock().unwrap().insert(id)
    }

    pub fn finish(&self, id: Uuid) {
        self.ids.lock().unwrap().remove(&id);
    }
}

/// Snapshot of one entity's push: action tag plus the full field set.
#[derive(Debug, Clone)]
pub struct SyncEnvelope {
    pub id: Uuid,
    pub action: &'static str,
    pub payload: serde_json::Value,
}

impl SyncEnvelope {
    pub fn from_entity<T: SyncTrackable>(entity: &T) -> SyncEnvelope {
        SyncEnvelope {
            id: entity.sync_id(),
            action: entity.sync_action(),
            payload: entity.sync_payload(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SyncAck {
    pub entity_id: Uuid,
    pub action: &'static str,
    pub external_id: Option<String>,
    pub synced_at: DateTime<Utc>,
}

/// Per-item outcome of a batch sync, in input order.
#[derive(Debug, Serialize)]
pub struct SyncItemResult {
    pub entity_id: Uuid,
    pub synced: bool,
    pub external_id: Option<String>,
    pub error: Option<String>,
}

impl SyncItemResult {
    fn success(entity_id: Uuid, external_id: Option<String>) -> Self {
        SyncItemResult {
            entity_id,
            synced: true,
            external_id,
            error: None,
        }
    }

    fn failure(entity_id: Uuid, error: String) -> Self {
        SyncItemResult {
            entity_id,
            synced: false,
            external_id: None,
            error: Some(error),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PendingOverview {
    pub candidates: usize,
    pub job_orders: usize,
    pub placements: usize,
}

/// Dispatch envelopes sequentially, one remote call at a time, in input
/// order. A failed item is recorded and does not abort the remaining items;
/// no item is pushed twice.
pub async fn dispatch_batch(
    gateway: &dyn AtsGateway,
    guard: &InFlightGuard,
    envelopes: &[SyncEnvelope],
) -> Vec<Result<AtsAck, ServiceError>> {
    let mut results = Vec::with_capacity(envelopes.len());

    for envelope in envelopes {
        if !guard.begin(envelope.id) {
            results.push(Err(ServiceError::SyncInFlight(envelope.id)));
            continue;
        }

        let outcome = gateway.push(envelope.action, envelope.payload.clone()).await;
        guard.finish(envelope.id);

        results.push(outcome.map_err(ServiceError::from));
    }

    results
}

pub struct SyncService {
    db_client: Arc<DBClient>,
    gateway: Arc<dyn AtsGateway>,
    in_flight: InFlightGuard,
}

impl SyncService {
    pub fn new(db_client: Arc<DBClient>, gateway: Arc<dyn AtsGateway>) -> Self {
        Self {
            db_client,
            gateway,
            in_flight: InFlightGuard::default(),
        }
    }

    async fn push_guarded(&self, envelope: &SyncEnvelope) -> Result<AtsAck, ServiceError> {
        if !self.in_flight.begin(envelope.id) {
            return Err(ServiceError::SyncInFlight(envelope.id));
        }

        let outcome = self
            .gateway
            .push(envelope.action, envelope.payload.clone())
            .await;
        self.in_flight.finish(envelope.id);

        Ok(outcome?)
    }

    pub async fn sync_candidate(&self, candidate_id: Uuid) -> Result<SyncAck, ServiceError> {
        let candidate = self
            .db_client
            .get_candidate(candidate_id)
            .await?
            .ok_or(ServiceError::CandidateNotFound(candidate_id))?;

        let envelope = SyncEnvelope::from_entity(&candidate);
        let ack = self.push_guarded(&envelope).await?;

        let synced_at = Utc::now();
        self.db_client
            .mark_candidate_synced(candidate_id, synced_at)
            .await?;

        tracing::info!("Synced candidate {} to ATS", candidate_id);
        Ok(SyncAck {
            entity_id: candidate_id,
            action: envelope.action,
            external_id: ack.external_id,
            synced_at,
        })
    }

    pub async fn sync_job_order(&self, job_order_id: Uuid) -> Result<SyncAck, ServiceError> {
        let job_order = self
            .db_client
            .get_job_order(job_order_id)
            .await?
            .ok_or(ServiceError::JobOrderNotFound(job_order_id))?;

        let envelope = SyncEnvelope::from_entity(&job_order);
        let ack = self.push_guarded(&envelope).await?;

        let synced_at = Utc::now();
        self.db_client
            .mark_job_order_synced(job_order_id, synced_at)
            .await?;

        tracing::info!("Synced job order {} to ATS", job_order_id);
        Ok(SyncAck {
            entity_id: job_order_id,
            action: envelope.action,
            external_id: ack.external_id,
            synced_at,
        })
    }

    pub async fn sync_placement(&self, placement_id: Uuid) -> Result<SyncAck, ServiceError> {
        let placement = self
            .db_client
            .get_placement(placement_id)
            .await?
            .ok_or(ServiceError::PlacementNotFound(placement_id))?;

        let envelope = SyncEnvelope::from_entity(&placement);
        let ack = self.push_guarded(&envelope).await?;

        let synced_at = Utc::now();
        self.db_client
            .mark_placement_synced(placement_id, synced_at)
            .await?;

        tracing::info!("Synced placement {} to ATS", placement_id);
        Ok(SyncAck {
            entity_id: placement_id,
            action: envelope.action,
            external_id: ack.external_id,
            synced_at,
        })
    }

    /// Bulk sync of candidates. With an explicit id list the items are
    /// dispatched in the given order; without one, every currently pending
    /// candidate is swept up. Each item's outcome is independent.
    pub async fn sync_candidates_batch(
        &self,
        ids: Option<Vec<Uuid>>,
    ) -> Result<Vec<SyncItemResult>, ServiceError> {
        let candidates = match ids {
            Some(ids) => {
                let mut selected = Vec::with_capacity(ids.len());
                for id in ids {
                    match self.db_client.get_candidate(id).await? {
                        Some(candidate) => selected.push(candidate),
                        None => {
                            return Err(ServiceError::CandidateNotFound(id));
                        }
                    }
                }
                selected
            }
            None => self.db_client.get_pending_candidates().await?,
        };

        let envelopes: Vec<SyncEnvelope> = candidates
            .iter()
            .map(SyncEnvelope::from_entity)
            .collect();
        let outcomes = dispatch_batch(self.gateway.as_ref(), &self.in_flight, &envelopes).await;

        let mut results = Vec::with_capacity(outcomes.len());
        for (envelope, outcome) in envelopes.iter().zip(outcomes) {
            match outcome {
                Ok(ack) => {
                    let synced_at = Utc::now();
                    match self
                        .db_client
                        .mark_candidate_synced(envelope.id, synced_at)
                        .await
                    {
                        Ok(_) => results.push(SyncItemResult::success(envelope.id, ack.external_id)),
                        Err(e) => results.push(SyncItemResult::failure(envelope.id, e.to_string())),
                    }
                }
                Err(e) => {
                    tracing::warn!("Candidate {} failed to sync: {}", envelope.id, e);
                    results.push(SyncItemResult::failure(envelope.id, e.to_string()));
                }
            }
        }

        Ok(results)
    }

    /// Bulk sync of job orders, same contract as candidates.
    pub async fn sync_job_orders_batch(
        &self,
        ids: Option<Vec<Uuid>>,
    ) -> Result<Vec<SyncItemResult>, ServiceError> {
        let job_orders = match ids {
            Some(ids) => {
                let mut selected = Vec::with_capacity(ids.len());
                for id in ids {
                    match self.db_client.get_job_order(id).await? {
                        Some(job_order) => selected.push(job_order),
                        None => {
                            return Err(ServiceError::JobOrderNotFound(id));
                        }
                    }
                }
                selected
            }
            None => self.db_client.get_pending_job_orders().await?,
        };

        let envelopes: Vec<SyncEnvelope> = job_orders
            .iter()
            .map(SyncEnvelope::from_entity)
            .collect();
        let outcomes = dispatch_batch(self.gateway.as_ref(), &self.in_flight, &envelopes).await;

        let mut results = Vec::with_capacity(outcomes.len());
        for (envelope, outcome) in envelopes.iter().zip(outcomes) {
            match outcome {
                Ok(ack) => {
                    let synced_at = Utc::now();
                    match self
                        .db_client
                        .mark_job_order_synced(envelope.id, synced_at)
                        .await
                    {
                        Ok(_) => results.push(SyncItemResult::success(envelope.id, ack.external_id)),
                        Err(e) => results.push(SyncItemResult::failure(envelope.id, e.to_string())),
                    }
                }
                Err(e) => {
                    tracing::warn!("Job order {} failed to sync: {}", envelope.id, e);
                    results.push(SyncItemResult::failure(envelope.id, e.to_string()));
                }
            }
        }

        Ok(results)
    }

    /// Counts of entities whose local state has not reached the ATS.
    pub async fn pending_overview(&self) -> Result<PendingOverview, ServiceError> {
        let candidates = self.db_client.get_pending_candidates().await?.len();
        let job_orders = self.db_client.get_pending_job_orders().await?.len();
        let placements = self.db_client.get_pending_placements().await?.len();

        Ok(PendingOverview {
            candidates,
            job_orders,
            placements,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::ats_gateway::AtsError;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex as StdMutex;

    /// Records every push and fails for ids listed in `fail_ids`.
    struct MockGateway {
        fail_ids: HashSet<Uuid>,
        calls: StdMutex<Vec<Uuid>>,
    }

    impl MockGateway {
        fn new(fail_ids: Vec<Uuid>) -> Self {
            Self {
                fail_ids: fail_ids.into_iter().collect(),
                calls: StdMutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl AtsGateway for MockGateway {
        async fn push(
            &self,
            _action: &str,
            data: serde_json::Value,
        ) -> Result<AtsAck, AtsError> {
            let id: Uuid = serde_json::from_value(data["id"].clone()).unwrap();
            self.calls.lock().unwrap().push(id);

            if self.fail_ids.contains(&id) {
                Err(AtsError::Rejected("validation failed".to_string()))
            } else {
                Ok(AtsAck {
                    external_id: Some(format!("ext-{}", id)),
                })
            }
        }
    }

    fn envelope(id: Uuid) -> SyncEnvelope {
        SyncEnvelope {
            id,
            action: "sync_candidate",
            payload: json!({ "id": id }),
        }
    }

    #[tokio::test]
    async fn test_batch_results_match_input_order() {
        let ids: Vec<Uuid> = (0..5).map(|_| Uuid::new_v4()).collect();
        let gateway = MockGateway::new(vec![]);
        let guard = InFlightGuard::default();
        let envelopes: Vec<SyncEnvelope> = ids.iter().map(|id| envelope(*id)).collect();

        let results = dispatch_batch(&gateway, &guard, &envelopes).await;

        assert_eq!(results.len(), ids.len());
        assert_eq!(*gateway.calls.lock().unwrap(), ids);
        for (id, result) in ids.iter().zip(&results) {
            let ack = result.as_ref().unwrap();
            assert_eq!(ack.external_id, Some(format!("ext-{}", id)));
        }
    }

    #[tokio::test]
    async fn test_one_failure_does_not_abort_the_rest() {
        let ids: Vec<Uuid> = (0..4).map(|_| Uuid::new_v4()).collect();
        let gateway = MockGateway::new(vec![ids[1]]);
        let guard = InFlightGuard::default();
        let envelopes: Vec<SyncEnvelope> = ids.iter().map(|id| envelope(*id)).collect();

        let results = dispatch_batch(&gateway, &guard, &envelopes).await;

        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert!(results[2].is_ok());
        assert!(results[3].is_ok());
        // every item was pushed exactly once, in order
        assert_eq!(*gateway.calls.lock().unwrap(), ids);
    }

    #[tokio::test]
    async fn test_in_flight_id_is_not_dispatched() {
        let id = Uuid::new_v4();
        let gateway = MockGateway::new(vec![]);
        let guard = InFlightGuard::default();
        assert!(guard.begin(id)); // simulate an outstanding push

        let results = dispatch_batch(&gateway, &guard, &[envelope(id)]).await;

        assert!(matches!(
            results[0],
            Err(ServiceError::SyncInFlight(blocked)) if blocked == id
        ));
        assert!(gateway.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_guard_releases_after_finish() {
        let guard = InFlightGuard::default();
        let id = Uuid::new_v4();

        assert!(guard.begin(id));
        assert!(!guard.begin(id));
        guard.finish(id);
        assert!(guard.begin(id));
    }

    #[test]
    fn test_envelope_carries_action_tag_and_payload() {
        use crate::models::candidatemodel::{Candidate, CandidateStatus};
        use chrono::Utc;

        let candidate = Candidate {
            id: Uuid::new_v4(),
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: None,
            linkedin_url: None,
            current_title: Some("Engineer".to_string()),
            current_company: None,
            location: None,
            salary_expectation: Some(150000),
            notes: None,
            status: CandidateStatus::Screening,
            last_synced_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let envelope = SyncEnvelope::from_entity(&candidate);

        assert_eq!(envelope.action, "sync_candidate");
        assert_eq!(envelope.id, candidate.id);
        assert_eq!(envelope.payload["email"], "ada@example.com");
        assert_eq!(envelope.payload["status"], "screening");
    }
}
