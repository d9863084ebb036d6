use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::{
    db::{candidatedb::CandidateExt, db::DBClient},
    models::candidatemodel::{Candidate, CandidateStatus},
    service::error::ServiceError,
};

/// One Kanban column: a pipeline stage and the candidates currently in it.
#[derive(Debug, Serialize)]
pub struct PipelineColumn {
    pub status: CandidateStatus,
    pub candidates: Vec<Candidate>,
}

pub struct PipelineService {
    db_client: Arc<DBClient>,
}

impl PipelineService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    /// Move a candidate to a new pipeline stage. The raw value is validated
    /// against the six-stage set before anything touches the store, and
    /// terminal-state candidates are refused. The update bumps `updated_at`,
    /// which flips the candidate's sync status to pending.
    pub async fn change_status(
        &self,
        candidate_id: Uuid,
        new_status: &str,
    ) -> Result<Candidate, ServiceError> {
        let next = CandidateStatus::from_str(new_status)
            .ok_or_else(|| ServiceError::InvalidStatusValue(new_status.to_string()))?;

        let candidate = self
            .db_client
            .get_candidate(candidate_id)
            .await?
            .ok_or(ServiceError::CandidateNotFound(candidate_id))?;

        if !candidate.status.can_transition_to(next) {
            return Err(ServiceError::InvalidStatusTransition(candidate.status, next));
        }

        let updated = self
            .db_client
            .update_candidate_status(candidate_id, next)
            .await?;

        tracing::info!(
            "Candidate {} moved from {} to {}",
            candidate_id,
            candidate.status.to_str(),
            next.to_str()
        );

        Ok(updated)
    }

    /// Kanban board view: every stage in pipeline order with its candidates.
    pub async fn board(&self) -> Result<Vec<PipelineColumn>, ServiceError> {
        let mut columns = Vec::with_capacity(CandidateStatus::PIPELINE.len());

        for status in CandidateStatus::PIPELINE {
            let candidates = self
                .db_client
                .list_candidates(None, Some(status), 1, 200)
                .await?;
            columns.push(PipelineColumn { status, candidates });
        }

        Ok(columns)
    }
}
