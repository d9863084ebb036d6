use axum::http::StatusCode;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    error::HttpError,
    models::candidatemodel::CandidateStatus,
    service::ats_gateway::AtsError,
};

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Candidate {0} not found")]
    CandidateNotFound(Uuid),

    #[error("Job order {0} not found")]
    JobOrderNotFound(Uuid),

    #[error("Placement {0} not found")]
    PlacementNotFound(Uuid),

    #[error("Prospect {0} not found")]
    ProspectNotFound(Uuid),

    #[error("Reminder {0} not found")]
    ReminderNotFound(Uuid),

    #[error("A sync for {0} is already in progress")]
    SyncInFlight(Uuid),

    #[error("Invalid status value: {0}")]
    InvalidStatusValue(String),

    #[error("Candidate cannot move from stage {0:?} to {1:?}")]
    InvalidStatusTransition(CandidateStatus, CandidateStatus),

    #[error("ATS error: {0}")]
    Ats(#[from] AtsError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<ServiceError> for HttpError {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::CandidateNotFound(_)
            | ServiceError::JobOrderNotFound(_)
            | ServiceError::PlacementNotFound(_)
            | ServiceError::ProspectNotFound(_)
            | ServiceError::ReminderNotFound(_) => HttpError::not_found(error.to_string()),

            ServiceError::InvalidStatusValue(_)
            | ServiceError::InvalidStatusTransition(_, _)
            | ServiceError::Validation(_) => HttpError::bad_request(error.to_string()),

            ServiceError::SyncInFlight(_) => HttpError::conflict(error.to_string()),

            ServiceError::Ats(_) => HttpError::new(error.to_string(), StatusCode::BAD_GATEWAY),

            ServiceError::Database(_) => HttpError::server_error(error.to_string()),
        }
    }
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::CandidateNotFound(_)
            | ServiceError::JobOrderNotFound(_)
            | ServiceError::PlacementNotFound(_)
            | ServiceError::ProspectNotFound(_)
            | ServiceError::ReminderNotFound(_) => StatusCode::NOT_FOUND,

            ServiceError::InvalidStatusValue(_)
            | ServiceError::InvalidStatusTransition(_, _)
            | ServiceError::Validation(_) => StatusCode::BAD_REQUEST,

            ServiceError::SyncInFlight(_) => StatusCode::CONFLICT,

            ServiceError::Ats(_) => StatusCode::BAD_GATEWAY,

            ServiceError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
