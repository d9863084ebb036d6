use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{
    candidatemodel::{Candidate, CandidateStatus},
    syncmodel::{SyncStatus, SyncTrackable},
};

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateCandidateDto {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    pub phone: Option<String>,

    #[validate(url(message = "Invalid LinkedIn URL"))]
    pub linkedin_url: Option<String>,

    pub current_title: Option<String>,
    pub current_company: Option<String>,
    pub location: Option<String>,

    #[validate(range(min = 0, message = "Salary expectation must be positive"))]
    pub salary_expectation: Option<i64>,

    #[validate(length(max = 5000, message = "Notes must not exceed 5000 characters"))]
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateCandidateDto {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    pub phone: Option<String>,

    #[validate(url(message = "Invalid LinkedIn URL"))]
    pub linkedin_url: Option<String>,

    pub current_title: Option<String>,
    pub current_company: Option<String>,
    pub location: Option<String>,

    #[validate(range(min = 0, message = "Salary expectation must be positive"))]
    pub salary_expectation: Option<i64>,

    #[validate(length(max = 5000, message = "Notes must not exceed 5000 characters"))]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateQueryDto {
    pub search: Option<String>,
    pub status: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct ChangeCandidateStatusDto {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct CandidateResponseDto {
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
    pub sync_status: SyncStatus,
    pub last_synced_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CandidateResponseDto {
    pub fn from_candidate(candidate: &Candidate) -> Self {
        Self {
            id: candidate.id,
            name: candidate.name.clone(),
            email: candidate.email.clone(),
            phone: candidate.phone.clone(),
            linkedin_url: candidate.linkedin_url.clone(),
            current_title: candidate.current_title.clone(),
            current_company: candidate.current_company.clone(),
            location: candidate.location.clone(),
            salary_expectation: candidate.salary_expectation,
            notes: candidate.notes.clone(),
            status: candidate.status,
            sync_status: candidate.sync_status(),
            last_synced_at: candidate.last_synced_at,
            created_at: candidate.created_at,
            updated_at: candidate.updated_at,
        }
    }
}
