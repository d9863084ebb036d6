use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{
    jobordermodel::{FeeType, JobOrder, JobOrderStatus, JobPriority},
    syncmodel::{SyncStatus, SyncTrackable},
};

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateJobOrderDto {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Client company must be between 1 and 100 characters"
    ))]
    pub client_company: String,

    pub contact_name: Option<String>,

    #[validate(email(message = "Invalid contact email address"))]
    pub contact_email: Option<String>,

    pub contact_phone: Option<String>,

    #[validate(length(
        min = 1,
        max = 100,
        message = "Job title must be between 1 and 100 characters"
    ))]
    pub job_title: String,

    pub department: Option<String>,
    pub location: Option<String>,
    pub employment_type: Option<String>,

    #[validate(range(min = 0, message = "Minimum salary must be positive"))]
    pub salary_min: Option<i64>,

    #[validate(range(min = 0, message = "Maximum salary must be positive"))]
    pub salary_max: Option<i64>,

    pub fee_type: FeeType,

    #[validate(range(min = 0.0, message = "Fee amount must be positive"))]
    pub fee_amount: f64,

    pub description: Option<String>,
    pub requirements: Option<String>,

    #[serde(default)]
    pub required_skills: Vec<String>,

    pub priority: Option<JobPriority>,
}

#[derive(Debug, Deserialize)]
pub struct JobOrderQueryDto {
    pub search: Option<String>,
    pub status: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct ChangeJobOrderStatusDto {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct JobOrderResponseDto {
    pub id: Uuid,
    pub client_company: String,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub job_title: String,
    pub department: Option<String>,
    pub location: Option<String>,
    pub employment_type: Option<String>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub salary_range: String,
    pub fee_type: FeeType,
    pub fee_amount: f64,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub required_skills: Vec<String>,
    pub status: JobOrderStatus,
    pub priority: JobPriority,
    pub sync_status: SyncStatus,
    pub last_synced_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JobOrderResponseDto {
    pub fn from_job_order(job_order: &JobOrder) -> Self {
        Self {
            id: job_order.id,
            client_company: job_order.client_company.clone(),
            contact_name: job_order.contact_name.clone(),
            contact_email: job_order.contact_email.clone(),
            contact_phone: job_order.contact_phone.clone(),
            job_title: job_order.job_title.clone(),
            department: job_order.department.clone(),
            location: job_order.location.clone(),
            employment_type: job_order.employment_type.clone(),
            salary_min: job_order.salary_min,
            salary_max: job_order.salary_max,
            salary_range: job_order.salary_range_label(),
            fee_type: job_order.fee_type,
            fee_amount: job_order.fee_amount,
            description: job_order.description.clone(),
            requirements: job_order.requirements.clone(),
            required_skills: job_order.required_skills.clone(),
            status: job_order.status,
            priority: job_order.priority,
            sync_status: job_order.sync_status(),
            last_synced_at: job_order.last_synced_at,
            created_at: job_order.created_at,
            updated_at: job_order.updated_at,
        }
    }
}
