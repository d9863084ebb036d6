use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use super::syncmodel::SyncTrackable;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "job_order_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum JobOrderStatus {
    Open,
    OnHold,
    Filled,
    Cancelled,
}

impl JobOrderStatus {
    pub fn to_str(&self) -> &str {
        match self {
            JobOrderStatus::Open => "open",
            JobOrderStatus::OnHold => "on_hold",
            JobOrderStatus::Filled => "filled",
            JobOrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_str(value: &str) -> Option<JobOrderStatus> {
        match value {
            "open" => Some(JobOrderStatus::Open),
            "on_hold" => Some(JobOrderStatus::OnHold),
            "filled" => Some(JobOrderStatus::Filled),
            "cancelled" => Some(JobOrderStatus::Cancelled),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "job_priority", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum JobPriority {
    Low,
    Normal,
    High,
    Urgent,
}

impl JobPriority {
    pub fn to_str(&self) -> &str {
        match self {
            JobPriority::Low => "low",
            JobPriority::Normal => "normal",
            JobPriority::High => "high",
            JobPriority::Urgent => "urgent",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "fee_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FeeType {
    Percentage,
    Flat,
}

impl FeeType {
    pub fn to_str(&self) -> &str {
        match self {
            FeeType::Percentage => "percentage",
            FeeType::Flat => "flat",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, sqlx::FromRow)]
pub struct JobOrder {
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
    pub fee_type: FeeType,
    pub fee_amount: f64,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub required_skills: Vec<String>,
    pub status: JobOrderStatus,
    pub priority: JobPriority,
    pub last_synced_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JobOrder {
    /// Human-readable salary range. The four min/max combinations are
    /// distinct display cases.
    pub fn salary_range_label(&self) -> String {
        format_salary_range(self.salary_min, self.salary_max)
    }
}

pub fn format_salary_range(salary_min: Option<i64>, salary_max: Option<i64>) -> String {
    match (salary_min, salary_max) {
        (Some(min), Some(max)) => format!("{} - {}", format_salary(min), format_salary(max)),
        (Some(min), None) => format!("From {}", format_salary(min)),
        (None, Some(max)) => format!("Up to {}", format_salary(max)),
        (None, None) => "Not specified".to_string(),
    }
}

/// Format a whole-dollar amount with thousands separators.
pub fn format_salary(amount: i64) -> String {
    let digits = amount.abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if amount < 0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

impl SyncTrackable for JobOrder {
    fn sync_id(&self) -> Uuid {
        self.id
    }

    fn sync_action(&self) -> &'static str {
        "sync_job"
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
            "client_company": self.client_company,
            "contact_name": self.contact_name,
            "contact_email": self.contact_email,
            "contact_phone": self.contact_phone,
            "job_title": self.job_title,
            "department": self.department,
            "location": self.location,
            "employment_type": self.employment_type,
            "salary_min": self.salary_min,
            "salary_max": self.salary_max,
            "fee_type": self.fee_type.to_str(),
            "fee_amount": self.fee_amount,
            "description": self.description,
            "requirements": self.requirements,
            "required_skills": self.required_skills,
            "status": self.status.to_str(),
            "priority": self.priority.to_str(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_salary() {
        assert_eq!(format_salary(500), "$500");
        assert_eq!(format_salary(90000), "$90,000");
        assert_eq!(format_salary(1250000), "$1,250,000");
    }

    #[test]
    fn test_salary_range_both_bounds() {
        assert_eq!(
            format_salary_range(Some(90000), Some(120000)),
            "$90,000 - $120,000"
        );
    }

    #[test]
    fn test_salary_range_min_only() {
        assert_eq!(format_salary_range(Some(90000), None), "From $90,000");
    }

    #[test]
    fn test_salary_range_max_only() {
        assert_eq!(format_salary_range(None, Some(120000)), "Up to $120,000");
    }

    #[test]
    fn test_salary_range_neither_bound() {
        assert_eq!(format_salary_range(None, None), "Not specified");
    }

    #[test]
    fn test_status_from_str_rejects_unknown() {
        assert_eq!(JobOrderStatus::from_str("open"), Some(JobOrderStatus::Open));
        assert_eq!(JobOrderStatus::from_str("paused"), None);
    }
}
