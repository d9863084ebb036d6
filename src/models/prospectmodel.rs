use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A company record in the outbound-research workflow, distinct from a
/// candidate in the inbound pipeline.
#[derive(Debug, Serialize, Deserialize, Clone, sqlx::FromRow)]
pub struct Prospect {
    pub id: Uuid,
    pub company_name: Option<String>,
    pub domain: Option<String>,
    pub linkedin_url: Option<String>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}
