use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct ImportProspectsDto {
    /// Raw pasted or uploaded company list, one record per line.
    #[validate(length(min = 1, message = "Import content must not be empty"))]
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct ImportSummaryDto {
    pub imported: usize,
    pub names: usize,
    pub domains: usize,
    pub linkedin_urls: usize,
}

#[derive(Debug, Deserialize)]
pub struct ProspectQueryDto {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}
