use async_trait::async_trait;
use sqlx::Error;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::prospectmodel::Prospect;
use crate::utils::csv::CompanyIdentifier;

const PROSPECT_COLUMNS: &str = "id, company_name, domain, linkedin_url, created_by, created_at";

#[async_trait]
pub trait ProspectExt {
    /// Insert a prospect from a parsed import identifier. The identifier
    /// variant decides which lookup column the value lands in.
    async fn save_prospect(
        &self,
        identifier: CompanyIdentifier,
        created_by: Option<Uuid>,
    ) -> Result<Prospect, Error>;

    async fn get_prospect(&self, prospect_id: Uuid) -> Result<Option<Prospect>, Error>;

    async fn list_prospects(&self, page: u32, limit: u32) -> Result<Vec<Prospect>, Error>;

    async fn get_all_prospects(&self) -> Result<Vec<Prospect>, Error>;
}

#[async_trait]
impl ProspectExt for DBClient {
    async fn save_prospect(
        &self,
        identifier: CompanyIdentifier,
        created_by: Option<Uuid>,
    ) -> Result<Prospect, Error> {
        let (company_name, domain, linkedin_url) = match identifier {
            CompanyIdentifier::Name(name) => (Some(name), None, None),
            CompanyIdentifier::Domain(domain) => (None, Some(domain), None),
            CompanyIdentifier::LinkedinUrl(url) => (None, None, Some(url)),
        };

        sqlx::query_as::<_, Prospect>(&format!(
            r#"
            INSERT INTO prospects (company_name, domain, linkedin_url, created_by)
            VALUES ($1, $2, $3, $4)
            RETURNING {PROSPECT_COLUMNS}
            "#
        ))
        .bind(company_name)
        .bind(domain)
        .bind(linkedin_url)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_prospect(&self, prospect_id: Uuid) -> Result<Option<Prospect>, Error> {
        sqlx::query_as::<_, Prospect>(&format!(
            "SELECT {PROSPECT_COLUMNS} FROM prospects WHERE id = $1"
        ))
        .bind(prospect_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn list_prospects(&self, page: u32, limit: u32) -> Result<Vec<Prospect>, Error> {
        let offset = (page.saturating_sub(1) as i64) * limit as i64;
        sqlx::query_as::<_, Prospect>(&format!(
            r#"
            SELECT {PROSPECT_COLUMNS}
            FROM prospects
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#
        ))
        .bind(limit as i64)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_all_prospects(&self) -> Result<Vec<Prospect>, Error> {
        sqlx::query_as::<_, Prospect>(&format!(
            "SELECT {PROSPECT_COLUMNS} FROM prospects ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
    }
}
