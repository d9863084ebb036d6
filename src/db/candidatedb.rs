use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Error;
use uuid::Uuid;

use super::cache::{CacheHelper, CANDIDATE_CACHE_TTL};
use super::db::DBClient;
use crate::models::candidatemodel::{Candidate, CandidateStatus};

const CANDIDATE_COLUMNS: &str = "id, name, email, phone, linkedin_url, current_title, \
     current_company, location, salary_expectation, notes, status, \
     last_synced_at, created_at, updated_at";

#[async_trait]
pub trait CandidateExt {
    async fn save_candidate(
        &self,
        name: String,
        email: String,
        phone: Option<String>,
        linkedin_url: Option<String>,
        current_title: Option<String>,
        current_company: Option<String>,
        location: Option<String>,
        salary_expectation: Option<i64>,
        notes: Option<String>,
    ) -> Result<Candidate, Error>;

    async fn get_candidate(&self, candidate_id: Uuid) -> Result<Option<Candidate>, Error>;

    async fn list_candidates(
        &self,
        search: Option<&str>,
        status: Option<CandidateStatus>,
        page: u32,
        limit: u32,
    ) -> Result<Vec<Candidate>, Error>;

    async fn count_candidates(
        &self,
        search: Option<&str>,
        status: Option<CandidateStatus>,
    ) -> Result<i64, Error>;

    async fn update_candidate(
        &self,
        candidate_id: Uuid,
        name: String,
        email: String,
        phone: Option<String>,
        linkedin_url: Option<String>,
        current_title: Option<String>,
        current_company: Option<String>,
        location: Option<String>,
        salary_expectation: Option<i64>,
        notes: Option<String>,
    ) -> Result<Candidate, Error>;

    async fn update_candidate_status(
        &self,
        candidate_id: Uuid,
        status: CandidateStatus,
    ) -> Result<Candidate, Error>;

    /// Record a successful push. Only `last_synced_at` moves; `updated_at`
    /// is left alone so the entity resolves as synced afterwards.
    async fn mark_candidate_synced(
        &self,
        candidate_id: Uuid,
        synced_at: DateTime<Utc>,
    ) -> Result<Candidate, Error>;

    async fn delete_candidate(&self, candidate_id: Uuid) -> Result<(), Error>;

    /// Candidates whose local state is ahead of (or has never reached) the
    /// external ATS.
    async fn get_pending_candidates(&self) -> Result<Vec<Candidate>, Error>;

    async fn create_submission(
        &self,
        candidate_id: Uuid,
        job_order_id: Uuid,
        submitted_by: Option<Uuid>,
    ) -> Result<(), Error>;

    async fn get_candidates_for_job_order(
        &self,
        job_order_id: Uuid,
    ) -> Result<Vec<Candidate>, Error>;
}

#[async_trait]
impl CandidateExt for DBClient {
    async fn save_candidate(
        &self,
        name: String,
        email: String,
        phone: Option<String>,
        linkedin_url: Option<String>,
        current_title: Option<String>,
        current_company: Option<String>,
        location: Option<String>,
        salary_expectation: Option<i64>,
        notes: Option<String>,
    ) -> Result<Candidate, Error> {
        let candidate = sqlx::query_as::<_, Candidate>(&format!(
            r#"
            INSERT INTO candidates
                (name, email, phone, linkedin_url, current_title, current_company,
                 location, salary_expectation, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {CANDIDATE_COLUMNS}
            "#
        ))
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(linkedin_url)
        .bind(current_title)
        .bind(current_company)
        .bind(location)
        .bind(salary_expectation)
        .bind(notes)
        .fetch_one(&self.pool)
        .await?;

        if let Some(redis) = &self.redis_client {
            let _ = CacheHelper::invalidate_candidates(redis).await;
        }

        Ok(candidate)
    }

    async fn get_candidate(&self, candidate_id: Uuid) -> Result<Option<Candidate>, Error> {
        sqlx::query_as::<_, Candidate>(&format!(
            "SELECT {CANDIDATE_COLUMNS} FROM candidates WHERE id = $1"
        ))
        .bind(candidate_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn list_candidates(
        &self,
        search: Option<&str>,
        status: Option<CandidateStatus>,
        page: u32,
        limit: u32,
    ) -> Result<Vec<Candidate>, Error> {
        let cache_key = format!(
            "candidates:{}:{}:{}:{}",
            search.unwrap_or(""),
            status.map(|s| s.to_str().to_string()).unwrap_or_default(),
            page,
            limit
        );

        if let Some(redis) = &self.redis_client {
            if let Ok(Some(cached)) = CacheHelper::get::<Vec<Candidate>>(redis, &cache_key).await {
                return Ok(cached);
            }
        }

        let offset = (page.saturating_sub(1) as i64) * limit as i64;
        let candidates = sqlx::query_as::<_, Candidate>(&format!(
            r#"
            SELECT {CANDIDATE_COLUMNS}
            FROM candidates
            WHERE ($1::text IS NULL
                   OR name ILIKE '%' || $1 || '%'
                   OR email ILIKE '%' || $1 || '%'
                   OR current_company ILIKE '%' || $1 || '%')
              AND ($2::candidate_status IS NULL OR status = $2)
            ORDER BY updated_at DESC
            LIMIT $3 OFFSET $4
            "#
        ))
        .bind(search)
        .bind(status)
        .bind(limit as i64)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        if let Some(redis) = &self.redis_client {
            let _ = CacheHelper::set(redis, &cache_key, &candidates, CANDIDATE_CACHE_TTL).await;
        }

        Ok(candidates)
    }

    async fn count_candidates(
        &self,
        search: Option<&str>,
        status: Option<CandidateStatus>,
    ) -> Result<i64, Error> {
        let count: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)
            FROM candidates
            WHERE ($1::text IS NULL
                   OR name ILIKE '%' || $1 || '%'
                   OR email ILIKE '%' || $1 || '%'
                   OR current_company ILIKE '%' || $1 || '%')
              AND ($2::candidate_status IS NULL OR status = $2)
            "#,
        )
        .bind(search)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    async fn update_candidate(
        &self,
        candidate_id: Uuid,
        name: String,
        email: String,
        phone: Option<String>,
        linkedin_url: Option<String>,
        current_title: Option<String>,
        current_company: Option<String>,
        location: Option<String>,
        salary_expectation: Option<i64>,
        notes: Option<String>,
    ) -> Result<Candidate, Error> {
        let candidate = sqlx::query_as::<_, Candidate>(&format!(
            r#"
            UPDATE candidates
            SET name = $2, email = $3, phone = $4, linkedin_url = $5,
                current_title = $6, current_company = $7, location = $8,
                salary_expectation = $9, notes = $10, updated_at = NOW()
            WHERE id = $1
            RETURNING {CANDIDATE_COLUMNS}
            "#
        ))
        .bind(candidate_id)
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(linkedin_url)
        .bind(current_title)
        .bind(current_company)
        .bind(location)
        .bind(salary_expectation)
        .bind(notes)
        .fetch_one(&self.pool)
        .await?;

        if let Some(redis) = &self.redis_client {
            let _ = CacheHelper::invalidate_candidates(redis).await;
        }

        Ok(candidate)
    }

    async fn update_candidate_status(
        &self,
        candidate_id: Uuid,
        status: CandidateStatus,
    ) -> Result<Candidate, Error> {
        let candidate = sqlx::query_as::<_, Candidate>(&format!(
            r#"
            UPDATE candidates
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {CANDIDATE_COLUMNS}
            "#
        ))
        .bind(candidate_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        if let Some(redis) = &self.redis_client {
            let _ = CacheHelper::invalidate_candidates(redis).await;
        }

        Ok(candidate)
    }

    async fn mark_candidate_synced(
        &self,
        candidate_id: Uuid,
        synced_at: DateTime<Utc>,
    ) -> Result<Candidate, Error> {
        let candidate = sqlx::query_as::<_, Candidate>(&format!(
            r#"
            UPDATE candidates
            SET last_synced_at = $2
            WHERE id = $1
            RETURNING {CANDIDATE_COLUMNS}
            "#
        ))
        .bind(candidate_id)
        .bind(synced_at)
        .fetch_one(&self.pool)
        .await?;

        if let Some(redis) = &self.redis_client {
            let _ = CacheHelper::invalidate_candidates(redis).await;
        }

        Ok(candidate)
    }

    async fn delete_candidate(&self, candidate_id: Uuid) -> Result<(), Error> {
        sqlx::query("DELETE FROM candidates WHERE id = $1")
            .bind(candidate_id)
            .execute(&self.pool)
            .await?;

        if let Some(redis) = &self.redis_client {
            let _ = CacheHelper::invalidate_candidates(redis).await;
        }

        Ok(())
    }

    async fn get_pending_candidates(&self) -> Result<Vec<Candidate>, Error> {
        sqlx::query_as::<_, Candidate>(&format!(
            r#"
            SELECT {CANDIDATE_COLUMNS}
            FROM candidates
            WHERE last_synced_at IS NULL OR updated_at > last_synced_at
            ORDER BY updated_at ASC
            "#
        ))
        .fetch_all(&self.pool)
        .await
    }

    async fn create_submission(
        &self,
        candidate_id: Uuid,
        job_order_id: Uuid,
        submitted_by: Option<Uuid>,
    ) -> Result<(), Error> {
        sqlx::query(
            r#"
            INSERT INTO submissions (candidate_id, job_order_id, submitted_by)
            VALUES ($1, $2, $3)
            ON CONFLICT (candidate_id, job_order_id) DO NOTHING
            "#,
        )
        .bind(candidate_id)
        .bind(job_order_id)
        .bind(submitted_by)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_candidates_for_job_order(
        &self,
        job_order_id: Uuid,
    ) -> Result<Vec<Candidate>, Error> {
        sqlx::query_as::<_, Candidate>(
            r#"
            SELECT c.id, c.name, c.email, c.phone, c.linkedin_url, c.current_title,
                   c.current_company, c.location, c.salary_expectation, c.notes,
                   c.status, c.last_synced_at, c.created_at, c.updated_at
            FROM candidates c
            JOIN submissions s ON s.candidate_id = c.id
            WHERE s.job_order_id = $1
            ORDER BY s.created_at DESC
            "#,
        )
        .bind(job_order_id)
        .fetch_all(&self.pool)
        .await
    }
}
