use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Error;
use uuid::Uuid;

use super::cache::{CacheHelper, JOB_ORDER_CACHE_TTL};
use super::db::DBClient;
use crate::models::jobordermodel::{FeeType, JobOrder, JobOrderStatus, JobPriority};

const JOB_ORDER_COLUMNS: &str = "id, client_company, contact_name, contact_email, contact_phone, \
     job_title, department, location, employment_type, salary_min, salary_max, \
     fee_type, fee_amount, description, requirements, required_skills, \
     status, priority, last_synced_at, created_at, updated_at";

#[allow(clippy::too_many_arguments)]
#[async_trait]
pub trait JobOrderExt {
    async fn save_job_order(
        &self,
        client_company: String,
        contact_name: Option<String>,
        contact_email: Option<String>,
        contact_phone: Option<String>,
        job_title: String,
        department: Option<String>,
        location: Option<String>,
        employment_type: Option<String>,
        salary_min: Option<i64>,
        salary_max: Option<i64>,
        fee_type: FeeType,
        fee_amount: f64,
        description: Option<String>,
        requirements: Option<String>,
        required_skills: Vec<String>,
        priority: JobPriority,
    ) -> Result<JobOrder, Error>;

    async fn get_job_order(&self, job_order_id: Uuid) -> Result<Option<JobOrder>, Error>;

    async fn list_job_orders(
        &self,
        search: Option<&str>,
        status: Option<JobOrderStatus>,
        page: u32,
        limit: u32,
    ) -> Result<Vec<JobOrder>, Error>;

    async fn count_job_orders(
        &self,
        search: Option<&str>,
        status: Option<JobOrderStatus>,
    ) -> Result<i64, Error>;

    async fn update_job_order(
        &self,
        job_order_id: Uuid,
        client_company: String,
        contact_name: Option<String>,
        contact_email: Option<String>,
        contact_phone: Option<String>,
        job_title: String,
        department: Option<String>,
        location: Option<String>,
        employment_type: Option<String>,
        salary_min: Option<i64>,
        salary_max: Option<i64>,
        fee_type: FeeType,
        fee_amount: f64,
        description: Option<String>,
        requirements: Option<String>,
        required_skills: Vec<String>,
        priority: JobPriority,
    ) -> Result<JobOrder, Error>;

    async fn update_job_order_status(
        &self,
        job_order_id: Uuid,
        status: JobOrderStatus,
    ) -> Result<JobOrder, Error>;

    /// Record a successful push without touching `updated_at`.
    async fn mark_job_order_synced(
        &self,
        job_order_id: Uuid,
        synced_at: DateTime<Utc>,
    ) -> Result<JobOrder, Error>;

    async fn delete_job_order(&self, job_order_id: Uuid) -> Result<(), Error>;

    async fn get_pending_job_orders(&self) -> Result<Vec<JobOrder>, Error>;
}

#[async_trait]
impl JobOrderExt for DBClient {
    async fn save_job_order(
        &self,
        client_company: String,
        contact_name: Option<String>,
        contact_email: Option<String>,
        contact_phone: Option<String>,
        job_title: String,
        department: Option<String>,
        location: Option<String>,
        employment_type: Option<String>,
        salary_min: Option<i64>,
        salary_max: Option<i64>,
        fee_type: FeeType,
        fee_amount: f64,
        description: Option<String>,
        requirements: Option<String>,
        required_skills: Vec<String>,
        priority: JobPriority,
    ) -> Result<JobOrder, Error> {
        let job_order = sqlx::query_as::<_, JobOrder>(&format!(
            r#"
            INSERT INTO job_orders
                (client_company, contact_name, contact_email, contact_phone,
                 job_title, department, location, employment_type,
                 salary_min, salary_max, fee_type, fee_amount,
                 description, requirements, required_skills, priority)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING {JOB_ORDER_COLUMNS}
            "#
        ))
        .bind(client_company)
        .bind(contact_name)
        .bind(contact_email)
        .bind(contact_phone)
        .bind(job_title)
        .bind(department)
        .bind(location)
        .bind(employment_type)
        .bind(salary_min)
        .bind(salary_max)
        .bind(fee_type)
        .bind(fee_amount)
        .bind(description)
        .bind(requirements)
        .bind(required_skills)
        .bind(priority)
        .fetch_one(&self.pool)
        .await?;

        if let Some(redis) = &self.redis_client {
            let _ = CacheHelper::invalidate_job_orders(redis).await;
        }

        Ok(job_order)
    }

    async fn get_job_order(&self, job_order_id: Uuid) -> Result<Option<JobOrder>, Error> {
        sqlx::query_as::<_, JobOrder>(&format!(
            "SELECT {JOB_ORDER_COLUMNS} FROM job_orders WHERE id = $1"
        ))
        .bind(job_order_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn list_job_orders(
        &self,
        search: Option<&str>,
        status: Option<JobOrderStatus>,
        page: u32,
        limit: u32,
    ) -> Result<Vec<JobOrder>, Error> {
        let cache_key = format!(
            "job_orders:{}:{}:{}:{}",
            search.unwrap_or(""),
            status.map(|s| s.to_str().to_string()).unwrap_or_default(),
            page,
            limit
        );

        if let Some(redis) = &self.redis_client {
            if let Ok(Some(cached)) = CacheHelper::get::<Vec<JobOrder>>(redis, &cache_key).await {
                return Ok(cached);
            }
        }

        let offset = (page.saturating_sub(1) as i64) * limit as i64;
        let job_orders = sqlx::query_as::<_, JobOrder>(&format!(
            r#"
            SELECT {JOB_ORDER_COLUMNS}
            FROM job_orders
            WHERE ($1::text IS NULL
                   OR client_company ILIKE '%' || $1 || '%'
                   OR job_title ILIKE '%' || $1 || '%')
              AND ($2::job_order_status IS NULL OR status = $2)
            ORDER BY priority DESC, updated_at DESC
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
            let _ = CacheHelper::set(redis, &cache_key, &job_orders, JOB_ORDER_CACHE_TTL).await;
        }

        Ok(job_orders)
    }

    async fn count_job_orders(
        &self,
        search: Option<&str>,
        status: Option<JobOrderStatus>,
    ) -> Result<i64, Error> {
        let count: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)
            FROM job_orders
            WHERE ($1::text IS NULL
                   OR client_company ILIKE '%' || $1 || '%'
                   OR job_title ILIKE '%' || $1 || '%')
              AND ($2::job_order_status IS NULL OR status = $2)
            "#,
        )
        .bind(search)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    async fn update_job_order(
        &self,
        job_order_id: Uuid,
        client_company: String,
        contact_name: Option<String>,
        contact_email: Option<String>,
        contact_phone: Option<String>,
        job_title: String,
        department: Option<String>,
        location: Option<String>,
        employment_type: Option<String>,
        salary_min: Option<i64>,
        salary_max: Option<i64>,
        fee_type: FeeType,
        fee_amount: f64,
        description: Option<String>,
        requirements: Option<String>,
        required_skills: Vec<String>,
        priority: JobPriority,
    ) -> Result<JobOrder, Error> {
        let job_order = sqlx::query_as::<_, JobOrder>(&format!(
            r#"
            UPDATE job_orders
            SET client_company = $2, contact_name = $3, contact_email = $4,
                contact_phone = $5, job_title = $6, department = $7,
                location = $8, employment_type = $9, salary_min = $10,
                salary_max = $11, fee_type = $12, fee_amount = $13,
                description = $14, requirements = $15, required_skills = $16,
                priority = $17, updated_at = NOW()
            WHERE id = $1
            RETURNING {JOB_ORDER_COLUMNS}
            "#
        ))
        .bind(job_order_id)
        .bind(client_company)
        .bind(contact_name)
        .bind(contact_email)
        .bind(contact_phone)
        .bind(job_title)
        .bind(department)
        .bind(location)
        .bind(employment_type)
        .bind(salary_min)
        .bind(salary_max)
        .bind(fee_type)
        .bind(fee_amount)
        .bind(description)
        .bind(requirements)
        .bind(required_skills)
        .bind(priority)
        .fetch_one(&self.pool)
        .await?;

        if let Some(redis) = &self.redis_client {
            let _ = CacheHelper::invalidate_job_orders(redis).await;
        }

        Ok(job_order)
    }

    async fn update_job_order_status(
        &self,
        job_order_id: Uuid,
        status: JobOrderStatus,
    ) -> Result<JobOrder, Error> {
        let job_order = sqlx::query_as::<_, JobOrder>(&format!(
            r#"
            UPDATE job_orders
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {JOB_ORDER_COLUMNS}
            "#
        ))
        .bind(job_order_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        if let Some(redis) = &self.redis_client {
            let _ = CacheHelper::invalidate_job_orders(redis).await;
        }

        Ok(job_order)
    }

    async fn mark_job_order_synced(
        &self,
        job_order_id: Uuid,
        synced_at: DateTime<Utc>,
    ) -> Result<JobOrder, Error> {
        let job_order = sqlx::query_as::<_, JobOrder>(&format!(
            r#"
            UPDATE job_orders
            SET last_synced_at = $2
            WHERE id = $1
            RETURNING {JOB_ORDER_COLUMNS}
            "#
        ))
        .bind(job_order_id)
        .bind(synced_at)
        .fetch_one(&self.pool)
        .await?;

        if let Some(redis) = &self.redis_client {
            let _ = CacheHelper::invalidate_job_orders(redis).await;
        }

        Ok(job_order)
    }

    async fn delete_job_order(&self, job_order_id: Uuid) -> Result<(), Error> {
        sqlx::query("DELETE FROM job_orders WHERE id = $1")
            .bind(job_order_id)
            .execute(&self.pool)
            .await?;

        if let Some(redis) = &self.redis_client {
            let _ = CacheHelper::invalidate_job_orders(redis).await;
        }

        Ok(())
    }

    async fn get_pending_job_orders(&self) -> Result<Vec<JobOrder>, Error> {
        sqlx::query_as::<_, JobOrder>(&format!(
            r#"
            SELECT {JOB_ORDER_COLUMNS}
            FROM job_orders
            WHERE last_synced_at IS NULL OR updated_at > last_synced_at
            ORDER BY updated_at ASC
            "#
        ))
        .fetch_all(&self.pool)
        .await
    }
}
