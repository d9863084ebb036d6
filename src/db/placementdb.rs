use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::Error;
use uuid::Uuid;

use super::cache::{CacheHelper, PLACEMENT_CACHE_TTL};
use super::db::DBClient;
use crate::models::placementmodel::Placement;

const PLACEMENT_COLUMNS: &str = "id, candidate_id, job_order_id, start_date, salary, \
     fee_amount, last_synced_at, created_at, updated_at";

#[async_trait]
pub trait PlacementExt {
    async fn save_placement(
        &self,
        candidate_id: Uuid,
        job_order_id: Uuid,
        start_date: Option<NaiveDate>,
        salary: Option<i64>,
        fee_amount: Option<f64>,
    ) -> Result<Placement, Error>;

    async fn get_placement(&self, placement_id: Uuid) -> Result<Option<Placement>, Error>;

    async fn list_placements(&self, page: u32, limit: u32) -> Result<Vec<Placement>, Error>;

    async fn count_placements(&self) -> Result<i64, Error>;

    /// Record a successful push without touching `updated_at`.
    async fn mark_placement_synced(
        &self,
        placement_id: Uuid,
        synced_at: DateTime<Utc>,
    ) -> Result<Placement, Error>;

    async fn get_pending_placements(&self) -> Result<Vec<Placement>, Error>;
}

#[async_trait]
impl PlacementExt for DBClient {
    async fn save_placement(
        &self,
        candidate_id: Uuid,
        job_order_id: Uuid,
        start_date: Option<NaiveDate>,
        salary: Option<i64>,
        fee_amount: Option<f64>,
    ) -> Result<Placement, Error> {
        let placement = sqlx::query_as::<_, Placement>(&format!(
            r#"
            INSERT INTO placements (candidate_id, job_order_id, start_date, salary, fee_amount)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {PLACEMENT_COLUMNS}
            "#
        ))
        .bind(candidate_id)
        .bind(job_order_id)
        .bind(start_date)
        .bind(salary)
        .bind(fee_amount)
        .fetch_one(&self.pool)
        .await?;

        if let Some(redis) = &self.redis_client {
            let _ = CacheHelper::invalidate_placements(redis).await;
        }

        Ok(placement)
    }

    async fn get_placement(&self, placement_id: Uuid) -> Result<Option<Placement>, Error> {
        sqlx::query_as::<_, Placement>(&format!(
            "SELECT {PLACEMENT_COLUMNS} FROM placements WHERE id = $1"
        ))
        .bind(placement_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn list_placements(&self, page: u32, limit: u32) -> Result<Vec<Placement>, Error> {
        let cache_key = format!("placements:{}:{}", page, limit);

        if let Some(redis) = &self.redis_client {
            if let Ok(Some(cached)) = CacheHelper::get::<Vec<Placement>>(redis, &cache_key).await {
                return Ok(cached);
            }
        }

        let offset = (page.saturating_sub(1) as i64) * limit as i64;
        let placements = sqlx::query_as::<_, Placement>(&format!(
            r#"
            SELECT {PLACEMENT_COLUMNS}
            FROM placements
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#
        ))
        .bind(limit as i64)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        if let Some(redis) = &self.redis_client {
            let _ = CacheHelper::set(redis, &cache_key, &placements, PLACEMENT_CACHE_TTL).await;
        }

        Ok(placements)
    }

    async fn count_placements(&self) -> Result<i64, Error> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM placements")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    async fn mark_placement_synced(
        &self,
        placement_id: Uuid,
        synced_at: DateTime<Utc>,
    ) -> Result<Placement, Error> {
        let placement = sqlx::query_as::<_, Placement>(&format!(
            r#"
            UPDATE placements
            SET last_synced_at = $2
            WHERE id = $1
            RETURNING {PLACEMENT_COLUMNS}
            "#
        ))
        .bind(placement_id)
        .bind(synced_at)
        .fetch_one(&self.pool)
        .await?;

        if let Some(redis) = &self.redis_client {
            let _ = CacheHelper::invalidate_placements(redis).await;
        }

        Ok(placement)
    }

    async fn get_pending_placements(&self) -> Result<Vec<Placement>, Error> {
        sqlx::query_as::<_, Placement>(&format!(
            r#"
            SELECT {PLACEMENT_COLUMNS}
            FROM placements
            WHERE last_synced_at IS NULL OR updated_at > last_synced_at
            ORDER BY updated_at ASC
            "#
        ))
        .fetch_all(&self.pool)
        .await
    }
}
