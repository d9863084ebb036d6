use redis::{aio::ConnectionManager, AsyncCommands};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Cache TTL constants (in seconds)
pub const CANDIDATE_CACHE_TTL: usize = 300; // 5 minutes
pub const JOB_ORDER_CACHE_TTL: usize = 300; // 5 minutes
pub const PLACEMENT_CACHE_TTL: usize = 600; // 10 minutes
pub const REMINDER_CACHE_TTL: usize = 120; // 2 minutes

pub struct CacheHelper;

impl CacheHelper {
    /// Generic get from cache
    pub async fn get<T: DeserializeOwned>(
        redis: &Arc<ConnectionManager>,
        key: &str,
    ) -> Result<Option<T>, redis::RedisError> {
        let mut redis = ConnectionManager::clone(redis);
        let cached: Result<String, redis::RedisError> = redis.get(key).await;

        match cached {
            Ok(data) => {
                if let Ok(value) = serde_json::from_str::<T>(&data) {
                    tracing::debug!("Cache HIT: {}", key);
                    Ok(Some(value))
                } else {
                    tracing::warn!("Cache deserialization failed for: {}", key);
                    Ok(None)
                }
            }
            Err(_) => {
                tracing::debug!("Cache MISS: {}", key);
                Ok(None)
            }
        }
    }

    /// Generic set to cache with TTL
    pub async fn set<T: Serialize>(
        redis: &Arc<ConnectionManager>,
        key: &str,
        value: &T,
        ttl_seconds: usize,
    ) -> Result<(), redis::RedisError> {
        if let Ok(json) = serde_json::to_string(value) {
            let mut conn = ConnectionManager::clone(redis);
            let _: () = conn.set_ex(key, json, ttl_seconds).await?;
            tracing::debug!("Cache SET: {} (TTL: {}s)", key, ttl_seconds);
        }
        Ok(())
    }

    /// Delete a cache key
    pub async fn delete(
        redis: &Arc<ConnectionManager>,
        key: &str,
    ) -> Result<(), redis::RedisError> {
        let mut conn = ConnectionManager::clone(redis);
        let _: () = redis::AsyncCommands::del(&mut conn, key).await?;
        tracing::debug!("Cache DELETE: {}", key);
        Ok(())
    }

    /// Delete all keys matching a pattern using SCAN (non-blocking).
    /// Mutations invalidate whole collections this way rather than patching
    /// cached entries in place.
    pub async fn delete_pattern(
        redis: &Arc<ConnectionManager>,
        pattern: &str,
    ) -> Result<(), redis::RedisError> {
        let mut conn = ConnectionManager::clone(redis);
        let mut cursor: u64 = 0;
        let mut deleted_count = 0;

        loop {
            let (new_cursor, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(pattern)
                .arg("COUNT")
                .arg(100)
                .query_async(&mut conn)
                .await?;

            if !keys.is_empty() {
                deleted_count += keys.len();
                let _: () = redis::AsyncCommands::del(&mut conn, &keys).await?;
            }

            cursor = new_cursor;
            if cursor == 0 {
                break;
            }
        }

        tracing::debug!(
            "Cache DELETE pattern: {} ({} keys deleted)",
            pattern,
            deleted_count
        );
        Ok(())
    }

    /// Invalidate every cached candidate listing.
    pub async fn invalidate_candidates(
        redis: &Arc<ConnectionManager>,
    ) -> Result<(), redis::RedisError> {
        Self::delete_pattern(redis, "candidates:*").await
    }

    /// Invalidate every cached job order listing.
    pub async fn invalidate_job_orders(
        redis: &Arc<ConnectionManager>,
    ) -> Result<(), redis::RedisError> {
        Self::delete_pattern(redis, "job_orders:*").await
    }

    /// Invalidate every cached placement listing.
    pub async fn invalidate_placements(
        redis: &Arc<ConnectionManager>,
    ) -> Result<(), redis::RedisError> {
        Self::delete_pattern(redis, "placements:*").await
    }

    /// Invalidate the cached reminder list for one prospect. The due-soon
    /// query always hits the database, so there is nothing else to drop.
    pub async fn invalidate_reminders(
        redis: &Arc<ConnectionManager>,
        prospect_id: Uuid,
    ) -> Result<(), redis::RedisError> {
        Self::delete(redis, &format!("reminders:prospect:{}", prospect_id)).await
    }
}
