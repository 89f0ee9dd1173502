//! Redis cache implementation.
//!
//! Provides a type-safe caching layer on a pooled connection, plus the
//! rate-limit counters and per-master booking locks the API relies on.

use redis::{aio::ConnectionManager, AsyncCommands, Client, RedisError};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::config::{
    Config, BOOKING_LOCK_TTL_SECONDS, CACHE_PREFIX_BOOKING_LOCK, CACHE_PREFIX_CITIES,
    CACHE_PREFIX_RATE_LIMIT, DEFAULT_CACHE_TTL_SECONDS,
};
use crate::domain::CityResponse;
use crate::errors::{AppError, AppResult};

/// Redis cache wrapper with connection pooling.
#[derive(Clone)]
pub struct Cache {
    connection: ConnectionManager,
    default_ttl: u64,
}

impl Cache {
    /// Create a new cache instance and connect to Redis.
    ///
    /// # Panics
    /// Panics if Redis connection fails.
    pub async fn connect(config: &Config) -> Self {
        let client =
            Client::open(config.redis_url.as_str()).expect("Failed to create Redis client");

        let connection = ConnectionManager::new(client)
            .await
            .expect("Failed to connect to Redis");

        tracing::info!("Redis cache connected");

        Self {
            connection,
            default_ttl: DEFAULT_CACHE_TTL_SECONDS,
        }
    }

    /// Try to connect to Redis, returning an error instead of panicking.
    pub async fn try_connect(config: &Config) -> Result<Self, RedisError> {
        let client = Client::open(config.redis_url.as_str())?;
        let connection = ConnectionManager::new(client).await?;

        Ok(Self {
            connection,
            default_ttl: DEFAULT_CACHE_TTL_SECONDS,
        })
    }

    // =========================================================================
    // Generic cache operations
    // =========================================================================

    /// Get a value from cache.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        let mut conn = self.connection.clone();
        let value: Option<String> = conn.get(key).await.map_err(cache_error)?;

        match value {
            Some(json) => {
                let parsed = serde_json::from_str(&json).map_err(|e| {
                    AppError::internal(format!("Cache deserialization error: {}", e))
                })?;
                Ok(Some(parsed))
            }
            None => Ok(None),
        }
    }

    /// Set a value in cache with default TTL.
    pub async fn set<T: Serialize>(&self, key: &str, value: &T) -> AppResult<()> {
        self.set_with_ttl(key, value, self.default_ttl).await
    }

    /// Set a value in cache with custom TTL (in seconds).
    pub async fn set_with_ttl<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl_seconds: u64,
    ) -> AppResult<()> {
        let mut conn = self.connection.clone();
        let json = serde_json::to_string(value)
            .map_err(|e| AppError::internal(format!("Cache serialization error: {}", e)))?;

        conn.set_ex::<_, _, ()>(key, json, ttl_seconds)
            .await
            .map_err(cache_error)?;

        Ok(())
    }

    /// Delete a value from cache.
    pub async fn delete(&self, key: &str) -> AppResult<()> {
        let mut conn = self.connection.clone();
        let _: () = conn.del(key).await.map_err(cache_error)?;
        Ok(())
    }

    // =========================================================================
    // City directory cache
    // =========================================================================

    /// Get the cached city list for a country filter ("all" for no filter).
    pub async fn get_cities(&self, filter: &str) -> AppResult<Option<Vec<CityResponse>>> {
        let key = format!("{}{}", CACHE_PREFIX_CITIES, filter);
        self.get(&key).await
    }

    /// Cache a city list under a country filter.
    pub async fn set_cities(&self, filter: &str, cities: &[CityResponse]) -> AppResult<()> {
        let key = format!("{}{}", CACHE_PREFIX_CITIES, filter);
        self.set(&key, &cities).await
    }

    // =========================================================================
    // Rate limiting
    // =========================================================================

    /// Check and increment the rate limit counter for an identifier.
    /// Returns (current_count, is_allowed).
    pub async fn check_rate_limit(
        &self,
        identifier: &str,
        max_requests: u64,
        window_seconds: u64,
    ) -> AppResult<(u64, bool)> {
        let key = format!("{}{}", CACHE_PREFIX_RATE_LIMIT, identifier);
        let mut conn = self.connection.clone();

        let exists: bool = conn.exists(&key).await.map_err(cache_error)?;

        if !exists {
            let _: () = conn
                .set_ex(&key, 1i64, window_seconds)
                .await
                .map_err(cache_error)?;
            return Ok((1, true));
        }

        let count: i64 = conn.incr(&key, 1).await.map_err(cache_error)?;
        let count = count as u64;
        let allowed = count <= max_requests;

        Ok((count, allowed))
    }

    // =========================================================================
    // Booking locks
    // =========================================================================

    /// Try to take the booking lock for a master without retrying.
    /// Returns None when another booking is in flight for the same master.
    pub async fn try_lock_master(&self, master_id: i32) -> AppResult<Option<LockGuard>> {
        let key = format!("{}{}", CACHE_PREFIX_BOOKING_LOCK, master_id);
        let lock_id = Uuid::new_v4().to_string();
        let mut conn = self.connection.clone();

        // A Redis failure must surface as an error; only a held lock
        // reads as "occupied"
        let reply: Option<String> = redis::cmd("SET")
            .arg(&key)
            .arg(&lock_id)
            .arg("NX")
            .arg("EX")
            .arg(BOOKING_LOCK_TTL_SECONDS)
            .query_async(&mut conn)
            .await
            .map_err(cache_error)?;

        if reply.is_some() {
            tracing::debug!(master_id, lock_id = %lock_id, "Booking lock acquired");
            Ok(Some(LockGuard {
                cache: Arc::new(self.clone()),
                key,
                lock_id,
                released: false,
            }))
        } else {
            Ok(None)
        }
    }

    /// Release a lock (internal, prefer the LockGuard).
    async fn release_lock(&self, key: &str, lock_id: &str) -> AppResult<bool> {
        let mut conn = self.connection.clone();

        // Atomically delete only if we still own the lock
        let script = r#"
            if redis.call("GET", KEYS[1]) == ARGV[1] then
                return redis.call("DEL", KEYS[1])
            else
                return 0
            end
        "#;

        let released: i32 = redis::cmd("EVAL")
            .arg(script)
            .arg(1)
            .arg(key)
            .arg(lock_id)
            .query_async(&mut conn)
            .await
            .map_err(cache_error)?;

        Ok(released == 1)
    }
}

/// RAII guard for booking locks.
/// Automatically releases the lock when dropped.
pub struct LockGuard {
    cache: Arc<Cache>,
    key: String,
    lock_id: String,
    released: bool,
}

impl LockGuard {
    /// Manually release the lock early.
    pub async fn release(mut self) -> AppResult<()> {
        if !self.released {
            self.released = true;
            let released = self.cache.release_lock(&self.key, &self.lock_id).await?;
            if released {
                tracing::debug!(key = %self.key, "Booking lock released");
            }
        }
        Ok(())
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        if !self.released {
            let cache = self.cache.clone();
            let key = self.key.clone();
            let lock_id = self.lock_id.clone();

            tokio::spawn(async move {
                if let Err(e) = cache.release_lock(&key, &lock_id).await {
                    tracing::error!(key = %key, error = %e, "Failed to release booking lock on drop");
                }
            });
        }
    }
}

/// Convert Redis error to AppError.
fn cache_error(e: RedisError) -> AppError {
    tracing::error!("Redis error: {}", e);
    AppError::internal(format!("Cache error: {}", e))
}
