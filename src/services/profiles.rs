use sqlx::{PgPool, Row};
use std::sync::Arc;
use thiserror::Error;

use crate::models::{Profile, ProfilePreferences};
use crate::services::cache::{CacheKey, CacheManager};

/// Errors from the profile directory
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),
}

/// Read-only view over the user service's tables.
///
/// Profiles, preferences and blocks are owned by other services; this
/// subsystem only consults them. Profile and preference reads may be served
/// from cache (TTL-bounded staleness); block checks always hit the database.
pub struct ProfileDirectory {
    pool: PgPool,
    cache: Option<Arc<CacheManager>>,
}

impl ProfileDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool, cache: None }
    }

    pub fn with_cache(pool: PgPool, cache: Arc<CacheManager>) -> Self {
        Self {
            pool,
            cache: Some(cache),
        }
    }

    /// Fetch a profile by user id.
    pub async fn get_profile(&self, user_id: &str) -> Result<Option<Profile>, DirectoryError> {
        let key = CacheKey::profile(user_id);
        if let Some(cache) = &self.cache {
            match cache.get::<Profile>(&key).await {
                Ok(Some(profile)) => return Ok(Some(profile)),
                Ok(None) => {}
                Err(e) => tracing::warn!("Cache read failed for {}: {}", key, e),
            }
        }

        let query = r#"
            SELECT user_id, bio, gender, is_active, created_at
            FROM profiles
            WHERE user_id = $1
        "#;

        let row = sqlx::query(query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        let profile = row.map(|row| Profile {
            user_id: row.get("user_id"),
            bio: row.get("bio"),
            gender: row.get("gender"),
            is_active: row.get("is_active"),
            created_at: row.get("created_at"),
        });

        if let (Some(cache), Some(profile)) = (&self.cache, &profile) {
            if let Err(e) = cache.set(&key, profile).await {
                tracing::warn!("Cache write failed for {}: {}", key, e);
            }
        }

        Ok(profile)
    }

    /// Fetch discovery preferences for a user, if stored.
    pub async fn get_preferences(
        &self,
        user_id: &str,
    ) -> Result<Option<ProfilePreferences>, DirectoryError> {
        let key = CacheKey::preferences(user_id);
        if let Some(cache) = &self.cache {
            match cache.get::<ProfilePreferences>(&key).await {
                Ok(Some(prefs)) => return Ok(Some(prefs)),
                Ok(None) => {}
                Err(e) => tracing::warn!("Cache read failed for {}: {}", key, e),
            }
        }

        let query = r#"
            SELECT user_id, preferred_gender, min_age, max_age
            FROM profile_preferences
            WHERE user_id = $1
        "#;

        let row = sqlx::query(query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        let prefs = row.map(|row| ProfilePreferences {
            user_id: row.get("user_id"),
            preferred_gender: row.get("preferred_gender"),
            min_age: row.get("min_age"),
            max_age: row.get("max_age"),
        });

        if let (Some(cache), Some(prefs)) = (&self.cache, &prefs) {
            if let Err(e) = cache.set(&key, prefs).await {
                tracing::warn!("Cache write failed for {}: {}", key, e);
            }
        }

        Ok(prefs)
    }

    /// Whether a block exists between the two users, in either direction.
    pub async fn is_blocked_either(&self, a: &str, b: &str) -> Result<bool, DirectoryError> {
        let query = r#"
            SELECT EXISTS (
                SELECT 1 FROM blocks
                WHERE (blocker_id = $1 AND blocked_user_id = $2)
                   OR (blocker_id = $2 AND blocked_user_id = $1)
            ) AS blocked
        "#;

        let row = sqlx::query(query)
            .bind(a)
            .bind(b)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.get::<bool, _>("blocked"))
    }
}
