use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, Row, Transaction};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

use crate::core::CanonicalPair;
use crate::models::{
    Candidate, Conversation, ConversationType, Match, Notification, NotificationType, Swipe,
    SwipeAction,
};

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Duplicate swipe: {from_user_id} -> {to_user_id}")]
    DuplicateSwipe {
        from_user_id: String,
        to_user_id: String,
    },

    #[error("Match row missing after uniqueness conflict for pair ({0}, {1})")]
    MatchRowMissing(String, String),
}

/// How a LIKE swipe resolved with respect to matching
#[derive(Debug, Clone)]
pub struct MatchResolution {
    pub match_record: Match,
    /// True only for the transaction that won the match insert and created
    /// the conversation and notifications.
    pub side_effects_applied: bool,
}

/// Result of recording a swipe
#[derive(Debug, Clone)]
pub struct SwipeOutcome {
    pub swipe: Swipe,
    pub match_result: Option<MatchResolution>,
}

/// Per-user swipe activity counters
#[derive(Debug, Clone)]
pub struct SwipeStats {
    pub likes_given: i64,
    pub passes_given: i64,
    pub likes_received: i64,
    pub matches: i64,
}

/// PostgreSQL store for swipes, matches and their side effects.
///
/// Concurrent reciprocal likes are arbitrated inside the database: a
/// transaction-scoped advisory lock on the canonical pair serializes the
/// two racing LIKE transactions, and the unique constraint on
/// (user_a_id, user_b_id) remains the backstop for any writer that does
/// not take the lock. No in-process locks are held anywhere.
pub struct MatchStore {
    pool: PgPool,
}

impl MatchStore {
    /// Connect and run migrations on startup.
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout_secs: u64,
        idle_timeout_secs: u64,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(acquire_timeout_secs))
            .idle_timeout(Duration::from_secs(idle_timeout_secs))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Wrap an existing pool; the caller is responsible for migrations.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> PgPool {
        self.pool.clone()
    }

    /// Whether a directed swipe already exists for (from, to).
    pub async fn swipe_exists(
        &self,
        from_user_id: &str,
        to_user_id: &str,
    ) -> Result<bool, StoreError> {
        let query = r#"
            SELECT EXISTS (
                SELECT 1 FROM swipes
                WHERE from_user_id = $1 AND to_user_id = $2
            ) AS found
        "#;

        let row = sqlx::query(query)
            .bind(from_user_id)
            .bind(to_user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.get::<bool, _>("found"))
    }

    /// Persist a PASS swipe. Never creates a match.
    pub async fn record_pass(
        &self,
        from_user_id: &str,
        to_user_id: &str,
    ) -> Result<Swipe, StoreError> {
        let swipe_id = Uuid::new_v4();

        let query = r#"
            INSERT INTO swipes (id, from_user_id, to_user_id, action)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (from_user_id, to_user_id) DO NOTHING
            RETURNING created_at
        "#;

        let row = sqlx::query(query)
            .bind(swipe_id)
            .bind(from_user_id)
            .bind(to_user_id)
            .bind(SwipeAction::Pass)
            .fetch_optional(&self.pool)
            .await?;

        let row = row.ok_or_else(|| StoreError::DuplicateSwipe {
            from_user_id: from_user_id.to_string(),
            to_user_id: to_user_id.to_string(),
        })?;

        tracing::debug!("Recorded swipe: {} -> {} (Pass)", from_user_id, to_user_id);

        Ok(Swipe {
            id: swipe_id,
            from_user_id: from_user_id.to_string(),
            to_user_id: to_user_id.to_string(),
            action: SwipeAction::Pass,
            created_at: row.get("created_at"),
        })
    }

    /// Persist a LIKE swipe and resolve matching, atomically.
    ///
    /// One transaction: insert the swipe, check for the reciprocal like,
    /// and if present insert the match under the canonical pair key. The
    /// winner of the match insert also creates the conversation and the two
    /// notifications; a loser adopts the winner's row with a single re-read.
    /// Any failure aborts the whole transaction, including the swipe insert.
    pub async fn record_like(
        &self,
        from_user_id: &str,
        to_user_id: &str,
    ) -> Result<SwipeOutcome, StoreError> {
        let pair = CanonicalPair::new(from_user_id, to_user_id);
        let mut tx = self.pool.begin().await?;

        // Serialize reciprocal processing per unordered pair for the
        // duration of this transaction; released automatically at commit
        // or rollback.
        sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1, 0))")
            .bind(format!("pair:{}:{}", pair.user_a_id(), pair.user_b_id()))
            .execute(&mut *tx)
            .await?;

        let swipe_id = Uuid::new_v4();
        let inserted = sqlx::query(
            r#"
            INSERT INTO swipes (id, from_user_id, to_user_id, action)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (from_user_id, to_user_id) DO NOTHING
            RETURNING created_at
            "#,
        )
        .bind(swipe_id)
        .bind(from_user_id)
        .bind(to_user_id)
        .bind(SwipeAction::Like)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(swipe_row) = inserted else {
            // Transaction dropped here, rolling back the advisory lock.
            return Err(StoreError::DuplicateSwipe {
                from_user_id: from_user_id.to_string(),
                to_user_id: to_user_id.to_string(),
            });
        };

        let swipe = Swipe {
            id: swipe_id,
            from_user_id: from_user_id.to_string(),
            to_user_id: to_user_id.to_string(),
            action: SwipeAction::Like,
            created_at: swipe_row.get("created_at"),
        };

        let reciprocal = sqlx::query(
            r#"
            SELECT 1 FROM swipes
            WHERE from_user_id = $1 AND to_user_id = $2 AND action = 'like'
            "#,
        )
        .bind(to_user_id)
        .bind(from_user_id)
        .fetch_optional(&mut *tx)
        .await?;

        if reciprocal.is_none() {
            tx.commit().await?;
            tracing::debug!("Recorded swipe: {} -> {} (Like)", from_user_id, to_user_id);
            return Ok(SwipeOutcome {
                swipe,
                match_result: None,
            });
        }

        let match_id = Uuid::new_v4();
        let match_inserted = sqlx::query(
            r#"
            INSERT INTO matches (id, user_a_id, user_b_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_a_id, user_b_id) DO NOTHING
            RETURNING created_at
            "#,
        )
        .bind(match_id)
        .bind(pair.user_a_id())
        .bind(pair.user_b_id())
        .fetch_optional(&mut *tx)
        .await?;

        let resolution = match match_inserted {
            Some(row) => {
                let match_record = Match {
                    id: match_id,
                    user_a_id: pair.user_a_id().to_string(),
                    user_b_id: pair.user_b_id().to_string(),
                    created_at: row.get("created_at"),
                };

                apply_match_side_effects(&mut tx, &match_record, from_user_id, to_user_id)
                    .await?;

                tracing::info!(
                    "Match created: {} for pair ({}, {})",
                    match_record.id,
                    pair.user_a_id(),
                    pair.user_b_id()
                );

                MatchResolution {
                    match_record,
                    side_effects_applied: true,
                }
            }
            None => {
                // Lost the insert race; the existing row is authoritative
                // and its side effects already ran. One re-read, no retry.
                let match_record = find_match_by_pair(&mut tx, &pair).await?.ok_or_else(|| {
                    StoreError::MatchRowMissing(
                        pair.user_a_id().to_string(),
                        pair.user_b_id().to_string(),
                    )
                })?;

                tracing::info!(
                    "Match insert conflicted, adopting existing row {} for pair ({}, {})",
                    match_record.id,
                    pair.user_a_id(),
                    pair.user_b_id()
                );

                MatchResolution {
                    match_record,
                    side_effects_applied: false,
                }
            }
        };

        tx.commit().await?;

        Ok(SwipeOutcome {
            swipe,
            match_result: Some(resolution),
        })
    }

    /// One page of swipeable candidates for a user, plus the total count
    /// of eligible candidates before pagination.
    ///
    /// Excluded: the requester, anyone the requester already swiped, and
    /// anyone in a block relationship with the requester in either
    /// direction. Candidates must be active and have at least one photo.
    pub async fn discovery_page(
        &self,
        user_id: &str,
        preferred_gender: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Candidate>, i64), StoreError> {
        let filter = r#"
            FROM profiles p
            WHERE p.is_active = TRUE
              AND p.user_id <> $1
              AND EXISTS (
                  SELECT 1 FROM profile_photos ph WHERE ph.user_id = p.user_id
              )
              AND NOT EXISTS (
                  SELECT 1 FROM swipes s
                  WHERE s.from_user_id = $1 AND s.to_user_id = p.user_id
              )
              AND NOT EXISTS (
                  SELECT 1 FROM blocks b
                  WHERE (b.blocker_id = $1 AND b.blocked_user_id = p.user_id)
                     OR (b.blocker_id = p.user_id AND b.blocked_user_id = $1)
              )
              AND ($2::TEXT IS NULL OR p.gender = $2)
        "#;

        let count_query = format!("SELECT COUNT(*) AS total {}", filter);
        let total: i64 = sqlx::query(&count_query)
            .bind(user_id)
            .bind(preferred_gender)
            .fetch_one(&self.pool)
            .await?
            .get("total");

        let page_query = format!(
            "SELECT p.user_id, p.bio, p.gender {} ORDER BY p.created_at DESC LIMIT $3 OFFSET $4",
            filter
        );
        let rows = sqlx::query(&page_query)
            .bind(user_id)
            .bind(preferred_gender)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        let mut candidates: Vec<Candidate> = rows
            .iter()
            .map(|row| Candidate {
                user_id: row.get("user_id"),
                bio: row.get("bio"),
                gender: row.get("gender"),
                photos: Vec::new(),
            })
            .collect();

        if !candidates.is_empty() {
            let ids: Vec<String> = candidates.iter().map(|c| c.user_id.clone()).collect();
            let photo_rows = sqlx::query(
                r#"
                SELECT user_id, url FROM profile_photos
                WHERE user_id = ANY($1)
                ORDER BY user_id, position
                "#,
            )
            .bind(&ids)
            .fetch_all(&self.pool)
            .await?;

            for candidate in &mut candidates {
                candidate.photos = photo_rows
                    .iter()
                    .filter(|row| row.get::<String, _>("user_id") == candidate.user_id)
                    .map(|row| row.get("url"))
                    .collect();
            }
        }

        tracing::debug!(
            "Discovery for {}: {} candidates on page ({} total)",
            user_id,
            candidates.len(),
            total
        );

        Ok((candidates, total))
    }

    /// One page of the user's matches, newest first, plus the total count.
    pub async fn matches_for_user(
        &self,
        user_id: &str,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Match>, i64), StoreError> {
        let total: i64 = sqlx::query(
            "SELECT COUNT(*) AS total FROM matches WHERE user_a_id = $1 OR user_b_id = $1",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?
        .get("total");

        let rows = sqlx::query(
            r#"
            SELECT id, user_a_id, user_b_id, created_at
            FROM matches
            WHERE user_a_id = $1 OR user_b_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let matches = rows.iter().map(match_from_row).collect();

        Ok((matches, total))
    }

    pub async fn match_by_id(&self, match_id: Uuid) -> Result<Option<Match>, StoreError> {
        let row = sqlx::query(
            "SELECT id, user_a_id, user_b_id, created_at FROM matches WHERE id = $1",
        )
        .bind(match_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(match_from_row))
    }

    /// The conversation created for a match, if any.
    pub async fn conversation_for_match(
        &self,
        match_id: Uuid,
    ) -> Result<Option<Uuid>, StoreError> {
        let row = sqlx::query("SELECT id FROM conversations WHERE match_id = $1")
            .bind(match_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| r.get("id")))
    }

    /// Aggregate swipe counters for a user.
    pub async fn swipe_stats(&self, user_id: &str) -> Result<SwipeStats, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE from_user_id = $1 AND action = 'like') AS likes_given,
                COUNT(*) FILTER (WHERE from_user_id = $1 AND action = 'pass') AS passes_given,
                COUNT(*) FILTER (WHERE to_user_id = $1 AND action = 'like') AS likes_received
            FROM swipes
            WHERE from_user_id = $1 OR to_user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        let matches: i64 = sqlx::query(
            "SELECT COUNT(*) AS total FROM matches WHERE user_a_id = $1 OR user_b_id = $1",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?
        .get("total");

        Ok(SwipeStats {
            likes_given: row.get("likes_given"),
            passes_given: row.get("passes_given"),
            likes_received: row.get("likes_received"),
            matches,
        })
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

fn match_from_row(row: &sqlx::postgres::PgRow) -> Match {
    Match {
        id: row.get("id"),
        user_a_id: row.get("user_a_id"),
        user_b_id: row.get("user_b_id"),
        created_at: row.get("created_at"),
    }
}

async fn find_match_by_pair(
    tx: &mut Transaction<'_, Postgres>,
    pair: &CanonicalPair,
) -> Result<Option<Match>, StoreError> {
    let row = sqlx::query(
        r#"
        SELECT id, user_a_id, user_b_id, created_at
        FROM matches
        WHERE user_a_id = $1 AND user_b_id = $2
        "#,
    )
    .bind(pair.user_a_id())
    .bind(pair.user_b_id())
    .fetch_optional(&mut **tx)
    .await?;

    Ok(row.as_ref().map(match_from_row))
}

/// Create the conversation and notifications for a freshly won match, on
/// the caller's open transaction. Runs exactly once per match: only the
/// transaction that won the match insert calls this. All rows share the
/// match's timestamp.
async fn apply_match_side_effects(
    tx: &mut Transaction<'_, Postgres>,
    match_record: &Match,
    from_user_id: &str,
    to_user_id: &str,
) -> Result<(), StoreError> {
    let conversation = Conversation {
        id: Uuid::new_v4(),
        conversation_type: ConversationType::Private,
        match_id: Some(match_record.id),
        created_at: match_record.created_at,
    };

    sqlx::query(
        r#"
        INSERT INTO conversations (id, conversation_type, match_id, created_at)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(conversation.id)
    .bind(conversation.conversation_type.as_str())
    .bind(conversation.match_id)
    .bind(conversation.created_at)
    .execute(&mut **tx)
    .await?;

    for participant in [from_user_id, to_user_id] {
        sqlx::query(
            r#"
            INSERT INTO conversation_participants (conversation_id, user_id, joined_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(conversation.id)
        .bind(participant)
        .bind(conversation.created_at)
        .execute(&mut **tx)
        .await?;
    }

    for (sender, receiver) in [(from_user_id, to_user_id), (to_user_id, from_user_id)] {
        let notification = Notification {
            id: Uuid::new_v4(),
            notification_type: NotificationType::MatchCreated,
            sender_id: sender.to_string(),
            receiver_id: receiver.to_string(),
            reference_id: Some(match_record.id),
            is_read: false,
            created_at: match_record.created_at,
        };

        sqlx::query(
            r#"
            INSERT INTO notifications
                (id, notification_type, sender_id, receiver_id, reference_id, is_read, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(notification.id)
        .bind(notification.notification_type.as_str())
        .bind(&notification.sender_id)
        .bind(&notification.receiver_id)
        .bind(notification.reference_id)
        .bind(notification.is_read)
        .bind(notification.created_at)
        .execute(&mut **tx)
        .await?;
    }

    tracing::debug!(
        "Side effects applied for match {}: conversation {}",
        match_record.id,
        conversation.id
    );

    Ok(())
}
