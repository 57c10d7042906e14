use std::sync::Arc;

use crate::errors::ApiError;
use crate::models::SwipeAction;
use crate::services::profiles::ProfileDirectory;
use crate::services::store::{MatchStore, SwipeOutcome};

/// Records swipes: validation chain first, then persistence.
///
/// Validation order (each check short-circuits): self-swipe, duplicate
/// swipe, swiper profile, target profile, block relationship. A PASS is a
/// plain insert; a LIKE goes through the store's match transaction.
pub struct SwipeService {
    directory: Arc<ProfileDirectory>,
    store: Arc<MatchStore>,
}

impl SwipeService {
    pub fn new(directory: Arc<ProfileDirectory>, store: Arc<MatchStore>) -> Self {
        Self { directory, store }
    }

    pub async fn record(
        &self,
        from_user_id: &str,
        to_user_id: &str,
        action: SwipeAction,
    ) -> Result<SwipeOutcome, ApiError> {
        if from_user_id == to_user_id {
            return Err(ApiError::CannotSwipeSelf);
        }

        if self.store.swipe_exists(from_user_id, to_user_id).await? {
            return Err(ApiError::AlreadySwiped);
        }

        let swiper = self.directory.get_profile(from_user_id).await?;
        if !swiper.map(|p| p.is_active).unwrap_or(false) {
            return Err(ApiError::NotFound(format!(
                "No active profile for user {}",
                from_user_id
            )));
        }

        let target = self.directory.get_profile(to_user_id).await?;
        if !target.map(|p| p.is_active).unwrap_or(false) {
            return Err(ApiError::NotFound(format!(
                "No active profile for user {}",
                to_user_id
            )));
        }

        if self
            .directory
            .is_blocked_either(from_user_id, to_user_id)
            .await?
        {
            return Err(ApiError::Forbidden(
                "A block exists between these users".to_string(),
            ));
        }

        match action {
            SwipeAction::Pass => {
                let swipe = self.store.record_pass(from_user_id, to_user_id).await?;
                Ok(SwipeOutcome {
                    swipe,
                    match_result: None,
                })
            }
            SwipeAction::Like => {
                let outcome = self.store.record_like(from_user_id, to_user_id).await?;
                Ok(outcome)
            }
        }
    }
}
