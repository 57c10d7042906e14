use actix_web::{web, HttpResponse};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::auth::{AuthContext, AuthUser};
use crate::core::shuffle_page;
use crate::errors::ApiError;
use crate::models::{
    DiscoveryResponse, HealthResponse, MatchDetailResponse, MatchListResponse, MatchSummary,
    PageQuery, Pagination, SwipeRequest, SwipeResponse, SwipeStatsResponse,
};
use crate::services::{MatchStore, ProfileDirectory, SwipeService};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MatchStore>,
    pub directory: Arc<ProfileDirectory>,
    pub swipes: Arc<SwipeService>,
    pub auth: Arc<AuthContext>,
}

/// Configure all dating routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check)).service(
        web::scope("/dating")
            .route("/swipe", web::post().to(swipe))
            .route("/discovery", web::get().to(discovery))
            .route("/matches", web::get().to(list_matches))
            .route("/matches/{match_id}", web::get().to(match_detail))
            .route("/swipes/stats", web::get().to(swipe_stats)),
    );
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let db_healthy = state.store.health_check().await.unwrap_or(false);

    let status = if db_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Record a swipe for the caller
///
/// POST /dating/swipe
///
/// Request body:
/// ```json
/// {
///   "targetUserId": "string",
///   "action": "LIKE|PASS"
/// }
/// ```
async fn swipe(
    state: web::Data<AppState>,
    user: AuthUser,
    req: web::Json<SwipeRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    tracing::info!(
        "Swipe request: {} -> {} ({:?})",
        user.user_id,
        req.target_user_id,
        req.action
    );

    let outcome = state
        .swipes
        .record(&user.user_id, &req.target_user_id, req.action)
        .await?;

    let (matched, match_record, side_effects_applied) = match outcome.match_result {
        Some(resolution) => (
            true,
            Some(resolution.match_record),
            Some(resolution.side_effects_applied),
        ),
        None => (false, None, None),
    };

    Ok(HttpResponse::Created().json(SwipeResponse {
        swipe: outcome.swipe,
        matched,
        match_record,
        side_effects_applied,
    }))
}

/// Discovery feed for the caller
///
/// GET /dating/discovery?page&limit
async fn discovery(
    state: web::Data<AppState>,
    user: AuthUser,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, ApiError> {
    query
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let requester = state.directory.get_profile(&user.user_id).await?;
    if requester.is_none() {
        return Err(ApiError::NotFound(format!(
            "No profile for user {}",
            user.user_id
        )));
    }

    let preferred_gender = state
        .directory
        .get_preferences(&user.user_id)
        .await?
        .and_then(|prefs| prefs.preferred_gender);

    let (mut candidates, total) = state
        .store
        .discovery_page(
            &user.user_id,
            preferred_gender.as_deref(),
            query.limit as i64,
            query.offset(),
        )
        .await?;

    // Randomize the fetched page only; see core::discovery.
    shuffle_page(&mut candidates);

    tracing::info!(
        "Discovery for {}: returning {} of {} candidates",
        user.user_id,
        candidates.len(),
        total
    );

    Ok(HttpResponse::Ok().json(DiscoveryResponse {
        data: candidates,
        pagination: Pagination::new(query.page, query.limit, total),
    }))
}

/// The caller's matches, newest first
///
/// GET /dating/matches?page&limit
async fn list_matches(
    state: web::Data<AppState>,
    user: AuthUser,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, ApiError> {
    query
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let (matches, total) = state
        .store
        .matches_for_user(&user.user_id, query.limit as i64, query.offset())
        .await?;

    let data: Vec<MatchSummary> = matches
        .into_iter()
        .filter_map(|m| {
            let other = m.other_participant(&user.user_id)?.to_string();
            Some(MatchSummary {
                match_id: m.id,
                other_user_id: other,
                matched_at: m.created_at,
            })
        })
        .collect();

    Ok(HttpResponse::Ok().json(MatchListResponse {
        data,
        pagination: Pagination::new(query.page, query.limit, total),
    }))
}

/// Detail view of one match
///
/// GET /dating/matches/{match_id}
async fn match_detail(
    state: web::Data<AppState>,
    user: AuthUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let match_id = path.into_inner();

    let match_record = state
        .store
        .match_by_id(match_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No match with id {}", match_id)))?;

    if !match_record.has_participant(&user.user_id) {
        return Err(ApiError::Forbidden(
            "Caller is not a participant of this match".to_string(),
        ));
    }

    let conversation_id = state.store.conversation_for_match(match_id).await?;

    Ok(HttpResponse::Ok().json(MatchDetailResponse {
        id: match_record.id,
        user_a_id: match_record.user_a_id,
        user_b_id: match_record.user_b_id,
        conversation_id,
        created_at: match_record.created_at,
    }))
}

/// Swipe activity counters for the caller
///
/// GET /dating/swipes/stats
async fn swipe_stats(
    state: web::Data<AppState>,
    user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    let stats = state.store.swipe_stats(&user.user_id).await?;

    Ok(HttpResponse::Ok().json(SwipeStatsResponse {
        user_id: user.user_id,
        likes_given: stats.likes_given,
        passes_given: stats.passes_given,
        likes_received: stats.likes_received,
        matches: stats.matches,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_check_response() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: chrono::Utc::now(),
        };

        assert_eq!(response.status, "healthy");
    }
}
