use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::{Candidate, Match, Swipe};

/// Pagination envelope metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: i64,
    #[serde(rename = "totalPages")]
    pub total_pages: i64,
}

impl Pagination {
    pub fn new(page: u32, limit: u32, total: i64) -> Self {
        let per_page = limit.max(1) as i64;
        let total_pages = if total == 0 {
            0
        } else {
            (total + per_page - 1) / per_page
        };
        Self {
            page,
            limit,
            total,
            total_pages,
        }
    }
}

/// Response for a recorded swipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwipeResponse {
    pub swipe: Swipe,
    pub matched: bool,
    #[serde(rename = "match", skip_serializing_if = "Option::is_none")]
    pub match_record: Option<Match>,
    #[serde(rename = "sideEffectsApplied", skip_serializing_if = "Option::is_none")]
    pub side_effects_applied: Option<bool>,
}

/// Response for the discovery feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryResponse {
    pub data: Vec<Candidate>,
    pub pagination: Pagination,
}

/// One entry in the caller's match list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSummary {
    #[serde(rename = "matchId")]
    pub match_id: Uuid,
    #[serde(rename = "userId")]
    pub other_user_id: String,
    #[serde(rename = "matchedAt")]
    pub matched_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchListResponse {
    pub data: Vec<MatchSummary>,
    pub pagination: Pagination,
}

/// Detail view of a single match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchDetailResponse {
    pub id: Uuid,
    #[serde(rename = "userAId")]
    pub user_a_id: String,
    #[serde(rename = "userBId")]
    pub user_b_id: String,
    #[serde(rename = "conversationId")]
    pub conversation_id: Option<Uuid>,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Per-caller swipe activity counters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwipeStatsResponse {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "likesGiven")]
    pub likes_given: i64,
    #[serde(rename = "passesGiven")]
    pub passes_given: i64,
    #[serde(rename = "likesReceived")]
    pub likes_received: i64,
    pub matches: i64,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_math() {
        let p = Pagination::new(1, 20, 0);
        assert_eq!(p.total_pages, 0);

        let p = Pagination::new(1, 20, 20);
        assert_eq!(p.total_pages, 1);

        let p = Pagination::new(2, 20, 41);
        assert_eq!(p.total_pages, 3);
    }

    #[test]
    fn test_swipe_response_omits_absent_match() {
        let response = SwipeResponse {
            swipe: Swipe {
                id: Uuid::new_v4(),
                from_user_id: "u1".to_string(),
                to_user_id: "u2".to_string(),
                action: crate::models::SwipeAction::Like,
                created_at: chrono::Utc::now(),
            },
            matched: false,
            match_record: None,
            side_effects_applied: None,
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["matched"], false);
        assert!(json.get("match").is_none());
        assert!(json.get("sideEffectsApplied").is_none());
    }
}
