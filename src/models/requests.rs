use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::SwipeAction;

/// Request body for recording a swipe
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SwipeRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "target_user_id", rename = "targetUserId")]
    pub target_user_id: String,
    pub action: SwipeAction,
}

/// Page/limit query parameters shared by discovery and match listing
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PageQuery {
    #[validate(range(min = 1))]
    #[serde(default = "default_page")]
    pub page: u32,
    #[validate(range(min = 1, max = 100))]
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    20
}

impl PageQuery {
    pub fn offset(&self) -> i64 {
        (self.page.saturating_sub(1) as i64) * self.limit as i64
    }
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_query_offset() {
        let q = PageQuery { page: 1, limit: 20 };
        assert_eq!(q.offset(), 0);

        let q = PageQuery { page: 3, limit: 25 };
        assert_eq!(q.offset(), 50);
    }

    #[test]
    fn test_page_query_defaults() {
        let q: PageQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(q.page, 1);
        assert_eq!(q.limit, 20);
    }

    #[test]
    fn test_swipe_request_validation() {
        let req = SwipeRequest {
            target_user_id: "".to_string(),
            action: SwipeAction::Like,
        };
        assert!(req.validate().is_err());

        let req = SwipeRequest {
            target_user_id: "user-1".to_string(),
            action: SwipeAction::Pass,
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_limit_bounds_rejected() {
        let q = PageQuery { page: 1, limit: 0 };
        assert!(q.validate().is_err());

        let q = PageQuery { page: 1, limit: 101 };
        assert!(q.validate().is_err());
    }
}
