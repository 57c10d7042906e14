// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Candidate, Conversation, ConversationType, Match, Notification, NotificationType, Profile,
    ProfilePreferences, Swipe, SwipeAction,
};
pub use requests::{PageQuery, SwipeRequest};
pub use responses::{
    DiscoveryResponse, ErrorResponse, HealthResponse, MatchDetailResponse, MatchListResponse,
    MatchSummary, Pagination, SwipeResponse, SwipeStatsResponse,
};
