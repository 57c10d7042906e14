// Service exports
pub mod cache;
pub mod profiles;
pub mod store;
pub mod swipes;

pub use cache::{CacheError, CacheKey, CacheManager};
pub use profiles::{DirectoryError, ProfileDirectory};
pub use store::{MatchResolution, MatchStore, StoreError, SwipeOutcome, SwipeStats};
pub use swipes::SwipeService;
