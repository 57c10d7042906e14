// Unit tests for Ember Match

use ember_match::core::{shuffle_page_with, CanonicalPair};
use ember_match::errors::ApiError;
use ember_match::models::{Match, PageQuery, Pagination, SwipeAction};
use rand::rngs::StdRng;
use rand::SeedableRng;
use uuid::Uuid;

#[test]
fn test_canonical_pair_direction_independent() {
    let forward = CanonicalPair::new("user-a", "user-b");
    let backward = CanonicalPair::new("user-b", "user-a");

    assert_eq!(forward, backward);
    assert_eq!(forward.user_a_id(), "user-a");
    assert_eq!(forward.user_b_id(), "user-b");
}

#[test]
fn test_canonical_pair_uses_byte_order() {
    // "user-10" < "user-2" in byte order even though 10 > 2 numerically
    let pair = CanonicalPair::new("user-2", "user-10");
    assert_eq!(pair.user_a_id(), "user-10");
    assert_eq!(pair.user_b_id(), "user-2");
}

#[test]
fn test_canonical_pair_uuid_style_ids() {
    let a = "0b9e6614-55b3-4e6a-9e62-0f0a51b34f10";
    let b = "f3b0c442-98fc-4e1f-9f5a-6c4b3a2e1d00";

    let forward = CanonicalPair::new(a, b);
    let backward = CanonicalPair::new(b, a);

    assert_eq!(forward.user_a_id(), backward.user_a_id());
    assert_eq!(forward.user_b_id(), backward.user_b_id());
    assert!(forward.user_a_id() <= forward.user_b_id());
}

#[test]
fn test_shuffle_is_a_permutation() {
    let original: Vec<String> = (0..25).map(|i| format!("candidate-{}", i)).collect();
    let mut page = original.clone();

    let mut rng = StdRng::seed_from_u64(1234);
    shuffle_page_with(&mut page, &mut rng);

    assert_eq!(page.len(), original.len());

    let mut sorted_page = page.clone();
    sorted_page.sort();
    let mut sorted_original = original.clone();
    sorted_original.sort();
    assert_eq!(sorted_page, sorted_original);
}

#[test]
fn test_match_participants() {
    let m = Match {
        id: Uuid::new_v4(),
        user_a_id: "alice".to_string(),
        user_b_id: "bob".to_string(),
        created_at: chrono::Utc::now(),
    };

    assert_eq!(m.other_participant("alice"), Some("bob"));
    assert_eq!(m.other_participant("bob"), Some("alice"));
    assert!(m.other_participant("mallory").is_none());
}

#[test]
fn test_pagination_total_pages() {
    assert_eq!(Pagination::new(1, 20, 0).total_pages, 0);
    assert_eq!(Pagination::new(1, 20, 1).total_pages, 1);
    assert_eq!(Pagination::new(1, 20, 20).total_pages, 1);
    assert_eq!(Pagination::new(1, 20, 21).total_pages, 2);
}

#[test]
fn test_page_query_offset() {
    let q = PageQuery { page: 4, limit: 10 };
    assert_eq!(q.offset(), 30);

    let q = PageQuery { page: 0, limit: 10 };
    assert_eq!(q.offset(), 0);
}

#[test]
fn test_swipe_action_parse() {
    let like: SwipeAction = serde_json::from_str("\"LIKE\"").unwrap();
    let pass: SwipeAction = serde_json::from_str("\"PASS\"").unwrap();

    assert_eq!(like, SwipeAction::Like);
    assert_eq!(pass, SwipeAction::Pass);
    assert!(serde_json::from_str::<SwipeAction>("\"SUPERLIKE\"").is_err());
}

#[test]
fn test_error_status_codes() {
    assert_eq!(ApiError::CannotSwipeSelf.status().as_u16(), 400);
    assert_eq!(ApiError::AlreadySwiped.status().as_u16(), 409);
    assert_eq!(ApiError::NotFound("x".into()).status().as_u16(), 404);
    assert_eq!(ApiError::Forbidden("x".into()).status().as_u16(), 403);
    assert_eq!(ApiError::Unauthorized("x".into()).status().as_u16(), 401);
    assert_eq!(ApiError::Internal("x".into()).status().as_u16(), 500);
}
