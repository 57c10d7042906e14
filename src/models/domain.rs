use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Interest or disinterest carried by a swipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "swipe_action", rename_all = "lowercase")]
pub enum SwipeAction {
    Like,
    Pass,
}

/// Directed swipe edge, immutable once created.
///
/// At most one swipe exists per ordered (from, to) pair; the swipes table
/// carries a unique constraint over both columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Swipe {
    pub id: Uuid,
    #[serde(rename = "fromUserId")]
    pub from_user_id: String,
    #[serde(rename = "toUserId")]
    pub to_user_id: String,
    pub action: SwipeAction,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Mutual match, stored under the canonical pair key.
///
/// `user_a_id` always sorts before `user_b_id` so the unique constraint on
/// (user_a_id, user_b_id) covers the unordered pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    pub id: Uuid,
    #[serde(rename = "userAId")]
    pub user_a_id: String,
    #[serde(rename = "userBId")]
    pub user_b_id: String,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Match {
    /// The participant other than `user_id`, if `user_id` is part of the pair.
    pub fn other_participant(&self, user_id: &str) -> Option<&str> {
        if self.user_a_id == user_id {
            Some(&self.user_b_id)
        } else if self.user_b_id == user_id {
            Some(&self.user_a_id)
        } else {
            None
        }
    }

    pub fn has_participant(&self, user_id: &str) -> bool {
        self.user_a_id == user_id || self.user_b_id == user_id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConversationType {
    Private,
}

impl ConversationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConversationType::Private => "PRIVATE",
        }
    }
}

/// Conversation opened for a match (exactly one per match, two participants)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: Uuid,
    #[serde(rename = "conversationType")]
    pub conversation_type: ConversationType,
    #[serde(rename = "matchId")]
    pub match_id: Option<Uuid>,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    MatchCreated,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::MatchCreated => "MATCH_CREATED",
        }
    }
}

/// In-app notification row; delivery mechanics live in the notification
/// service, this subsystem only creates the rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    #[serde(rename = "notificationType")]
    pub notification_type: NotificationType,
    #[serde(rename = "senderId")]
    pub sender_id: String,
    #[serde(rename = "receiverId")]
    pub receiver_id: String,
    #[serde(rename = "referenceId")]
    pub reference_id: Option<Uuid>,
    #[serde(rename = "isRead")]
    pub is_read: bool,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// User profile as read from the user service's tables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(default)]
    pub bio: Option<String>,
    pub gender: String,
    #[serde(rename = "isActive", default = "default_true")]
    pub is_active: bool,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

fn default_true() -> bool {
    true
}

/// Discovery preferences stored by the user service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfilePreferences {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "preferredGender", default)]
    pub preferred_gender: Option<String>,
    #[serde(rename = "minAge")]
    pub min_age: i32,
    #[serde(rename = "maxAge")]
    pub max_age: i32,
}

/// Swipeable candidate returned by discovery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(default)]
    pub bio: Option<String>,
    pub gender: String,
    pub photos: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn match_between(a: &str, b: &str) -> Match {
        Match {
            id: Uuid::new_v4(),
            user_a_id: a.to_string(),
            user_b_id: b.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_swipe_action_wire_format() {
        assert_eq!(serde_json::to_string(&SwipeAction::Like).unwrap(), "\"LIKE\"");
        assert_eq!(serde_json::to_string(&SwipeAction::Pass).unwrap(), "\"PASS\"");

        let parsed: SwipeAction = serde_json::from_str("\"PASS\"").unwrap();
        assert_eq!(parsed, SwipeAction::Pass);
    }

    #[test]
    fn test_other_participant() {
        let m = match_between("alice", "bob");

        assert_eq!(m.other_participant("alice"), Some("bob"));
        assert_eq!(m.other_participant("bob"), Some("alice"));
        assert_eq!(m.other_participant("carol"), None);
    }

    #[test]
    fn test_has_participant() {
        let m = match_between("alice", "bob");

        assert!(m.has_participant("alice"));
        assert!(m.has_participant("bob"));
        assert!(!m.has_participant("carol"));
    }

    #[test]
    fn test_notification_type_wire_format() {
        assert_eq!(NotificationType::MatchCreated.as_str(), "MATCH_CREATED");
        assert_eq!(
            serde_json::to_string(&NotificationType::MatchCreated).unwrap(),
            "\"MATCH_CREATED\""
        );
    }
}
