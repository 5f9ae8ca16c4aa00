//! Shared entity models for the Waypost backend
//!
//! These are the read-only views the feed and notification cores operate
//! on; the owning services perform all persistence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Display name used when a profile lookup fails or resolves to nothing.
pub const UNKNOWN_USER: &str = "Unknown User";

// ============================================================================
// GEOGRAPHY
// ============================================================================

/// A WGS84 coordinate pair.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

// ============================================================================
// POSTS
// ============================================================================

/// A user post as served by the content service.
///
/// Title, caption, category, location, and creation timestamp are all
/// nullable upstream; consumers must tolerate any of them being absent.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: Option<String>,
    pub caption: Option<String>,
    pub category: Option<String>,
    pub location: Option<GeoPoint>,
    pub created_at: Option<DateTime<Utc>>,
}

// ============================================================================
// PROFILES
// ============================================================================

/// Display data for a user, served by the profile service.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuthorProfile {
    pub id: Uuid,
    pub display_name: Option<String>,
    pub picture_url: Option<String>,
}

impl AuthorProfile {
    /// Resolved display name, falling back to the shared placeholder when
    /// the profile carries no usable name.
    pub fn display_name_or_unknown(&self) -> String {
        self.display_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(UNKNOWN_USER)
            .to_string()
    }
}

// ============================================================================
// VOTES
// ============================================================================

/// A user's vote on a post. Absence of a vote is represented as `None`
/// wherever vote state appears.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VoteState {
    Up,
    Down,
}

impl VoteState {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteState::Up => "up",
            VoteState::Down => "down",
        }
    }
}

// ============================================================================
// COMMENTS
// ============================================================================

/// A comment or reply as served by the comment service.
///
/// Top-level comments carry `post_id` and no parent; replies carry
/// `parent_comment_id` and reach their post only through the parent
/// comment.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Option<Uuid>,
    pub author_id: Uuid,
    pub caption: Option<String>,
    pub parent_comment_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn is_reply(&self) -> bool {
        self.parent_comment_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_resolves_when_present() {
        let profile = AuthorProfile {
            id: Uuid::new_v4(),
            display_name: Some("Ada".to_string()),
            picture_url: None,
        };

        assert_eq!(profile.display_name_or_unknown(), "Ada");
    }

    #[test]
    fn missing_display_name_falls_back_to_placeholder() {
        let profile = AuthorProfile {
            id: Uuid::new_v4(),
            display_name: None,
            picture_url: None,
        };

        assert_eq!(profile.display_name_or_unknown(), UNKNOWN_USER);
    }

    #[test]
    fn blank_display_name_falls_back_to_placeholder() {
        let profile = AuthorProfile {
            id: Uuid::new_v4(),
            display_name: Some("   ".to_string()),
            picture_url: None,
        };

        assert_eq!(profile.display_name_or_unknown(), UNKNOWN_USER);
    }

    #[test]
    fn reply_detection_uses_parent_link() {
        let top_level = Comment {
            id: Uuid::new_v4(),
            post_id: Some(Uuid::new_v4()),
            author_id: Uuid::new_v4(),
            caption: Some("first".to_string()),
            parent_comment_id: None,
            created_at: Utc::now(),
        };
        let reply = Comment {
            parent_comment_id: Some(top_level.id),
            post_id: None,
            ..top_level.clone()
        };

        assert!(!top_level.is_reply());
        assert!(reply.is_reply());
    }

    #[test]
    fn vote_state_serializes_lowercase() {
        let json = serde_json::to_string(&VoteState::Up).expect("Should serialize");
        assert_eq!(json, "\"up\"");

        let parsed: VoteState =
            serde_json::from_str("\"down\"").expect("Should deserialize");
        assert_eq!(parsed, VoteState::Down);
        assert_eq!(parsed.as_str(), "down");
    }
}
