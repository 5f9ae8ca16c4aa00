use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Notification kind enumeration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    /// Someone commented on one of the user's posts
    CommentOnPost,
    /// Someone replied to one of the user's comments
    ReplyToComment,
    /// Someone else replied in a thread the user also replied to
    SiblingReply,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::CommentOnPost => "comment_on_post",
            NotificationKind::ReplyToComment => "reply_to_comment",
            NotificationKind::SiblingReply => "sibling_reply",
        }
    }
}

/// One activity notification, computed fresh per request for the
/// trailing window. Never persisted.
///
/// The post id/title and content fields resolve through entity lookups
/// that may come up empty; a missing hop yields `None` rather than
/// dropping the notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityNotification {
    pub kind: NotificationKind,
    /// The user whose comment or reply produced this notification.
    pub actor_id: Uuid,
    /// Resolved actor display name, placeholder when unresolved.
    pub actor_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor_picture: Option<String>,
    /// Human-readable relative-day string ("Today", "3 days ago").
    pub time_ago: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_title: Option<String>,
    /// The comment thread this notification belongs to: the comment
    /// itself for `CommentOnPost`, the parent comment for reply kinds.
    pub comment_id: Uuid,
    /// The reply row, for reply kinds only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_id: Option<Uuid>,
    /// The actor's comment or reply text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Sort key for the recency merge.
    pub created_at: DateTime<Utc>,
}
