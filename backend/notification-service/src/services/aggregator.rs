//! Notification aggregation
//!
//! Three independent comment-relationship queries feed one merged,
//! recency-sorted notification list: comments on the user's posts,
//! replies to the user's comments, and sibling replies in threads the
//! user participated in. Actor display data and post titles are
//! enrichment; their lookups degrade to placeholders or `None` rather
//! than failing the request.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use waypost_clients::{ClientSet, CommentDirectory, ContentDirectory, ProfileDirectory};
use waypost_common::{AuthorProfile, Comment, Post, UNKNOWN_USER};

use crate::config::Config;
use crate::error::Result;
use crate::models::{ActivityNotification, NotificationKind};

pub struct NotificationAggregator {
    comments: Arc<dyn CommentDirectory>,
    content: Arc<dyn ContentDirectory>,
    profiles: Arc<dyn ProfileDirectory>,
    window_days: i64,
}

/// One notification-worthy comment row before enrichment.
struct RawEvent {
    kind: NotificationKind,
    actor_id: Uuid,
    /// The thread comment: the comment itself for `CommentOnPost`, the
    /// parent comment for reply kinds.
    comment_id: Uuid,
    reply_id: Option<Uuid>,
    /// Direct post link, present for `CommentOnPost` only; reply kinds
    /// resolve their post through the parent comment.
    post_id: Option<Uuid>,
    content: Option<String>,
    created_at: DateTime<Utc>,
}

impl NotificationAggregator {
    pub fn new(
        comments: Arc<dyn CommentDirectory>,
        content: Arc<dyn ContentDirectory>,
        profiles: Arc<dyn ProfileDirectory>,
        config: &Config,
    ) -> Self {
        Self {
            comments,
            content,
            profiles,
            window_days: config.window_days,
        }
    }

    /// Wire the aggregator straight to the shipped HTTP clients.
    pub fn from_clients(clients: &ClientSet, config: &Config) -> Self {
        Self::new(
            clients.comments(),
            clients.content(),
            clients.profiles(),
            config,
        )
    }

    /// Compute the user's activity notifications for the trailing
    /// window, most recent first.
    pub async fn get_notifications(&self, user_id: Uuid) -> Result<Vec<ActivityNotification>> {
        let now = Utc::now();
        let since = now - Duration::days(self.window_days);

        // The three primary streams are candidate-fetch; their failures
        // propagate.
        let comments_on_posts = self
            .comments
            .comments_on_user_posts_since(user_id, since)
            .await?;
        let replies_to_comments = self
            .comments
            .replies_to_user_comments_since(user_id, since)
            .await?;
        let own_replies = self.comments.user_replies_since(user_id, since).await?;

        let sibling_replies = self
            .fetch_sibling_replies(user_id, &own_replies, since)
            .await?;

        let mut events: Vec<RawEvent> = Vec::new();
        for comment in comments_on_posts {
            events.push(RawEvent {
                kind: NotificationKind::CommentOnPost,
                actor_id: comment.author_id,
                comment_id: comment.id,
                reply_id: None,
                post_id: comment.post_id,
                content: comment.caption,
                created_at: comment.created_at,
            });
        }
        events.extend(reply_events(
            NotificationKind::ReplyToComment,
            replies_to_comments,
        ));
        events.extend(reply_events(NotificationKind::SiblingReply, sibling_replies));

        let parent_comments = self.fetch_parent_comments(&events).await;
        let posts = self.fetch_posts(&events, &parent_comments).await;
        let actors = self.fetch_actor_profiles(&events).await;

        let mut notifications: Vec<ActivityNotification> = events
            .into_iter()
            .map(|event| enrich(event, &parent_comments, &posts, &actors, now))
            .collect();

        // Stable, so equal timestamps keep per-stream insertion order.
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        info!(
            "Notifications aggregated: user={} count={} window_days={}",
            user_id,
            notifications.len(),
            self.window_days
        );

        Ok(notifications)
    }

    /// Sibling replies exist only for threads the user replied to, so
    /// an empty own-reply set skips the query entirely.
    async fn fetch_sibling_replies(
        &self,
        user_id: Uuid,
        own_replies: &[Comment],
        since: DateTime<Utc>,
    ) -> Result<Vec<Comment>> {
        let parent_ids: Vec<Uuid> = own_replies
            .iter()
            .filter_map(|reply| reply.parent_comment_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        if parent_ids.is_empty() {
            debug!("User {} has no recent replies, skipping sibling query", user_id);
            return Ok(Vec::new());
        }

        let siblings = self
            .comments
            .sibling_replies_since(user_id, &parent_ids, since)
            .await?;

        // The contract already excludes the user's own replies; drop
        // any that slip through anyway.
        Ok(siblings
            .into_iter()
            .filter(|reply| reply.author_id != user_id)
            .collect())
    }

    /// Parent comments for the reply-kind events, one batch lookup. A
    /// failed fetch degrades to no resolution (post fields stay `None`).
    async fn fetch_parent_comments(&self, events: &[RawEvent]) -> HashMap<Uuid, Comment> {
        let parent_ids: Vec<Uuid> = events
            .iter()
            .filter(|event| event.reply_id.is_some())
            .map(|event| event.comment_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        if parent_ids.is_empty() {
            return HashMap::new();
        }

        match self.comments.fetch_comments_by_ids(&parent_ids).await {
            Ok(comments) => comments
                .into_iter()
                .map(|comment| (comment.id, comment))
                .collect(),
            Err(e) => {
                warn!(
                    "Failed to fetch parent comments (continuing without post links): {}",
                    e
                );
                HashMap::new()
            }
        }
    }

    /// Posts for title resolution, one batch lookup across every event
    /// with a resolvable post id. Degrades to no titles on failure.
    async fn fetch_posts(
        &self,
        events: &[RawEvent],
        parent_comments: &HashMap<Uuid, Comment>,
    ) -> HashMap<Uuid, Post> {
        let post_ids: Vec<Uuid> = events
            .iter()
            .filter_map(|event| resolve_post_id(event, parent_comments))
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        if post_ids.is_empty() {
            return HashMap::new();
        }

        match self.content.fetch_posts_by_ids(&post_ids).await {
            Ok(posts) => posts.into_iter().map(|post| (post.id, post)).collect(),
            Err(e) => {
                warn!("Failed to fetch posts (continuing without titles): {}", e);
                HashMap::new()
            }
        }
    }

    /// Deduplicated actor profiles across all three streams, one batch
    /// call. On failure every actor falls back to the placeholder;
    /// notifications are never dropped.
    async fn fetch_actor_profiles(&self, events: &[RawEvent]) -> HashMap<Uuid, AuthorProfile> {
        let actor_ids: Vec<Uuid> = events
            .iter()
            .map(|event| event.actor_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        if actor_ids.is_empty() {
            return HashMap::new();
        }

        match self.profiles.fetch_profiles(&actor_ids).await {
            Ok(map) => map,
            Err(e) => {
                warn!(
                    "Failed to fetch actor profiles (continuing with placeholders): {}",
                    e
                );
                HashMap::new()
            }
        }
    }
}

/// Raw events for a batch of reply rows. Rows without a parent comment
/// link are malformed upstream data and are dropped.
fn reply_events(kind: NotificationKind, replies: Vec<Comment>) -> Vec<RawEvent> {
    replies
        .into_iter()
        .filter_map(|reply| {
            let parent_id = reply.parent_comment_id?;
            Some(RawEvent {
                kind,
                actor_id: reply.author_id,
                comment_id: parent_id,
                reply_id: Some(reply.id),
                post_id: None,
                content: reply.caption,
                created_at: reply.created_at,
            })
        })
        .collect()
}

/// The post an event belongs to: direct for `CommentOnPost`, through
/// the parent comment for reply kinds. `None` when a hop is missing.
fn resolve_post_id(event: &RawEvent, parent_comments: &HashMap<Uuid, Comment>) -> Option<Uuid> {
    match event.post_id {
        Some(id) => Some(id),
        None => parent_comments
            .get(&event.comment_id)
            .and_then(|parent| parent.post_id),
    }
}

fn enrich(
    event: RawEvent,
    parent_comments: &HashMap<Uuid, Comment>,
    posts: &HashMap<Uuid, Post>,
    actors: &HashMap<Uuid, AuthorProfile>,
    now: DateTime<Utc>,
) -> ActivityNotification {
    let post_id = resolve_post_id(&event, parent_comments);
    let post_title = post_id
        .and_then(|id| posts.get(&id))
        .and_then(|post| post.title.clone());

    let actor = actors.get(&event.actor_id);
    let actor_name = actor
        .map(AuthorProfile::display_name_or_unknown)
        .unwrap_or_else(|| UNKNOWN_USER.to_string());
    let actor_picture = actor.and_then(|profile| profile.picture_url.clone());

    ActivityNotification {
        kind: event.kind,
        actor_id: event.actor_id,
        actor_name,
        actor_picture,
        time_ago: relative_day_label(event.created_at, now),
        post_id,
        post_title,
        comment_id: event.comment_id,
        reply_id: event.reply_id,
        content: event.content,
        created_at: event.created_at,
    }
}

/// Relative-day label by calendar-day delta, not fractional hours: an
/// event late yesterday is "1 day ago" even if it happened less than 24
/// hours ago.
fn relative_day_label(event: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = now
        .date_naive()
        .signed_duration_since(event.date_naive())
        .num_days();

    match days {
        d if d <= 0 => "Today".to_string(),
        1 => "1 day ago".to_string(),
        d => format!("{} days ago", d),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn same_calendar_day_is_today() {
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 18, 0, 0).unwrap();
        let event = Utc.with_ymd_and_hms(2024, 5, 10, 17, 50, 0).unwrap();

        assert_eq!(relative_day_label(event, now), "Today");
    }

    #[test]
    fn previous_calendar_day_is_one_day_ago_even_at_exactly_24_hours() {
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap();
        let event = Utc.with_ymd_and_hms(2024, 5, 9, 12, 0, 0).unwrap();

        assert_eq!(relative_day_label(event, now), "1 day ago");
    }

    #[test]
    fn late_yesterday_is_one_day_ago_despite_under_24_hours() {
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 0, 30, 0).unwrap();
        let event = Utc.with_ymd_and_hms(2024, 5, 9, 23, 45, 0).unwrap();

        assert_eq!(relative_day_label(event, now), "1 day ago");
    }

    #[test]
    fn older_events_report_calendar_day_delta() {
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap();
        let event = Utc.with_ymd_and_hms(2024, 5, 3, 23, 0, 0).unwrap();

        assert_eq!(relative_day_label(event, now), "7 days ago");
    }

    #[test]
    fn reply_rows_without_parent_link_are_dropped() {
        let reply = Comment {
            id: Uuid::new_v4(),
            post_id: None,
            author_id: Uuid::new_v4(),
            caption: Some("orphan".to_string()),
            parent_comment_id: None,
            created_at: Utc::now(),
        };

        let events = reply_events(NotificationKind::ReplyToComment, vec![reply]);
        assert!(events.is_empty());
    }
}
