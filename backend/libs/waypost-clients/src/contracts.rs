//! Collaborator contracts consumed by the feed and notification cores
//!
//! The cores depend only on these traits so they stay testable without a
//! network; [`crate::http`] carries the shipped HTTP/JSON realization.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use waypost_common::{AuthorProfile, Comment, Post, VoteState};

use crate::error::ClientResult;

/// Post lookups against the content service.
#[async_trait]
pub trait ContentDirectory: Send + Sync {
    /// Every post on the platform, the candidate set for the distance and
    /// timestamp feeds.
    async fn fetch_all_posts(&self) -> ClientResult<Vec<Post>>;

    /// Posts authored by any of the given users.
    async fn fetch_posts_by_authors(&self, author_ids: &[Uuid]) -> ClientResult<Vec<Post>>;

    /// Posts by id. Missing ids are simply absent from the result.
    async fn fetch_posts_by_ids(&self, ids: &[Uuid]) -> ClientResult<Vec<Post>>;
}

/// Profile lookups against the profile service.
#[async_trait]
pub trait ProfileDirectory: Send + Sync {
    /// Batch profile fetch, keyed by user id. Idempotent; duplicate input
    /// ids collapse to one lookup and missing ids are absent from the map.
    async fn fetch_profiles(&self, ids: &[Uuid]) -> ClientResult<HashMap<Uuid, AuthorProfile>>;
}

/// Follow-relationship lookups against the social service.
#[async_trait]
pub trait SocialGraph: Send + Sync {
    /// Profiles of the users `user_id` follows.
    async fn fetch_following(&self, user_id: Uuid) -> ClientResult<Vec<AuthorProfile>>;
}

/// Category existence checks against the category service.
#[async_trait]
pub trait CategoryDirectory: Send + Sync {
    async fn category_exists(&self, name: &str) -> ClientResult<bool>;
}

/// Vote lookups against the vote service.
#[async_trait]
pub trait VoteDirectory: Send + Sync {
    /// The user's vote on each of the given posts; posts the user has not
    /// voted on are absent from the map.
    async fn vote_states(
        &self,
        user_id: Uuid,
        post_ids: &[Uuid],
    ) -> ClientResult<HashMap<Uuid, VoteState>>;
}

/// Comment-relationship queries against the comment service.
#[async_trait]
pub trait CommentDirectory: Send + Sync {
    /// Comments left on posts authored by `user_id`, created at or after
    /// `since`.
    async fn comments_on_user_posts_since(
        &self,
        user_id: Uuid,
        since: DateTime<Utc>,
    ) -> ClientResult<Vec<Comment>>;

    /// Replies to comments authored by `user_id`, created at or after
    /// `since`.
    async fn replies_to_user_comments_since(
        &self,
        user_id: Uuid,
        since: DateTime<Utc>,
    ) -> ClientResult<Vec<Comment>>;

    /// Replies authored by `user_id` itself, created at or after `since`.
    async fn user_replies_since(
        &self,
        user_id: Uuid,
        since: DateTime<Utc>,
    ) -> ClientResult<Vec<Comment>>;

    /// Replies by other users under the given parent comments, created at
    /// or after `since`. Replies authored by `user_id` are excluded.
    async fn sibling_replies_since(
        &self,
        user_id: Uuid,
        parent_comment_ids: &[Uuid],
        since: DateTime<Utc>,
    ) -> ClientResult<Vec<Comment>>;

    /// Comments by id, for reply parent resolution. Missing ids are
    /// absent from the result.
    async fn fetch_comments_by_ids(&self, ids: &[Uuid]) -> ClientResult<Vec<Comment>>;
}
