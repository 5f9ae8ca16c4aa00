//! Feed selection strategies
//!
//! Each strategy turns candidate posts plus a query descriptor into one
//! page of enriched rows: filter through the shared predicate chain,
//! sort by the strategy-specific key, slice, attach author display data.
//! Every invocation is a pure function of its inputs plus collaborator
//! responses; no state is shared between requests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};
use uuid::Uuid;

use waypost_clients::{ContentDirectory, SocialGraph};
use waypost_common::{AuthorProfile, Post};

use crate::error::{AppError, Result};
use crate::models::{FeedKind, FeedQuery, FeedRow, Page};
use crate::services::filters;
use crate::services::geo;
use crate::services::pagination::paginate;

/// One interchangeable feed assembly strategy.
///
/// `candidates` and `profiles` are pre-fetched by the orchestrator for
/// the strategies that want the full post table; the following strategy
/// ignores both and fetches its own data.
#[async_trait]
pub trait FeedStrategy: Send + Sync {
    fn kind(&self) -> FeedKind;

    async fn process_feed(
        &self,
        candidates: Vec<Post>,
        query: &FeedQuery,
        profiles: &HashMap<Uuid, AuthorProfile>,
    ) -> Result<Page<FeedRow>>;
}

/// Newest-first ordering with undated posts sorting last. Stable, so
/// ties keep input order.
fn sort_newest_first(posts: &mut [Post]) {
    // Option<DateTime> orders None before Some, so descending puts
    // undated posts at the end.
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

// ============================================================================
// DISTANCE FEED
// ============================================================================

/// Nearest-first feed around the requester's coordinates.
pub struct DistanceFeedStrategy;

#[async_trait]
impl FeedStrategy for DistanceFeedStrategy {
    fn kind(&self) -> FeedKind {
        FeedKind::Distance
    }

    async fn process_feed(
        &self,
        candidates: Vec<Post>,
        query: &FeedQuery,
        profiles: &HashMap<Uuid, AuthorProfile>,
    ) -> Result<Page<FeedRow>> {
        let origin = query.origin.ok_or_else(|| {
            AppError::Validation(
                "requester coordinates are required for the distance feed".to_string(),
            )
        })?;

        // Posts without a location can never appear in a distance page.
        let mut scored: Vec<(Post, f64)> = candidates
            .into_iter()
            .filter(|post| filters::matches_query(post, query))
            .filter_map(|post| {
                let location = post.location?;
                let distance = geo::distance_km(origin, location);
                Some((post, distance))
            })
            .collect();

        scored.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

        debug!("Distance feed: {} posts after filtering", scored.len());

        let page = paginate(scored, &query.page);
        Ok(page.map(|(post, distance)| {
            let profile = profiles.get(&post.author_id);
            FeedRow::from_post(post, profile).with_distance(distance)
        }))
    }
}

// ============================================================================
// TIMESTAMP FEED
// ============================================================================

/// Most-recent-first feed over all posts.
pub struct TimestampFeedStrategy;

#[async_trait]
impl FeedStrategy for TimestampFeedStrategy {
    fn kind(&self) -> FeedKind {
        FeedKind::Timestamp
    }

    async fn process_feed(
        &self,
        candidates: Vec<Post>,
        query: &FeedQuery,
        profiles: &HashMap<Uuid, AuthorProfile>,
    ) -> Result<Page<FeedRow>> {
        let mut filtered: Vec<Post> = candidates
            .into_iter()
            .filter(|post| filters::matches_query(post, query))
            .collect();

        sort_newest_first(&mut filtered);

        debug!("Timestamp feed: {} posts after filtering", filtered.len());

        let page = paginate(filtered, &query.page);
        Ok(page.map(|post| {
            let profile = profiles.get(&post.author_id);
            FeedRow::from_post(post, profile)
        }))
    }
}

// ============================================================================
// FOLLOWING FEED
// ============================================================================

/// Most-recent-first feed over posts by users the requester follows.
///
/// Fetches its own candidates: the following list doubles as the
/// profile source for enrichment, so no separate profile batch-fetch
/// happens here.
pub struct FollowingFeedStrategy {
    social: Arc<dyn SocialGraph>,
    content: Arc<dyn ContentDirectory>,
}

impl FollowingFeedStrategy {
    pub fn new(social: Arc<dyn SocialGraph>, content: Arc<dyn ContentDirectory>) -> Self {
        Self { social, content }
    }
}

#[async_trait]
impl FeedStrategy for FollowingFeedStrategy {
    fn kind(&self) -> FeedKind {
        FeedKind::Following
    }

    async fn process_feed(
        &self,
        _candidates: Vec<Post>,
        query: &FeedQuery,
        _profiles: &HashMap<Uuid, AuthorProfile>,
    ) -> Result<Page<FeedRow>> {
        // A broken social service degrades to an empty feed rather than
        // failing the request.
        let following = match self.social.fetch_following(query.requester_id).await {
            Ok(list) => list,
            Err(e) => {
                warn!(
                    "Failed to fetch following list for {} (returning empty feed): {}",
                    query.requester_id, e
                );
                return Ok(Page::empty(&query.page));
            }
        };

        // Malformed upstream rows surface as nil ids; drop them.
        let followed: HashMap<Uuid, AuthorProfile> = following
            .into_iter()
            .filter(|profile| !profile.id.is_nil())
            .map(|profile| (profile.id, profile))
            .collect();

        if followed.is_empty() {
            debug!("User {} follows nobody, skipping post fetch", query.requester_id);
            return Ok(Page::empty(&query.page));
        }

        let author_ids: Vec<Uuid> = followed.keys().copied().collect();
        let posts = self.content.fetch_posts_by_authors(&author_ids).await?;

        let mut filtered: Vec<Post> = posts
            .into_iter()
            .filter(|post| filters::matches_query(post, query))
            .collect();

        sort_newest_first(&mut filtered);

        debug!(
            "Following feed: {} posts from {} followed users",
            filtered.len(),
            author_ids.len()
        );

        let page = paginate(filtered, &query.page);
        Ok(page.map(|post| {
            let profile = followed.get(&post.author_id);
            FeedRow::from_post(post, profile)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use waypost_common::GeoPoint;

    fn dated_post(created_at: Option<chrono::DateTime<Utc>>) -> Post {
        Post {
            id: Uuid::new_v4(),
            author_id: Uuid::new_v4(),
            title: None,
            caption: None,
            category: None,
            location: Some(GeoPoint::new(0.0, 0.0)),
            created_at,
        }
    }

    #[test]
    fn newest_first_puts_undated_posts_last() {
        let now = Utc::now();
        let today = dated_post(Some(now));
        let yesterday = dated_post(Some(now - Duration::days(1)));
        let undated = dated_post(None);

        let mut posts = vec![undated.clone(), yesterday.clone(), today.clone()];
        sort_newest_first(&mut posts);

        assert_eq!(posts[0].id, today.id);
        assert_eq!(posts[1].id, yesterday.id);
        assert_eq!(posts[2].id, undated.id);
    }

    #[test]
    fn newest_first_is_stable_for_equal_timestamps() {
        let now = Utc::now();
        let first = dated_post(Some(now));
        let second = dated_post(Some(now));

        let mut posts = vec![first.clone(), second.clone()];
        sort_newest_first(&mut posts);

        assert_eq!(posts[0].id, first.id);
        assert_eq!(posts[1].id, second.id);
    }

    #[tokio::test]
    async fn distance_feed_requires_requester_coordinates() {
        let query = FeedQuery {
            requester_id: Uuid::new_v4(),
            origin: None,
            categories: None,
            keyword: None,
            date_from: None,
            date_to: None,
            page: crate::models::PageRequest { index: 0, size: 10 },
        };

        let result = DistanceFeedStrategy
            .process_feed(Vec::new(), &query, &HashMap::new())
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
