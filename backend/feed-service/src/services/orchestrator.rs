//! Feed orchestration: validation, strategy dispatch, and enrichment
//!
//! The orchestrator is the one entry point the API layer calls. It
//! validates the request, picks a strategy by tag, supplies the
//! candidate posts and author profiles the strategy wants, and attaches
//! the requester's vote state to the resulting page.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use waypost_clients::{
    CategoryDirectory, ClientSet, ContentDirectory, ProfileDirectory, SocialGraph, VoteDirectory,
};
use waypost_common::{AuthorProfile, Post};

use crate::error::{AppError, Result};
use crate::models::{FeedKind, FeedQuery, FeedRow, Page};
use crate::services::strategies::{
    DistanceFeedStrategy, FeedStrategy, FollowingFeedStrategy, TimestampFeedStrategy,
};

pub struct FeedOrchestrator {
    content: Arc<dyn ContentDirectory>,
    profiles: Arc<dyn ProfileDirectory>,
    categories: Arc<dyn CategoryDirectory>,
    votes: Arc<dyn VoteDirectory>,
    strategies: Vec<Box<dyn FeedStrategy>>,
}

impl FeedOrchestrator {
    pub fn new(
        content: Arc<dyn ContentDirectory>,
        profiles: Arc<dyn ProfileDirectory>,
        categories: Arc<dyn CategoryDirectory>,
        votes: Arc<dyn VoteDirectory>,
        social: Arc<dyn SocialGraph>,
    ) -> Self {
        let strategies: Vec<Box<dyn FeedStrategy>> = vec![
            Box::new(DistanceFeedStrategy),
            Box::new(TimestampFeedStrategy),
            Box::new(FollowingFeedStrategy::new(social, Arc::clone(&content))),
        ];

        Self {
            content,
            profiles,
            categories,
            votes,
            strategies,
        }
    }

    /// Wire the orchestrator straight to the shipped HTTP clients.
    pub fn from_clients(clients: &ClientSet) -> Self {
        Self::new(
            clients.content(),
            clients.profiles(),
            clients.categories(),
            clients.votes(),
            clients.social(),
        )
    }

    /// Assemble one feed page.
    ///
    /// `feed_type` is the request-supplied tag, matched case-insensitively
    /// against the known strategies; a missing or unrecognized tag is a
    /// validation failure, as is an unknown category name in the filter.
    pub async fn get_feed(
        &self,
        query: FeedQuery,
        feed_type: Option<&str>,
    ) -> Result<Page<FeedRow>> {
        let tag = feed_type
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::Validation("feed type is required".to_string()))?;

        let kind = FeedKind::parse(tag)
            .ok_or_else(|| AppError::Validation(format!("unrecognized feed type '{}'", tag)))?;

        self.validate_categories(&query).await?;

        let (candidates, profiles) = match kind {
            // The following strategy fetches its own candidates and
            // enriches from the following list itself.
            FeedKind::Following => (Vec::new(), HashMap::new()),
            FeedKind::Distance | FeedKind::Timestamp => {
                let posts = self.content.fetch_all_posts().await?;
                let profiles = self.fetch_author_profiles(&posts).await;
                (posts, profiles)
            }
        };

        let strategy = self.strategy_for(kind);
        let page = strategy.process_feed(candidates, &query, &profiles).await?;
        let page = self.attach_votes(query.requester_id, page).await;

        info!(
            "Feed assembled: kind={} page={} rows={} total={}",
            kind.as_str(),
            page.page_index,
            page.content.len(),
            page.total_elements
        );

        Ok(page)
    }

    fn strategy_for(&self, kind: FeedKind) -> &dyn FeedStrategy {
        // The constructor registers every FeedKind, so the lookup
        // always succeeds.
        self.strategies
            .iter()
            .find(|strategy| strategy.kind() == kind)
            .map(|strategy| strategy.as_ref())
            .unwrap_or_else(|| unreachable!("no strategy registered for {}", kind.as_str()))
    }

    /// Fail-fast on the first unknown category name. An empty or absent
    /// filter skips validation entirely; the collaborator is never
    /// called.
    async fn validate_categories(&self, query: &FeedQuery) -> Result<()> {
        let Some(names) = query.category_filter() else {
            return Ok(());
        };

        for name in names {
            if !self.categories.category_exists(name).await? {
                return Err(AppError::InvalidPostData(format!(
                    "unknown category '{}'",
                    name
                )));
            }
        }

        Ok(())
    }

    /// Batch-fetch profiles for the distinct author set of the candidate
    /// posts. A failed fetch degrades to an empty map; rows fall back to
    /// the placeholder instead of the request failing.
    async fn fetch_author_profiles(&self, posts: &[Post]) -> HashMap<Uuid, AuthorProfile> {
        let author_ids: Vec<Uuid> = posts
            .iter()
            .map(|post| post.author_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        if author_ids.is_empty() {
            return HashMap::new();
        }

        match self.profiles.fetch_profiles(&author_ids).await {
            Ok(map) => map,
            Err(e) => {
                warn!(
                    "Failed to fetch author profiles (continuing without author info): {}",
                    e
                );
                HashMap::new()
            }
        }
    }

    /// Attach the requester's vote state to each row of the page. A
    /// failed fetch degrades to no votes.
    async fn attach_votes(&self, requester_id: Uuid, page: Page<FeedRow>) -> Page<FeedRow> {
        if page.content.is_empty() {
            return page;
        }

        let post_ids: Vec<Uuid> = page.content.iter().map(|row| row.post_id).collect();
        let votes = match self.votes.vote_states(requester_id, &post_ids).await {
            Ok(map) => map,
            Err(e) => {
                warn!(
                    "Failed to fetch vote states (continuing without votes): {}",
                    e
                );
                HashMap::new()
            }
        };

        page.map(|mut row| {
            row.my_vote = votes.get(&row.post_id).copied();
            row
        })
    }
}
