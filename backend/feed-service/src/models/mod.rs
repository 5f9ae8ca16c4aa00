use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use waypost_common::{AuthorProfile, GeoPoint, Post, VoteState, UNKNOWN_USER};

/// The three feed selection strategies, dispatched by a request-supplied
/// tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedKind {
    Distance,
    Timestamp,
    Following,
}

impl FeedKind {
    /// Case-insensitive tag parse; `None` for anything unrecognized.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "distance" => Some(FeedKind::Distance),
            "timestamp" => Some(FeedKind::Timestamp),
            "following" => Some(FeedKind::Following),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FeedKind::Distance => "distance",
            FeedKind::Timestamp => "timestamp",
            FeedKind::Following => "following",
        }
    }
}

/// Zero-based page request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageRequest {
    pub index: usize,
    pub size: usize,
}

/// One page of an ordered result set. `total_elements` always reports
/// the full pre-slice length, even for an out-of-range page index.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: usize,
    pub page_index: usize,
    pub page_size: usize,
}

impl<T> Page<T> {
    pub fn empty(page: &PageRequest) -> Self {
        Self {
            content: Vec::new(),
            total_elements: 0,
            page_index: page.index,
            page_size: page.size,
        }
    }

    /// Transform page content without touching the paging metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            page_index: self.page_index,
            page_size: self.page_size,
        }
    }
}

/// Feed request descriptor as assembled by the API layer.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedQuery {
    pub requester_id: Uuid,
    /// Requester coordinates; required by the distance feed only.
    pub origin: Option<GeoPoint>,
    /// Category names to keep; empty or absent means no category filter.
    pub categories: Option<Vec<String>>,
    pub keyword: Option<String>,
    /// Inclusive lower bound on post creation time.
    pub date_from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on post creation time.
    pub date_to: Option<DateTime<Utc>>,
    pub page: PageRequest,
}

impl FeedQuery {
    /// The effective category filter, with "empty list" normalized to
    /// "no filter".
    pub fn category_filter(&self) -> Option<&[String]> {
        self.categories.as_deref().filter(|c| !c.is_empty())
    }
}

/// One enriched row of a feed page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedRow {
    pub post_id: Uuid,
    pub author_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Resolved author display name for rendering.
    pub author_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_picture: Option<String>,
    /// The requester's vote on this post, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub my_vote: Option<VoteState>,
    /// Distance from the requester, attached by the distance feed only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

impl FeedRow {
    /// Build a row from a post plus its author's resolved profile.
    /// A missing profile falls back to the shared placeholder.
    pub fn from_post(post: Post, profile: Option<&AuthorProfile>) -> Self {
        let author_name = profile
            .map(|p| p.display_name_or_unknown())
            .unwrap_or_else(|| UNKNOWN_USER.to_string());
        let author_picture = profile.and_then(|p| p.picture_url.clone());

        Self {
            post_id: post.id,
            author_id: post.author_id,
            title: post.title,
            caption: post.caption,
            category: post.category,
            location: post.location,
            created_at: post.created_at,
            author_name,
            author_picture,
            my_vote: None,
            distance_km: None,
        }
    }

    pub fn with_distance(mut self, distance_km: f64) -> Self {
        self.distance_km = Some(distance_km);
        self
    }
}
