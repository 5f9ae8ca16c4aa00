//! HTTP/JSON realization of the collaborator contracts
//!
//! One reqwest-backed client per upstream service, all sharing a single
//! connection pool. The clients perform no retries; degradation policy
//! lives with the callers.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use waypost_common::{AuthorProfile, Comment, Post, VoteState};

use crate::config::ClientConfig;
use crate::contracts::{
    CategoryDirectory, CommentDirectory, ContentDirectory, ProfileDirectory, SocialGraph,
    VoteDirectory,
};
use crate::error::{ClientError, ClientResult};

// ============================================================================
// SHARED TRANSPORT
// ============================================================================

/// reqwest plumbing for one upstream service at a base URL.
#[derive(Clone)]
struct ServiceEndpoint {
    client: Client,
    base_url: String,
}

impl ServiceEndpoint {
    fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get_json<Res>(&self, path: &str, query: &[(&str, String)]) -> ClientResult<Res>
    where
        Res: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        Self::decode(url, response).await
    }

    async fn post_json<Req, Res>(&self, path: &str, body: &Req) -> ClientResult<Res>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        Self::decode(url, response).await
    }

    async fn decode<Res>(url: String, response: reqwest::Response) -> ClientResult<Res>
    where
        Res: DeserializeOwned,
    {
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        response
            .json::<Res>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}

// ============================================================================
// WIRE DTOS
// ============================================================================

#[derive(Serialize)]
struct IdBatch<'a> {
    ids: &'a [Uuid],
}

#[derive(Serialize)]
struct VoteStatesRequest<'a> {
    user_id: Uuid,
    post_ids: &'a [Uuid],
}

#[derive(Serialize)]
struct SiblingRepliesRequest<'a> {
    user_id: Uuid,
    parent_comment_ids: &'a [Uuid],
    since: DateTime<Utc>,
}

#[derive(Deserialize)]
struct ExistsResponse {
    exists: bool,
}

// ============================================================================
// PER-SERVICE CLIENTS
// ============================================================================

/// Content service client.
pub struct HttpContentDirectory {
    endpoint: ServiceEndpoint,
}

impl HttpContentDirectory {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            endpoint: ServiceEndpoint::new(client, base_url),
        }
    }
}

#[async_trait]
impl ContentDirectory for HttpContentDirectory {
    async fn fetch_all_posts(&self) -> ClientResult<Vec<Post>> {
        self.endpoint.get_json("/api/v1/posts", &[]).await
    }

    async fn fetch_posts_by_authors(&self, author_ids: &[Uuid]) -> ClientResult<Vec<Post>> {
        self.endpoint
            .post_json("/api/v1/posts/by-authors", &IdBatch { ids: author_ids })
            .await
    }

    async fn fetch_posts_by_ids(&self, ids: &[Uuid]) -> ClientResult<Vec<Post>> {
        self.endpoint
            .post_json("/api/v1/posts/by-ids", &IdBatch { ids })
            .await
    }
}

/// Profile service client.
pub struct HttpProfileDirectory {
    endpoint: ServiceEndpoint,
}

impl HttpProfileDirectory {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            endpoint: ServiceEndpoint::new(client, base_url),
        }
    }
}

#[async_trait]
impl ProfileDirectory for HttpProfileDirectory {
    async fn fetch_profiles(&self, ids: &[Uuid]) -> ClientResult<HashMap<Uuid, AuthorProfile>> {
        self.endpoint
            .post_json("/api/v1/profiles/batch", &IdBatch { ids })
            .await
    }
}

/// Social service client.
pub struct HttpSocialGraph {
    endpoint: ServiceEndpoint,
}

impl HttpSocialGraph {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            endpoint: ServiceEndpoint::new(client, base_url),
        }
    }
}

#[async_trait]
impl SocialGraph for HttpSocialGraph {
    async fn fetch_following(&self, user_id: Uuid) -> ClientResult<Vec<AuthorProfile>> {
        let path = format!("/api/v1/users/{}/following", user_id);
        self.endpoint.get_json(&path, &[]).await
    }
}

/// Category service client.
pub struct HttpCategoryDirectory {
    endpoint: ServiceEndpoint,
}

impl HttpCategoryDirectory {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            endpoint: ServiceEndpoint::new(client, base_url),
        }
    }
}

#[async_trait]
impl CategoryDirectory for HttpCategoryDirectory {
    async fn category_exists(&self, name: &str) -> ClientResult<bool> {
        let response: ExistsResponse = self
            .endpoint
            .get_json(
                "/api/v1/categories/exists",
                &[("name", name.to_string())],
            )
            .await?;
        Ok(response.exists)
    }
}

/// Vote service client.
pub struct HttpVoteDirectory {
    endpoint: ServiceEndpoint,
}

impl HttpVoteDirectory {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            endpoint: ServiceEndpoint::new(client, base_url),
        }
    }
}

#[async_trait]
impl VoteDirectory for HttpVoteDirectory {
    async fn vote_states(
        &self,
        user_id: Uuid,
        post_ids: &[Uuid],
    ) -> ClientResult<HashMap<Uuid, VoteState>> {
        self.endpoint
            .post_json(
                "/api/v1/votes/states",
                &VoteStatesRequest { user_id, post_ids },
            )
            .await
    }
}

/// Comment service client.
pub struct HttpCommentDirectory {
    endpoint: ServiceEndpoint,
}

impl HttpCommentDirectory {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            endpoint: ServiceEndpoint::new(client, base_url),
        }
    }

    fn since_query(user_id: Uuid, since: DateTime<Utc>) -> [(&'static str, String); 2] {
        [
            ("user_id", user_id.to_string()),
            ("since", since.to_rfc3339()),
        ]
    }
}

#[async_trait]
impl CommentDirectory for HttpCommentDirectory {
    async fn comments_on_user_posts_since(
        &self,
        user_id: Uuid,
        since: DateTime<Utc>,
    ) -> ClientResult<Vec<Comment>> {
        self.endpoint
            .get_json(
                "/api/v1/comments/on-user-posts",
                &Self::since_query(user_id, since),
            )
            .await
    }

    async fn replies_to_user_comments_since(
        &self,
        user_id: Uuid,
        since: DateTime<Utc>,
    ) -> ClientResult<Vec<Comment>> {
        self.endpoint
            .get_json(
                "/api/v1/comments/replies-to-user-comments",
                &Self::since_query(user_id, since),
            )
            .await
    }

    async fn user_replies_since(
        &self,
        user_id: Uuid,
        since: DateTime<Utc>,
    ) -> ClientResult<Vec<Comment>> {
        self.endpoint
            .get_json(
                "/api/v1/comments/user-replies",
                &Self::since_query(user_id, since),
            )
            .await
    }

    async fn sibling_replies_since(
        &self,
        user_id: Uuid,
        parent_comment_ids: &[Uuid],
        since: DateTime<Utc>,
    ) -> ClientResult<Vec<Comment>> {
        self.endpoint
            .post_json(
                "/api/v1/comments/sibling-replies",
                &SiblingRepliesRequest {
                    user_id,
                    parent_comment_ids,
                    since,
                },
            )
            .await
    }

    async fn fetch_comments_by_ids(&self, ids: &[Uuid]) -> ClientResult<Vec<Comment>> {
        self.endpoint
            .post_json("/api/v1/comments/by-ids", &IdBatch { ids })
            .await
    }
}

// ============================================================================
// CLIENT SET
// ============================================================================

/// One client per collaborator contract, sharing a single reqwest
/// connection pool. The embedding API layer builds this once at startup
/// and hands the trait objects to the cores.
#[derive(Clone)]
pub struct ClientSet {
    content: Arc<dyn ContentDirectory>,
    profiles: Arc<dyn ProfileDirectory>,
    social: Arc<dyn SocialGraph>,
    categories: Arc<dyn CategoryDirectory>,
    votes: Arc<dyn VoteDirectory>,
    comments: Arc<dyn CommentDirectory>,
}

impl ClientSet {
    /// Create a new client set from configuration
    pub fn new(config: &ClientConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let client = config.build_client()?;

        Ok(Self {
            content: Arc::new(HttpContentDirectory::new(
                client.clone(),
                &config.content_service_url,
            )),
            profiles: Arc::new(HttpProfileDirectory::new(
                client.clone(),
                &config.profile_service_url,
            )),
            social: Arc::new(HttpSocialGraph::new(
                client.clone(),
                &config.social_service_url,
            )),
            categories: Arc::new(HttpCategoryDirectory::new(
                client.clone(),
                &config.category_service_url,
            )),
            votes: Arc::new(HttpVoteDirectory::new(
                client.clone(),
                &config.vote_service_url,
            )),
            comments: Arc::new(HttpCommentDirectory::new(
                client,
                &config.comment_service_url,
            )),
        })
    }

    /// Create a new client set from environment configuration
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        Self::new(&ClientConfig::from_env()?)
    }

    // Getters for each collaborator client

    pub fn content(&self) -> Arc<dyn ContentDirectory> {
        Arc::clone(&self.content)
    }

    pub fn profiles(&self) -> Arc<dyn ProfileDirectory> {
        Arc::clone(&self.profiles)
    }

    pub fn social(&self) -> Arc<dyn SocialGraph> {
        Arc::clone(&self.social)
    }

    pub fn categories(&self) -> Arc<dyn CategoryDirectory> {
        Arc::clone(&self.categories)
    }

    pub fn votes(&self) -> Arc<dyn VoteDirectory> {
        Arc::clone(&self.votes)
    }

    pub fn comments(&self) -> Arc<dyn CommentDirectory> {
        Arc::clone(&self.comments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_set_builds_from_development_config() {
        let config = ClientConfig::development();
        assert!(ClientSet::new(&config).is_ok());
    }

    #[test]
    fn endpoint_strips_trailing_slash() {
        let endpoint = ServiceEndpoint::new(Client::new(), "http://localhost:8081/");
        assert_eq!(endpoint.base_url, "http://localhost:8081");
    }
}
