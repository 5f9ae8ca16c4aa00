//! Upstream endpoint configuration
//!
//! Manages base URLs and timeouts for all collaborator HTTP calls.
//! Supports environment-based configuration for different deployments.

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Content service endpoint (posts)
    pub content_service_url: String,

    /// Profile service endpoint (user display data)
    pub profile_service_url: String,

    /// Social service endpoint (follow relationships)
    pub social_service_url: String,

    /// Category service endpoint
    pub category_service_url: String,

    /// Vote service endpoint
    pub vote_service_url: String,

    /// Comment service endpoint
    pub comment_service_url: String,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl ClientConfig {
    /// Load configuration from environment variables
    /// Falls back to defaults for development
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            content_service_url: env::var("CONTENT_SERVICE_URL")
                .unwrap_or_else(|_| "http://content-service:8080".to_string()),
            profile_service_url: env::var("PROFILE_SERVICE_URL")
                .unwrap_or_else(|_| "http://profile-service:8080".to_string()),
            social_service_url: env::var("SOCIAL_SERVICE_URL")
                .unwrap_or_else(|_| "http://social-service:8080".to_string()),
            category_service_url: env::var("CATEGORY_SERVICE_URL")
                .unwrap_or_else(|_| "http://category-service:8080".to_string()),
            vote_service_url: env::var("VOTE_SERVICE_URL")
                .unwrap_or_else(|_| "http://vote-service:8080".to_string()),
            comment_service_url: env::var("COMMENT_SERVICE_URL")
                .unwrap_or_else(|_| "http://comment-service:8080".to_string()),
            connect_timeout_secs: env::var("CLIENT_CONNECT_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
            request_timeout_secs: env::var("CLIENT_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        })
    }

    /// Configuration for development/testing
    pub fn development() -> Self {
        Self {
            content_service_url: "http://localhost:8081".to_string(),
            profile_service_url: "http://localhost:8082".to_string(),
            social_service_url: "http://localhost:8083".to_string(),
            category_service_url: "http://localhost:8084".to_string(),
            vote_service_url: "http://localhost:8085".to_string(),
            comment_service_url: "http://localhost:8086".to_string(),
            connect_timeout_secs: 10,
            request_timeout_secs: 30,
        }
    }

    /// Build the shared reqwest client with this configuration's timeouts
    pub fn build_client(&self) -> Result<reqwest::Client, Box<dyn std::error::Error>> {
        Ok(reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .timeout(Duration::from_secs(self.request_timeout_secs))
            .build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn development_config_builds_a_client() {
        let config = ClientConfig::development();
        assert!(config.build_client().is_ok());
        assert_eq!(config.request_timeout_secs, 30);
    }
}
