//! Waypost Clients Library
//!
//! Collaborator contracts consumed by the feed and notification cores,
//! plus the HTTP/JSON clients that realize them against the platform's
//! upstream services. The cores depend only on the traits in
//! [`contracts`]; the clients in [`http`] are wired in by the embedding
//! API layer.

pub mod config;
pub mod contracts;
pub mod error;
pub mod http;

pub use config::ClientConfig;
pub use contracts::{
    CategoryDirectory, CommentDirectory, ContentDirectory, ProfileDirectory, SocialGraph,
    VoteDirectory,
};
pub use error::{ClientError, ClientResult};
pub use http::ClientSet;
