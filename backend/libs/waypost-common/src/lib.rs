//! Waypost Common Library
//!
//! Shared domain entities for the Waypost backend services.
//! Posts, comments, author profiles, and vote state are read-only to the
//! feed and notification cores; persistence lives upstream.

pub mod models;

pub use models::{
    AuthorProfile, Comment, GeoPoint, Post, VoteState, UNKNOWN_USER,
};
