//! Service layer for feed assembly
//!
//! Modules:
//! - geo: great-circle distance
//! - filters: reusable post predicates
//! - pagination: in-memory slice-and-wrap paging
//! - strategies: the three feed selection strategies
//! - orchestrator: validation, strategy dispatch, and enrichment

pub mod filters;
pub mod geo;
pub mod orchestrator;
pub mod pagination;
pub mod strategies;

pub use orchestrator::FeedOrchestrator;
pub use strategies::{
    DistanceFeedStrategy, FeedStrategy, FollowingFeedStrategy, TimestampFeedStrategy,
};
