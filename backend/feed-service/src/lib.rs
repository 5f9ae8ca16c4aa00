//! Waypost Feed Service
//!
//! Feed assembly core for the Waypost platform. Interchangeable
//! strategies turn candidate posts plus a query descriptor into a
//! filtered, sorted, paginated page of enriched rows. The embedding API
//! layer provides routing and authentication and wires in the
//! collaborator clients from `waypost_clients` (typically via
//! `waypost_clients::ClientSet`).

pub mod error;
pub mod models;
pub mod services;

pub use error::{AppError, Result};
pub use models::{FeedKind, FeedQuery, FeedRow, Page, PageRequest};
pub use services::FeedOrchestrator;
