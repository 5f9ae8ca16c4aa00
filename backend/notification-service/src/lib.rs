//! Waypost Notification Service
//!
//! Notification aggregation core for the Waypost platform. Derives a
//! user's activity notifications from three independent
//! comment-relationship queries over a trailing window, enriches them
//! with actor display data, and merges them by recency. Nothing is
//! persisted; every request computes the list fresh. The embedding API
//! layer provides routing and authentication and wires in the
//! collaborator clients from `waypost_clients` (typically via
//! `waypost_clients::ClientSet`).

pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
pub use models::{ActivityNotification, NotificationKind};
pub use services::NotificationAggregator;
