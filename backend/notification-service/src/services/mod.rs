//! Service layer for notification aggregation

pub mod aggregator;

pub use aggregator::NotificationAggregator;
