// Domain layer - Entities and pure aggregation logic
pub mod analytics;
pub mod error;
pub mod filter;
pub mod order;
pub mod ranking;
pub mod restaurant;
