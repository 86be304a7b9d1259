//! API resource implementations for the Copper client

/// Batch create, update and delete
pub mod batch;
/// CRUD and search for each entity collection
pub mod entities;
/// Rate-limit introspection
pub mod rate_limits;
/// Related records and activity history
pub mod related;

pub use batch::Batch;
pub use entities::{Companies, Entities, Opportunities, People, Tasks};
pub use rate_limits::RateLimitsResource;
pub use related::Related;
