//! Request and response types for the Copper API

/// Batch operation types
pub mod batch;
/// Shared types used across endpoints
pub mod common;
/// Company types
pub mod companies;
/// The entity trait and kinds
pub mod entity;
/// Opportunity types
pub mod opportunities;
/// Person types
pub mod people;
/// Rate-limit introspection types
pub mod rate_limits;
/// Related-record and activity types
pub mod related;
/// Task types
pub mod tasks;

pub use batch::{BatchItemError, BatchItemResult, BatchOptions, BatchResponse, BatchSummary, BatchUpdate};
pub use common::*;
pub use companies::Company;
pub use entity::{Entity, EntityKind};
pub use opportunities::{Opportunity, OpportunityFilters, OpportunityStatus};
pub use people::{Person, PersonStatus};
pub use rate_limits::{RateLimitRemaining, RateLimits, ResetAt};
pub use related::{
    Activity, ActivityKind, ActivityQuery, ActivityQueryBuilder, ActivityType, Page, PageMetadata,
    PageRequest, RelatedKind, RelatedRecords,
};
pub use tasks::{RelatedResource, Task, TaskFilters, TaskStatus};
