#![deny(warnings)]
#![deny(clippy::all)]
#![deny(missing_docs)]

//! # `copper-async`
//!
//! Async Copper CRM API client: typed People, Companies, Opportunities and Tasks,
//! batch and related-record helpers, and rate-limit-aware retries.
//!
//! ## Quick Start
//!
//! ```no_run
//! use copper_async::{Client, CopperConfig, types::{ListRequest, Person}};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_config(
//!     CopperConfig::new()
//!         .with_api_key("key")
//!         .with_user_email("me@example.com"),
//! );
//!
//! let created = client.people().create(&Person::new("Ada Lovelace")).await?;
//! let page = client.people().list(&ListRequest::default()).await?;
//! # let _ = (created, page);
//! # Ok(())
//! # }
//! ```
//!
//! ## Batches
//!
//! Batch calls run one request per record and report each outcome instead of
//! failing the call:
//!
//! ```no_run
//! use copper_async::{Client, types::{BatchOptions, Company}};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::new();
//! let report = client
//!     .batch()
//!     .create(&[Company::new("Acme"), Company::new("Globex")], BatchOptions::default())
//!     .await?;
//! println!("{} of {} created", report.summary.succeeded, report.summary.total);
//! # Ok(())
//! # }
//! ```
//!
//! ## Authentication
//!
//! Copper authenticates with an API key plus the email of the user who owns it.
//! See [`CopperConfig`] for the environment variables that are read.

/// HTTP client implementation
pub mod client;
/// Configuration types for the client
pub mod config;
/// Error types
pub mod error;
/// API resource implementations
pub mod resources;
/// Retry logic utilities
pub mod retry;
/// Test support utilities (for use in tests)
#[doc(hidden)]
pub mod test_support;
/// Request and response types
pub mod types;

pub use crate::client::Client;
pub use crate::config::CopperConfig;
pub use crate::error::{ApiErrorObject, CopperError, ErrorCode};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::types::*;
    pub use crate::{Client, CopperConfig, CopperError};
}
