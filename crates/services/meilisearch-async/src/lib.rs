#![deny(warnings)]
#![deny(clippy::all)]
#![deny(missing_docs)]

//! # `meilisearch-async`
//!
//! Async Meilisearch API client with typed settings operations and task tracking.
//!
//! ## Quick Start
//!
//! ```no_run
//! use meilisearch_async::{Client, MeiliConfig};
//!
//! # async fn example() -> Result<(), meilisearch_async::MeiliError> {
//! let client = Client::with_config(
//!     MeiliConfig::new()
//!         .with_host("http://localhost:7700")
//!         .with_api_key("masterKey"),
//! );
//!
//! let movies = client.index("movies");
//! let task = movies.settings().update_distinct_attribute(Some("title")).await?;
//! task.wait(&client).await?;
//!
//! assert_eq!(
//!     movies.settings().get_distinct_attribute().await?.as_deref(),
//!     Some("title")
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Errors
//!
//! Every failure is a [`MeiliError`]: a server rejection carrying the server's
//! code verbatim, a communication failure (`request to <url> failed, reason: ...`),
//! or a task wait timeout. A task that the server accepted but failed to apply
//! is not an error; it resolves to a [`Task`](types::Task) with `status == Failed`.

/// HTTP client implementation
pub mod client;
/// Configuration types for the client
pub mod config;
/// Error types
pub mod error;
/// API resource implementations
pub mod resources;
/// Test support utilities (for use in tests)
#[doc(hidden)]
pub mod test_support;
/// Request and response types
pub mod types;

pub use crate::client::Client;
pub use crate::config::MeiliConfig;
pub use crate::error::{ApiErrorObject, CommunicationError, ErrorCode, MeiliError};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::resources::settings::{
        DisplayedAttributes, DistinctAttribute, FilterableAttributes, RankingRules,
        SearchableAttributes, Setting, SortableAttributes, StopWords,
    };
    pub use crate::types::*;
    pub use crate::{Client, ErrorCode, MeiliConfig, MeiliError};
}
