//! Request and response types for the Meilisearch API

/// Document query types
pub mod documents;
/// Index types and list envelopes
pub mod indexes;
/// Whole-index settings object
pub mod settings;
/// Task types and wait options
pub mod tasks;

pub use documents::DocumentsQuery;
pub use indexes::{CreateIndexRequest, IndexInfo, IndexesQuery, Page, UpdateIndexRequest};
pub use settings::Settings;
pub use tasks::{EnqueuedTask, Task, TaskStatus, TasksPage, TasksQuery, WaitOptions};
