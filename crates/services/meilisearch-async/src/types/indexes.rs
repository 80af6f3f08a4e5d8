use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Index metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexInfo {
    /// Index identifier
    pub uid: String,
    /// Primary key, once set or inferred
    #[serde(default)]
    pub primary_key: Option<String>,
    /// Creation timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of `POST /indexes`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIndexRequest {
    /// Index identifier
    pub uid: String,
    /// Optional primary key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<String>,
}

/// Body of `PATCH /indexes/{uid}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIndexRequest {
    /// New primary key
    pub primary_key: String,
}

/// Pagination for listing indexes
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct IndexesQuery {
    /// Number of indexes to skip
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    /// Maximum number of indexes to return
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl IndexesQuery {
    /// Creates a query using server defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the offset
    #[must_use]
    pub const fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Sets the limit
    #[must_use]
    pub const fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Offset-paginated list envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items of this page
    pub results: Vec<T>,
    /// Offset used
    #[serde(default)]
    pub offset: u32,
    /// Limit used
    #[serde(default)]
    pub limit: u32,
    /// Total number of items
    #[serde(default)]
    pub total: u64,
}
