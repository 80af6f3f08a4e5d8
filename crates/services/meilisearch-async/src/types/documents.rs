use serde::Serialize;

/// Pagination and projection for listing documents
#[derive(Debug, Clone, Default, Serialize)]
pub struct DocumentsQuery {
    /// Number of documents to skip
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    /// Maximum number of documents to return
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Comma-separated attributes to return
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,
}

impl DocumentsQuery {
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

    /// Restricts returned attributes
    #[must_use]
    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = fields
            .into_iter()
            .map(|f| f.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(",");
        self.fields = Some(joined);
        self
    }
}

/// Query string carrying the optional `primaryKey` for document writes
#[derive(Debug, Clone, Default, Serialize)]
pub(crate) struct PrimaryKeyQuery<'a> {
    #[serde(rename = "primaryKey", skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<&'a str>,
}
