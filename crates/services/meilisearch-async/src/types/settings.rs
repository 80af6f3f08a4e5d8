use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// All settings of an index
///
/// On update only the fields that are `Some` are sent; the others keep their
/// current value on the server. `None` therefore means "leave as is", never
/// "clear": clearing goes through the per-setting `clear`/`reset` calls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Attribute used to deduplicate results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distinct_attribute: Option<String>,
    /// Attributes usable in filter expressions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filterable_attributes: Option<Vec<String>>,
    /// Attributes usable for sorting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sortable_attributes: Option<Vec<String>>,
    /// Attributes searched, in order of importance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub searchable_attributes: Option<Vec<String>>,
    /// Attributes returned in documents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub displayed_attributes: Option<Vec<String>>,
    /// Ranking rules, in order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ranking_rules: Option<Vec<String>>,
    /// Words ignored at query time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_words: Option<Vec<String>>,
    /// Word to equivalent words
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synonyms: Option<BTreeMap<String, Vec<String>>>,
}

impl Settings {
    /// Creates an empty settings patch
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the distinct attribute
    #[must_use]
    pub fn with_distinct_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.distinct_attribute = Some(attribute.into());
        self
    }

    /// Sets the filterable attributes
    #[must_use]
    pub fn with_filterable_attributes<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filterable_attributes = Some(attributes.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the sortable attributes
    #[must_use]
    pub fn with_sortable_attributes<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sortable_attributes = Some(attributes.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the searchable attributes
    #[must_use]
    pub fn with_searchable_attributes<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.searchable_attributes = Some(attributes.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the stop words
    #[must_use]
    pub fn with_stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop_words = Some(words.into_iter().map(Into::into).collect());
        self
    }
}
