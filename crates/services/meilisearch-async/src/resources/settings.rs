//! Per-index settings.
//!
//! Each setting is a marker type implementing [`Setting`]; one generic
//! get/update/clear/reset implementation serves all of them.

use reqwest::Method;
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    config::Config,
    error::MeiliError,
    resources::indexes::Index,
    types::{settings::Settings, tasks::EnqueuedTask},
};

/// Shape of a setting's value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKind {
    /// A single nullable string
    Scalar,
    /// An ordered list of strings
    Sequence,
}

/// A named, independently gettable/updatable/resettable index setting
///
/// ```
/// use meilisearch_async::prelude::*;
/// use meilisearch_async::resources::SettingKind;
///
/// assert_eq!(DistinctAttribute::KIND, SettingKind::Scalar);
/// assert_eq!(DistinctAttribute::default_value(), None);
///
/// assert_eq!(StopWords::KIND, SettingKind::Sequence);
/// assert!(StopWords::default_value().is_empty());
/// ```
pub trait Setting {
    /// Path below `indexes/{uid}/settings/`
    const PATH: &'static str;
    /// Value shape
    const KIND: SettingKind;
    /// Method used to update the setting
    const UPDATE_METHOD: Method = Method::POST;
    /// Value sent on update
    type Value: Serialize + Sync + ?Sized;
    /// Value read back
    type Current: DeserializeOwned;

    /// Value the server reports when the setting was never set, or after a reset
    fn default_value() -> Self::Current;
}

/// Deduplicate results sharing the same value of one attribute
#[derive(Debug, Clone, Copy)]
pub struct DistinctAttribute;

impl Setting for DistinctAttribute {
    const PATH: &'static str = "distinct-attribute";
    const KIND: SettingKind = SettingKind::Scalar;
    type Value = str;
    type Current = Option<String>;

    fn default_value() -> Self::Current {
        None
    }
}

macro_rules! sequence_setting {
    ($(#[$doc:meta])* $name:ident, $path:literal, [$($default:literal),*]) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy)]
        pub struct $name;

        impl Setting for $name {
            const PATH: &'static str = $path;
            const KIND: SettingKind = SettingKind::Sequence;
            type Value = [String];
            type Current = Vec<String>;

            fn default_value() -> Self::Current {
                vec![$($default.to_string()),*]
            }
        }
    };
}

sequence_setting!(
    /// Attributes usable in filter expressions
    FilterableAttributes,
    "filterable-attributes",
    []
);
sequence_setting!(
    /// Attributes usable for sorting
    SortableAttributes,
    "sortable-attributes",
    []
);
sequence_setting!(
    /// Attributes searched, in order of importance
    SearchableAttributes,
    "searchable-attributes",
    ["*"]
);
sequence_setting!(
    /// Attributes returned in documents
    DisplayedAttributes,
    "displayed-attributes",
    ["*"]
);
sequence_setting!(
    /// Words ignored at query time
    StopWords,
    "stop-words",
    []
);
sequence_setting!(
    /// Ranking rules, in order
    RankingRules,
    "ranking-rules",
    ["words", "typo", "proximity", "attribute", "sort", "exactness"]
);

/// API resource for the `/indexes/{uid}/settings` endpoints
///
/// Mutations return an [`EnqueuedTask`] as soon as the server accepts them;
/// wait on it before reading the new value back.
pub struct IndexSettings<'i, 'c, C: Config> {
    index: &'i Index<'c, C>,
}

impl<'i, 'c, C: Config> IndexSettings<'i, 'c, C> {
    /// Creates a new settings resource
    #[must_use]
    pub const fn new(index: &'i Index<'c, C>) -> Self {
        Self { index }
    }

    fn path<S: Setting>(&self) -> String {
        self.index.path(&format!("settings/{}", S::PATH))
    }

    fn trace_mutation<S: Setting>(&self, action: &'static str) {
        tracing::debug!(
            index = self.index.uid(),
            setting = S::PATH,
            kind = ?S::KIND,
            action,
            "enqueueing setting change"
        );
    }

    /// Reads a setting
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn get<S: Setting>(&self) -> Result<S::Current, MeiliError> {
        self.index.client.get(&self.path::<S>()).await
    }

    /// Enqueues a new value for a setting
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn update<S: Setting>(&self, value: &S::Value) -> Result<EnqueuedTask, MeiliError> {
        self.trace_mutation::<S>("update");
        self.index
            .client
            .request::<(), S::Value, EnqueuedTask>(
                S::UPDATE_METHOD,
                &self.path::<S>(),
                None,
                Some(value),
            )
            .await
    }

    /// Enqueues an update with a `null` value, clearing the setting
    ///
    /// Converges to the same state as [`reset`](Self::reset).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn clear<S: Setting>(&self) -> Result<EnqueuedTask, MeiliError> {
        self.trace_mutation::<S>("clear");
        self.index
            .client
            .request::<(), (), EnqueuedTask>(
                S::UPDATE_METHOD,
                &self.path::<S>(),
                None,
                Some(&()),
            )
            .await
    }

    /// Enqueues a reset of a setting to its default
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn reset<S: Setting>(&self) -> Result<EnqueuedTask, MeiliError> {
        self.trace_mutation::<S>("reset");
        self.index.client.delete(&self.path::<S>()).await
    }

    /// Reads every setting at once
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn all(&self) -> Result<Settings, MeiliError> {
        self.index.client.get(&self.index.path("settings")).await
    }

    /// Enqueues a partial update of the settings; `None` fields are left as is
    ///
    /// A `None` field is left out of the body, so this call can not clear a
    /// single setting. Use [`clear`](Self::clear) or [`reset`](Self::reset)
    /// for that, or [`reset_all`](Self::reset_all) for everything.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn update_all(&self, settings: &Settings) -> Result<EnqueuedTask, MeiliError> {
        self.index
            .client
            .patch(&self.index.path("settings"), settings)
            .await
    }

    /// Enqueues a reset of every setting
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn reset_all(&self) -> Result<EnqueuedTask, MeiliError> {
        self.index.client.delete(&self.index.path("settings")).await
    }

    /// Reads the distinct attribute; `None` when unset
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn get_distinct_attribute(&self) -> Result<Option<String>, MeiliError> {
        self.get::<DistinctAttribute>().await
    }

    /// Sets the distinct attribute; `None` clears it
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn update_distinct_attribute(
        &self,
        attribute: Option<&str>,
    ) -> Result<EnqueuedTask, MeiliError> {
        match attribute {
            Some(a) => self.update::<DistinctAttribute>(a).await,
            None => self.clear::<DistinctAttribute>().await,
        }
    }

    /// Resets the distinct attribute
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn reset_distinct_attribute(&self) -> Result<EnqueuedTask, MeiliError> {
        self.reset::<DistinctAttribute>().await
    }

    /// Reads the filterable attributes; empty when unset
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn get_filterable_attributes(&self) -> Result<Vec<String>, MeiliError> {
        self.get::<FilterableAttributes>().await
    }

    /// Sets the filterable attributes; `None` clears them
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn update_filterable_attributes(
        &self,
        attributes: Option<&[String]>,
    ) -> Result<EnqueuedTask, MeiliError> {
        match attributes {
            Some(a) => self.update::<FilterableAttributes>(a).await,
            None => self.clear::<FilterableAttributes>().await,
        }
    }

    /// Resets the filterable attributes
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn reset_filterable_attributes(&self) -> Result<EnqueuedTask, MeiliError> {
        self.reset::<FilterableAttributes>().await
    }
}

impl<'c, C: Config> Index<'c, C> {
    /// Returns the settings API resource of this index
    #[must_use]
    pub const fn settings(&self) -> IndexSettings<'_, 'c, C> {
        IndexSettings::new(self)
    }
}
