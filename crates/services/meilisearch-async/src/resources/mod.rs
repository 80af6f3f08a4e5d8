//! API resource implementations for the Meilisearch client

/// Documents of an index
pub mod documents;
/// Index lifecycle and the per-index handle
pub mod indexes;
/// Per-index settings
pub mod settings;
/// Task lookup and waiting
pub mod tasks;

pub use documents::Documents;
pub use indexes::{Index, Indexes};
pub use settings::{
    DisplayedAttributes, DistinctAttribute, FilterableAttributes, IndexSettings, RankingRules,
    SearchableAttributes, Setting, SettingKind, SortableAttributes, StopWords,
};
pub use tasks::Tasks;
