use serde::{Serialize, de::DeserializeOwned};

use reqwest::Method;

use crate::{
    config::Config,
    error::MeiliError,
    resources::indexes::Index,
    types::{
        documents::{DocumentsQuery, PrimaryKeyQuery},
        indexes::Page,
        tasks::EnqueuedTask,
    },
};

/// API resource for the `/indexes/{uid}/documents` endpoints
pub struct Documents<'i, 'c, C: Config> {
    index: &'i Index<'c, C>,
}

impl<'i, 'c, C: Config> Documents<'i, 'c, C> {
    /// Creates a new Documents resource
    #[must_use]
    pub const fn new(index: &'i Index<'c, C>) -> Self {
        Self { index }
    }

    /// Adds documents, replacing any existing document with the same id
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn add_or_replace<T: Serialize + Sync>(
        &self,
        documents: &[T],
        primary_key: Option<&str>,
    ) -> Result<EnqueuedTask, MeiliError> {
        self.write(Method::POST, documents, primary_key).await
    }

    /// Adds documents, merging fields into any existing document with the same id
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn add_or_update<T: Serialize + Sync>(
        &self,
        documents: &[T],
        primary_key: Option<&str>,
    ) -> Result<EnqueuedTask, MeiliError> {
        self.write(Method::PUT, documents, primary_key).await
    }

    /// Fetches one document
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn get<T: DeserializeOwned>(&self, id: &str) -> Result<T, MeiliError> {
        self.index
            .client
            .get(&self.index.path(&format!("documents/{id}")))
            .await
    }

    /// Lists documents
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn list<T: DeserializeOwned>(
        &self,
        query: &DocumentsQuery,
    ) -> Result<Page<T>, MeiliError> {
        self.index
            .client
            .get_with_query(&self.index.path("documents"), query)
            .await
    }

    /// Enqueues the deletion of one document
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn delete(&self, id: &str) -> Result<EnqueuedTask, MeiliError> {
        self.index
            .client
            .delete(&self.index.path(&format!("documents/{id}")))
            .await
    }

    /// Enqueues the deletion of every document
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn delete_all(&self) -> Result<EnqueuedTask, MeiliError> {
        self.index.client.delete(&self.index.path("documents")).await
    }

    async fn write<T: Serialize + Sync>(
        &self,
        method: Method,
        documents: &[T],
        primary_key: Option<&str>,
    ) -> Result<EnqueuedTask, MeiliError> {
        let query = PrimaryKeyQuery { primary_key };
        self.index
            .client
            .request(
                method,
                &self.index.path("documents"),
                Some(&query),
                Some(documents),
            )
            .await
    }
}

impl<'c, C: Config> Index<'c, C> {
    /// Returns the Documents API resource of this index
    #[must_use]
    pub const fn documents(&self) -> Documents<'_, 'c, C> {
        Documents::new(self)
    }
}
