use crate::{
    client::Client,
    config::Config,
    error::MeiliError,
    types::{
        indexes::{CreateIndexRequest, IndexInfo, IndexesQuery, Page, UpdateIndexRequest},
        tasks::{EnqueuedTask, Task},
    },
};

/// API resource for the `/indexes` endpoints
pub struct Indexes<'c, C: Config> {
    client: &'c Client<C>,
}

impl<'c, C: Config> Indexes<'c, C> {
    /// Creates a new Indexes resource
    #[must_use]
    pub const fn new(client: &'c Client<C>) -> Self {
        Self { client }
    }

    /// Enqueues the creation of an index
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn create(
        &self,
        uid: &str,
        primary_key: Option<&str>,
    ) -> Result<EnqueuedTask, MeiliError> {
        let req = CreateIndexRequest {
            uid: uid.to_string(),
            primary_key: primary_key.map(str::to_string),
        };
        self.client.post("indexes", &req).await
    }

    /// Fetches index metadata
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn get(&self, uid: &str) -> Result<IndexInfo, MeiliError> {
        self.client.get(&format!("indexes/{uid}")).await
    }

    /// Lists indexes
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn list(&self, query: &IndexesQuery) -> Result<Page<IndexInfo>, MeiliError> {
        self.client.get_with_query("indexes", query).await
    }

    /// Enqueues a primary key change
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn update(&self, uid: &str, primary_key: &str) -> Result<EnqueuedTask, MeiliError> {
        let req = UpdateIndexRequest {
            primary_key: primary_key.to_string(),
        };
        self.client.patch(&format!("indexes/{uid}"), &req).await
    }

    /// Enqueues the deletion of an index
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn delete(&self, uid: &str) -> Result<EnqueuedTask, MeiliError> {
        self.client.delete(&format!("indexes/{uid}")).await
    }
}

/// Handle on one index
///
/// Creating a handle performs no request; the index does not need to exist.
/// The uid is assumed to be URL-safe.
pub struct Index<'c, C: Config> {
    pub(crate) client: &'c Client<C>,
    uid: String,
}

impl<'c, C: Config> Index<'c, C> {
    /// Creates a handle for `uid`
    #[must_use]
    pub fn new(client: &'c Client<C>, uid: impl Into<String>) -> Self {
        Self {
            client,
            uid: uid.into(),
        }
    }

    /// Index identifier
    #[must_use]
    pub fn uid(&self) -> &str {
        &self.uid
    }

    /// Fetches this index's metadata
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn fetch_info(&self) -> Result<IndexInfo, MeiliError> {
        self.client.indexes().get(&self.uid).await
    }

    /// Enqueues a primary key change for this index
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn update_primary_key(&self, primary_key: &str) -> Result<EnqueuedTask, MeiliError> {
        self.client.indexes().update(&self.uid, primary_key).await
    }

    /// Enqueues the deletion of this index
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn delete(&self) -> Result<EnqueuedTask, MeiliError> {
        self.client.indexes().delete(&self.uid).await
    }

    /// Waits on a task with the client's default wait options
    ///
    /// # Errors
    ///
    /// See [`Tasks::wait_for`](crate::resources::Tasks::wait_for).
    pub async fn wait_for_task(&self, task_uid: u64) -> Result<Task, MeiliError> {
        self.client.wait_for_task(task_uid).await
    }

    pub(crate) fn path(&self, suffix: &str) -> String {
        format!("indexes/{}/{suffix}", self.uid)
    }
}

impl<C: Config> crate::Client<C> {
    /// Returns the Indexes API resource
    #[must_use]
    pub const fn indexes(&self) -> Indexes<'_, C> {
        Indexes::new(self)
    }

    /// Returns a handle on the index `uid`
    #[must_use]
    pub fn index(&self, uid: impl Into<String>) -> Index<'_, C> {
        Index::new(self, uid)
    }
}
