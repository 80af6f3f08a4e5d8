use futures::future::try_join_all;
use tokio::time::Instant;

use crate::{
    client::Client,
    config::Config,
    error::MeiliError,
    types::tasks::{EnqueuedTask, Task, TasksPage, TasksQuery, WaitOptions},
};

/// API resource for the `/tasks` endpoints
pub struct Tasks<'c, C: Config> {
    client: &'c Client<C>,
}

impl<'c, C: Config> Tasks<'c, C> {
    /// Creates a new Tasks resource
    #[must_use]
    pub const fn new(client: &'c Client<C>) -> Self {
        Self { client }
    }

    /// Fetches the current state of a task
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn get(&self, task_uid: u64) -> Result<Task, MeiliError> {
        self.client.get(&format!("tasks/{task_uid}")).await
    }

    /// Lists tasks, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn list(&self, query: &TasksQuery) -> Result<TasksPage, MeiliError> {
        self.client.get_with_query("tasks", query).await
    }

    /// Polls a task until it is `succeeded` or `failed`.
    ///
    /// The task is fetched at least once. Between polls the loop sleeps for
    /// `opts.interval`, never past the deadline. A timeout too large to be
    /// represented as a deadline (e.g. [`Duration::MAX`](std::time::Duration::MAX))
    /// waits until the task resolves. A failed task is returned as
    /// `Ok`; inspect [`Task::error`]. Dropping the future stops polling and
    /// leaves the task untouched on the server.
    ///
    /// # Errors
    ///
    /// Returns [`MeiliError::Timeout`] when the deadline passes first, or the
    /// error of the poll request itself, unchanged.
    pub async fn wait_for(&self, task_uid: u64, opts: WaitOptions) -> Result<Task, MeiliError> {
        // `None` when the budget does not fit in an Instant: poll until terminal.
        let deadline = Instant::now().checked_add(opts.timeout);
        loop {
            let task = self.get(task_uid).await?;
            tracing::trace!(task_uid, status = task.status.as_str(), "polled task");

            if task.status.is_terminal() {
                tracing::debug!(task_uid, status = task.status.as_str(), "task resolved");
                return Ok(task);
            }

            let pause = match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        tracing::debug!(task_uid, timeout = ?opts.timeout, "task wait timed out");
                        return Err(MeiliError::Timeout {
                            task_uid,
                            timeout: opts.timeout,
                        });
                    }
                    opts.interval.min(deadline - now)
                }
                None => opts.interval,
            };
            tokio::time::sleep(pause).await;
        }
    }

    /// Waits on several tasks concurrently; results keep the input order.
    ///
    /// # Errors
    ///
    /// Returns the first error any of the waits produces.
    pub async fn wait_for_many(
        &self,
        task_uids: &[u64],
        opts: WaitOptions,
    ) -> Result<Vec<Task>, MeiliError> {
        try_join_all(task_uids.iter().map(|&uid| self.wait_for(uid, opts))).await
    }
}

impl<C: Config> crate::Client<C> {
    /// Returns the Tasks API resource
    #[must_use]
    pub const fn tasks(&self) -> Tasks<'_, C> {
        Tasks::new(self)
    }

    /// Waits on a task with the client's default [`WaitOptions`]
    ///
    /// # Errors
    ///
    /// See [`Tasks::wait_for`].
    pub async fn wait_for_task(&self, task_uid: u64) -> Result<Task, MeiliError> {
        self.tasks().wait_for(task_uid, self.wait_options()).await
    }
}

impl EnqueuedTask {
    /// Waits for this task to resolve using the client's default [`WaitOptions`]
    ///
    /// # Errors
    ///
    /// See [`Tasks::wait_for`].
    pub async fn wait<C: Config>(&self, client: &Client<C>) -> Result<Task, MeiliError> {
        client.wait_for_task(self.uid).await
    }
}
