//! Asynchronous task records and polling options

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ApiErrorObject;

/// Default budget for waiting on a task
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_millis(5_000);
/// Default delay between two polls of the same task
pub const DEFAULT_WAIT_INTERVAL: Duration = Duration::from_millis(50);

/// Lifecycle state of a server-side task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskStatus {
    /// Queued, not yet picked up
    Enqueued,
    /// Being applied
    Processing,
    /// Applied
    Succeeded,
    /// Rejected while being applied
    Failed,
}

impl TaskStatus {
    /// True for `Succeeded` and `Failed`
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }

    /// Wire name of the status
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Enqueued => "enqueued",
            Self::Processing => "processing",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }
}

/// Snapshot returned by every mutating call
///
/// The status is the one at enqueue time; fetch the task again (or wait on it)
/// to learn what happened afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnqueuedTask {
    /// Task identifier, unique per server instance
    #[serde(alias = "taskUid")]
    pub uid: u64,
    /// Index the task targets, if any
    #[serde(default)]
    pub index_uid: Option<String>,
    /// Status at enqueue time
    pub status: TaskStatus,
    /// Operation tag, e.g. `settingsUpdate`
    #[serde(rename = "type")]
    pub kind: String,
    /// Enqueue timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enqueued_at: Option<DateTime<Utc>>,
}

/// Task as returned by the task-status endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Task identifier
    pub uid: u64,
    /// Index the task targets, if any
    #[serde(default)]
    pub index_uid: Option<String>,
    /// Current status
    pub status: TaskStatus,
    /// Operation tag
    #[serde(rename = "type")]
    pub kind: String,
    /// Operation-specific payload (received documents, applied settings, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Why the task failed; set only when `status` is `Failed`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiErrorObject>,
    /// ISO-8601 processing duration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    /// Enqueue timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enqueued_at: Option<DateTime<Utc>>,
    /// Processing start timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    /// Completion timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
}

impl Task {
    /// True once the task reached `Succeeded` or `Failed`
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// True when the task was applied
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == TaskStatus::Succeeded
    }
}

/// Filters for listing tasks
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TasksQuery {
    /// Comma-separated index uids
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_uids: Option<String>,
    /// Comma-separated statuses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statuses: Option<String>,
    /// Comma-separated operation tags
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<String>,
    /// Page size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Highest task uid to start from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<u64>,
}

impl TasksQuery {
    /// Creates an empty query (no filters)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to tasks of the given indexes
    #[must_use]
    pub fn with_index_uids<I, S>(mut self, uids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.index_uids = Some(join_csv(uids));
        self
    }

    /// Restricts to tasks in the given states
    #[must_use]
    pub fn with_statuses<I>(mut self, statuses: I) -> Self
    where
        I: IntoIterator<Item = TaskStatus>,
    {
        self.statuses = Some(join_csv(statuses.into_iter().map(TaskStatus::as_str)));
        self
    }

    /// Restricts to the given operation tags
    #[must_use]
    pub fn with_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.types = Some(join_csv(types));
        self
    }

    /// Sets the page size
    #[must_use]
    pub const fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Starts listing at this task uid (descending)
    #[must_use]
    pub const fn with_from(mut self, from: u64) -> Self {
        self.from = Some(from);
        self
    }
}

fn join_csv<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|s| s.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// One page of the task list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TasksPage {
    /// Tasks, newest first
    pub results: Vec<Task>,
    /// Page size used
    #[serde(default)]
    pub limit: Option<u32>,
    /// First uid of this page
    #[serde(default)]
    pub from: Option<u64>,
    /// First uid of the next page, `None` on the last page
    #[serde(default)]
    pub next: Option<u64>,
}

/// How long and how often to poll a task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// Give up after this long
    pub timeout: Duration,
    /// Delay between polls
    pub interval: Duration,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_WAIT_TIMEOUT,
            interval: DEFAULT_WAIT_INTERVAL,
        }
    }
}

impl WaitOptions {
    /// Creates options with the default timeout and interval
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the wait budget
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the polling interval
    #[must_use]
    pub const fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}
