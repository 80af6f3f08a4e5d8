use std::fmt;
use std::io::ErrorKind;
use std::time::Duration;

use reqwest::StatusCode;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Errors that can occur when using the Meilisearch client
///
/// Every failed call lands in exactly one of these shapes. Task-level failures
/// are not errors here: they come back as a [`Task`](crate::types::Task) with
/// `status == Failed` and its `error` field populated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeiliError {
    /// The server answered with a non-2xx status
    #[error("API error ({}): {}", .0.code, .0.message)]
    Api(ApiErrorObject),

    /// No HTTP response was obtained
    #[error(transparent)]
    Communication(CommunicationError),

    /// A task did not reach a terminal state within the wait budget
    #[error(
        "timeout of {}ms has exceeded on task {task_uid} when waiting for it to be resolved",
        .timeout.as_millis()
    )]
    Timeout {
        /// Task that was being waited on
        task_uid: u64,
        /// Budget that was exhausted
        timeout: Duration,
    },

    /// A 2xx response body did not match the expected shape
    #[error("Serialization error: {0}")]
    Serde(String),

    /// Configuration error (e.g., an API key that is not a valid header value)
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl MeiliError {
    /// Returns the machine-readable code for this error
    ///
    /// Server-issued codes are passed through verbatim. Client-side failures get
    /// codes the server never issues.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Api(obj) => obj.code.clone(),
            Self::Communication(_) => ErrorCode::Communication,
            Self::Timeout { .. } => ErrorCode::Timeout,
            Self::Serde(_) => ErrorCode::Other("invalid_response".into()),
            Self::Config(_) => ErrorCode::Other("invalid_configuration".into()),
        }
    }

    /// HTTP status of a server rejection, `None` for every other shape
    #[must_use]
    pub const fn http_status(&self) -> Option<u16> {
        match self {
            Self::Api(obj) => obj.http_status,
            _ => None,
        }
    }
}

/// Stable machine-readable error code
///
/// Known server codes get their own variant; anything else the server sends is
/// kept verbatim in [`ErrorCode::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// `invalid_api_key`: a key was sent but does not grant this action
    InvalidApiKey,
    /// `missing_authorization_header`: no key was sent
    MissingAuthorizationHeader,
    /// `index_not_found`
    IndexNotFound,
    /// `index_already_exists`
    IndexAlreadyExists,
    /// `invalid_index_uid`
    InvalidIndexUid,
    /// `task_not_found`
    TaskNotFound,
    /// `document_not_found`
    DocumentNotFound,
    /// `invalid_request`
    InvalidRequest,
    /// `internal`
    Internal,
    /// `primary_key_inference_failed`
    PrimaryKeyInferenceFailed,
    /// Client-side: the server could not be reached
    Communication,
    /// Client-side: waiting for a task ran out of time
    Timeout,
    /// Any other code, kept as sent
    Other(String),
}

impl ErrorCode {
    /// Returns the wire representation of this code
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::InvalidApiKey => "invalid_api_key",
            Self::MissingAuthorizationHeader => "missing_authorization_header",
            Self::IndexNotFound => "index_not_found",
            Self::IndexAlreadyExists => "index_already_exists",
            Self::InvalidIndexUid => "invalid_index_uid",
            Self::TaskNotFound => "task_not_found",
            Self::DocumentNotFound => "document_not_found",
            Self::InvalidRequest => "invalid_request",
            Self::Internal => "internal",
            Self::PrimaryKeyInferenceFailed => "primary_key_inference_failed",
            Self::Communication => "meilisearch_communication_error",
            Self::Timeout => "meilisearch_timeout_error",
            Self::Other(s) => s,
        }
    }

    /// Parses a server-issued code.
    ///
    /// Client-side codes are never produced here, so a server can not
    /// masquerade as a transport failure.
    #[must_use]
    pub fn from_server(code: &str) -> Self {
        match code {
            "invalid_api_key" => Self::InvalidApiKey,
            "missing_authorization_header" => Self::MissingAuthorizationHeader,
            "index_not_found" => Self::IndexNotFound,
            "index_already_exists" => Self::IndexAlreadyExists,
            "invalid_index_uid" => Self::InvalidIndexUid,
            "task_not_found" => Self::TaskNotFound,
            "document_not_found" => Self::DocumentNotFound,
            "invalid_request" => Self::InvalidRequest,
            "internal" => Self::Internal,
            "primary_key_inference_failed" => Self::PrimaryKeyInferenceFailed,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ErrorCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from_server(&s))
    }
}

/// Structured error body sent by the server
///
/// Also used for the `error` field of a failed [`Task`](crate::types::Task).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorObject {
    /// Human-readable error message
    #[serde(default)]
    pub message: String,
    /// Machine-readable code
    pub code: ErrorCode,
    /// Error category (`auth`, `invalid_request`, `internal`, ...)
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Documentation link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// HTTP status the error arrived with; not part of the body
    #[serde(skip)]
    pub http_status: Option<u16>,
}

/// Transport-level failure: the request never produced an HTTP response
///
/// The display form is `request to <url> failed, reason: <reason>`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("request to {url} failed, reason: {reason}")]
pub struct CommunicationError {
    /// Normalized request URL, without query string
    pub url: String,
    /// Low-level failure description
    pub reason: String,
}

/// Maps a serde deserialization error to a `MeiliError` with context
#[must_use]
pub fn map_deser(e: &serde_json::Error, body: &[u8]) -> MeiliError {
    let snippet = String::from_utf8_lossy(&body[..body.len().min(400)]).to_string();
    MeiliError::Serde(format!("{e}: {snippet}"))
}

/// Deserializes an API error from the response body
///
/// A JSON body carrying a `code` is passed through as-is. Anything else (a proxy
/// HTML page, a bare 502) becomes `http_<status>`.
#[must_use]
pub fn deserialize_api_error(status: StatusCode, body: &[u8]) -> MeiliError {
    let http_status = Some(status.as_u16());

    if let Ok(mut obj) = serde_json::from_slice::<ApiErrorObject>(body) {
        obj.http_status = http_status;
        return MeiliError::Api(obj);
    }

    MeiliError::Api(ApiErrorObject {
        message: String::from_utf8_lossy(&body[..body.len().min(400)]).into_owned(),
        code: ErrorCode::Other(format!("http_{}", status.as_u16())),
        kind: "http_error".into(),
        link: None,
        http_status,
    })
}

/// Classifies a transport failure for the request sent to `url`.
#[must_use]
pub fn classify_transport(err: &reqwest::Error, url: &str) -> MeiliError {
    MeiliError::Communication(CommunicationError {
        url: url.to_string(),
        reason: transport_reason(err, url),
    })
}

fn transport_reason(err: &reqwest::Error, url: &str) -> String {
    if err.is_timeout() {
        return "ETIMEDOUT".into();
    }

    let mut innermost = err.to_string();
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(e) = source {
        if let Some(io) = e.downcast_ref::<std::io::Error>() {
            match io.kind() {
                ErrorKind::ConnectionRefused => {
                    return format!("connect ECONNREFUSED {}", authority(url));
                }
                ErrorKind::ConnectionReset => return "read ECONNRESET".into(),
                ErrorKind::TimedOut => return "ETIMEDOUT".into(),
                _ => {}
            }
        }

        let text = e.to_string();
        if text.contains("dns error") || text.contains("failed to lookup address") {
            return format!("getaddrinfo ENOTFOUND {}", host(url));
        }
        innermost = text;
        source = e.source();
    }

    innermost
}

fn authority(url: &str) -> String {
    match reqwest::Url::parse(url) {
        Ok(u) => match (u.host_str(), u.port_or_known_default()) {
            (Some(h), Some(p)) => format!("{h}:{p}"),
            (Some(h), None) => h.to_string(),
            _ => url.to_string(),
        },
        Err(_) => url.to_string(),
    }
}

fn host(url: &str) -> String {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| url.to_string())
}
