//! Status source abstraction for receiving subject status reports.
//!
//! This module provides a trait-based abstraction for receiving the
//! monitored subject's status from various backends - the HTTP status
//! endpoint, a polled JSON file, or an in-memory channel.

mod channel;
mod file;
mod http;

pub use channel::ChannelSource;
pub use file::FileSource;
pub use http::HttpSource;

use std::fmt::Debug;

use serde::Deserialize;
use thiserror::Error;

/// One status report for the monitored subject.
///
/// Exactly one report is produced per successful fetch, so a consumer
/// that applies every report applies one per poll tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    /// Raw status value ("SECURE", "LOCKED", or anything else the
    /// endpoint chose to say - unrecognized values are the consumer's
    /// no-op, not an error here).
    pub status: String,
}

/// Wire shape of the status endpoint's response body.
///
/// Only `status` matters; extra fields are ignored, and a body without
/// one still counts as a (valueless) report - the endpoint answered,
/// it just had no posture to relay.
#[derive(Debug, Deserialize)]
pub(crate) struct StatusPayload {
    #[serde(default)]
    pub status: Option<String>,
}

impl From<StatusPayload> for StatusReport {
    fn from(payload: StatusPayload) -> Self {
        Self {
            status: payload.status.unwrap_or_default(),
        }
    }
}

/// Errors a source can run into while fetching status.
///
/// None of these are fatal to the dashboard: they are recorded, shown
/// dimly in the status bar, and retried implicitly by the next tick.
#[derive(Debug, Error)]
pub enum SourceError {
    /// HTTP request failed or returned a non-success status.
    #[error("request failed: {0}")]
    Http(String),

    /// Could not reach the endpoint.
    #[error("connection failed: {0}")]
    Connection(String),

    /// Response body was not a status payload.
    #[error("unreadable status payload: {0}")]
    Parse(String),

    /// File read failed.
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),

    /// The background poller has stopped.
    #[error("status poller stopped")]
    Stopped,
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() {
            SourceError::Connection(err.to_string())
        } else if err.is_decode() {
            SourceError::Parse(err.to_string())
        } else {
            SourceError::Http(err.to_string())
        }
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Parse(err.to_string())
    }
}

/// Trait for receiving status reports from various backends.
///
/// # Example
///
/// ```
/// use socwatch::{ChannelSource, StatusSource};
///
/// let (tx, mut source) = ChannelSource::create("test");
/// assert!(source.poll().is_none());
/// ```
pub trait StatusSource: Send + Debug {
    /// Poll for the next report.
    ///
    /// Returns `Some(report)` if a new report is available, `None`
    /// otherwise. This method must be non-blocking.
    fn poll(&mut self) -> Option<StatusReport>;

    /// Human-readable description of the source, for the status bar.
    fn description(&self) -> &str;

    /// The most recent error, if the source is currently failing.
    ///
    /// Cleared by the next successful fetch.
    fn error(&self) -> Option<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_with_status() {
        let payload: StatusPayload = serde_json::from_str(r#"{"status": "LOCKED"}"#).unwrap();
        let report = StatusReport::from(payload);
        assert_eq!(report.status, "LOCKED");
    }

    #[test]
    fn test_payload_tolerates_extra_fields() {
        let json = r#"{"name": "John Doe", "status": "SECURE", "role": "viewer"}"#;
        let payload: StatusPayload = serde_json::from_str(json).unwrap();
        assert_eq!(StatusReport::from(payload).status, "SECURE");
    }

    #[test]
    fn test_payload_without_status_is_a_valueless_report() {
        let payload: StatusPayload = serde_json::from_str(r#"{"detail": "no such user"}"#).unwrap();
        assert_eq!(StatusReport::from(payload).status, "");
    }

    #[test]
    fn test_non_json_body_is_a_parse_error() {
        let err = serde_json::from_str::<StatusPayload>("offline").unwrap_err();
        assert!(matches!(SourceError::from(err), SourceError::Parse(_)));
    }
}
