//! Channel-based status source.
//!
//! Receives status reports via a tokio mpsc channel. This is useful for
//! embedding the dashboard against an in-process producer, and for tests.
//! Reports are queued, never coalesced: each successful poll tick
//! upstream must surface as exactly one report downstream, because every
//! applied report bumps the traffic counter.

use tokio::sync::mpsc;

use super::{SourceError, StatusReport, StatusSource};

/// A status source fed by an in-memory channel.
///
/// # Example
///
/// ```
/// use socwatch::ChannelSource;
///
/// let (tx, source) = ChannelSource::create("embedded");
/// ```
#[derive(Debug)]
pub struct ChannelSource {
    receiver: mpsc::Receiver<StatusReport>,
    description: String,
    last_error: Option<String>,
}

impl ChannelSource {
    /// Create a channel pair for pushing reports into a ChannelSource.
    ///
    /// Returns (sender, source); the sender side belongs to the producer.
    pub fn create(source_description: &str) -> (mpsc::Sender<StatusReport>, Self) {
        let (tx, rx) = mpsc::channel(16);
        let source = Self {
            receiver: rx,
            description: format!("channel: {}", source_description),
            last_error: None,
        };
        (tx, source)
    }
}

impl StatusSource for ChannelSource {
    fn poll(&mut self) -> Option<StatusReport> {
        match self.receiver.try_recv() {
            Ok(report) => Some(report),
            Err(mpsc::error::TryRecvError::Empty) => None,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                self.last_error = Some(SourceError::Stopped.to_string());
                None
            }
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<String> {
        self.last_error.clone()
    }
}
