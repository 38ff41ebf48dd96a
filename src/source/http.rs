//! HTTP status source.
//!
//! Polls the status endpoint for the monitored subject on a fixed
//! interval from a background task. This is the production source: the
//! dashboard points it at `GET {endpoint}/status/{subject}`.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use reqwest::Client;
use tokio::sync::{mpsc, watch};
use tracing::debug;

use super::{SourceError, StatusPayload, StatusReport, StatusSource};

/// A status source that polls the subject's status endpoint.
///
/// A scheduler task owns the timer; each tick spawns an independent probe
/// task, so a slow or hung request never delays later ticks. Completions
/// may therefore arrive out of order - the consumer's state-based guard
/// makes that harmless. The client is built without a request timeout: a
/// request that never resolves simply never reports.
///
/// Tearing the source down (via [`HttpSource::shutdown`] or `Drop`) stops
/// the scheduler and marks in-flight probes as stale; a stale completion
/// is discarded rather than delivered.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use socwatch::HttpSource;
///
/// # tokio_test::block_on(async {
/// let source = HttpSource::spawn("http://localhost:8000", "user_404", Duration::from_secs(2));
/// # });
/// ```
#[derive(Debug)]
pub struct HttpSource {
    receiver: mpsc::Receiver<StatusReport>,
    description: String,
    shutdown: watch::Sender<bool>,
    last_error: Arc<Mutex<Option<String>>>,
}

impl HttpSource {
    /// Spawn the background poller.
    ///
    /// Must be called from within a tokio runtime. The first probe fires
    /// immediately, then once per `interval`.
    pub fn spawn(endpoint: &str, subject: &str, interval: Duration) -> Self {
        let url = format!("{}/status/{}", endpoint.trim_end_matches('/'), subject);
        let description = format!("http: {}", url);

        let (tx, rx) = mpsc::channel(16);
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let last_error = Arc::new(Mutex::new(None));
        let error_handle = last_error.clone();
        let client = Client::new();

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                tokio::select! {
                    _ = shutdown_rx.changed() => break,
                    _ = ticker.tick() => {
                        let client = client.clone();
                        let url = url.clone();
                        let tx = tx.clone();
                        let errors = error_handle.clone();
                        let shutdown = shutdown_rx.clone();

                        // Each probe is its own task: a hung request must
                        // not block the schedule.
                        tokio::spawn(async move {
                            match probe(&client, &url).await {
                                Ok(report) => {
                                    *errors.lock().unwrap() = None;
                                    // A completion that lands after teardown
                                    // is stale - discard it.
                                    if *shutdown.borrow() {
                                        return;
                                    }
                                    let _ = tx.send(report).await;
                                }
                                Err(e) => {
                                    debug!(error = %e, url = %url, "status probe failed");
                                    *errors.lock().unwrap() = Some(e.to_string());
                                }
                            }
                        });
                    }
                }
            }
        });

        Self {
            receiver: rx,
            description,
            shutdown: shutdown_tx,
            last_error,
        }
    }

    /// Stop scheduling ticks and discard in-flight completions.
    pub fn shutdown(&self) {
        let _ = self.shutdown.send(true);
    }
}

impl Drop for HttpSource {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// One fetch of the subject's status.
async fn probe(client: &Client, url: &str) -> Result<StatusReport, SourceError> {
    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        return Err(SourceError::Http(format!(
            "endpoint returned status {}",
            response.status()
        )));
    }

    let payload: StatusPayload = response.json().await?;
    Ok(payload.into())
}

impl StatusSource for HttpSource {
    fn poll(&mut self) -> Option<StatusReport> {
        match self.receiver.try_recv() {
            Ok(report) => Some(report),
            Err(mpsc::error::TryRecvError::Empty) => None,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                *self.last_error.lock().unwrap() = Some(SourceError::Stopped.to_string());
                None
            }
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<String> {
        self.last_error.lock().unwrap().clone()
    }
}
