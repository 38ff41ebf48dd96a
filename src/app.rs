//! Application state and the single mutation path.

use std::time::Instant;

use crate::data::{SentinelState, TrafficHistory};
use crate::source::StatusSource;
use crate::ui::Theme;

/// Main application state.
///
/// Owns the status source and the sentinel session state. All mutation
/// happens through [`App::refresh`] on the TUI loop thread; the rendering
/// layer only ever receives `&App`.
pub struct App {
    pub running: bool,
    pub show_help: bool,

    // Data
    source: Box<dyn StatusSource>,
    pub sentinel: SentinelState,
    pub history: TrafficHistory,
    pub load_error: Option<String>,
    pub last_report: Option<Instant>,

    // UI
    pub theme: Theme,
}

impl App {
    /// Create a new App around the given source and session state.
    pub fn new(source: Box<dyn StatusSource>, sentinel: SentinelState) -> Self {
        Self {
            running: true,
            show_help: false,
            source,
            sentinel,
            history: TrafficHistory::new(),
            load_error: None,
            last_report: None,
            theme: Theme::auto_detect(),
        }
    }

    /// Returns a description of the current status source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Drain the source and apply every pending report.
    ///
    /// One report corresponds to one successful poll tick, so each is
    /// applied individually. Returns true if anything was applied. A
    /// source that is currently failing changes nothing except the error
    /// string surfaced in the status bar.
    pub fn refresh(&mut self) -> bool {
        let mut applied = false;
        while let Some(report) = self.source.poll() {
            self.sentinel.apply(&report.status);
            self.history.record(self.sentinel.traffic());
            self.last_report = Some(Instant::now());
            applied = true;
        }
        self.load_error = self.source.error();
        applied
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sentinel::TrafficSampler;
    use crate::data::AlertState;
    use crate::source::{ChannelSource, StatusReport};

    struct FixedSampler(u64);

    impl TrafficSampler for FixedSampler {
        fn sample(&mut self) -> u64 {
            self.0
        }
    }

    /// A source that only ever fails.
    #[derive(Debug)]
    struct FailingSource;

    impl StatusSource for FailingSource {
        fn poll(&mut self) -> Option<StatusReport> {
            None
        }

        fn description(&self) -> &str {
            "failing"
        }

        fn error(&self) -> Option<String> {
            Some("connection failed: backend offline".to_string())
        }
    }

    fn sentinel() -> SentinelState {
        SentinelState::with_sampler("user_404", 1420, Box::new(FixedSampler(2)))
    }

    #[tokio::test]
    async fn test_refresh_applies_every_pending_report() {
        let (tx, source) = ChannelSource::create("test");
        let mut app = App::new(Box::new(source), sentinel());

        for status in ["SECURE", "LOCKED", "LOCKED"] {
            tx.send(StatusReport {
                status: status.to_string(),
            })
            .await
            .unwrap();
        }

        assert!(app.refresh());
        assert_eq!(app.sentinel.alert(), AlertState::Locked);
        assert_eq!(app.sentinel.logs().len(), 3);
        // Three applied reports, two counter units each.
        assert_eq!(app.sentinel.traffic(), 1426);
        assert!(app.last_report.is_some());
        assert!(app.load_error.is_none());
    }

    #[tokio::test]
    async fn test_refresh_with_no_pending_reports_changes_nothing() {
        let (_tx, source) = ChannelSource::create("test");
        let mut app = App::new(Box::new(source), sentinel());

        assert!(!app.refresh());
        assert_eq!(app.sentinel.alert(), AlertState::Secure);
        assert!(app.sentinel.logs().is_empty());
        assert_eq!(app.sentinel.traffic(), 1420);
        assert!(app.last_report.is_none());
    }

    #[test]
    fn test_refresh_surfaces_errors_without_touching_state() {
        let mut app = App::new(Box::new(FailingSource), sentinel());

        assert!(!app.refresh());
        assert_eq!(app.sentinel.alert(), AlertState::Secure);
        assert!(app.sentinel.logs().is_empty());
        assert_eq!(app.sentinel.traffic(), 1420);
        assert!(app.load_error.unwrap().contains("backend offline"));
    }
}
