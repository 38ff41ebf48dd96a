//! # socwatch
//!
//! A live security-operations TUI and library for watching the lockdown
//! status of one monitored account.
//!
//! The dashboard polls a status endpoint for a fixed subject and
//! escalates the display the moment the subject is flagged compromised:
//! a one-shot SECURE → LOCKED transition that emits a fixed three-entry
//! log burst into a bounded event log.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        Application                           │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐  │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│  │
//! │  │ (glue)  │    │ (state)  │    │(render) │    │         │  │
//! │  └────┬────┘    └──────────┘    └─────────┘    └─────────┘  │
//! │       │                                                      │
//! │       ▼                                                      │
//! │  ┌─────────┐                                                 │
//! │  │ source  │◀── HttpSource | FileSource | ChannelSource     │
//! │  │ (input) │                                                 │
//! │  └─────────┘                                                 │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: glue state - drains the source, applies reports, owns
//!   the error surface for the status bar
//! - **[`source`]**: status source abstraction ([`StatusSource`] trait)
//!   with HTTP polling, file polling, and channel-based implementations
//! - **[`data`]**: the core - alert state machine, bounded newest-first
//!   event log, traffic counter and its history
//! - **[`ui`]**: terminal rendering using ratatui - header, status panel,
//!   log stream, theme support
//! - **[`settings`]**: config file + environment + CLI layering
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Watch the default subject against a local backend
//! socwatch --endpoint http://localhost:8000 --subject user_404
//!
//! # Demo mode: watch a JSON file instead
//! socwatch --file status.json
//! ```
//!
//! ### As a library with a channel source
//!
//! ```
//! use socwatch::{App, ChannelSource, SentinelState};
//!
//! let (tx, source) = ChannelSource::create("embedded");
//! let sentinel = SentinelState::new("user_404", 1420);
//! let app = App::new(Box::new(source), sentinel);
//! ```

pub mod app;
pub mod data;
pub mod events;
pub mod settings;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::App;
pub use data::{
    AlertState, LogBuffer, LogEntry, SentinelState, TrafficHistory, TrafficSampler, LOG_CAPACITY,
};
pub use settings::Settings;
pub use source::{
    ChannelSource, FileSource, HttpSource, SourceError, StatusReport, StatusSource,
};
