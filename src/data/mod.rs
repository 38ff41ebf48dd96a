//! Core domain state for the dashboard.
//!
//! ## Submodules
//!
//! - [`sentinel`]: the alert state machine ([`SentinelState`]) and the
//!   injectable traffic sampler
//! - [`log`]: the bounded, newest-first event log
//! - [`history`]: traffic counter history for the header trend
//!
//! ## Data Flow
//!
//! ```text
//! StatusReport (raw status value)
//!        │
//!        ▼
//! SentinelState::apply()
//!        │
//!        ├──▶ AlertState (one-shot SECURE → LOCKED)
//!        ├──▶ LogBuffer (three-entry lockdown burst)
//!        └──▶ traffic counter ──▶ TrafficHistory::record()
//! ```

pub mod history;
pub mod log;
pub mod sentinel;

pub use history::TrafficHistory;
pub use log::{LogBuffer, LogEntry, LOG_CAPACITY};
pub use sentinel::{
    AlertState, RandomSampler, SentinelState, TrafficSampler, STATUS_LOCKED, STATUS_SECURE,
    TRAFFIC_STEP_MAX,
};
