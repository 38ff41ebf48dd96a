//! Alert state machine for the monitored subject.
//!
//! [`SentinelState`] owns the session's security posture, the bounded
//! event log, and the traffic counter. It is mutated through exactly one
//! entry point, [`SentinelState::apply`], called once per successful poll
//! tick; the rendering layer only ever sees it by shared reference.

use rand::Rng;

use super::log::LogBuffer;

/// Upper bound (exclusive) for a single traffic counter increment.
pub const TRAFFIC_STEP_MAX: u64 = 5;

/// Wire value reported while the subject is healthy.
pub const STATUS_SECURE: &str = "SECURE";
/// Wire value reported once the subject has been locked down.
pub const STATUS_LOCKED: &str = "LOCKED";

/// Security posture of the monitored subject.
///
/// `Secure` is the initial state; `Locked` is terminal for the session.
/// There is no transition back: remediation is a manual process outside
/// this dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertState {
    Secure,
    Locked,
}

impl AlertState {
    /// Display label matching the wire values.
    pub fn label(&self) -> &'static str {
        match self {
            AlertState::Secure => STATUS_SECURE,
            AlertState::Locked => STATUS_LOCKED,
        }
    }

    pub fn is_locked(&self) -> bool {
        matches!(self, AlertState::Locked)
    }
}

/// Source of pseudo-random traffic increments.
///
/// Kept behind a trait so tests can pin exact values; [`RandomSampler`]
/// is the production implementation.
pub trait TrafficSampler: Send {
    /// Next increment, in `[0, TRAFFIC_STEP_MAX)`.
    fn sample(&mut self) -> u64;
}

/// Default sampler backed by the thread-local RNG.
#[derive(Debug, Default)]
pub struct RandomSampler;

impl TrafficSampler for RandomSampler {
    fn sample(&mut self) -> u64 {
        rand::rng().random_range(0..TRAFFIC_STEP_MAX)
    }
}

/// Owned session state: alert posture, event log, traffic counter.
pub struct SentinelState {
    subject: String,
    alert: AlertState,
    logs: LogBuffer,
    traffic: u64,
    sampler: Box<dyn TrafficSampler>,
}

impl SentinelState {
    /// Create session state for `subject` with the production sampler.
    pub fn new(subject: impl Into<String>, traffic_seed: u64) -> Self {
        Self::with_sampler(subject, traffic_seed, Box::new(RandomSampler))
    }

    /// Create session state with an injected traffic sampler.
    pub fn with_sampler(
        subject: impl Into<String>,
        traffic_seed: u64,
        sampler: Box<dyn TrafficSampler>,
    ) -> Self {
        Self {
            subject: subject.into(),
            alert: AlertState::Secure,
            logs: LogBuffer::new(),
            traffic: traffic_seed,
            sampler,
        }
    }

    /// Consume one raw status report.
    ///
    /// `"LOCKED"` while secure triggers the one-shot lockdown transition;
    /// `"LOCKED"` while already locked is idempotent; `"SECURE"` and any
    /// unrecognized value change nothing. The traffic counter is bumped on
    /// every call, whatever the status said.
    pub fn apply(&mut self, status: &str) {
        if status == STATUS_LOCKED && self.alert == AlertState::Secure {
            self.lock_down();
        }
        self.traffic += self.sampler.sample();
    }

    /// The SECURE→LOCKED transition and its three-entry log burst.
    ///
    /// The burst is one logical unit: the guard in `apply` fires it at
    /// most once per session.
    fn lock_down(&mut self) {
        self.alert = AlertState::Locked;
        self.logs.push(format!("CRITICAL THREAT DETECTED: {}", self.subject));
        self.logs.push("SENTINEL AGENT: Initiating Lockdown Protocol...");
        self.logs.push("ACTION: Session Revoked. IP Blocked.");
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn alert(&self) -> AlertState {
        self.alert
    }

    pub fn traffic(&self) -> u64 {
        self.traffic
    }

    pub fn logs(&self) -> &LogBuffer {
        &self.logs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sampler returning a constant, so counter assertions are exact.
    struct FixedSampler(u64);

    impl TrafficSampler for FixedSampler {
        fn sample(&mut self) -> u64 {
            self.0
        }
    }

    fn state_with_step(step: u64) -> SentinelState {
        SentinelState::with_sampler("user_404", 1420, Box::new(FixedSampler(step)))
    }

    #[test]
    fn test_starts_secure_and_quiet() {
        let state = state_with_step(0);
        assert_eq!(state.alert(), AlertState::Secure);
        assert!(state.logs().is_empty());
        assert_eq!(state.traffic(), 1420);
    }

    #[test]
    fn test_lockdown_fires_once_with_three_entry_burst() {
        let mut state = state_with_step(3);

        state.apply(STATUS_SECURE);
        state.apply(STATUS_LOCKED);
        state.apply(STATUS_LOCKED);

        assert_eq!(state.alert(), AlertState::Locked);
        // One burst of three, not six.
        assert_eq!(state.logs().len(), 3);
        // Counter bumped on every call, including the no-op ones.
        assert_eq!(state.traffic(), 1420 + 3 * 3);
    }

    #[test]
    fn test_burst_order_newest_first() {
        let mut state = state_with_step(0);
        state.apply(STATUS_LOCKED);

        let messages: Vec<&str> = state.logs().iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages.len(), 3);
        // Appended in fixed order, so the revoke/block action reads newest.
        assert!(messages[0].starts_with("ACTION:"));
        assert!(messages[1].starts_with("SENTINEL AGENT:"));
        assert!(messages[2].starts_with("CRITICAL THREAT DETECTED"));
        assert!(messages[2].contains("user_404"));
    }

    #[test]
    fn test_never_locked_without_a_locked_report() {
        let mut state = state_with_step(1);
        for status in [STATUS_SECURE, "UNKNOWN", "", "locked", STATUS_SECURE] {
            state.apply(status);
            assert_eq!(state.alert(), AlertState::Secure);
        }
        assert!(state.logs().is_empty());
        // Five calls, one each.
        assert_eq!(state.traffic(), 1425);
    }

    #[test]
    fn test_no_path_back_to_secure() {
        let mut state = state_with_step(0);
        state.apply(STATUS_LOCKED);
        state.apply(STATUS_SECURE);
        state.apply(STATUS_SECURE);

        assert_eq!(state.alert(), AlertState::Locked);
        assert_eq!(state.logs().len(), 3);
    }

    #[test]
    fn test_unknown_status_changes_nothing_but_the_counter() {
        let mut state = state_with_step(4);
        state.apply("MAINTENANCE");

        assert_eq!(state.alert(), AlertState::Secure);
        assert!(state.logs().is_empty());
        assert_eq!(state.traffic(), 1424);
    }

    #[test]
    fn test_traffic_counter_never_decreases() {
        let mut state = SentinelState::new("user_404", 0);
        let mut previous = state.traffic();
        for _ in 0..200 {
            state.apply(STATUS_SECURE);
            let current = state.traffic();
            assert!(current >= previous);
            assert!(current - previous < TRAFFIC_STEP_MAX);
            previous = current;
        }
    }

    #[test]
    fn test_repeated_locked_reports_are_idempotent() {
        let mut state = state_with_step(0);
        for _ in 0..10 {
            state.apply(STATUS_LOCKED);
        }
        assert_eq!(state.alert(), AlertState::Locked);
        assert_eq!(state.logs().len(), 3);
    }
}
