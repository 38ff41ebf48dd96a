//! Historical traffic readings for the header trend sparkline.

use std::collections::VecDeque;
use std::time::Instant;

/// Maximum number of historical readings to keep.
const MAX_HISTORY_SIZE: usize = 60;

/// Tracks traffic counter readings over time.
///
/// Records one reading per applied report to enable a rate estimate and
/// the trend sparkline in the header.
#[derive(Debug, Clone)]
pub struct TrafficHistory {
    readings: VecDeque<u64>,
    timestamps: VecDeque<Instant>,
}

impl Default for TrafficHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl TrafficHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self {
            readings: VecDeque::new(),
            timestamps: VecDeque::new(),
        }
    }

    /// Record a new counter reading.
    pub fn record(&mut self, traffic: u64) {
        self.readings.push_back(traffic);
        self.timestamps.push_back(Instant::now());
        if self.readings.len() > MAX_HISTORY_SIZE {
            self.readings.pop_front();
            self.timestamps.pop_front();
        }
    }

    /// Sparkline data normalized to 0-7 (8 bar levels).
    ///
    /// Each point is the delta between consecutive readings. Returns an
    /// empty Vec if there's not enough history.
    pub fn sparkline(&self) -> Vec<u8> {
        if self.readings.len() < 2 {
            return Vec::new();
        }

        let deltas: Vec<i64> = self
            .readings
            .iter()
            .zip(self.readings.iter().skip(1))
            .map(|(a, b)| *b as i64 - *a as i64)
            .collect();

        let max = deltas.iter().copied().max().unwrap_or(1).max(1);
        let min = deltas.iter().copied().min().unwrap_or(0).min(0);
        let range = (max - min).max(1) as f64;

        deltas
            .iter()
            .map(|&v| {
                let normalized = ((v - min) as f64 / range * 7.0) as u8;
                normalized.min(7)
            })
            .collect()
    }

    /// Traffic rate (counter units per second) from the last two readings.
    ///
    /// Returns None if there's not enough history.
    pub fn rate(&self) -> Option<f64> {
        if self.readings.len() < 2 {
            return None;
        }

        let current = *self.readings.back()?;
        let previous = *self.readings.get(self.readings.len() - 2)?;
        let delta = current as i64 - previous as i64;

        let current_time = self.timestamps.back()?;
        let previous_time = self.timestamps.get(self.timestamps.len() - 2)?;
        let elapsed = current_time.duration_since(*previous_time).as_secs_f64();

        if elapsed > 0.0 {
            Some(delta as f64 / elapsed)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_is_bounded() {
        let mut history = TrafficHistory::new();
        for i in 0..200 {
            history.record(i);
        }
        assert_eq!(history.readings.len(), MAX_HISTORY_SIZE);
        assert_eq!(history.timestamps.len(), MAX_HISTORY_SIZE);
    }

    #[test]
    fn test_sparkline_needs_two_readings() {
        let mut history = TrafficHistory::new();
        assert!(history.sparkline().is_empty());
        history.record(10);
        assert!(history.sparkline().is_empty());
        history.record(14);
        assert_eq!(history.sparkline().len(), 1);
    }

    #[test]
    fn test_sparkline_values_stay_in_range() {
        let mut history = TrafficHistory::new();
        for v in [0u64, 3, 3, 10, 11, 40, 41] {
            history.record(v);
        }
        let spark = history.sparkline();
        assert_eq!(spark.len(), 6);
        assert!(spark.iter().all(|&v| v <= 7));
        // The biggest jump maps to the tallest bar.
        assert_eq!(*spark.iter().max().unwrap(), 7);
    }

    #[test]
    fn test_rate_reflects_latest_delta() {
        let mut history = TrafficHistory::new();
        history.record(100);
        std::thread::sleep(std::time::Duration::from_millis(10));
        history.record(110);

        let rate = history.rate().unwrap();
        assert!(rate > 0.0);
    }
}
