//! Dispatcher metrics for observability
//!
//! Counters for dispatched and suppressed records, chain stops and swallowed
//! reporter failures.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters describing dispatcher activity
///
/// # Example
///
/// ```
/// use rust_log_dispatcher::DispatchMetrics;
///
/// let metrics = DispatchMetrics::new();
///
/// metrics.record_dispatched();
/// metrics.record_suppressed();
///
/// assert_eq!(metrics.dispatched(), 1);
/// assert_eq!(metrics.suppressed(), 1);
/// ```
#[derive(Debug)]
pub struct DispatchMetrics {
    /// Records that passed the threshold and went through the chain
    dispatched: AtomicU64,

    /// Records rejected by the threshold
    suppressed: AtomicU64,

    /// Dispatches cut short by a handler returning `false`
    chain_stops: AtomicU64,

    /// Reporter errors and panics that were swallowed
    reporter_failures: AtomicU64,
}

impl DispatchMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            dispatched: AtomicU64::new(0),
            suppressed: AtomicU64::new(0),
            chain_stops: AtomicU64::new(0),
            reporter_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn dispatched(&self) -> u64 {
        self.dispatched.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn suppressed(&self) -> u64 {
        self.suppressed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn chain_stops(&self) -> u64 {
        self.chain_stops.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn reporter_failures(&self) -> u64 {
        self.reporter_failures.load(Ordering::Relaxed)
    }

    /// Record a dispatched entry, returning the previous count
    #[inline]
    pub fn record_dispatched(&self) -> u64 {
        self.dispatched.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_suppressed(&self) -> u64 {
        self.suppressed.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_chain_stop(&self) -> u64 {
        self.chain_stops.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_reporter_failure(&self) -> u64 {
        self.reporter_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Share of records suppressed by the threshold (0.0 - 100.0)
    ///
    /// Returns 0.0 if nothing has been logged.
    pub fn suppression_rate(&self) -> f64 {
        let suppressed = self.suppressed() as f64;
        let total = self.dispatched() as f64 + suppressed;
        if total == 0.0 {
            0.0
        } else {
            (suppressed / total) * 100.0
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.dispatched.store(0, Ordering::Relaxed);
        self.suppressed.store(0, Ordering::Relaxed);
        self.chain_stops.store(0, Ordering::Relaxed);
        self.reporter_failures.store(0, Ordering::Relaxed);
    }
}

impl Default for DispatchMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for DispatchMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            dispatched: AtomicU64::new(self.dispatched()),
            suppressed: AtomicU64::new(self.suppressed()),
            chain_stops: AtomicU64::new(self.chain_stops()),
            reporter_failures: AtomicU64::new(self.reporter_failures()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = DispatchMetrics::new();
        assert_eq!(metrics.dispatched(), 0);
        assert_eq!(metrics.suppressed(), 0);
        assert_eq!(metrics.chain_stops(), 0);
        assert_eq!(metrics.reporter_failures(), 0);
    }

    #[test]
    fn test_record_returns_previous_value() {
        let metrics = DispatchMetrics::new();
        assert_eq!(metrics.record_dispatched(), 0);
        assert_eq!(metrics.record_dispatched(), 1);
        assert_eq!(metrics.dispatched(), 2);
    }

    #[test]
    fn test_suppression_rate() {
        let metrics = DispatchMetrics::new();
        assert_eq!(metrics.suppression_rate(), 0.0);

        for _ in 0..75 {
            metrics.record_dispatched();
        }
        for _ in 0..25 {
            metrics.record_suppressed();
        }

        let rate = metrics.suppression_rate();
        assert!((24.9..=25.1).contains(&rate), "Suppression rate was {}", rate);
    }

    #[test]
    fn test_snapshot_and_reset() {
        let metrics = DispatchMetrics::new();
        metrics.record_chain_stop();
        metrics.record_reporter_failure();

        let snapshot = metrics.clone();
        metrics.reset();

        assert_eq!(metrics.chain_stops(), 0);
        assert_eq!(snapshot.chain_stops(), 1);
        assert_eq!(snapshot.reporter_failures(), 1);
    }
}
