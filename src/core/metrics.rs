//! Logger metrics for observability
//!
//! Counters for what a logger emitted, filtered out and recorded, and how
//! often recording failed or was dropped on a full queue.

use std::sync::atomic::{AtomicU64, Ordering};

/// Per-logger counters
///
/// # Example
///
/// ```
/// use namespace_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
/// metrics.record_emitted();
/// metrics.record_dropped_record();
///
/// assert_eq!(metrics.emitted(), 1);
/// assert_eq!(metrics.dropped_records(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Calls that reached the sink
    emitted: AtomicU64,

    /// Calls rejected by the enabled switch or the level gate
    gated: AtomicU64,

    /// Entries written to the logs store
    recorded: AtomicU64,

    /// Entries the store refused
    record_failures: AtomicU64,

    /// Entries dropped because the record queue was full or closed
    dropped_records: AtomicU64,

    /// Number of times the record queue became full
    queue_full_events: AtomicU64,
}

impl LoggerMetrics {
    pub const fn new() -> Self {
        Self {
            emitted: AtomicU64::new(0),
            gated: AtomicU64::new(0),
            recorded: AtomicU64::new(0),
            record_failures: AtomicU64::new(0),
            dropped_records: AtomicU64::new(0),
            queue_full_events: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn emitted(&self) -> u64 {
        self.emitted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn gated(&self) -> u64 {
        self.gated.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn recorded(&self) -> u64 {
        self.recorded.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_failures(&self) -> u64 {
        self.record_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dropped_records(&self) -> u64 {
        self.dropped_records.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn queue_full_events(&self) -> u64 {
        self.queue_full_events.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_emitted(&self) -> u64 {
        self.emitted.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_gated(&self) -> u64 {
        self.gated.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_recorded(&self) -> u64 {
        self.recorded.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_failure(&self) -> u64 {
        self.record_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Returns the previous count
    #[inline]
    pub fn record_dropped_record(&self) -> u64 {
        self.dropped_records.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_queue_full(&self) -> u64 {
        self.queue_full_events.fetch_add(1, Ordering::Relaxed)
    }

    /// Share of record attempts that never reached the store, in percent
    pub fn record_loss_rate(&self) -> f64 {
        let lost = (self.dropped_records() + self.record_failures()) as f64;
        let total = self.recorded() as f64 + lost;
        if total == 0.0 {
            0.0
        } else {
            (lost / total) * 100.0
        }
    }

    pub fn reset(&self) {
        self.emitted.store(0, Ordering::Relaxed);
        self.gated.store(0, Ordering::Relaxed);
        self.recorded.store(0, Ordering::Relaxed);
        self.record_failures.store(0, Ordering::Relaxed);
        self.dropped_records.store(0, Ordering::Relaxed);
        self.queue_full_events.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}
