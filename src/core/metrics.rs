//! Stream metrics for observability
//!
//! Counters describing what happened to events handed to a stream. Drops
//! stay silent for producers; these counters are the only trace they leave.

use std::sync::atomic::{AtomicU64, Ordering};

/// Per-stream delivery counters
///
/// # Example
///
/// ```
/// use rust_event_stream::StreamMetrics;
///
/// let metrics = StreamMetrics::new();
/// metrics.record_sent();
/// metrics.record_delivered();
///
/// assert_eq!(metrics.sent_count(), 1);
/// assert_eq!(metrics.delivered_count(), 1);
/// assert_eq!(metrics.dropped_count(), 0);
/// ```
#[derive(Debug)]
pub struct StreamMetrics {
    /// Events handed to `send`
    sent: AtomicU64,

    /// Events accepted by the buffer
    delivered: AtomicU64,

    /// Events discarded on cancellation, timeout or closed stream
    dropped: AtomicU64,

    /// Delivery attempts still waiting
    in_flight: AtomicU64,
}

impl StreamMetrics {
    pub const fn new() -> Self {
        Self {
            sent: AtomicU64::new(0),
            delivered: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
            in_flight: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn sent_count(&self) -> u64 {
        self.sent.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn delivered_count(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dropped_count(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn in_flight(&self) -> u64 {
        self.in_flight.load(Ordering::Acquire)
    }

    #[inline]
    pub fn record_sent(&self) -> u64 {
        self.sent.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_delivered(&self) -> u64 {
        self.delivered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dropped(&self) -> u64 {
        self.dropped.fetch_add(1, Ordering::Relaxed)
    }

    /// Mark the start of a delivery attempt
    #[inline]
    pub fn begin_delivery(&self) {
        self.in_flight.fetch_add(1, Ordering::AcqRel);
    }

    /// Mark the end of a delivery attempt, whatever its outcome
    #[inline]
    pub fn end_delivery(&self) {
        self.in_flight.fetch_sub(1, Ordering::AcqRel);
    }

    /// Drop rate as a percentage (0.0 - 100.0) of settled events
    ///
    /// Returns 0.0 if nothing has settled yet.
    pub fn drop_rate(&self) -> f64 {
        let dropped = self.dropped_count() as f64;
        let total = self.delivered_count() as f64 + dropped;
        if total == 0.0 {
            0.0
        } else {
            (dropped / total) * 100.0
        }
    }
}

impl Default for StreamMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for StreamMetrics {
    /// Create a snapshot of the current counter values
    fn clone(&self) -> Self {
        Self {
            sent: AtomicU64::new(self.sent_count()),
            delivered: AtomicU64::new(self.delivered_count()),
            dropped: AtomicU64::new(self.dropped_count()),
            in_flight: AtomicU64::new(self.in_flight()),
        }
    }
}
