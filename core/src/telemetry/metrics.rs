use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Counters for requests handled by a long-lived estimation front-end.
pub struct MetricsRecorder {
    inner: Mutex<MetricsSnapshot>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub estimated: usize,
    pub empty: usize,
    pub rejected: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MetricsSnapshot::default()),
        }
    }

    pub fn record_estimate(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.estimated += 1;
        }
    }

    /// A request whose quantity produced no result.
    pub fn record_empty(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.empty += 1;
        }
    }

    pub fn record_rejected(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.rejected += 1;
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        if let Ok(metrics) = self.inner.lock() {
            *metrics
        } else {
            MetricsSnapshot::default()
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}
