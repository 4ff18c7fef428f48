use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

pub struct Metrics {
    // Counters
    total_requests: AtomicUsize,
    successful_requests: AtomicUsize,
    failed_requests: AtomicUsize,
    fetch_failures: AtomicUsize,

    // Timing (in microseconds)
    total_generate_time_us: AtomicU64,

    total_triples_emitted: AtomicUsize,
}

impl Metrics {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            total_requests: AtomicUsize::new(0),
            successful_requests: AtomicUsize::new(0),
            failed_requests: AtomicUsize::new(0),
            fetch_failures: AtomicUsize::new(0),
            total_generate_time_us: AtomicU64::new(0),
            total_triples_emitted: AtomicUsize::new(0),
        })
    }

    pub fn record_success(&self, duration: Duration, triples: usize) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        self.successful_requests.fetch_add(1, Ordering::Relaxed);
        self.total_triples_emitted.fetch_add(triples, Ordering::Relaxed);
        self.record_time(duration);
    }

    pub fn record_failure(&self, duration: Duration, fetch_failures: usize) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        self.failed_requests.fetch_add(1, Ordering::Relaxed);
        self.fetch_failures.fetch_add(fetch_failures, Ordering::Relaxed);
        self.record_time(duration);
    }

    fn record_time(&self, duration: Duration) {
        self.total_generate_time_us
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let total_requests = self.total_requests.load(Ordering::Relaxed);
        let total_us = self.total_generate_time_us.load(Ordering::Relaxed) as f64;

        MetricsSnapshot {
            total_requests,
            successful_requests: self.successful_requests.load(Ordering::Relaxed),
            failed_requests: self.failed_requests.load(Ordering::Relaxed),
            fetch_failures: self.fetch_failures.load(Ordering::Relaxed),
            total_triples_emitted: self.total_triples_emitted.load(Ordering::Relaxed),
            avg_generate_time_ms: if total_requests > 0 {
                total_us / total_requests as f64 / 1000.0 // Convert to ms
            } else {
                0.0
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MetricsSnapshot {
    pub total_requests: usize,
    pub successful_requests: usize,
    pub failed_requests: usize,
    pub fetch_failures: usize,
    pub total_triples_emitted: usize,
    pub avg_generate_time_ms: f64,
}

pub struct TimedOperation {
    start: Instant,
}

impl TimedOperation {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_counts() {
        let metrics = Metrics::new();
        metrics.record_success(Duration::from_millis(4), 10);
        metrics.record_failure(Duration::from_millis(2), 1);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.total_requests, 2);
        assert_eq!(snapshot.successful_requests, 1);
        assert_eq!(snapshot.failed_requests, 1);
        assert_eq!(snapshot.fetch_failures, 1);
        assert_eq!(snapshot.total_triples_emitted, 10);
        assert!((snapshot.avg_generate_time_ms - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_snapshot() {
        assert_eq!(Metrics::new().snapshot().avg_generate_time_ms, 0.0);
    }
}
