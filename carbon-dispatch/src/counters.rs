use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Minimal counters for operational visibility into dispatch outcomes.
///
/// Grounded on host `backend::metrics::counters::Counters`'s "a handful of
/// `Arc<AtomicU64>` fields, no aggregation library" shape. Spec §7 requires
/// `ExecutorUnavailable` failures to be "logged, counted, and dropped" —
/// this is the counting half of that contract.
#[derive(Clone, Default)]
pub struct DispatchCounters {
    pub dispatched: Arc<AtomicU64>,
    pub executor_failures: Arc<AtomicU64>,
    pub unroutable: Arc<AtomicU64>,
}

impl DispatchCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_dispatched(&self) {
        self.dispatched.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_executor_failure(&self) {
        self.executor_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_unroutable(&self) {
        self.unroutable.fetch_add(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_start_at_zero_and_accumulate() {
        let counters = DispatchCounters::new();
        assert_eq!(counters.dispatched.load(Ordering::Relaxed), 0);

        counters.record_dispatched();
        counters.record_executor_failure();
        counters.record_unroutable();
        counters.record_unroutable();

        assert_eq!(counters.dispatched.load(Ordering::Relaxed), 1);
        assert_eq!(counters.executor_failures.load(Ordering::Relaxed), 1);
        assert_eq!(counters.unroutable.load(Ordering::Relaxed), 2);
    }
}
