use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

/// The dispatcher's private notion of "now": a tick counter that wraps
/// modulo the planning horizon (spec §3, §4.6).
///
/// Owned exclusively by the tick dispatcher task — never read concurrently
/// for a correctness decision (spec §5) — so no `Mutex` guards it. A plain
/// `Arc<AtomicU32>` mirror is exposed for read-only observability/metrics,
/// the same shape the host uses for its `Counters` fields.
pub struct SlotClock {
    current_tick: u32,
    horizon: u32,
    observed: Arc<AtomicU32>,
}

impl SlotClock {
    pub fn new(horizon: u32) -> Self {
        assert!(horizon > 0, "a slot clock needs a non-zero horizon");
        Self {
            current_tick: 0,
            horizon,
            observed: Arc::new(AtomicU32::new(0)),
        }
    }

    pub fn current_tick(&self) -> u32 {
        self.current_tick
    }

    pub fn horizon(&self) -> u32 {
        self.horizon
    }

    /// A cheap read-only handle other tasks may poll for metrics.
    pub fn observer(&self) -> Arc<AtomicU32> {
        self.observed.clone()
    }

    /// Advances to the next tick, wrapping modulo `horizon`.
    pub fn advance(&mut self) {
        self.current_tick = (self.current_tick + 1) % self.horizon;
        self.observed.store(self.current_tick, Ordering::Relaxed);
    }
}
