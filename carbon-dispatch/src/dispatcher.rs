use std::sync::Arc;

use carbon_queues::{QueueEntry, SlotClock, SlotQueues};
use tokio::sync::Mutex;
use tracing::{Instrument, debug, error, info_span, warn};

use crate::bus::TickBus;
use crate::counters::DispatchCounters;
use crate::error::DispatchError;
use crate::executor::Executor;
use crate::registry::TaskModelRegistry;
use crate::types::DispatchEntry;

/// Drains the current slot on every tick and hands each entry to the
/// executor in FIFO order, then advances the clock (spec §4.6).
///
/// Grounded on `backend::execution::executor::PairExecutorRouter`'s
/// "drive work out of a queue, never halt on a single failure" loop shape,
/// collapsed from per-pair routing down to the single shared slot queue
/// this domain needs.
pub struct TickDispatcher<E: Executor> {
    bus: Box<dyn TickBus>,
    queues: Arc<Mutex<SlotQueues>>,
    clock: SlotClock,
    registry: TaskModelRegistry,
    executor: Arc<E>,
    counters: DispatchCounters,
}

impl<E: Executor> TickDispatcher<E> {
    pub fn new(
        bus: Box<dyn TickBus>,
        queues: Arc<Mutex<SlotQueues>>,
        clock: SlotClock,
        registry: TaskModelRegistry,
        executor: Arc<E>,
    ) -> Self {
        Self {
            bus,
            queues,
            clock,
            registry,
            executor,
            counters: DispatchCounters::new(),
        }
    }

    /// Read-only handle to this dispatcher's operational counters —
    /// dispatched/failed/unroutable entries (spec §7: `ExecutorUnavailable`
    /// is "logged, counted, and dropped").
    pub fn counters(&self) -> DispatchCounters {
        self.counters.clone()
    }

    /// Runs until the tick bus closes. A closed bus is fatal (spec §7
    /// `BusDisconnect`) — the caller is expected to treat the returned
    /// error as grounds for a supervisor restart, not to retry in place.
    pub async fn run(mut self) -> Result<(), DispatchError> {
        while self.bus.recv_tick().await.is_some() {
            self.on_tick().await;
        }
        warn!(component = "dispatcher", "tick bus closed, dispatcher exiting");
        Err(DispatchError::BusDisconnect)
    }

    /// Drains exactly one slot — the current tick — and dispatches its
    /// entries in order, then advances the clock. Never halts on an
    /// individual executor or lookup failure (spec §4.6 step 3, §9).
    pub async fn on_tick(&mut self) {
        let t = self.clock.current_tick();
        let queues = &self.queues;
        let batch = common::logger::warn_if_slow(
            "slot_drain",
            std::time::Duration::from_millis(50),
            async move {
                let mut queues = queues.lock().await;
                queues.drain_slot(t).unwrap_or_default()
            },
        )
        .await;

        debug!(tick = t, batch_size = batch.len(), "dispatching slot");

        for entry in batch {
            self.dispatch_one(t, entry).await;
        }

        self.clock.advance();
    }

    async fn dispatch_one(&self, tick: u32, entry: QueueEntry) {
        let span = info_span!("dispatch_entry", tick, request_id = entry.request.id);
        async {
            let task = match entry.request.payload.get("task").and_then(|v| v.as_str()) {
                Some(task) => task.to_string(),
                None => {
                    self.counters.record_unroutable();
                    error!(request_id = entry.request.id, "request payload has no \"task\" field");
                    return;
                }
            };

            let model = match self.registry.resolve(&task, &entry.strategy) {
                Ok(model) => model,
                Err(err) => {
                    self.counters.record_unroutable();
                    error!(request_id = entry.request.id, %err, "no route for (task, strategy)");
                    return;
                }
            };

            let dispatch_entry = DispatchEntry {
                request: entry.request.clone(),
                strategy: entry.strategy.clone(),
                task,
                model,
            };

            match self.executor.execute(dispatch_entry).await {
                Ok(_) => self.counters.record_dispatched(),
                Err(err) => {
                    self.counters.record_executor_failure();
                    error!(request_id = entry.request.id, %err, "executor call failed");
                }
            }
        }
        .instrument(span)
        .await;
    }
}
