use std::sync::Arc;
use std::sync::Mutex as StdMutex;

use async_trait::async_trait;
use carbon_dispatch::{DispatchEntry, Executor, ExecutorAck, ExecutorError, ModelHandle, TaskModelRegistry, TickDispatcher};
use carbon_dispatch::MpscTickBus;
use carbon_pool::Request;
use carbon_queues::{QueueEntry, SlotClock, SlotQueues};
use serde_json::json;
use tokio::sync::{mpsc, Mutex};

struct RecordingExecutor {
    order: Arc<StdMutex<Vec<u64>>>,
}

#[async_trait]
impl Executor for RecordingExecutor {
    async fn execute(&self, entry: DispatchEntry) -> Result<ExecutorAck, ExecutorError> {
        self.order.lock().unwrap().push(entry.request.id);
        Ok(ExecutorAck {
            request_id: entry.request.id,
            slot_executed: 0,
        })
    }
}

fn entry(id: u64) -> QueueEntry {
    QueueEntry {
        request: Request::new(id, 0, json!({ "task": "echo" }), "http://cb"),
        strategy: "low".to_string(),
    }
}

#[tokio::test]
async fn entries_enqueued_at_the_same_slot_dispatch_in_fifo_order() {
    let queues = Arc::new(Mutex::new(SlotQueues::new(1)));
    {
        let mut q = queues.lock().await;
        for id in [3, 1, 2, 5, 4] {
            q.enqueue(0, entry(id)).unwrap();
        }
    }

    let mut registry = TaskModelRegistry::new();
    registry.register("echo", "low", ModelHandle { endpoint: "http://m".into() });

    let (_tx, rx) = mpsc::channel(1);
    let bus = Box::new(MpscTickBus::new(rx));
    let order = Arc::new(StdMutex::new(Vec::new()));
    let executor = Arc::new(RecordingExecutor { order: order.clone() });

    let mut dispatcher = TickDispatcher::new(bus, queues, SlotClock::new(1), registry, executor);
    dispatcher.on_tick().await;

    assert_eq!(*order.lock().unwrap(), vec![3, 1, 2, 5, 4]);
}

#[tokio::test]
async fn rollover_drains_a_slot_exactly_once_per_cycle() {
    // spec §8 scenario 6: Delta=3, enqueue to slot 1, issue ticks 0,1,2,0.
    // Drain occurs on the second tick; the fourth tick does not re-drain slot 1.
    let queues = Arc::new(Mutex::new(SlotQueues::new(3)));
    queues.lock().await.enqueue(1, entry(1)).unwrap();

    let mut registry = TaskModelRegistry::new();
    registry.register("echo", "low", ModelHandle { endpoint: "http://m".into() });

    let (_tx, rx) = mpsc::channel(1);
    let bus = Box::new(MpscTickBus::new(rx));
    let order = Arc::new(StdMutex::new(Vec::new()));
    let executor = Arc::new(RecordingExecutor { order: order.clone() });

    let mut dispatcher = TickDispatcher::new(bus, queues, SlotClock::new(3), registry, executor);

    for _ in 0..4 {
        dispatcher.on_tick().await;
    }

    assert_eq!(*order.lock().unwrap(), vec![1], "the entry is dispatched exactly once across the full cycle");
}
