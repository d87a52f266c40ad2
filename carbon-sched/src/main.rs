use std::fs::File;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use carbon_blocks::{partition, solve};
use carbon_dispatch::{
    DispatchEntry, Executor, ExecutorAck, ExecutorError, ModelHandle, TaskModelRegistry,
    TickDispatcher,
};
use carbon_pool::RequestPool;
use carbon_queues::{QueueEntry, SlotClock, SlotQueues};
use catalog::CarbonCatalog;
use tokio::sync::{Mutex, mpsc};

use carbon_sched::config::SchedulerAppConfig;
use carbon_sched::error::AppError;
use carbon_sched::recorder;

/// Stand-in executor that logs and acknowledges every dispatched request.
///
/// The real callout (an HTTP POST to the model's endpoint per spec §1) is an
/// external collaborator; wiring one up is out of scope here the same way
/// the host's `main.rs` wires a `DummySwapExecutor` until the real chain
/// client is ready.
struct LoggingExecutor;

#[async_trait]
impl Executor for LoggingExecutor {
    async fn execute(&self, entry: DispatchEntry) -> Result<ExecutorAck, ExecutorError> {
        tracing::info!(
            request_id = entry.request.id,
            task = %entry.task,
            strategy = %entry.strategy,
            endpoint = %entry.model.endpoint,
            "dispatched request"
        );
        Ok(ExecutorAck {
            request_id: entry.request.id,
            slot_executed: 0,
        })
    }
}

fn load_catalog(cfg: &SchedulerAppConfig) -> anyhow::Result<CarbonCatalog> {
    let file = File::open(&cfg.catalog_path)?;
    let intensity = std::env::var("CARBON_INTENSITY")
        .ok()
        .map(|raw| {
            raw.split(',')
                .map(|v| v.trim().parse::<f64>())
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()?
        .unwrap_or_else(|| vec![1.0; 24]);

    Ok(CarbonCatalog::load(file, intensity)?)
}

/// One scheduling cycle: drain the pool, partition + solve, record the
/// assignment, then push each request into the slot queue it was assigned
/// to (spec §4, §5 — the boundary between the optimizer and the dispatcher).
async fn run_scheduling_cycle(
    pool: &RequestPool,
    catalog: &CarbonCatalog,
    queues: &Arc<Mutex<SlotQueues>>,
    cfg: &SchedulerAppConfig,
) -> Result<(), AppError> {
    let requests = pool.drain().await;
    if requests.is_empty() {
        return Ok(());
    }

    let blocks = partition(requests, cfg.beta);
    let started = Instant::now();
    let solved = common::logger::warn_if_slow(
        "solve_assignment",
        std::time::Duration::from_millis(500),
        async { solve(&blocks, catalog, cfg.epsilon, cfg.solver_time_budget) },
    )
    .await;

    let (assignment, status) = match solved {
        Ok(ok) => ok,
        Err(err) => {
            // spec §4.4/§7: a solver failure must leave the Request Pool as
            // though the cycle never ran, so operators can retry with a
            // relaxed epsilon/beta instead of losing the batch.
            for block in blocks {
                for request in block.requests {
                    let id = request.id;
                    if let Err(admit_err) = pool.admit(request).await {
                        tracing::error!(request_id = id, %admit_err, "failed to re-admit request after solve failure");
                    }
                }
            }
            return Err(err.into());
        }
    };
    let solve_time = started.elapsed().as_secs_f64();

    let mut stdout = std::io::stdout();
    let summary = recorder::record(&assignment, catalog, status, solve_time, &mut stdout)?;
    tracing::info!(
        assigned = assignment.len(),
        mean_error = summary.mean_error,
        all_emissions = summary.all_emissions,
        "scheduling cycle complete"
    );

    let mut guard = queues.lock().await;
    for (request_id, (slot, strategy)) in assignment {
        let block = blocks.iter().find(|b| b.requests.iter().any(|r| r.id == request_id));
        let Some(request) = block.and_then(|b| b.requests.iter().find(|r| r.id == request_id)) else {
            continue;
        };
        let entry = QueueEntry {
            request: request.clone(),
            strategy,
        };
        if let Err(err) = guard.enqueue(slot, entry) {
            tracing::error!(request_id, %err, "failed to enqueue assigned request");
        }
    }

    Ok(())
}


#[tokio::main]
async fn main() -> anyhow::Result<()> {
    common::logger::init_logger("carbon-sched");

    let cfg = SchedulerAppConfig::from_env();
    tracing::info!(catalog_path = %cfg.catalog_path, beta = ?cfg.beta, epsilon = cfg.epsilon, "starting carbon-sched");

    let catalog = load_catalog(&cfg)?;
    let horizon = catalog.horizon();

    let pool = RequestPool::new(horizon);
    let queues = Arc::new(Mutex::new(SlotQueues::new(horizon)));
    let clock = SlotClock::new(horizon);

    let mut registry = TaskModelRegistry::new();
    for strategy in catalog.strategies() {
        registry.register("echo", &strategy.name, ModelHandle { endpoint: "http://localhost:9999/echo".into() });
    }

    let (tick_tx, tick_rx) = mpsc::channel(8);
    let bus = Box::new(carbon_dispatch::MpscTickBus::new(tick_rx));
    let dispatcher = TickDispatcher::new(bus, queues.clone(), clock, registry, Arc::new(LoggingExecutor));

    let dispatcher_handle = tokio::spawn(dispatcher.run());

    let mut ticker = tokio::time::interval(cfg.tick_interval);
    let pool_for_cycle = pool.clone();
    let catalog_for_cycle = catalog.clone();
    let queues_for_cycle = queues.clone();
    let cfg_for_cycle = cfg.clone();

    tokio::spawn(async move {
        loop {
            ticker.tick().await;
            if let Err(err) =
                run_scheduling_cycle(&pool_for_cycle, &catalog_for_cycle, &queues_for_cycle, &cfg_for_cycle).await
            {
                tracing::error!(%err, "scheduling cycle failed");
            }
            let _ = tick_tx.send(carbon_dispatch::Tick { tick_id: 0 }).await;
        }
    });

    tracing::info!("carbon-sched started; waiting for shutdown signal");

    // BusDisconnect is fatal (spec §7): a lost tick bus surfaces here as a
    // non-zero exit rather than a silent restart loop, matching spec §6's
    // exit-code contract.
    tokio::select! {
        result = dispatcher_handle => {
            match result {
                Ok(Err(err)) => {
                    tracing::error!(%err, "tick dispatcher exited fatally");
                    std::process::exit(1);
                }
                Err(join_err) => {
                    tracing::error!(%join_err, "tick dispatcher task panicked");
                    std::process::exit(1);
                }
                Ok(Ok(())) => unreachable!("TickDispatcher::run only returns Err"),
            }
        }
        signal = tokio::signal::ctrl_c() => {
            signal?;
            tracing::info!("shutdown signal received");
        }
    }

    Ok(())
}
