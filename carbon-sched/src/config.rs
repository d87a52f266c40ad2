use std::time::Duration;

/// Process-wide configuration, loaded once at startup (spec §10), mirroring
/// the host's `AppConfig::from_env` idiom: environment variables with
/// conservative defaults, never a panic on a missing var.
#[derive(Clone, Debug)]
pub struct SchedulerAppConfig {
    /// Path to the `name,error,duration` strategy catalog CSV.
    pub catalog_path: String,

    /// Number of blocks the partitioner groups requests into. `None` keeps
    /// every request as its own block (maximum optimality, maximum solver
    /// cost).
    pub beta: Option<usize>,

    /// Maximum acceptable average strategy error across all blocks.
    pub epsilon: f64,

    /// Wall-clock ceiling for a single solver invocation.
    pub solver_time_budget: Duration,

    /// How often the tick loop advances in the in-process demo wiring.
    pub tick_interval: Duration,
}

impl SchedulerAppConfig {
    pub fn from_env() -> Self {
        Self {
            catalog_path: std::env::var("CATALOG_PATH").unwrap_or_else(|_| "strategies.csv".to_string()),
            beta: std::env::var("SCHEDULER_BETA")
                .ok()
                .and_then(|v| v.parse().ok()),
            epsilon: std::env::var("SCHEDULER_EPSILON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1.0),
            solver_time_budget: Duration::from_secs(
                std::env::var("SCHEDULER_SOLVER_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(300),
            ),
            tick_interval: Duration::from_millis(
                std::env::var("SCHEDULER_TICK_INTERVAL_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(1_000),
            ),
        }
    }
}
