use carbon_pool::Request;
use catalog::{CarbonCatalog, CatalogError};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::BenchmarkError;
use crate::solver::Assignment;

/// Non-optimizing baseline used to benchmark the solver against (spec §4.8).
///
/// `Low`/`Medium`/`High` deliberately ignore deadlines — this is a stress
/// baseline, not a bug to "fix" (spec §9, Open Question (b)).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BenchmarkMode {
    Low,
    Medium,
    High,
    Naive,
}

impl BenchmarkMode {
    fn fixed_strategy_name(self) -> Option<&'static str> {
        match self {
            BenchmarkMode::Low => Some("low"),
            BenchmarkMode::Medium => Some("medium"),
            BenchmarkMode::High => Some("high"),
            BenchmarkMode::Naive => None,
        }
    }
}

/// Assigns every request a `(slot, strategy)` pair using a fixed mode
/// instead of the optimizer, for benchmarking/stress-testing purposes.
///
/// `solver_status = "benchmark"` and `solve_time = 0` are the caller's
/// (the Assignment Recorder's) responsibility to record, per spec §4.8.
pub fn assign_benchmark(
    requests: &[Request],
    mode: BenchmarkMode,
    catalog: &CarbonCatalog,
    current_tick: u32,
) -> Result<Assignment, BenchmarkError> {
    let horizon = catalog.horizon();
    let mut rng = rand::thread_rng();
    let mut assignment = Assignment::new();

    match mode.fixed_strategy_name() {
        Some(name) => {
            catalog
                .by_name(name)
                .ok_or_else(|| CatalogError::UnknownStrategy(name.to_string()))?;
            let slot = (current_tick + 1) % horizon;
            for req in requests {
                assignment.insert(req.id, (slot, name.to_string()));
            }
        }
        None => {
            for req in requests {
                let strategy = catalog
                    .strategies()
                    .choose(&mut rng)
                    .expect("catalog is validated non-empty at load time");

                let upper = req.deadline.min(horizon.saturating_sub(1));
                let lower = current_tick.min(upper);
                let slot = if lower > upper {
                    upper
                } else if lower == upper {
                    upper
                } else {
                    rng.gen_range(lower..=upper)
                };

                assignment.insert(req.id, (slot, strategy.name.clone()));
            }
        }
    }

    Ok(assignment)
}
