use std::collections::HashMap;
use std::time::{Duration, Instant};

use catalog::CarbonCatalog;
use tracing::{debug, instrument, warn};

use crate::block::Block;
use crate::error::SolverError;

/// `request_id -> (slot, strategy_name)`, covering every request submitted
/// to the solver (spec §3).
pub type Assignment = HashMap<u64, (u32, String)>;

/// Outcome classification mirroring the CP-SAT status vocabulary this
/// driver's contract is modelled on (spec §4.4): this DP is exact, so in
/// practice only `Optimal` (full horizon explored) is ever returned —
/// `Feasible` is reserved for a future heuristic backend and documented
/// here so callers don't have to special-case it away.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolverStatus {
    Optimal,
    Feasible,
    /// The assignment came from the non-optimizing benchmark baseline
    /// (spec §4.8), not the solver — recorded as `"benchmark"` rather than
    /// the solver's own uppercase status vocabulary.
    Benchmark,
}

impl std::fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverStatus::Optimal => write!(f, "OPTIMAL"),
            SolverStatus::Feasible => write!(f, "FEASIBLE"),
            SolverStatus::Benchmark => write!(f, "benchmark"),
        }
    }
}

/// A single legal `(strategy, slot)` choice for one block: `t <= block.deadline`
/// pruning happens here, equivalent to fixing the out-of-range decision
/// variables to zero rather than ever materializing them (spec §4.4).
struct BlockOption {
    strategy_index: usize,
    slot: u32,
    emission: f64,
    error: u32,
}

fn block_options(block: &Block, catalog: &CarbonCatalog) -> Vec<BlockOption> {
    let mut options = Vec::new();
    for (strategy_index, strategy) in catalog.strategies().iter().enumerate() {
        for t in 0..=block.deadline {
            let Some(intensity) = catalog.intensity(t) else {
                continue;
            };
            options.push(BlockOption {
                strategy_index,
                slot: t,
                emission: intensity * strategy.duration as f64,
                error: strategy.error,
            });
        }
    }
    options
}

/// Solves the block-wise assignment problem described in spec §4.4.
///
/// The decision model (`x[b,s,t]` boolean, exactly-one-per-block, a single
/// linear error-budget constraint shared across all blocks, additively
/// separable emission objective) is a multiple-choice knapsack: blocks are
/// independent except for the one constraint that couples them. That lets
/// this be solved *exactly* with a dynamic program over integer total error,
/// rather than handed to an external ILP/CP backend — see DESIGN.md for why
/// this is the grounded choice here. `buildModel`/`solve`/`readAssignment`
/// from spec §9 correspond to [`block_options`], the DP loop below, and the
/// backtracking projection at the end of this function, respectively.
#[instrument(skip(blocks, catalog), fields(block_count = blocks.len(), epsilon))]
pub fn solve(
    blocks: &[Block],
    catalog: &CarbonCatalog,
    epsilon: f64,
    time_budget: Duration,
) -> Result<(Assignment, SolverStatus), SolverError> {
    if blocks.is_empty() {
        return Ok((Assignment::new(), SolverStatus::Optimal));
    }

    let n = blocks.len();
    let raw_budget = epsilon * n as f64 + 1e-9;
    if raw_budget < 0.0 {
        return Err(SolverError::NoFeasibleAssignment);
    }
    let budget = raw_budget.floor() as usize;

    // dp[e] = minimum cumulative emission to spend *exactly* e error across
    // the blocks processed so far; None means unreachable.
    let mut dp: Vec<Option<f64>> = vec![None; budget + 1];
    dp[0] = Some(0.0);

    // choice[i][e] = index into all_options[i] chosen to reach state e after
    // processing block i.
    let mut choice: Vec<Vec<Option<usize>>> = Vec::with_capacity(n);
    let mut all_options: Vec<Vec<BlockOption>> = Vec::with_capacity(n);

    let started = Instant::now();

    for block in blocks {
        if started.elapsed() > time_budget {
            warn!("solver wall-clock budget exceeded before a full assignment was found");
            return Err(SolverError::NoFeasibleAssignment);
        }

        let options = block_options(block, catalog);
        if options.is_empty() {
            return Err(SolverError::NoFeasibleAssignment);
        }

        let mut next_dp: Vec<Option<f64>> = vec![None; dp.len()];
        let mut next_choice: Vec<Option<usize>> = vec![None; dp.len()];

        for (opt_idx, opt) in options.iter().enumerate() {
            let err = opt.error as usize;
            if err >= dp.len() {
                continue;
            }
            for e in 0..dp.len() - err {
                let Some(prev) = dp[e] else { continue };
                let total = prev + opt.emission;
                let target = e + err;
                if next_dp[target].is_none_or(|cur| total < cur) {
                    next_dp[target] = Some(total);
                    next_choice[target] = Some(opt_idx);
                }
            }
        }

        dp = next_dp;
        choice.push(next_choice);
        all_options.push(options);
    }

    let best = dp
        .iter()
        .enumerate()
        .filter_map(|(e, v)| v.map(|emission| (e, emission)))
        .min_by(|a, b| a.1.total_cmp(&b.1));

    let Some((mut state, best_emission)) = best else {
        return Err(SolverError::NoFeasibleAssignment);
    };

    debug!(total_emission = best_emission, total_error = state, "optimal block assignment found");

    let mut chosen = vec![0usize; n];
    for i in (0..n).rev() {
        let opt_idx = choice[i][state].expect("a reachable dp state always has a recorded choice");
        chosen[i] = opt_idx;
        state -= all_options[i][opt_idx].error as usize;
    }

    let mut assignment = Assignment::new();
    for (i, block) in blocks.iter().enumerate() {
        let opt = &all_options[i][chosen[i]];
        let strategy_name = catalog.strategies()[opt.strategy_index].name.clone();
        for req in &block.requests {
            assignment.insert(req.id, (opt.slot, strategy_name.clone()));
        }
    }

    Ok((assignment, SolverStatus::Optimal))
}
