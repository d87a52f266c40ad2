use std::fs::File;
use std::path::PathBuf;

use carbon_blocks::{BenchmarkMode, SolverStatus, assign_benchmark, partition, solve};
use carbon_pool::Request;
use carbon_sched::recorder;
use catalog::CarbonCatalog;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;

#[derive(Debug, Parser)]
#[clap(name = "carbon-cli", version)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Checks whether a single request would be admitted, without running
    /// the optimizer (spec §4.2: `deadline` must fall within the horizon).
    Admit {
        #[clap(long)]
        catalog: PathBuf,
        #[clap(long, value_delimiter = ',')]
        intensity: Vec<f64>,
        #[clap(long)]
        deadline: u32,
    },

    /// Loads a batch of requests from a JSON file and runs one full
    /// partition + solve cycle, printing the resulting assignment.
    RunCycle {
        #[clap(long)]
        catalog: PathBuf,
        #[clap(long, value_delimiter = ',')]
        intensity: Vec<f64>,
        #[clap(long)]
        requests: PathBuf,
        /// Number of blocks to partition requests into; omit for one block
        /// per request (spec §4.3).
        #[clap(long)]
        beta: Option<usize>,
        #[clap(long, default_value = "1.0")]
        epsilon: f64,
    },

    /// Prints the β/ε pair an operator is about to apply, so it can be
    /// reviewed before being passed to `run-cycle` or wired into
    /// `carbon-sched`'s environment configuration.
    Tune {
        #[clap(long)]
        beta: Option<usize>,
        #[clap(long)]
        epsilon: f64,
    },

    /// Runs the non-optimizing benchmark baseline (spec §4.8) against a
    /// request batch, for comparison against `run-cycle`'s optimizer output.
    Bench {
        #[clap(long)]
        catalog: PathBuf,
        #[clap(long, value_delimiter = ',')]
        intensity: Vec<f64>,
        #[clap(long)]
        requests: PathBuf,
        #[clap(long, value_enum)]
        mode: BenchMode,
        #[clap(long, default_value_t = 0)]
        current_tick: u32,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum BenchMode {
    Low,
    Medium,
    High,
    Naive,
}

impl From<BenchMode> for BenchmarkMode {
    fn from(mode: BenchMode) -> Self {
        match mode {
            BenchMode::Low => BenchmarkMode::Low,
            BenchMode::Medium => BenchmarkMode::Medium,
            BenchMode::High => BenchmarkMode::High,
            BenchMode::Naive => BenchmarkMode::Naive,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RequestSpec {
    id: u64,
    deadline: u32,
    #[serde(default)]
    payload: serde_json::Value,
    #[serde(default = "default_callback")]
    callback: String,
}

fn default_callback() -> String {
    "http://localhost/cb".to_string()
}

pub fn load_catalog(path: &PathBuf, intensity: Vec<f64>) -> anyhow::Result<CarbonCatalog> {
    let file = File::open(path)?;
    Ok(CarbonCatalog::load(file, intensity)?)
}

pub fn load_requests(path: &PathBuf) -> anyhow::Result<Vec<Request>> {
    let file = File::open(path)?;
    let specs: Vec<RequestSpec> = serde_json::from_reader(file)?;
    Ok(specs
        .into_iter()
        .map(|s| Request::new(s.id, s.deadline, s.payload, s.callback))
        .collect())
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Admit { catalog, intensity, deadline } => {
            let catalog = load_catalog(&catalog, intensity)?;
            if deadline < catalog.horizon() {
                println!("admitted: deadline {deadline} is within horizon {}", catalog.horizon());
            } else {
                println!(
                    "rejected: deadline {deadline} is outside horizon [0, {})",
                    catalog.horizon()
                );
            }
        }

        Command::RunCycle { catalog, intensity, requests, beta, epsilon } => {
            let catalog = load_catalog(&catalog, intensity)?;
            let requests = load_requests(&requests)?;
            let blocks = partition(requests, beta);
            let (assignment, status) = solve(&blocks, &catalog, epsilon, std::time::Duration::from_secs(300))?;

            let mut rows: Vec<_> = assignment.into_iter().collect();
            rows.sort_by_key(|(id, _)| *id);
            println!("status: {status}");
            for (id, (slot, strategy)) in rows {
                println!("{id},{strategy},{slot}");
            }
        }

        Command::Tune { beta, epsilon } => {
            println!("beta={beta:?} epsilon={epsilon}");
        }

        Command::Bench { catalog, intensity, requests, mode, current_tick } => {
            let catalog = load_catalog(&catalog, intensity)?;
            let requests = load_requests(&requests)?;
            let assignment = assign_benchmark(&requests, mode.into(), &catalog, current_tick)?;

            // Same recorder format as `run-cycle` (spec §4.8): status is
            // always "benchmark" and solve_time is always 0, since no solver
            // ran.
            let stdout = std::io::stdout();
            recorder::record(&assignment, &catalog, SolverStatus::Benchmark, 0.0, stdout.lock())?;
        }
    }

    Ok(())
}
