use std::io::Write;

use carbon_blocks::{Assignment, SolverStatus};
use catalog::CarbonCatalog;
use serde::Serialize;
use tracing::instrument;

use crate::error::RecorderError;

/// One row of the assignment log, written in `request_id` ascending order
/// (spec §6).
#[derive(Serialize)]
pub struct AssignmentRecord {
    pub request_id: u64,
    pub strategy: String,
    pub time_slot: u32,
    pub emission: f64,
    pub error: u32,
}

/// The footer summary computed alongside the CSV body — also returned to
/// the caller so metrics/tests don't have to re-parse the file the recorder
/// just wrote.
#[derive(Clone, Debug, PartialEq)]
pub struct RecorderSummary {
    pub max_weighted_error_threshold: u64,
    pub solver_status: String,
    pub all_emissions: f64,
    pub slot_emissions: Vec<f64>,
    pub mean_error: f64,
    pub solve_time_secs: f64,
}

/// Writes the assignment CSV body plus the trailing `key: value` summary
/// block, mirroring the reference CSV writer's exact row and footer shape
/// (spec §6, §9) while using the `csv` crate and `serde::Serialize` instead
/// of hand-rolled string formatting.
#[instrument(skip(assignment, catalog, writer), fields(count = assignment.len()))]
pub fn record(
    assignment: &Assignment,
    catalog: &CarbonCatalog,
    status: SolverStatus,
    solve_time_secs: f64,
    mut writer: impl Write,
) -> Result<RecorderSummary, RecorderError> {
    let mut rows: Vec<AssignmentRecord> = Vec::with_capacity(assignment.len());

    for (request_id, (slot, strategy_name)) in assignment {
        let strategy = catalog
            .by_name(strategy_name)
            .ok_or_else(|| RecorderError::UnknownStrategy(strategy_name.clone()))?;
        let emission = catalog.intensity(*slot).unwrap_or(0.0) * strategy.duration as f64;

        rows.push(AssignmentRecord {
            request_id: *request_id,
            strategy: strategy_name.clone(),
            time_slot: *slot,
            emission,
            error: strategy.error,
        });
    }

    rows.sort_by_key(|r| r.request_id);

    let mut body = csv::Writer::from_writer(Vec::new());
    for row in &rows {
        body.serialize(row)?;
    }
    body.flush()?;
    writer.write_all(&body.into_inner().expect("in-memory writer never fails to flush"))?;

    let total_error: u64 = rows.iter().map(|r| r.error as u64).sum();
    let all_emissions: f64 = rows.iter().map(|r| r.emission).sum();

    let mut slot_emissions = vec![0.0; catalog.horizon() as usize];
    for row in &rows {
        if let Some(slot) = slot_emissions.get_mut(row.time_slot as usize) {
            *slot += row.emission;
        }
    }

    let mean_error = if rows.is_empty() {
        0.0
    } else {
        (total_error as f64 / rows.len() as f64 * 10_000.0).round() / 10_000.0
    };

    let summary = RecorderSummary {
        max_weighted_error_threshold: total_error,
        solver_status: status.to_string(),
        all_emissions,
        slot_emissions,
        mean_error,
        solve_time_secs,
    };

    writeln!(writer)?;
    writeln!(writer, "max_weighted_error_threshold: {}", summary.max_weighted_error_threshold)?;
    writeln!(writer, "solver_status: {}", summary.solver_status)?;
    writeln!(writer, "all_emissions:{}", summary.all_emissions)?;
    writeln!(writer, "slot_emissions:{:?}", summary.slot_emissions)?;
    writeln!(writer, "all_errors:{}", summary.mean_error)?;
    writeln!(writer, "solve_time:{}", (summary.solve_time_secs * 10_000.0).round() / 10_000.0)?;

    Ok(summary)
}
