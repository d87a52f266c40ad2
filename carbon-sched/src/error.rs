use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecorderError {
    #[error("unknown strategy {0:?} in assignment")]
    UnknownStrategy(String),
    #[error("csv write failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Top-level error for the binary, aggregating every sub-crate's error
/// vocabulary the way the host's `AppError` aggregates scheduler/execution
/// failures, bridged into `anyhow::Result` at the call sites.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Catalog(#[from] catalog::CatalogError),
    #[error(transparent)]
    Pool(#[from] carbon_pool::PoolError),
    #[error(transparent)]
    Solver(#[from] carbon_blocks::SolverError),
    #[error(transparent)]
    Recorder(#[from] RecorderError),
}
