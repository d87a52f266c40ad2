use thiserror::Error;

#[derive(Error, Debug)]
pub enum SolverError {
    #[error("no feasible assignment within the error budget and wall-clock limit")]
    NoFeasibleAssignment,
}

#[derive(Error, Debug)]
pub enum BenchmarkError {
    #[error(transparent)]
    Catalog(#[from] catalog::CatalogError),
}
