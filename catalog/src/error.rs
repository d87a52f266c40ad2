use thiserror::Error;

/// Failures raised while loading or validating the strategy/carbon catalog.
///
/// Every variant here is fatal at startup (spec: `CatalogMalformed`); there is
/// no partial-load recovery, the catalog is either usable or it isn't.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read strategy table: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse strategy row: {0}")]
    Csv(#[from] csv::Error),

    #[error("strategy '{name}' has negative {field} ({value})")]
    NegativeField {
        name: String,
        field: &'static str,
        value: f64,
    },

    #[error("strategy table is empty")]
    EmptyStrategies,

    #[error("carbon intensity value at slot {slot} is negative ({value})")]
    NegativeIntensity { slot: u32, value: f64 },

    #[error("carbon intensity sequence is empty")]
    EmptyHorizon,

    #[error("unknown strategy '{0}'")]
    UnknownStrategy(String),
}
