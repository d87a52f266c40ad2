use serde::Deserialize;

/// An execution strategy: a named trade-off between result quality (`error`)
/// and resource footprint (`duration`, the emission multiplier).
///
/// Immutable once the catalog is loaded.
#[derive(Clone, Debug, PartialEq)]
pub struct Strategy {
    pub name: String,
    pub error: u32,
    pub duration: u32,
}

/// Raw row shape for the `name,error,duration` CSV table.
///
/// Kept as `f64` on the wire so that `CatalogError::NegativeField` can be
/// raised for negative values instead of failing silently on an unsigned
/// parse error.
#[derive(Debug, Deserialize)]
pub(crate) struct StrategyRow {
    pub name: String,
    pub error: f64,
    pub duration: f64,
}
