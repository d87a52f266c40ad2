use std::io::Read;

use crate::error::CatalogError;
use crate::strategy::{Strategy, StrategyRow};

/// Immutable, process-lifetime tables loaded once at startup: strategies and
/// their (error, duration) costs, plus the per-slot carbon intensity series.
///
/// Cheap to clone (two small `Vec`s); callers share it behind `Arc` the same
/// way the host shares `MarketViewStore` / `SessionStore`.
#[derive(Clone, Debug)]
pub struct CarbonCatalog {
    strategies: Vec<Strategy>,
    intensity: Vec<f64>,
}

impl CarbonCatalog {
    /// Load strategies from a `name,error,duration` CSV reader and pair them
    /// with an already-fetched carbon intensity series (the acquisition of
    /// intensity data is an external collaborator per spec §1).
    pub fn load<R: Read>(strategies_csv: R, intensity: Vec<f64>) -> Result<Self, CatalogError> {
        let mut reader = csv::Reader::from_reader(strategies_csv);
        let mut strategies = Vec::new();

        for row in reader.deserialize::<StrategyRow>() {
            let row = row?;
            if row.error < 0.0 {
                return Err(CatalogError::NegativeField {
                    name: row.name,
                    field: "error",
                    value: row.error,
                });
            }
            if row.duration < 0.0 {
                return Err(CatalogError::NegativeField {
                    name: row.name,
                    field: "duration",
                    value: row.duration,
                });
            }

            strategies.push(Strategy {
                name: row.name,
                error: row.error as u32,
                duration: row.duration as u32,
            });
        }

        Self::from_parts(strategies, intensity)
    }

    /// Build directly from in-memory parts (used by tests and by callers
    /// that already hold parsed strategies, e.g. the CLI's `--strategy`
    /// repeated flag).
    pub fn from_parts(strategies: Vec<Strategy>, intensity: Vec<f64>) -> Result<Self, CatalogError> {
        if strategies.is_empty() {
            return Err(CatalogError::EmptyStrategies);
        }
        if intensity.is_empty() {
            return Err(CatalogError::EmptyHorizon);
        }
        for (slot, value) in intensity.iter().enumerate() {
            if *value < 0.0 {
                return Err(CatalogError::NegativeIntensity {
                    slot: slot as u32,
                    value: *value,
                });
            }
        }

        Ok(Self {
            strategies,
            intensity,
        })
    }

    /// Ordered list of known strategies.
    pub fn strategies(&self) -> &[Strategy] {
        &self.strategies
    }

    pub fn by_name(&self, name: &str) -> Option<&Strategy> {
        self.strategies.iter().find(|s| s.name == name)
    }

    /// Carbon intensity at slot `t`, or `None` if `t` is outside the horizon.
    pub fn intensity(&self, t: u32) -> Option<f64> {
        self.intensity.get(t as usize).copied()
    }

    /// Planning horizon Δ, i.e. the number of slots known to the catalog.
    pub fn horizon(&self) -> u32 {
        self.intensity.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strat(name: &str, error: u32, duration: u32) -> Strategy {
        Strategy {
            name: name.to_string(),
            error,
            duration,
        }
    }

    #[test]
    fn loads_valid_csv() {
        let csv = "name,error,duration\nlow,0,1\nhigh,5,10\n";
        let catalog = CarbonCatalog::load(csv.as_bytes(), vec![1.0, 2.0]).unwrap();
        assert_eq!(catalog.horizon(), 2);
        assert_eq!(catalog.by_name("low").unwrap().duration, 1);
        assert_eq!(catalog.by_name("high").unwrap().error, 5);
        assert!(catalog.by_name("missing").is_none());
    }

    #[test]
    fn rejects_negative_duration() {
        let csv = "name,error,duration\nbad,0,-1\n";
        let err = CarbonCatalog::load(csv.as_bytes(), vec![1.0]).unwrap_err();
        assert!(matches!(err, CatalogError::NegativeField { field: "duration", .. }));
    }

    #[test]
    fn rejects_empty_strategies() {
        let err = CarbonCatalog::from_parts(vec![], vec![1.0]).unwrap_err();
        assert!(matches!(err, CatalogError::EmptyStrategies));
    }

    #[test]
    fn rejects_empty_horizon() {
        let err = CarbonCatalog::from_parts(vec![strat("low", 0, 1)], vec![]).unwrap_err();
        assert!(matches!(err, CatalogError::EmptyHorizon));
    }

    #[test]
    fn rejects_negative_intensity() {
        let err = CarbonCatalog::from_parts(vec![strat("low", 0, 1)], vec![1.0, -0.5]).unwrap_err();
        assert!(matches!(err, CatalogError::NegativeIntensity { slot: 1, .. }));
    }

    #[test]
    fn intensity_out_of_range_is_none() {
        let catalog = CarbonCatalog::from_parts(vec![strat("low", 0, 1)], vec![1.0]).unwrap();
        assert_eq!(catalog.intensity(0), Some(1.0));
        assert_eq!(catalog.intensity(1), None);
    }
}
