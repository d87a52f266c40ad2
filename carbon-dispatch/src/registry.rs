use std::collections::HashMap;

use crate::error::ExecutorError;
use crate::types::ModelHandle;

/// Resolves `(task, strategy)` pairs to the model/endpoint that should serve
/// them, generalized from the host's engine-kind registry
/// (`engine::pulse::registry::PulseRegistry`) into a two-key lookup table.
///
/// Unlike `PulseRegistry`, there is nothing to "fire" here — dispatch just
/// needs to know whether a route exists before handing work to the
/// executor; an unrecognized pair fails that one entry, never the whole
/// tick (spec §9).
#[derive(Default)]
pub struct TaskModelRegistry {
    routes: HashMap<(String, String), ModelHandle>,
}

impl TaskModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, task: impl Into<String>, strategy: impl Into<String>, model: ModelHandle) {
        self.routes.insert((task.into(), strategy.into()), model);
    }

    pub fn lookup(&self, task: &str, strategy: &str) -> Option<&ModelHandle> {
        self.routes.get(&(task.to_string(), strategy.to_string()))
    }

    /// Same as [`Self::lookup`] but returns the error the dispatcher records
    /// per-entry rather than failing the tick.
    pub fn resolve(&self, task: &str, strategy: &str) -> Result<ModelHandle, ExecutorError> {
        self.lookup(task, strategy)
            .cloned()
            .ok_or_else(|| ExecutorError::UnknownTaskStrategy {
                task: task.to_string(),
                strategy: strategy.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_and_resolves_a_route() {
        let mut reg = TaskModelRegistry::new();
        reg.register("echo", "low", ModelHandle { endpoint: "http://m1".into() });
        let handle = reg.resolve("echo", "low").unwrap();
        assert_eq!(handle.endpoint, "http://m1");
    }

    #[test]
    fn unknown_pair_is_an_error() {
        let reg = TaskModelRegistry::new();
        let err = reg.resolve("echo", "low").unwrap_err();
        assert!(matches!(err, ExecutorError::UnknownTaskStrategy { .. }));
    }

    #[test]
    fn registering_same_pair_twice_overwrites() {
        let mut reg = TaskModelRegistry::new();
        reg.register("echo", "low", ModelHandle { endpoint: "http://m1".into() });
        reg.register("echo", "low", ModelHandle { endpoint: "http://m2".into() });
        assert_eq!(reg.resolve("echo", "low").unwrap().endpoint, "http://m2");
    }
}
