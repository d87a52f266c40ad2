mod bus;
mod counters;
mod dispatcher;
mod error;
mod executor;
mod registry;
mod types;

pub use bus::{MpscTickBus, TickBus};
pub use counters::DispatchCounters;
pub use dispatcher::TickDispatcher;
pub use error::{DispatchError, ExecutorError};
pub use executor::Executor;
pub use registry::TaskModelRegistry;
pub use types::{DispatchEntry, ExecutorAck, ModelHandle, Tick};
