use carbon_pool::Request;

/// A fan-out notification from the external tick bus (spec §6): "slot `tick_id`
/// is now current, drain and dispatch it."
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tick {
    pub tick_id: u64,
}

/// One request, ready to be handed to the executor, carrying the model
/// endpoint its `(task, strategy)` pair resolved to.
#[derive(Clone, Debug)]
pub struct DispatchEntry {
    pub request: Request,
    pub strategy: String,
    pub task: String,
    pub model: ModelHandle,
}

/// Opaque reference to the model/endpoint a `(task, strategy)` pair resolves
/// to. The dispatcher never interprets it — it is forwarded to the
/// `Executor` implementation, which owns the actual callout (spec §1: model
/// invocation is an external collaborator).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelHandle {
    pub endpoint: String,
}

/// Acknowledgement returned by a successful `Executor::execute` call.
#[derive(Clone, Debug)]
pub struct ExecutorAck {
    pub request_id: u64,
    pub slot_executed: u32,
}
