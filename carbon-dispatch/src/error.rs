use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExecutorError {
    #[error("executor unavailable for request {request_id}")]
    Unavailable { request_id: u64 },
    #[error("no model registered for task={task:?} strategy={strategy:?}")]
    UnknownTaskStrategy { task: String, strategy: String },
    #[error("request {request_id} payload has no string \"task\" field")]
    MissingTask { request_id: u64 },
}

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error(transparent)]
    Queue(#[from] carbon_queues::QueueError),
    /// The tick bus closed or failed (spec §7 `BusDisconnect`). Fatal: the
    /// caller should propagate this to the process boundary for a
    /// supervisor restart, not retry in place.
    #[error("tick bus disconnected")]
    BusDisconnect,
}
