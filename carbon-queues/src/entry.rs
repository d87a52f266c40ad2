use carbon_pool::Request;

/// A request paired with the strategy the solver chose for it, queued at the
/// slot it was assigned to await dispatch (spec §3).
#[derive(Clone, Debug)]
pub struct QueueEntry {
    pub request: Request,
    pub strategy: String,
}
