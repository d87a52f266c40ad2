use carbon_pool::Request;

/// A non-empty group of requests scheduled jointly under one `(strategy,
/// slot)` pair. Ephemeral: constructed per solve, discarded after the
/// assignment is projected back onto its members (spec §3).
#[derive(Clone, Debug)]
pub struct Block {
    pub requests: Vec<Request>,
    pub deadline: u32,
}

impl Block {
    /// Builds a block from a non-empty slice of requests, deriving
    /// `deadline` as the minimum member deadline per the block invariant.
    pub fn new(requests: Vec<Request>) -> Self {
        debug_assert!(!requests.is_empty(), "a block must contain at least one request");
        let deadline = requests.iter().map(|r| r.deadline).min().unwrap_or(0);
        Self { requests, deadline }
    }
}
