/// A deferrable compute request awaiting a scheduling decision.
///
/// `payload` and `callback` are opaque to the core — they are echoed back
/// out to the external executor untouched (spec §3).
#[derive(Clone, Debug, PartialEq)]
pub struct Request {
    pub id: u64,
    pub deadline: u32,
    pub payload: serde_json::Value,
    pub callback: String,
}

impl Request {
    pub fn new(id: u64, deadline: u32, payload: serde_json::Value, callback: impl Into<String>) -> Self {
        Self {
            id,
            deadline,
            payload,
            callback: callback.into(),
        }
    }
}
