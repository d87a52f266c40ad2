use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, instrument};

use crate::error::PoolError;
use crate::request::Request;

/// Holds pending requests until a scheduling event drains them for the
/// Block Partitioner / Constraint Solver Driver to consume.
///
/// Ordering is irrelevant to correctness — the Block Partitioner re-sorts by
/// deadline — so `drain` returns requests in an unspecified (insertion-ish)
/// order. No deduplication is performed; ids are assumed unique by the
/// caller (spec §4.2).
///
/// Mirrors the host's `SessionManager` shared-state shape: an `Arc<Mutex<..>>`
/// map that supports concurrent producers (ingress) and a single consumer
/// (the scheduling-event driver) without the caller managing the lock.
#[derive(Clone)]
pub struct RequestPool {
    horizon: u32,
    inner: Arc<Mutex<HashMap<u64, Request>>>,
}

impl RequestPool {
    /// `horizon` is Δ, the exclusive upper bound on admissible deadlines.
    pub fn new(horizon: u32) -> Self {
        Self {
            horizon,
            inner: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn horizon(&self) -> u32 {
        self.horizon
    }

    /// Admits a request. Fails with `InvalidDeadline` if `deadline` falls
    /// outside `[0, horizon)`; failure does not affect any other request.
    #[instrument(skip(self, req), fields(request_id = req.id))]
    pub async fn admit(&self, req: Request) -> Result<(), PoolError> {
        if req.deadline >= self.horizon {
            return Err(PoolError::InvalidDeadline {
                id: req.id,
                deadline: req.deadline,
                horizon: self.horizon,
            });
        }

        let mut guard = self.inner.lock().await;
        guard.insert(req.id, req);
        debug!(pending = guard.len(), "request admitted");
        Ok(())
    }

    /// Atomically removes and returns every pending request.
    #[instrument(skip(self))]
    pub async fn drain(&self) -> Vec<Request> {
        let mut guard = self.inner.lock().await;
        let drained: HashMap<u64, Request> = std::mem::take(&mut *guard);
        debug!(count = drained.len(), "pool drained");
        drained.into_values().collect()
    }

    /// Number of currently pending requests (observability only).
    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn req(id: u64, deadline: u32) -> Request {
        Request::new(id, deadline, json!({"task": "Echo"}), "http://localhost/cb")
    }

    #[tokio::test]
    async fn admit_rejects_out_of_range_deadline() {
        let pool = RequestPool::new(4);
        let err = pool.admit(req(1, 4)).await.unwrap_err();
        assert!(matches!(err, PoolError::InvalidDeadline { id: 1, deadline: 4, horizon: 4 }));
        assert_eq!(pool.len().await, 0);
    }

    #[tokio::test]
    async fn admit_accepts_boundary_deadline() {
        let pool = RequestPool::new(4);
        pool.admit(req(1, 3)).await.unwrap();
        assert_eq!(pool.len().await, 1);
    }

    #[tokio::test]
    async fn drain_empties_and_returns_all() {
        let pool = RequestPool::new(10);
        for id in 0..5 {
            pool.admit(req(id, 1)).await.unwrap();
        }
        let drained = pool.drain().await;
        assert_eq!(drained.len(), 5);
        assert!(pool.is_empty().await);
    }

    #[tokio::test]
    async fn one_invalid_request_does_not_affect_others() {
        let pool = RequestPool::new(4);
        pool.admit(req(1, 2)).await.unwrap();
        assert!(pool.admit(req(2, 99)).await.is_err());
        assert_eq!(pool.len().await, 1);
    }
}
