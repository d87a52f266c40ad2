use carbon_pool::{PoolError, Request, RequestPool};
use proptest::prelude::*;
use serde_json::json;

fn req(id: u64, deadline: u32) -> Request {
    Request::new(id, deadline, json!({"task": "Echo"}), "http://localhost/cb")
}

proptest! {
    #[test]
    fn admitted_requests_are_returned_exactly_once_by_drain(
        horizon in 1u32..50,
        deadlines in prop::collection::vec(0u32..200, 0..40),
    ) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let pool = RequestPool::new(horizon);
            let mut admitted_ids = Vec::new();

            for (i, deadline) in deadlines.iter().enumerate() {
                let id = i as u64;
                let result = pool.admit(req(id, *deadline)).await;
                if *deadline < horizon {
                    prop_assert!(result.is_ok());
                    admitted_ids.push(id);
                } else {
                    prop_assert!(matches!(result, Err(PoolError::InvalidDeadline { .. })));
                }
            }

            let drained = pool.drain().await;
            let mut drained_ids: Vec<u64> = drained.iter().map(|r| r.id).collect();
            drained_ids.sort_unstable();
            admitted_ids.sort_unstable();
            prop_assert_eq!(drained_ids, admitted_ids);
            prop_assert!(pool.is_empty().await);
            Ok(())
        })?;
    }
}
