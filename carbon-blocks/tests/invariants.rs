use std::time::Duration;

use carbon_blocks::{Assignment, partition, solve};
use carbon_pool::Request;
use catalog::{CarbonCatalog, Strategy as CatStrategy};
use proptest::prelude::*;
use serde_json::json;

const TIME_BUDGET: Duration = Duration::from_secs(2);

/// Generates a catalog together with a request list whose deadlines are
/// always within that catalog's horizon.
fn arb_catalog_and_requests() -> impl Strategy<Value = (CarbonCatalog, Vec<Request>)> {
    (
        prop::collection::vec((0u32..6, 1u32..6), 1..5),
        prop::collection::vec(0.0f64..20.0, 1..8),
    )
        .prop_flat_map(|(strategy_specs, intensity)| {
            let horizon = intensity.len() as u32;
            let strategies: Vec<CatStrategy> = strategy_specs
                .into_iter()
                .enumerate()
                .map(|(i, (error, duration))| CatStrategy {
                    name: format!("s{i}"),
                    error,
                    duration,
                })
                .collect();
            let catalog = CarbonCatalog::from_parts(strategies, intensity).unwrap();

            prop::collection::vec(0u32..horizon, 0..12).prop_map(move |deadlines| {
                let requests = deadlines
                    .into_iter()
                    .enumerate()
                    .map(|(i, deadline)| Request::new(i as u64, deadline, json!({}), "http://cb"))
                    .collect();
                (catalog.clone(), requests)
            })
        })
}

fn objective(cat: &CarbonCatalog, assignment: &Assignment) -> f64 {
    assignment
        .values()
        .map(|(slot, name)| cat.intensity(*slot).unwrap() * cat.by_name(name).unwrap().duration as f64)
        .sum()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn deadline_and_exactly_one_hold_for_any_feasible_solve(
        (cat, requests) in arb_catalog_and_requests(),
        epsilon in 0.0f64..50.0,
    ) {
        let by_id: std::collections::HashMap<u64, &Request> =
            requests.iter().map(|r| (r.id, r)).collect();
        let blocks = partition(requests.clone(), None);

        if let Ok((assignment, _)) = solve(&blocks, &cat, epsilon, TIME_BUDGET) {
            // Exactly-one: every submitted request appears in the assignment.
            prop_assert_eq!(assignment.len(), requests.len());

            for (id, (slot, _strategy)) in &assignment {
                let req = by_id[id];
                // Deadline respected.
                prop_assert!(*slot <= req.deadline);
            }
        }
    }

    #[test]
    fn error_budget_is_never_exceeded(
        (cat, requests) in arb_catalog_and_requests(),
        epsilon in 0.0f64..50.0,
    ) {
        let blocks = partition(requests, None);
        let n_blocks = blocks.len();

        if let Ok((assignment, _)) = solve(&blocks, &cat, epsilon, TIME_BUDGET) {
            // Each block contributes exactly one error term (every member
            // inherits the same (slot, strategy)); pick one representative
            // request per block to avoid double-counting.
            let total_error: f64 = blocks
                .iter()
                .map(|b| {
                    let (_, name) = &assignment[&b.requests[0].id];
                    cat.by_name(name).unwrap().error as f64
                })
                .sum();
            prop_assert!(total_error <= epsilon * n_blocks as f64 + 1e-6);
        }
    }

    #[test]
    fn increasing_epsilon_never_increases_optimal_objective(
        (cat, requests) in arb_catalog_and_requests(),
        eps_low in 0.0f64..10.0,
        eps_delta in 0.0f64..10.0,
    ) {
        let blocks = partition(requests, None);
        let eps_high = eps_low + eps_delta;

        let low = solve(&blocks, &cat, eps_low, TIME_BUDGET);
        let high = solve(&blocks, &cat, eps_high, TIME_BUDGET);

        if let (Ok((low_assignment, _)), Ok((high_assignment, _))) = (low, high) {
            prop_assert!(objective(&cat, &high_assignment) <= objective(&cat, &low_assignment) + 1e-6);
        }
    }

    #[test]
    fn decreasing_beta_never_decreases_optimal_objective(
        (cat, requests) in arb_catalog_and_requests(),
        epsilon in 0.0f64..50.0,
    ) {
        // beta=None (finest) vs beta=1 (coarsest single block) on the same input.
        prop_assume!(!requests.is_empty());
        let fine_blocks = partition(requests.clone(), None);
        let coarse_blocks = partition(requests, Some(1));

        let fine = solve(&fine_blocks, &cat, epsilon, TIME_BUDGET);
        let coarse = solve(&coarse_blocks, &cat, epsilon, TIME_BUDGET);

        if let (Ok((fine_assignment, _)), Ok((coarse_assignment, _))) = (fine, coarse) {
            prop_assert!(objective(&cat, &coarse_assignment) >= objective(&cat, &fine_assignment) - 1e-6);
        }
    }
}
