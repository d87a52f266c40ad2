use carbon_pool::Request;

use crate::block::Block;

/// Groups requests into at most `beta` blocks to bound the decision-variable
/// count the solver has to reason about (spec §4.3).
///
/// - `beta.is_none()` or `beta >= requests.len()` ⇒ every request is its own
///   block: optimality is preserved at the cost of the largest possible
///   problem size.
/// - Otherwise requests are stable-sorted ascending by deadline and chunked
///   into contiguous groups of `ceil(requests.len() / beta)`, mirroring the
///   reference implementation's grouping exactly (the last group may be
///   smaller). This keeps each block's internal deadline spread small, so
///   `block.deadline = min(member deadlines)` stays close to every member's
///   own deadline.
pub fn partition(requests: Vec<Request>, beta: Option<usize>) -> Vec<Block> {
    if requests.is_empty() {
        return Vec::new();
    }

    let Some(beta) = beta.filter(|&b| b < requests.len()) else {
        return requests.into_iter().map(|r| Block::new(vec![r])).collect();
    };

    let mut sorted = requests;
    sorted.sort_by_key(|r| r.deadline);

    let group_size = sorted.len().div_ceil(beta);

    sorted
        .chunks(group_size)
        .map(|chunk| Block::new(chunk.to_vec()))
        .collect()
}
