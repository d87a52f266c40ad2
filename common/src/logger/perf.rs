use std::time::{Duration, Instant};

/// Awaits `fut`, logging a warning if it took longer than `max`.
///
/// Used around the solver invocation and the per-tick slot drain — the two
/// places spec.md's wall-clock budget and "dispatch has no per-entry
/// timeout" language (§5) make slowness worth surfacing even though neither
/// path is allowed to fail just because it was slow.
pub async fn warn_if_slow<F, T>(label: &'static str, max: Duration, fut: F) -> T
where
    F: std::future::Future<Output = T>,
{
    let start = Instant::now();
    let out = fut.await;
    let elapsed = start.elapsed();
    if elapsed > max {
        tracing::warn!(
            target: "performance",
            label,
            elapsed_ms = elapsed.as_millis() as u64,
            "slow operation detected"
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_the_future_output_regardless_of_duration() {
        let out = warn_if_slow("fast", Duration::from_secs(10), async { 42 }).await;
        assert_eq!(out, 42);
    }
}
