use async_trait::async_trait;

use crate::error::ExecutorError;
use crate::types::{DispatchEntry, ExecutorAck};

/// Abstraction over the callout that actually runs a scheduled request
/// against its resolved model (spec §1, §4.6 step 3). Mirrors the host's
/// `SwapExecutor` shape: this trait intentionally hides transport, auth, and
/// the model's own error vocabulary — implementations normalize into
/// [`ExecutorError`].
#[async_trait]
pub trait Executor: Send + Sync + 'static {
    async fn execute(&self, entry: DispatchEntry) -> Result<ExecutorAck, ExecutorError>;
}
