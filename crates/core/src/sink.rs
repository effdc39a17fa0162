//! Sink trait consumed by the runtime.

use anyhow::Result;
use async_trait::async_trait;

use crate::types::Batch;

/// Component that consumes ordered batches of decoded envelopes.
///
/// A sink must fully apply every item of a batch (including all persisted
/// writes) before returning; the runtime does not deliver the next batch
/// until every sink has completed the current one.
#[async_trait]
pub trait Sink: Send + Sync {
    /// Human-readable identifier (used in logs).
    fn label(&self) -> &str;

    /// Handle a batch of envelopes in feed order.
    async fn handle_batch(&self, batch: Batch) -> Result<()>;
}
