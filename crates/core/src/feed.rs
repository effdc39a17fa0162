//! Abstractions for sourcing ordered, decoded vault events.

use anyhow::Result;
use async_trait::async_trait;

use crate::Envelope;

/// Position within the feed, returned by every fetch so the caller can
/// resume pagination without the feed keeping internal mutable state.
#[derive(Clone, Debug, Default)]
pub struct FeedCursor {
    /// Index of the next undelivered event.
    pub next_index: usize,
    /// Set once the feed has been fully drained.
    pub exhausted: bool,
}

impl FeedCursor {
    pub fn has_more(&self) -> bool {
        !self.exhausted
    }
}

#[derive(Clone, Debug)]
pub struct FeedOptions {
    /// Upper bound on events delivered per fetch.
    pub batch_size: usize,
}

impl Default for FeedOptions {
    fn default() -> Self {
        Self { batch_size: 256 }
    }
}

/// Result of one fetch: the delivered events and the cursor to resume from.
#[derive(Default)]
pub struct FeedOutcome {
    pub events: Vec<Envelope>,
    pub cursor: FeedCursor,
}

/// Component responsible for delivering decoded events in canonical order
/// (block number ascending, then log index ascending within a block).
///
/// Delivery is at-least-once per reorg-free run; the projection core assumes
/// the caller guarantees at-most-once application per event.
#[async_trait]
pub trait Feed: Send + Sync {
    /// Fetch the next batch of events.
    ///
    /// The optional `cursor` corresponds to the value returned by the
    /// previous invocation.
    async fn fetch(&self, cursor: Option<&FeedCursor>, options: &FeedOptions)
        -> Result<FeedOutcome>;
}
