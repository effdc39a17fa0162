//! Core runtime primitives for the vault event indexer.

mod event;
mod feed;
mod runtime;
mod sink;
mod types;

pub use event::{Event, StaticEvent};
pub use feed::{Feed, FeedCursor, FeedOptions, FeedOutcome};
pub use runtime::{run_once_batch, run_once_batch_with_config, RuntimeConfig};
pub use sink::Sink;
pub use types::{type_id_from_url, Batch, Envelope, EventMetadata};
