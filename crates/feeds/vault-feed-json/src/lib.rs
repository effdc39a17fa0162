//! JSON file-based event feed.
//!
//! Reads decoded vault events from a JSON file, useful for testing and for
//! replaying captured event streams without a live decoding adapter. Events
//! are sorted into canonical order (block number ascending, then log index)
//! before delivery, and served in cursor-paginated chunks.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use primitive_types::{H160, H256, U256};
use serde::Deserialize;
use tracing::{info, trace};
use vault_core::{
    Envelope, EventMetadata, Feed, FeedCursor, FeedOptions, FeedOutcome, StaticEvent,
};
use vault_types::{
    ApprovalV1, DepositV1, OwnershipTransferredV1, TransferV1, WithdrawV1,
    YieldAccrualDeadlineUpdatedV1, YieldRateUpdatedV1,
};

/// Configuration for the JSON file feed.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonFeedConfig {
    /// Path to the JSON file containing decoded events.
    pub file_path: String,
    /// Optional chunk size for simulating pagination (defaults to the
    /// runtime's batch size).
    #[serde(default)]
    pub chunk_size: Option<usize>,
}

/// Wrapper struct to support both JSON formats.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EventsFileFormat {
    /// Direct array of events: `[{...}, {...}]`
    DirectArray(Vec<FeedEvent>),
    /// Object with events key: `{"contract": "0x...", "events": [{...}]}`
    WithMetadata { events: Vec<FeedEvent> },
}

/// One decoded event as it appears in the feed file.
#[derive(Debug, Clone, Deserialize)]
struct FeedEvent {
    block_number: u64,
    block_timestamp: u64,
    transaction_hash: H256,
    log_index: u32,
    #[serde(flatten)]
    payload: FeedPayload,
}

/// Event-specific parameters, tagged by `kind`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum FeedPayload {
    Approval {
        owner: H160,
        spender: H160,
        value: U256,
    },
    Deposit {
        sender: H160,
        owner: H160,
        assets: U256,
        shares: U256,
    },
    Withdraw {
        sender: H160,
        receiver: H160,
        owner: H160,
        assets: U256,
        shares: U256,
    },
    Transfer {
        from: H160,
        to: H160,
        value: U256,
    },
    OwnershipTransferred {
        previous_owner: H160,
        new_owner: H160,
    },
    YieldRateUpdated {
        yield_rate: U256,
    },
    YieldAccrualDeadlineUpdated {
        yield_accrual_deadline: U256,
    },
}

impl FeedEvent {
    fn into_envelope(self) -> Envelope {
        let meta = EventMetadata {
            block_number: self.block_number,
            block_timestamp: self.block_timestamp,
            transaction_hash: self.transaction_hash,
            log_index: self.log_index,
        };
        match self.payload {
            FeedPayload::Approval {
                owner,
                spender,
                value,
            } => ApprovalV1 {
                owner,
                spender,
                value,
            }
            .to_envelope(meta),
            FeedPayload::Deposit {
                sender,
                owner,
                assets,
                shares,
            } => DepositV1 {
                sender,
                owner,
                assets,
                shares,
            }
            .to_envelope(meta),
            FeedPayload::Withdraw {
                sender,
                receiver,
                owner,
                assets,
                shares,
            } => WithdrawV1 {
                sender,
                receiver,
                owner,
                assets,
                shares,
            }
            .to_envelope(meta),
            FeedPayload::Transfer { from, to, value } => {
                TransferV1 { from, to, value }.to_envelope(meta)
            }
            FeedPayload::OwnershipTransferred {
                previous_owner,
                new_owner,
            } => OwnershipTransferredV1 {
                previous_owner,
                new_owner,
            }
            .to_envelope(meta),
            FeedPayload::YieldRateUpdated { yield_rate } => {
                YieldRateUpdatedV1 { yield_rate }.to_envelope(meta)
            }
            FeedPayload::YieldAccrualDeadlineUpdated {
                yield_accrual_deadline,
            } => YieldAccrualDeadlineUpdatedV1 {
                yield_accrual_deadline,
            }
            .to_envelope(meta),
        }
    }
}

/// Feed that replays decoded events from a JSON file.
///
/// The cursor is an index into the ordered stream, used to simulate
/// pagination through the events.
pub struct JsonFeed {
    events: Vec<Envelope>,
    chunk_size: Option<usize>,
}

impl JsonFeed {
    /// Creates a new JSON feed from the provided configuration.
    pub fn new(config: JsonFeedConfig) -> Result<Self> {
        let file_path = PathBuf::from(&config.file_path);

        info!(
            target: "vault_feed_json",
            path = %file_path.display(),
            "loading events from JSON file"
        );

        let contents = fs::read_to_string(&file_path)
            .with_context(|| format!("failed to read file: {}", file_path.display()))?;

        let mut events = match serde_json::from_str::<EventsFileFormat>(&contents)
            .context("failed to parse JSON file")?
        {
            EventsFileFormat::DirectArray(events) => events,
            EventsFileFormat::WithMetadata { events } => events,
        };

        // Canonical feed order: block number ascending, then log index.
        events.sort_by_key(|ev| (ev.block_number, ev.log_index));

        info!(
            target: "vault_feed_json",
            total_events = events.len(),
            "loaded events from file"
        );

        Ok(Self {
            events: events.into_iter().map(FeedEvent::into_envelope).collect(),
            chunk_size: config.chunk_size,
        })
    }

    /// Total number of events in the feed.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[async_trait]
impl Feed for JsonFeed {
    async fn fetch(
        &self,
        cursor: Option<&FeedCursor>,
        options: &FeedOptions,
    ) -> Result<FeedOutcome> {
        let start = cursor.map(|c| c.next_index).unwrap_or(0);
        let chunk_size = self.chunk_size.unwrap_or(options.batch_size).max(1);
        let end = (start + chunk_size).min(self.events.len());

        trace!(
            target: "vault_feed_json",
            start,
            end,
            total = self.events.len(),
            "serving event chunk"
        );

        let events = self.events[start.min(end)..end].to_vec();
        let cursor = FeedCursor {
            next_index: end,
            exhausted: end >= self.events.len(),
        };

        Ok(FeedOutcome { events, cursor })
    }
}
