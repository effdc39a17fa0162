//! Projection failure conditions.
//!
//! None of these are retried inside the engine: a failed event must abort
//! processing and propagate, since balance mutations are not idempotent.

use primitive_types::{H160, H256, U256};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProjectionError {
    /// A withdraw or transfer-out exceeded the tracked balance. The balance
    /// is never clamped or wrapped; a wrapped value would corrupt every
    /// downstream aggregate.
    #[error("balance underflow for owner {owner}: balance {balance} < amount {amount}")]
    BalanceUnderflow {
        owner: H160,
        balance: U256,
        amount: U256,
    },

    /// A credit overflowed the 256-bit balance range.
    #[error("balance overflow for owner {owner}")]
    BalanceOverflow { owner: H160 },

    /// A global counter would have gone negative or out of range.
    #[error("aggregate {field} out of range: current {current}, delta {delta}")]
    AggregateOutOfRange {
        field: &'static str,
        current: U256,
        delta: U256,
    },

    /// An audit record already exists at this key with different content.
    #[error("conflicting audit record at tx {tx_hash:?} log index {log_index}")]
    RecordMismatch { tx_hash: H256, log_index: u32 },

    /// Entity store failure (load, save, or payload decode).
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}
