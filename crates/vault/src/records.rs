//! Write-once audit records, one per decoded event.
//!
//! Each record is a pure function of one event plus its metadata and is
//! keyed by `(transaction hash, log index)`. A replay that produces
//! identical content is a no-op; conflicting content at an existing key is
//! a data-integrity fault that fails the event before any projector runs.

use primitive_types::{H160, H256, U256};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use vault_common::record_key;
use vault_core::EventMetadata;
use vault_store::{load_entity, save_entity, EntityStore};
use vault_types::{
    ApprovalV1, DepositV1, OwnershipTransferredV1, TransferV1, WithdrawV1,
    YieldAccrualDeadlineUpdatedV1, YieldRateUpdatedV1,
};

use crate::error::ProjectionError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalRecord {
    pub owner: H160,
    pub spender: H160,
    pub value: U256,
    pub block_number: u64,
    pub block_timestamp: u64,
    pub transaction_hash: H256,
}

impl ApprovalRecord {
    pub fn from_event(ev: &ApprovalV1, meta: &EventMetadata) -> Self {
        Self {
            owner: ev.owner,
            spender: ev.spender,
            value: ev.value,
            block_number: meta.block_number,
            block_timestamp: meta.block_timestamp,
            transaction_hash: meta.transaction_hash,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositRecord {
    pub sender: H160,
    pub owner: H160,
    pub assets: U256,
    pub shares: U256,
    pub block_number: u64,
    pub block_timestamp: u64,
    pub transaction_hash: H256,
}

impl DepositRecord {
    pub fn from_event(ev: &DepositV1, meta: &EventMetadata) -> Self {
        Self {
            sender: ev.sender,
            owner: ev.owner,
            assets: ev.assets,
            shares: ev.shares,
            block_number: meta.block_number,
            block_timestamp: meta.block_timestamp,
            transaction_hash: meta.transaction_hash,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawRecord {
    pub sender: H160,
    pub receiver: H160,
    pub owner: H160,
    pub assets: U256,
    pub shares: U256,
    pub block_number: u64,
    pub block_timestamp: u64,
    pub transaction_hash: H256,
}

impl WithdrawRecord {
    pub fn from_event(ev: &WithdrawV1, meta: &EventMetadata) -> Self {
        Self {
            sender: ev.sender,
            receiver: ev.receiver,
            owner: ev.owner,
            assets: ev.assets,
            shares: ev.shares,
            block_number: meta.block_number,
            block_timestamp: meta.block_timestamp,
            transaction_hash: meta.transaction_hash,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRecord {
    pub from: H160,
    pub to: H160,
    pub value: U256,
    pub block_number: u64,
    pub block_timestamp: u64,
    pub transaction_hash: H256,
}

impl TransferRecord {
    pub fn from_event(ev: &TransferV1, meta: &EventMetadata) -> Self {
        Self {
            from: ev.from,
            to: ev.to,
            value: ev.value,
            block_number: meta.block_number,
            block_timestamp: meta.block_timestamp,
            transaction_hash: meta.transaction_hash,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnershipTransferredRecord {
    pub previous_owner: H160,
    pub new_owner: H160,
    pub block_number: u64,
    pub block_timestamp: u64,
    pub transaction_hash: H256,
}

impl OwnershipTransferredRecord {
    pub fn from_event(ev: &OwnershipTransferredV1, meta: &EventMetadata) -> Self {
        Self {
            previous_owner: ev.previous_owner,
            new_owner: ev.new_owner,
            block_number: meta.block_number,
            block_timestamp: meta.block_timestamp,
            transaction_hash: meta.transaction_hash,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YieldRateUpdatedRecord {
    pub yield_rate: U256,
    pub block_number: u64,
    pub block_timestamp: u64,
    pub transaction_hash: H256,
}

impl YieldRateUpdatedRecord {
    pub fn from_event(ev: &YieldRateUpdatedV1, meta: &EventMetadata) -> Self {
        Self {
            yield_rate: ev.yield_rate,
            block_number: meta.block_number,
            block_timestamp: meta.block_timestamp,
            transaction_hash: meta.transaction_hash,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YieldAccrualDeadlineUpdatedRecord {
    pub yield_accrual_deadline: U256,
    pub block_number: u64,
    pub block_timestamp: u64,
    pub transaction_hash: H256,
}

impl YieldAccrualDeadlineUpdatedRecord {
    pub fn from_event(ev: &YieldAccrualDeadlineUpdatedV1, meta: &EventMetadata) -> Self {
        Self {
            yield_accrual_deadline: ev.yield_accrual_deadline,
            block_number: meta.block_number,
            block_timestamp: meta.block_timestamp,
            transaction_hash: meta.transaction_hash,
        }
    }
}

/// Persist one audit record at its `(tx hash, log index)` key.
///
/// Existing identical content is left untouched; existing different content
/// fails the event with [`ProjectionError::RecordMismatch`].
pub fn write_record<T>(
    store: &dyn EntityStore,
    meta: &EventMetadata,
    record: &T,
) -> Result<(), ProjectionError>
where
    T: Serialize + DeserializeOwned + PartialEq,
{
    let key = record_key(meta.transaction_hash, meta.log_index);
    if let Some(existing) = load_entity::<T>(store, &key)? {
        if existing == *record {
            tracing::debug!(
                target: "vault_projections::records",
                block_number = meta.block_number,
                log_index = meta.log_index,
                "identical audit record replayed; skipping write"
            );
            return Ok(());
        }
        return Err(ProjectionError::RecordMismatch {
            tx_hash: meta.transaction_hash,
            log_index: meta.log_index,
        });
    }
    save_entity(store, &key, record)?;
    Ok(())
}
