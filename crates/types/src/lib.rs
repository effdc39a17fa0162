//! Typed payloads for every event emitted by the vault contract.
//!
//! Each struct carries the event parameters verbatim; block and transaction
//! metadata travel separately in [`vault_core::EventMetadata`].

use primitive_types::{H160, U256};
use serde::{Deserialize, Serialize};
use vault_core::impl_event;

pub const APPROVAL_URL: &str = "vault.events/Approval@1";
pub const DEPOSIT_URL: &str = "vault.events/Deposit@1";
pub const WITHDRAW_URL: &str = "vault.events/Withdraw@1";
pub const TRANSFER_URL: &str = "vault.events/Transfer@1";
pub const OWNERSHIP_TRANSFERRED_URL: &str = "vault.events/OwnershipTransferred@1";
pub const YIELD_RATE_UPDATED_URL: &str = "vault.events/YieldRateUpdated@1";
pub const YIELD_ACCRUAL_DEADLINE_UPDATED_URL: &str =
    "vault.events/YieldAccrualDeadlineUpdated@1";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalV1 {
    pub owner: H160,
    pub spender: H160,
    pub value: U256,
}

impl_event!(ApprovalV1, APPROVAL_URL);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepositV1 {
    pub sender: H160,
    pub owner: H160,
    pub assets: U256,
    pub shares: U256,
}

impl_event!(DepositV1, DEPOSIT_URL);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WithdrawV1 {
    pub sender: H160,
    pub receiver: H160,
    pub owner: H160,
    pub assets: U256,
    pub shares: U256,
}

impl_event!(WithdrawV1, WITHDRAW_URL);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferV1 {
    pub from: H160,
    pub to: H160,
    pub value: U256,
}

impl_event!(TransferV1, TRANSFER_URL);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnershipTransferredV1 {
    pub previous_owner: H160,
    pub new_owner: H160,
}

impl_event!(OwnershipTransferredV1, OWNERSHIP_TRANSFERRED_URL);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YieldRateUpdatedV1 {
    pub yield_rate: U256,
}

impl_event!(YieldRateUpdatedV1, YIELD_RATE_UPDATED_URL);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YieldAccrualDeadlineUpdatedV1 {
    pub yield_accrual_deadline: U256,
}

impl_event!(YieldAccrualDeadlineUpdatedV1, YIELD_ACCRUAL_DEADLINE_UPDATED_URL);
