//! State projection engine for vault events.
//!
//! For every decoded event the engine writes one immutable audit record and,
//! for balance-bearing events, updates the owner account and global
//! aggregate entities in the entity store. Application is strictly
//! sequential and order-sensitive; replaying an event re-applies its balance
//! deltas, so delivery must be at-most-once per event.
//!
//! # Components
//!
//! - [`records`]: write-once audit record per event, keyed by
//!   `(transaction hash, log index)`
//! - [`accounts`]: per-address running balance with lazy get-or-create
//! - [`aggregate`]: singleton counters (deposits, withdraws, active
//!   participants, total balance)
//! - [`VaultSink`]: routes each event through the writers and projectors in
//!   a fixed order

pub mod accounts;
pub mod aggregate;
pub mod error;
pub mod records;
pub mod sink;

pub use accounts::OwnerAccount;
pub use aggregate::GlobalState;
pub use error::ProjectionError;
pub use records::{
    ApprovalRecord, DepositRecord, OwnershipTransferredRecord, TransferRecord, WithdrawRecord,
    YieldAccrualDeadlineUpdatedRecord, YieldRateUpdatedRecord,
};
pub use sink::VaultSink;
