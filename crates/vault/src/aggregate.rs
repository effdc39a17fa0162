//! Singleton global aggregate derived from the deposit/withdraw stream.

use primitive_types::U256;
use serde::{Deserialize, Serialize};
use vault_common::GLOBAL_STATE_KEY;
use vault_store::{load_entity, save_entity, EntityStore};

use crate::error::ProjectionError;

/// Global counters over all owner accounts.
///
/// `total_balance` equals the sum of all owner balances after a
/// fully-ordered, gap-free replay from genesis. `active_participants`
/// counts owners whose balance is currently nonzero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalState {
    pub total_deposits: U256,
    pub total_withdraws: U256,
    pub active_participants: U256,
    pub total_balance: U256,
}

impl GlobalState {
    /// Load the singleton, or persist a zeroed instance on first-ever run.
    pub fn get_or_create(store: &dyn EntityStore) -> Result<(Self, bool), ProjectionError> {
        if let Some(state) = load_entity::<Self>(store, GLOBAL_STATE_KEY)? {
            return Ok((state, true));
        }
        let state = Self::default();
        save_entity(store, GLOBAL_STATE_KEY, &state)?;
        Ok((state, false))
    }

    pub fn save(&self, store: &dyn EntityStore) -> Result<(), ProjectionError> {
        save_entity(store, GLOBAL_STATE_KEY, self)?;
        Ok(())
    }

    /// Apply one deposit of `amount` shares.
    ///
    /// `balance_before` is the owner's balance captured strictly before the
    /// owner projector applied this deposit.
    pub fn record_deposit(
        &mut self,
        amount: U256,
        balance_before: U256,
    ) -> Result<(), ProjectionError> {
        self.total_deposits = self.total_deposits.checked_add(U256::one()).ok_or(
            ProjectionError::AggregateOutOfRange {
                field: "total_deposits",
                current: self.total_deposits,
                delta: U256::one(),
            },
        )?;
        self.total_balance = self.total_balance.checked_add(amount).ok_or(
            ProjectionError::AggregateOutOfRange {
                field: "total_balance",
                current: self.total_balance,
                delta: amount,
            },
        )?;
        if balance_before.is_zero() && !amount.is_zero() {
            self.active_participants = self.active_participants.saturating_add(U256::one());
        }
        Ok(())
    }

    /// Apply one withdraw of `amount` shares.
    ///
    /// `balance_before` and `balance_after` are the owner's balances around
    /// the owner projector's mutation; the 0↔positive transition check
    /// depends on both snapshots.
    pub fn record_withdraw(
        &mut self,
        amount: U256,
        balance_before: U256,
        balance_after: U256,
    ) -> Result<(), ProjectionError> {
        self.total_withdraws = self.total_withdraws.checked_add(U256::one()).ok_or(
            ProjectionError::AggregateOutOfRange {
                field: "total_withdraws",
                current: self.total_withdraws,
                delta: U256::one(),
            },
        )?;
        self.total_balance = self.total_balance.checked_sub(amount).ok_or(
            ProjectionError::AggregateOutOfRange {
                field: "total_balance",
                current: self.total_balance,
                delta: amount,
            },
        )?;
        if !balance_before.is_zero() && balance_after.is_zero() && !amount.is_zero() {
            self.active_participants = self.active_participants.checked_sub(U256::one()).ok_or(
                ProjectionError::AggregateOutOfRange {
                    field: "active_participants",
                    current: self.active_participants,
                    delta: U256::one(),
                },
            )?;
        }
        Ok(())
    }
}
