//! Dispatch coordinator: routes each decoded event to the record writer and
//! the balance projectors in a fixed, event-type-specific order.

use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use vault_core::{Batch, Envelope, EventMetadata, Sink};
use vault_store::EntityStore;
use vault_types::{
    ApprovalV1, DepositV1, OwnershipTransferredV1, TransferV1, WithdrawV1,
    YieldAccrualDeadlineUpdatedV1, YieldRateUpdatedV1,
};

use crate::accounts::OwnerAccount;
use crate::aggregate::GlobalState;
use crate::error::ProjectionError;
use crate::records::{
    write_record, ApprovalRecord, DepositRecord, OwnershipTransferredRecord, TransferRecord,
    WithdrawRecord, YieldAccrualDeadlineUpdatedRecord, YieldRateUpdatedRecord,
};

/// Vault projection sink.
///
/// For every event: (1) the audit record is written, (2) owner accounts are
/// mutated where the event carries balance semantics, (3) the global
/// aggregate is updated from the owner's before/after balance transition.
/// Approval, OwnershipTransferred, and yield-parameter events only produce
/// audit records.
///
/// The global aggregate is loaded (or bootstrapped) once at construction
/// and held by handle for the lifetime of the sink rather than re-fetched
/// per event; it is persisted after every mutating event.
pub struct VaultSink {
    store: Arc<dyn EntityStore>,
    global: Mutex<GlobalState>,
}

impl VaultSink {
    pub fn new(store: Arc<dyn EntityStore>) -> Result<Self> {
        let (global, existed) = GlobalState::get_or_create(store.as_ref())?;
        tracing::info!(
            target: "vault_projections::sink",
            bootstrapped = !existed,
            total_deposits = %global.total_deposits,
            total_withdraws = %global.total_withdraws,
            "vault sink initialized"
        );
        Ok(Self {
            store,
            global: Mutex::new(global),
        })
    }

    /// Current global aggregate snapshot.
    pub fn global_state(&self) -> GlobalState {
        self.global.lock().unwrap().clone()
    }

    fn handle_envelope(&self, envelope: &Envelope) -> Result<(), ProjectionError> {
        if let Some(ev) = envelope.downcast::<DepositV1>() {
            self.handle_deposit(ev, &envelope.meta)
        } else if let Some(ev) = envelope.downcast::<WithdrawV1>() {
            self.handle_withdraw(ev, &envelope.meta)
        } else if let Some(ev) = envelope.downcast::<TransferV1>() {
            self.handle_transfer(ev, &envelope.meta)
        } else if let Some(ev) = envelope.downcast::<ApprovalV1>() {
            write_record(
                self.store.as_ref(),
                &envelope.meta,
                &ApprovalRecord::from_event(ev, &envelope.meta),
            )
        } else if let Some(ev) = envelope.downcast::<OwnershipTransferredV1>() {
            write_record(
                self.store.as_ref(),
                &envelope.meta,
                &OwnershipTransferredRecord::from_event(ev, &envelope.meta),
            )
        } else if let Some(ev) = envelope.downcast::<YieldRateUpdatedV1>() {
            write_record(
                self.store.as_ref(),
                &envelope.meta,
                &YieldRateUpdatedRecord::from_event(ev, &envelope.meta),
            )
        } else if let Some(ev) = envelope.downcast::<YieldAccrualDeadlineUpdatedV1>() {
            write_record(
                self.store.as_ref(),
                &envelope.meta,
                &YieldAccrualDeadlineUpdatedRecord::from_event(ev, &envelope.meta),
            )
        } else {
            tracing::warn!(
                target: "vault_projections::sink",
                type_id = envelope.type_id,
                block_number = envelope.meta.block_number,
                "unrecognized envelope type; skipping"
            );
            Ok(())
        }
    }

    fn handle_deposit(
        &self,
        ev: &DepositV1,
        meta: &EventMetadata,
    ) -> Result<(), ProjectionError> {
        let store = self.store.as_ref();
        write_record(store, meta, &DepositRecord::from_event(ev, meta))?;

        // Balances project on shares; the asset amount is kept verbatim on
        // the audit record only.
        let (mut account, _) = OwnerAccount::get_or_create(store, ev.owner)?;
        let balance_before = account.balance;
        account.credit(ev.shares)?;
        account.save(store)?;

        let mut global = self.global.lock().unwrap();
        global.record_deposit(ev.shares, balance_before)?;
        global.save(store)?;

        tracing::debug!(
            target: "vault_projections::sink",
            owner = %ev.owner,
            shares = %ev.shares,
            balance = %account.balance,
            "applied deposit"
        );
        Ok(())
    }

    fn handle_withdraw(
        &self,
        ev: &WithdrawV1,
        meta: &EventMetadata,
    ) -> Result<(), ProjectionError> {
        let store = self.store.as_ref();
        write_record(store, meta, &WithdrawRecord::from_event(ev, meta))?;

        let (mut account, _) = OwnerAccount::get_or_create(store, ev.owner)?;
        let balance_before = account.balance;
        account.debit(ev.shares)?;
        let balance_after = account.balance;
        account.save(store)?;

        let mut global = self.global.lock().unwrap();
        global.record_withdraw(ev.shares, balance_before, balance_after)?;
        global.save(store)?;

        tracing::debug!(
            target: "vault_projections::sink",
            owner = %ev.owner,
            shares = %ev.shares,
            balance = %account.balance,
            "applied withdraw"
        );
        Ok(())
    }

    fn handle_transfer(
        &self,
        ev: &TransferV1,
        meta: &EventMetadata,
    ) -> Result<(), ProjectionError> {
        let store = self.store.as_ref();
        write_record(store, meta, &TransferRecord::from_event(ev, meta))?;

        // Outgoing leg first, fully persisted before the incoming leg is
        // loaded; a self-transfer therefore reloads the debited balance and
        // nets to zero.
        let (mut sender, _) = OwnerAccount::get_or_create(store, ev.from)?;
        sender.debit(ev.value)?;
        sender.save(store)?;

        let (mut receiver, _) = OwnerAccount::get_or_create(store, ev.to)?;
        receiver.credit(ev.value)?;
        receiver.save(store)?;

        tracing::debug!(
            target: "vault_projections::sink",
            from = %ev.from,
            to = %ev.to,
            value = %ev.value,
            "applied transfer"
        );
        Ok(())
    }
}

#[async_trait]
impl Sink for VaultSink {
    fn label(&self) -> &str {
        "vault"
    }

    async fn handle_batch(&self, batch: Batch) -> Result<()> {
        for envelope in &batch.items {
            // Fail fast: an event that cannot be fully applied aborts the
            // batch so the error propagates to the orchestration layer.
            self.handle_envelope(envelope)?;
        }
        tracing::debug!(
            target: "vault_projections::sink",
            items = batch.items.len(),
            "batch applied"
        );
        Ok(())
    }
}
