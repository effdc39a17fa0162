//! Fundamental data structures shared by the feed, projections, and the runtime.

use std::sync::Arc;

use primitive_types::H256;
use serde::{Deserialize, Serialize};

/// Immutable chain metadata attached to every decoded event.
///
/// The feed guarantees events arrive ordered by `(block_number, log_index)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMetadata {
    pub block_number: u64,
    pub block_timestamp: u64,
    pub transaction_hash: H256,
    pub log_index: u32,
}

/// Canonical representation of one decoded vault event in flight.
#[derive(Clone)]
pub struct Envelope {
    pub type_id: u64,
    pub meta: EventMetadata,
    pub body: Arc<dyn crate::Event>,
}

impl Envelope {
    /// Attempt to view the body as a typed event of `E`.
    pub fn downcast<E: crate::StaticEvent>(&self) -> Option<&E> {
        if E::TYPE_ID == self.type_id {
            self.body.as_any().downcast_ref::<E>()
        } else {
            None
        }
    }
}

impl std::fmt::Debug for Envelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Envelope")
            .field("type_id", &self.type_id)
            .field("meta", &self.meta)
            .finish()
    }
}

/// Ordered batch of envelopes dispatched to sinks.
#[derive(Clone, Default)]
pub struct Batch {
    pub items: Vec<Envelope>,
}

/// Derive a canonical 64-bit type identifier using the FNV-1a hash.
///
/// `const` so the resulting ID can be computed at compile time from a type URL.
pub const fn type_id_from_url(url: &str) -> u64 {
    const OFFSET: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x00000100000001B3;

    let bytes = url.as_bytes();
    let mut hash = OFFSET;
    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u64;
        hash = hash.wrapping_mul(PRIME);
        i += 1;
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_id_is_stable() {
        const ID: u64 = type_id_from_url("vault.events/Deposit@1");
        assert_eq!(ID, type_id_from_url("vault.events/Deposit@1"));
        assert_ne!(ID, type_id_from_url("vault.events/Withdraw@1"));
    }

    #[test]
    fn type_id_distinguishes_versions() {
        assert_ne!(
            type_id_from_url("vault.events/Transfer@1"),
            type_id_from_url("vault.events/Transfer@2")
        );
    }
}
