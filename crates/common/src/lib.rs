//! Common utilities for the vault indexer
//!
//! Provides conversions between chain types and storage formats, and the
//! key encoding shared by every persisted entity.

use primitive_types::{H160, H256};

/// Key of the singleton global aggregate entity.
pub const GLOBAL_STATE_KEY: &[u8] = b"global-state";

// ===== Address conversions =====

/// Convert an address to a 20-byte BLOB for storage
pub fn address_to_blob(address: H160) -> Vec<u8> {
    address.as_bytes().to_vec()
}

/// Convert a BLOB back to an address (big-endian)
pub fn blob_to_address(bytes: &[u8]) -> H160 {
    let mut arr = [0u8; 20];
    let len = bytes.len().min(20);
    // Right-align for big-endian (pad zeros on the left)
    arr[20 - len..].copy_from_slice(&bytes[..len]);
    H160::from(arr)
}

// ===== Entity keys =====

/// Audit-record key: 32-byte transaction hash followed by the log index
/// as 4 big-endian bytes. Unique per `(transaction, log)` pair.
pub fn record_key(tx_hash: H256, log_index: u32) -> Vec<u8> {
    let mut key = Vec::with_capacity(36);
    key.extend_from_slice(tx_hash.as_bytes());
    key.extend_from_slice(&log_index.to_be_bytes());
    key
}

/// Owner-account key: the raw 20-byte address.
pub fn owner_key(address: H160) -> Vec<u8> {
    address_to_blob(address)
}
