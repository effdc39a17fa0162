//! Entity persistence for the vault indexer.
//!
//! Entities are addressed by opaque byte keys; values are opaque byte
//! payloads. There are no transactions across keys and no automatic
//! rollback, so callers sequence their writes accordingly.

mod memory;
mod sqlite;

use anyhow::Result;
use serde::{de::DeserializeOwned, Serialize};

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Key-value persistence used by every projector.
pub trait EntityStore: Send + Sync {
    /// Load the value stored at `key`, if any.
    fn load(&self, key: &[u8]) -> Result<Option<Vec<u8>>>;

    /// Persist `value` at `key`, replacing any existing value.
    fn save(&self, key: &[u8], value: &[u8]) -> Result<()>;
}

/// Load and deserialize a typed entity.
pub fn load_entity<T: DeserializeOwned>(
    store: &dyn EntityStore,
    key: &[u8],
) -> Result<Option<T>> {
    match store.load(key)? {
        Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        None => Ok(None),
    }
}

/// Serialize and persist a typed entity.
pub fn save_entity<T: Serialize>(store: &dyn EntityStore, key: &[u8], entity: &T) -> Result<()> {
    store.save(key, &serde_json::to_vec(entity)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        count: u64,
    }

    #[test]
    fn typed_roundtrip_through_memory_store() {
        let store = MemoryStore::new();
        let sample = Sample {
            name: "alpha".to_string(),
            count: 3,
        };

        save_entity(&store, b"sample", &sample).unwrap();
        let loaded: Option<Sample> = load_entity(&store, b"sample").unwrap();
        assert_eq!(loaded, Some(sample));
    }

    #[test]
    fn missing_key_loads_as_none() {
        let store = MemoryStore::new();
        let loaded: Option<Sample> = load_entity(&store, b"absent").unwrap();
        assert_eq!(loaded, None);
    }
}
