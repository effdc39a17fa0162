//! In-memory entity store for tests and ephemeral replays.

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::Result;

use crate::EntityStore;

/// Mutex-guarded map store; contents are lost when dropped.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<Vec<u8>, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of persisted entities.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }
}

impl EntityStore for MemoryStore {
    fn load(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    fn save(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_vec(), value.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_then_load() {
        let store = MemoryStore::new();
        store.save(b"k", b"v1").unwrap();
        assert_eq!(store.load(b"k").unwrap(), Some(b"v1".to_vec()));
    }

    #[test]
    fn save_replaces_existing_value() {
        let store = MemoryStore::new();
        store.save(b"k", b"v1").unwrap();
        store.save(b"k", b"v2").unwrap();
        assert_eq!(store.load(b"k").unwrap(), Some(b"v2".to_vec()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn load_missing_key() {
        let store = MemoryStore::new();
        assert_eq!(store.load(b"absent").unwrap(), None);
    }
}
