//! SQLite-backed entity store.
//!
//! Uses BLOB keys and values in a single `entities` table. Access is
//! serialized through a mutex; the pipeline is a single-threaded fold, so
//! the lock is never contended in practice.

use std::sync::Mutex;

use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};

use crate::EntityStore;

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Create or open the database at `db_path`.
    pub fn new(db_path: &str) -> Result<Self> {
        let conn = Connection::open(db_path)?;
        Self::initialize(conn)
    }

    /// Open a transient in-memory database.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::initialize(conn)
    }

    fn initialize(conn: Connection) -> Result<Self> {
        // WAL mode + relaxed fsync: safe for a single writer, much faster.
        conn.execute_batch(
            "PRAGMA journal_mode=WAL;
             PRAGMA synchronous=NORMAL;
             PRAGMA cache_size=-64000;
             PRAGMA temp_store=MEMORY;
             PRAGMA busy_timeout=5000;",
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS entities (
                key BLOB PRIMARY KEY,
                value BLOB NOT NULL,
                updated_at INTEGER DEFAULT (strftime('%s', 'now'))
            )",
            [],
        )?;

        tracing::info!(
            target: "vault_store::sqlite",
            "SQLite entity store initialized (WAL mode, 64MB cache)"
        );

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Number of persisted entities.
    pub fn entity_count(&self) -> Result<u64> {
        let conn = self.conn.lock().unwrap();
        let count: u64 = conn.query_row("SELECT COUNT(*) FROM entities", [], |row| row.get(0))?;
        Ok(count)
    }
}

impl EntityStore for SqliteStore {
    fn load(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        let conn = self.conn.lock().unwrap();
        let value = conn
            .query_row(
                "SELECT value FROM entities WHERE key = ?1",
                params![key],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn save(&self, key: &[u8], value: &[u8]) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO entities (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                 value = excluded.value,
                 updated_at = strftime('%s', 'now')",
            params![key, value],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_roundtrip() {
        let store = SqliteStore::in_memory().unwrap();
        store.save(b"k", b"v1").unwrap();
        assert_eq!(store.load(b"k").unwrap(), Some(b"v1".to_vec()));
        assert_eq!(store.load(b"absent").unwrap(), None);
    }

    #[test]
    fn save_upserts() {
        let store = SqliteStore::in_memory().unwrap();
        store.save(b"k", b"v1").unwrap();
        store.save(b"k", b"v2").unwrap();
        assert_eq!(store.load(b"k").unwrap(), Some(b"v2".to_vec()));
        assert_eq!(store.entity_count().unwrap(), 1);
    }

    #[test]
    fn file_backed_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("entities.db");
        let path = path.to_string_lossy();

        {
            let store = SqliteStore::new(&path).unwrap();
            store.save(b"k", b"v1").unwrap();
        }

        let store = SqliteStore::new(&path).unwrap();
        assert_eq!(store.load(b"k").unwrap(), Some(b"v1".to_vec()));
    }
}
