//! Persistent key-value cell.
//!
//! The [`Storage`] struct wraps a [`rusqlite::Connection`] holding a single
//! `kv` table: one row per top-level key, each value a JSON document.
//!
//! - [`Storage::read`] returns the caller's default when the key is absent
//!   *or* the stored value is unparsable; parse failures are logged, never
//!   surfaced.
//! - [`Storage::write`] persists best-effort; a failed write is logged and
//!   the in-memory value stays authoritative for the session.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use rusqlite::{params, Connection};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Result, StoreError};

/// Key-value storage backend.
pub struct Storage {
    conn: Connection,
}

impl Storage {
    /// Open (or create) the default application storage.
    ///
    /// The database file is placed in the platform-appropriate data directory:
    /// - Linux:   `~/.local/share/sakan/sakan.db`
    /// - macOS:   `~/Library/Application Support/com.sakan.sakan/sakan.db`
    /// - Windows: `{FOLDERID_RoamingAppData}\sakan\sakan\data\sakan.db`
    pub fn open() -> Result<Self> {
        let project_dirs =
            ProjectDirs::from("com", "sakan", "sakan").ok_or(StoreError::NoDataDir)?;

        let data_dir = project_dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;

        let db_path = data_dir.join("sakan.db");

        tracing::info!(path = %db_path.display(), "opening storage");

        Self::open_at(&db_path)
    }

    /// Open (or create) storage at an explicit path.
    ///
    /// Useful for tests and for embedding the store inside custom directory
    /// layouts.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Self::init(conn)
    }

    /// Open a throwaway in-memory storage (tests).
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL
            );",
        )?;
        Ok(Self { conn })
    }

    /// Read the persisted value under `key`, falling back to `default` when
    /// the key is absent or its value no longer parses.
    pub fn read<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let row: rusqlite::Result<String> = self.conn.query_row(
            "SELECT value FROM kv WHERE key = ?1",
            params![key],
            |row| row.get(0),
        );

        match row {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(value) => value,
                Err(e) => {
                    tracing::warn!(key, error = %e, "stored value unparsable, using default");
                    default
                }
            },
            Err(rusqlite::Error::QueryReturnedNoRows) => default,
            Err(e) => {
                tracing::warn!(key, error = %e, "storage read failed, using default");
                default
            }
        }
    }

    /// Serialize `value` and persist it under `key`.  Best-effort: failures
    /// are logged and swallowed.
    pub fn write<T: Serialize>(&self, key: &str, value: &T) {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to serialize value, skipping write");
                return;
            }
        };

        if let Err(e) = self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, json],
        ) {
            tracing::warn!(key, error = %e, "storage write failed, keeping in-memory value");
        }
    }

    /// Delete the entry under `key`, if any.  Best-effort.
    pub fn remove(&self, key: &str) {
        if let Err(e) = self
            .conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])
        {
            tracing::warn!(key, error = %e, "storage delete failed");
        }
    }

    /// Return the filesystem path of the open storage (if any).
    pub fn path(&self) -> Option<PathBuf> {
        self.conn.path().map(PathBuf::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_key_returns_default() {
        let storage = Storage::open_in_memory().unwrap();
        let value: Vec<String> = storage.read("nothing", vec!["fallback".to_string()]);
        assert_eq!(value, vec!["fallback".to_string()]);
    }

    #[test]
    fn write_then_read_round_trips() {
        let storage = Storage::open_in_memory().unwrap();
        storage.write("nums", &vec![1, 2, 3]);
        let value: Vec<i32> = storage.read("nums", Vec::new());
        assert_eq!(value, vec![1, 2, 3]);
    }

    #[test]
    fn unparsable_value_returns_default() {
        let storage = Storage::open_in_memory().unwrap();
        storage
            .conn
            .execute(
                "INSERT INTO kv (key, value) VALUES ('broken', 'not json at all')",
                [],
            )
            .unwrap();
        let value: Vec<i32> = storage.read("broken", vec![9]);
        assert_eq!(value, vec![9]);
    }

    #[test]
    fn remove_deletes_the_entry() {
        let storage = Storage::open_in_memory().unwrap();
        storage.write("gone", &"soon".to_string());
        storage.remove("gone");
        let value: String = storage.read("gone", "default".to_string());
        assert_eq!(value, "default");
    }

    #[test]
    fn on_disk_storage_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.db");

        {
            let storage = Storage::open_at(&path).expect("should open");
            assert!(storage.path().is_some());
            storage.write("answer", &42);
        }

        let storage = Storage::open_at(&path).expect("should reopen");
        let value: i32 = storage.read("answer", 0);
        assert_eq!(value, 42);
    }
}
