//! SQLite-backed key-value store.
//!
//! The [`SqliteKv`] struct owns a [`rusqlite::Connection`] and guarantees that
//! migrations are run before any other operation.  Every batch of writes runs
//! inside a single transaction.

use std::path::{Path, PathBuf};

use chrono::Utc;
use directories::ProjectDirs;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{StorageError, StorageResult};
use crate::kv::{KvStore, KvWrite};
use crate::migrations;

/// Wrapper around a [`rusqlite::Connection`].
pub struct SqliteKv {
    conn: Connection,
}

impl SqliteKv {
    /// Open (or create) the default application database.
    ///
    /// The database file is placed in the platform-appropriate data directory:
    /// - Linux:   `~/.local/share/stavba/stavba.db`
    /// - macOS:   `~/Library/Application Support/cz.stavba.stavba/stavba.db`
    /// - Windows: `{FOLDERID_RoamingAppData}\stavba\stavba\data\stavba.db`
    pub fn open_default() -> StorageResult<Self> {
        let db_path = default_path()?;
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        tracing::info!(path = %db_path.display(), "opening database");

        Self::open_at(&db_path)
    }

    /// Open (or create) a database at an explicit path.
    pub fn open_at(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;

        conn.pragma_update(None, "journal_mode", "WAL")?;

        Self::with_connection(conn)
    }

    /// Private, non-persistent database.
    pub fn open_in_memory() -> StorageResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> StorageResult<Self> {
        migrations::run_migrations(&conn)?;
        Ok(Self { conn })
    }

    /// Return the filesystem path of the open database (if any).
    pub fn path(&self) -> Option<PathBuf> {
        self.conn
            .path()
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
    }
}

/// Location used by [`SqliteKv::open_default`].
pub fn default_path() -> StorageResult<PathBuf> {
    let project_dirs =
        ProjectDirs::from("cz", "stavba", "stavba").ok_or(StorageError::NoDataDir)?;
    Ok(project_dirs.data_dir().join("stavba.db"))
}

impl KvStore for SqliteKv {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn apply(&mut self, writes: Vec<KvWrite>) -> StorageResult<()> {
        let now = Utc::now().to_rfc3339();
        let tx = self.conn.transaction()?;

        for write in &writes {
            tracing::trace!(key = write.key(), "kv write");
            match write {
                KvWrite::Set { key, value } => {
                    tx.execute(
                        "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
                         ON CONFLICT(key) DO UPDATE SET value = excluded.value,
                                                        updated_at = excluded.updated_at",
                        params![key, value, now],
                    )?;
                }
                KvWrite::Remove { key } => {
                    tx.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
                }
            }
        }

        // Dropping `tx` on an early return rolls the batch back.
        tx.commit()?;
        Ok(())
    }
}
