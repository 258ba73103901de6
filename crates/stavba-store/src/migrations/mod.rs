//! Schema migrations for the SQLite backend.
//!
//! Each entry in [`MIGRATIONS`] moves `PRAGMA user_version` forward by one and
//! runs at most once per database file.

pub mod v001_initial;

use rusqlite::Connection;

use crate::error::{StorageError, StorageResult};

type Step = fn(&Connection) -> Result<(), rusqlite::Error>;

/// Ordered list of `(name, step)`; position + 1 is the resulting schema version.
const MIGRATIONS: &[(&str, Step)] = &[("v001_initial", v001_initial::up)];

pub fn schema_version() -> u32 {
    MIGRATIONS.len() as u32
}

/// Bring the schema of `conn` up to [`schema_version`].
pub fn run_migrations(conn: &Connection) -> StorageResult<()> {
    let applied: u32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    tracing::debug!(applied, target = schema_version(), "kv schema check");

    for (version, (name, step)) in (1u32..).zip(MIGRATIONS) {
        if version <= applied {
            continue;
        }
        tracing::info!(migration = name, version, "applying kv migration");
        step(conn).map_err(|e| StorageError::Migration(format!("{name}: {e}")))?;
        conn.pragma_update(None, "user_version", version)?;
    }
    Ok(())
}
