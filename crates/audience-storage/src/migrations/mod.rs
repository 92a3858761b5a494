//! Versioned schema migrations tracked in the `schema_version` table.

pub mod v001_customer_documents;
pub mod v002_document_embeddings;

use rusqlite::{params, Connection};

use audience_core::errors::{AudienceResult, StorageError};

type Migration = fn(&Connection) -> rusqlite::Result<()>;

const MIGRATIONS: &[(u32, Migration)] = &[
    (1, v001_customer_documents::migrate),
    (2, v002_document_embeddings::migrate),
];

/// Latest schema version known to this build.
pub const LATEST_VERSION: u32 = 2;

/// Apply every migration newer than the recorded schema version.
/// Each migration and its version row commit together.
pub fn run_migrations(conn: &Connection) -> AudienceResult<u32> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version     INTEGER PRIMARY KEY,
            applied_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );",
    )
    .map_err(|e| failed(0, e))?;

    let mut current = current_version(conn)?;
    for &(version, migrate) in MIGRATIONS {
        if version <= current {
            continue;
        }
        let tx = conn.unchecked_transaction().map_err(|e| failed(version, e))?;
        migrate(&tx).map_err(|e| failed(version, e))?;
        tx.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            params![version],
        )
        .map_err(|e| failed(version, e))?;
        tx.commit().map_err(|e| failed(version, e))?;
        tracing::info!(version, "applied migration");
        current = version;
    }
    Ok(current)
}

/// Highest applied schema version, 0 for a fresh database.
pub fn current_version(conn: &Connection) -> AudienceResult<u32> {
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )
    .map_err(|e| failed(0, e))
}

fn failed(version: u32, e: rusqlite::Error) -> audience_core::AudienceError {
    StorageError::MigrationFailed {
        version,
        reason: e.to_string(),
    }
    .into()
}
