//! v001: customer_documents.
//!
//! `seq` preserves insertion order for tie-breaking in similarity search.

use rusqlite::Connection;

pub fn migrate(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS customer_documents (
            seq           INTEGER PRIMARY KEY AUTOINCREMENT,
            doc_id        TEXT NOT NULL UNIQUE,
            customer_id   TEXT NOT NULL,
            text          TEXT NOT NULL,
            metadata      TEXT NOT NULL,
            content_hash  TEXT NOT NULL,
            created_at    TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE INDEX IF NOT EXISTS idx_documents_customer ON customer_documents(customer_id);
        ",
    )
}
