//! v002: document_embeddings, one little-endian f32 vector per document.

use rusqlite::Connection;

pub fn migrate(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS document_embeddings (
            doc_id      TEXT PRIMARY KEY
                        REFERENCES customer_documents(doc_id) ON DELETE CASCADE,
            embedding   BLOB NOT NULL,
            dimensions  INTEGER NOT NULL,
            model_name  TEXT NOT NULL
        );
        ",
    )
}
