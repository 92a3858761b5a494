//! Document and embedding writes and lookups.

use rusqlite::{params, Connection, OptionalExtension};

use audience_core::errors::AudienceResult;
use audience_core::models::{IndexedDocument, Metadata};

use super::vector_search::f32_vec_to_bytes;
use crate::to_storage_err;

/// Number of stored documents.
pub fn count_documents(conn: &Connection) -> AudienceResult<usize> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM customer_documents", [], |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(count as usize)
}

/// Distinct embedding dimensions present in the store, ascending.
pub fn stored_dimensions(conn: &Connection) -> AudienceResult<Vec<usize>> {
    let mut stmt = conn
        .prepare("SELECT DISTINCT dimensions FROM document_embeddings ORDER BY dimensions")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([], |row| row.get::<_, i64>(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.map(|r| {
        r.map(|d| d as usize)
            .map_err(|e| to_storage_err(e.to_string()))
    })
    .collect()
}

/// Insert documents with their embeddings in one transaction.
///
/// Append-only: a `doc_id` that is already stored is skipped, never replaced.
/// Returns the number of documents actually written.
pub fn insert_documents(
    conn: &Connection,
    documents: &[(IndexedDocument, Vec<f32>)],
    model_name: &str,
) -> AudienceResult<usize> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(e.to_string()))?;
    let mut inserted = 0;
    {
        let mut doc_stmt = tx
            .prepare_cached(
                "INSERT OR IGNORE INTO customer_documents
                    (doc_id, customer_id, text, metadata, content_hash)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
        let mut emb_stmt = tx
            .prepare_cached(
                "INSERT OR IGNORE INTO document_embeddings
                    (doc_id, embedding, dimensions, model_name)
                 VALUES (?1, ?2, ?3, ?4)",
            )
            .map_err(|e| to_storage_err(e.to_string()))?;

        for (doc, embedding) in documents {
            let metadata = serde_json::to_string(&doc.metadata)?;
            let changed = doc_stmt
                .execute(params![
                    doc.doc_id,
                    doc.customer_id,
                    doc.text,
                    metadata,
                    doc.content_hash
                ])
                .map_err(|e| to_storage_err(e.to_string()))?;
            if changed == 0 {
                tracing::debug!(doc_id = %doc.doc_id, "document already stored, skipping");
                continue;
            }
            emb_stmt
                .execute(params![
                    doc.doc_id,
                    f32_vec_to_bytes(embedding),
                    embedding.len() as i64,
                    model_name
                ])
                .map_err(|e| to_storage_err(e.to_string()))?;
            inserted += 1;
        }
    }
    tx.commit().map_err(|e| to_storage_err(e.to_string()))?;
    Ok(inserted)
}

/// Fetch one stored document by id.
pub fn get_document(conn: &Connection, doc_id: &str) -> AudienceResult<Option<IndexedDocument>> {
    let row = conn
        .query_row(
            "SELECT doc_id, customer_id, text, metadata, content_hash
             FROM customer_documents WHERE doc_id = ?1",
            params![doc_id],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                ))
            },
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;

    match row {
        Some((doc_id, customer_id, text, metadata, content_hash)) => {
            let metadata: Metadata = serde_json::from_str(&metadata)?;
            Ok(Some(IndexedDocument {
                doc_id,
                customer_id,
                text,
                metadata,
                content_hash,
            }))
        }
        None => Ok(None),
    }
}

/// All stored document ids in insertion order.
pub fn list_doc_ids(conn: &Connection) -> AudienceResult<Vec<String>> {
    let mut stmt = conn
        .prepare("SELECT doc_id FROM customer_documents ORDER BY seq")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let ids = stmt
        .query_map([], |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?
        .collect::<Result<Vec<String>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(ids)
}
