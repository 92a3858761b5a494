//! Brute-force cosine search over stored embeddings.

use rusqlite::Connection;

use audience_core::errors::{AudienceResult, StorageError};
use audience_core::models::{IndexHit, Metadata};

use crate::to_storage_err;

/// Return up to `limit` documents ordered by ascending cosine distance
/// (`1 - cosine_similarity`) to `query_embedding`. Equal distances keep
/// insertion order.
///
/// A stored vector whose dimensionality differs from the query means the
/// store was written by an incompatible embedding configuration; this is
/// reported as corruption rather than silently skipped.
pub fn search_nearest(
    conn: &Connection,
    query_embedding: &[f32],
    limit: usize,
) -> AudienceResult<Vec<IndexHit>> {
    if limit == 0 {
        return Ok(Vec::new());
    }

    let mut stmt = conn
        .prepare(
            "SELECT d.doc_id, d.customer_id, d.text, d.metadata, e.embedding, e.dimensions
             FROM customer_documents d
             JOIN document_embeddings e ON e.doc_id = d.doc_id
             ORDER BY d.seq",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, Vec<u8>>(4)?,
                row.get::<_, i64>(5)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut hits = Vec::new();
    for row in rows {
        let (doc_id, customer_id, document, metadata, blob, dims) =
            row.map_err(|e| to_storage_err(e.to_string()))?;
        if dims as usize != query_embedding.len() || blob.len() != query_embedding.len() * 4 {
            return Err(StorageError::CorruptionDetected {
                details: format!(
                    "embedding for {doc_id} has {dims} dimensions, query has {}",
                    query_embedding.len()
                ),
            }
            .into());
        }
        let stored = bytes_to_f32_vec(&blob);
        let metadata: Metadata = serde_json::from_str(&metadata)?;
        hits.push(IndexHit {
            doc_id,
            customer_id,
            document,
            metadata,
            distance: cosine_distance(query_embedding, &stored),
        });
    }

    // Stable: rows arrive in insertion order.
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits.truncate(limit);
    Ok(hits)
}

/// Convert f32 slice to bytes (little-endian).
pub(crate) fn f32_vec_to_bytes(v: &[f32]) -> Vec<u8> {
    v.iter().flat_map(|f| f.to_le_bytes()).collect()
}

fn bytes_to_f32_vec(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}

/// `1 - cosine_similarity`; a zero vector is treated as orthogonal to everything.
pub fn cosine_distance(a: &[f32], b: &[f32]) -> f64 {
    let dot: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| (*x as f64) * (*y as f64))
        .sum();
    let norm_a: f64 = a.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 1.0;
    }
    1.0 - (dot / (norm_a * norm_b)).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blob_roundtrip() {
        let v = vec![0.5_f32, -1.25, 3.0];
        assert_eq!(bytes_to_f32_vec(&f32_vec_to_bytes(&v)), v);
    }

    #[test]
    fn distance_bounds() {
        assert!((cosine_distance(&[1.0, 0.0], &[2.0, 0.0])).abs() < 1e-12);
        assert!((cosine_distance(&[1.0, 0.0], &[0.0, 1.0]) - 1.0).abs() < 1e-12);
        assert!((cosine_distance(&[1.0, 0.0], &[-1.0, 0.0]) - 2.0).abs() < 1e-12);
        assert_eq!(cosine_distance(&[0.0, 0.0], &[1.0, 0.0]), 1.0);
    }
}
