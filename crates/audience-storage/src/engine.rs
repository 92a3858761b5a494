//! StorageEngine: owns the ConnectionPool, runs migrations on open, and routes
//! reads to the read pool when one exists.

use std::path::Path;

use audience_core::config::StorageConfig;
use audience_core::errors::AudienceResult;
use audience_core::models::{IndexHit, IndexedDocument};

use crate::migrations;
use crate::pool::ConnectionPool;
use crate::queries::{document_ops, vector_search};

pub struct StorageEngine {
    pool: ConnectionPool,
}

impl StorageEngine {
    /// Open (or create) a file-backed store and bring its schema up to date.
    pub fn open(path: &Path, config: &StorageConfig) -> AudienceResult<Self> {
        let pool = ConnectionPool::open(path, config)?;
        let engine = Self { pool };
        engine.initialize()?;
        tracing::info!(path = %path.display(), "index store opened");
        Ok(engine)
    }

    /// Open a private in-memory store.
    pub fn open_in_memory() -> AudienceResult<Self> {
        let engine = Self {
            pool: ConnectionPool::open_in_memory()?,
        };
        engine.initialize()?;
        Ok(engine)
    }

    /// Open according to `config`: in memory, or at `config.db_path`.
    pub fn from_config(config: &StorageConfig) -> AudienceResult<Self> {
        if config.in_memory {
            Self::open_in_memory()
        } else {
            Self::open(Path::new(&config.db_path), config)
        }
    }

    fn initialize(&self) -> AudienceResult<()> {
        self.pool.writer.with_conn(|conn| {
            migrations::run_migrations(conn)?;
            Ok(())
        })
    }

    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    fn with_reader<F, T>(&self, f: F) -> AudienceResult<T>
    where
        F: FnOnce(&rusqlite::Connection) -> AudienceResult<T>,
    {
        match &self.pool.readers {
            Some(readers) => readers.with_conn(f),
            None => self.pool.writer.with_conn(f),
        }
    }

    pub fn schema_version(&self) -> AudienceResult<u32> {
        self.with_reader(migrations::current_version)
    }

    pub fn count_documents(&self) -> AudienceResult<usize> {
        self.with_reader(document_ops::count_documents)
    }

    /// Embedding dimensions the stored documents were written with.
    pub fn stored_dimensions(&self) -> AudienceResult<Vec<usize>> {
        self.with_reader(document_ops::stored_dimensions)
    }

    /// Append documents and embeddings; already-stored ids are skipped.
    pub fn insert_documents(
        &self,
        documents: &[(IndexedDocument, Vec<f32>)],
        model_name: &str,
    ) -> AudienceResult<usize> {
        self.pool
            .writer
            .with_conn(|conn| document_ops::insert_documents(conn, documents, model_name))
    }

    pub fn get_document(&self, doc_id: &str) -> AudienceResult<Option<IndexedDocument>> {
        self.with_reader(|conn| document_ops::get_document(conn, doc_id))
    }

    pub fn list_doc_ids(&self) -> AudienceResult<Vec<String>> {
        self.with_reader(document_ops::list_doc_ids)
    }

    pub fn search_nearest(&self, embedding: &[f32], limit: usize) -> AudienceResult<Vec<IndexHit>> {
        self.with_reader(|conn| vector_search::search_nearest(conn, embedding, limit))
    }
}
