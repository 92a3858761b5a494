//! File-backed persistence: restart survival, append-only inserts, migrations,
//! corrupt files.

use audience_core::config::StorageConfig;
use audience_core::customer::default_customers;
use audience_core::IndexedDocument;
use audience_storage::migrations::LATEST_VERSION;
use audience_storage::pool::pragmas::verify_wal_mode;
use audience_storage::StorageEngine;

fn documents() -> Vec<(IndexedDocument, Vec<f32>)> {
    default_customers()
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let mut embedding = vec![0.0_f32; 4];
            embedding[i] = 1.0;
            (IndexedDocument::from_customer(c), embedding)
        })
        .collect()
}

#[test]
fn documents_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("survive.db");
    let config = StorageConfig::default();

    {
        let engine = StorageEngine::open(&path, &config).unwrap();
        assert_eq!(engine.insert_documents(&documents(), "test").unwrap(), 3);
    }

    let engine = StorageEngine::open(&path, &config).unwrap();
    assert_eq!(engine.count_documents().unwrap(), 3);
    let doc = engine.get_document("customer_F002").unwrap().unwrap();
    assert_eq!(doc.customer_id, "F002");
    assert_eq!(doc, documents()[1].0);
}

#[test]
fn inserts_are_append_only() {
    let engine = StorageEngine::open_in_memory().unwrap();
    assert_eq!(engine.insert_documents(&documents(), "test").unwrap(), 3);

    let mut changed = documents();
    changed[0].0.text = "replaced".to_string();
    assert_eq!(engine.insert_documents(&changed, "test").unwrap(), 0);
    assert_eq!(engine.count_documents().unwrap(), 3);

    let stored = engine.get_document("customer_F001").unwrap().unwrap();
    assert_ne!(stored.text, "replaced");
    assert_eq!(
        engine.list_doc_ids().unwrap(),
        vec!["customer_F001", "customer_F002", "customer_F003"]
    );
}

#[test]
fn migrations_apply_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("schema.db");
    let config = StorageConfig::default();

    let first = StorageEngine::open(&path, &config).unwrap();
    assert_eq!(first.schema_version().unwrap(), LATEST_VERSION);
    drop(first);

    let second = StorageEngine::open(&path, &config).unwrap();
    assert_eq!(second.schema_version().unwrap(), LATEST_VERSION);
}

#[test]
fn file_store_uses_wal() {
    let dir = tempfile::tempdir().unwrap();
    let engine = StorageEngine::open(&dir.path().join("wal.db"), &StorageConfig::default()).unwrap();
    let wal = engine.pool().writer.with_conn(verify_wal_mode).unwrap();
    assert!(wal);
    assert_eq!(engine.pool().readers.as_ref().unwrap().size(), 4);
}

#[test]
fn corrupt_file_fails_to_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corrupt.db");
    std::fs::write(&path, vec![0xAB_u8; 4096]).unwrap();

    assert!(StorageEngine::open(&path, &StorageConfig::default()).is_err());
}

#[test]
fn two_engines_share_one_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shared.db");
    let config = StorageConfig::default();

    let a = StorageEngine::open(&path, &config).unwrap();
    let b = StorageEngine::open(&path, &config).unwrap();
    a.insert_documents(&documents(), "test").unwrap();
    assert_eq!(b.count_documents().unwrap(), 3);
    assert_eq!(b.insert_documents(&documents(), "test").unwrap(), 0);
}

#[test]
fn from_config_honors_in_memory() {
    let config = StorageConfig {
        in_memory: true,
        db_path: String::new(),
        ..StorageConfig::default()
    };
    let engine = StorageEngine::from_config(&config).unwrap();
    assert!(engine.pool().db_path.is_none());
    assert_eq!(engine.count_documents().unwrap(), 0);
}

#[test]
fn stored_dimensions_reports_written_widths() {
    let engine = StorageEngine::open_in_memory().unwrap();
    assert!(engine.stored_dimensions().unwrap().is_empty());
    engine.insert_documents(&documents(), "test-model").unwrap();
    assert_eq!(engine.stored_dimensions().unwrap(), vec![4]);
}
