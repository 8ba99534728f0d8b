//! Integration tests for `init_db` and engine lifecycle.

use graphrag_core::{Document, ServiceState};
use graphrag_graph::{FileStore, GraphStore};
use graphrag_query::{Error, GraphQueryEngine, GraphRagEngine};
use std::sync::Arc;
use std::time::Duration;

use crate::common::{OfflineStore, doc_a, doc_b, doc_c, memory_engine, seeded_engine};

#[tokio::test]
async fn test_init_db_none_gives_queryable_empty_graph() {
    let engine = memory_engine();
    engine.init_db(None).await.unwrap();

    let result = engine.ask("Babbage").await.unwrap();
    assert!(result.answer().is_none());
    assert!(result.results().is_empty());
}

#[tokio::test]
async fn test_init_db_empty_slice_matches_none() {
    let engine = memory_engine();
    engine.init_db(Some(&[])).await.unwrap();

    assert!(engine.state().is_ready());
    assert_eq!(engine.stats().await.unwrap().node_count, 0);
}

#[tokio::test]
async fn test_init_db_builds_entities_and_documents() {
    let engine = seeded_engine().await;
    let stats = engine.stats().await.unwrap();

    assert_eq!(stats.nodes_by_kind["document"], 2);
    assert!(stats.nodes_by_kind["entity"] >= 4);
    assert!(stats.edges_by_relationship["mentions"] >= 4);
}

#[tokio::test]
async fn test_unreachable_store_is_connection_error() {
    let engine = GraphRagEngine::new(Arc::new(OfflineStore));
    let err = engine.init_db(Some(&[doc_a()])).await.unwrap_err();

    assert!(matches!(err, Error::Connection(_)));
    assert!(err.to_string().contains("offline"));
    assert!(engine.state().is_failed());
}

#[tokio::test]
async fn test_schema_error_names_document() {
    let engine = memory_engine();
    let docs = [doc_a(), Document::new("doc-a", "Charles Babbage again.")];
    let err = engine.init_db(Some(&docs)).await.unwrap_err();

    assert!(matches!(err, Error::Schema(_)));
    assert!(err.to_string().contains("doc-a"));
}

#[tokio::test]
async fn test_init_db_twice_resets_graph() {
    let engine = seeded_engine().await;
    engine.init_db(Some(&[doc_c()])).await.unwrap();

    assert!(engine.ask("Babbage").await.unwrap().results().is_empty());
    let hopper = engine.ask("Hopper").await.unwrap();
    assert_eq!(hopper.results()[0].key(), "entity:grace-hopper");
}

#[tokio::test]
async fn test_failed_reinit_does_not_serve_stale_graph() {
    let engine = seeded_engine().await;
    let err = engine
        .init_db(Some(&[Document::new("empty", "")]))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Schema(_)));

    let err = engine.ask("Babbage").await.unwrap_err();
    assert!(matches!(err, Error::QueryExecution(_)));
    assert!(err.to_string().contains("engine unusable"));
}

#[tokio::test]
async fn test_wait_ready_observes_init() {
    let engine = Arc::new(memory_engine());
    let waiter = {
        let handle = engine.handle().clone();
        tokio::spawn(async move { handle.wait_ready(Duration::from_secs(5)).await })
    };

    engine.init_db(Some(&[doc_a()])).await.unwrap();
    assert!(waiter.await.unwrap().is_ok());
    assert_eq!(engine.state(), ServiceState::Ready);
}

#[tokio::test]
async fn test_file_store_persists_across_engines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("graph.json");

    let first = GraphRagEngine::new(Arc::new(FileStore::new(&path)));
    first.init_db(Some(&[doc_a(), doc_b()])).await.unwrap();
    assert!(path.exists());

    let second = GraphRagEngine::new(Arc::new(FileStore::new(&path)));
    assert!(second.open().await.unwrap());

    let before = first.ask("Babbage").await.unwrap();
    let after = second.ask("Babbage").await.unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_file_store_missing_directory_is_connection_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("nope").join("graph.json"));
    assert!(store.connect().await.is_err());

    let engine = GraphRagEngine::new(Arc::new(store));
    let err = engine.init_db(None).await.unwrap_err();
    assert!(matches!(err, Error::Connection(_)));
}
