//! Integration tests for `add_records`.

use graphrag_core::Document;
use graphrag_query::{
    EdgeRecord, Evidence, GraphQueryEngine, GraphRagEngine, NodeRecord, Record,
};
use serde_json::json;
use std::sync::Arc;

use crate::common::{FlakyStore, doc_a, doc_b, doc_c, memory_engine, options, seeded_engine};

#[tokio::test]
async fn test_add_records_before_init_is_rejected() {
    let engine = memory_engine();
    assert!(!engine.add_records(&[Record::from(doc_c())]).await);
    assert!(!engine.add_records(&[]).await);
}

#[tokio::test]
async fn test_add_empty_batch_is_noop() {
    let engine = seeded_engine().await;
    let before = engine.snapshot().await.unwrap();

    assert!(engine.add_records(&[]).await);

    let after = engine.snapshot().await.unwrap();
    assert!(Arc::ptr_eq(&before, &after));
}

#[tokio::test]
async fn test_added_document_becomes_queryable() {
    let engine = seeded_engine().await;
    assert!(engine.ask("Hopper").await.unwrap().results().is_empty());

    assert!(engine.add_records(&[Record::from(doc_c())]).await);

    let result = engine.ask("Hopper").await.unwrap();
    assert_eq!(result.results()[0].key(), "entity:grace-hopper");
    assert!(result.answer().unwrap().contains("Grace Hopper"));
}

#[tokio::test]
async fn test_explicit_node_and_edge_records() {
    let engine = seeded_engine().await;
    let records = [
        Record::from(
            NodeRecord::new("Luigi Menabrea")
                .with_category("engineer")
                .with_source("registry"),
        ),
        Record::from(EdgeRecord::new("Luigi Menabrea", "Ada Lovelace", "translated_by")),
    ];
    assert!(engine.add_records(&records).await);

    let result = engine
        .query("Menabrea", 10, &options(json!({"max_hops": 1})))
        .await
        .unwrap();
    let keys: Vec<String> = result.results().iter().map(Evidence::key).collect();
    assert_eq!(keys[0], "entity:luigi-menabrea");
    assert!(keys.contains(&"entity:ada-lovelace".to_string()));
    assert!(keys.contains(&"entity:luigi-menabrea|translated_by|entity:ada-lovelace".to_string()));
}

#[tokio::test]
async fn test_invalid_record_rejects_whole_batch() {
    let engine = seeded_engine().await;
    let before = engine.stats().await.unwrap();

    let records = [
        Record::from(NodeRecord::new("Alan Turing")),
        Record::from(doc_c()),
        Record::from(EdgeRecord::new("Alan Turing", "Nobody Known", "knows")),
    ];
    assert!(!engine.add_records(&records).await);

    assert_eq!(engine.stats().await.unwrap(), before);
    assert!(engine.ask("Turing").await.unwrap().results().is_empty());
    assert!(engine.ask("Hopper").await.unwrap().results().is_empty());
}

#[tokio::test]
async fn test_duplicate_document_rejected() {
    let engine = seeded_engine().await;
    let replacement = Document::new("doc-b", "Completely different text about Turing.");
    assert!(!engine.add_records(&[Record::from(replacement)]).await);
    assert!(engine.ask("Turing").await.unwrap().results().is_empty());
}

#[tokio::test]
async fn test_existing_node_keeps_title() {
    let engine = seeded_engine().await;
    let record = NodeRecord::new("Countess of Lovelace")
        .with_id("entity:ada-lovelace")
        .with_source("registry");
    assert!(engine.add_records(&[Record::from(record)]).await);

    let snapshot = engine.snapshot().await.unwrap();
    let node = snapshot.graph.get_node("entity:ada-lovelace").unwrap();
    assert_eq!(node.title, "Ada Lovelace");
    assert_eq!(node.sources, vec!["doc-a".to_string(), "registry".to_string()]);
}

#[tokio::test]
async fn test_commit_failure_rejects_batch() {
    let store = Arc::new(FlakyStore::default());
    let engine = GraphRagEngine::new(store.clone());
    engine.init_db(Some(&[doc_a(), doc_b()])).await.unwrap();

    store.fail_commits();
    assert!(!engine.add_records(&[Record::from(doc_c())]).await);
    assert!(engine.ask("Hopper").await.unwrap().results().is_empty());
    assert!(engine.state().is_ready());
}

#[tokio::test]
async fn test_concurrent_query_sees_whole_batch_or_nothing() {
    let engine = Arc::new(seeded_engine().await);

    let writer = {
        let engine = Arc::clone(&engine);
        tokio::spawn(async move { engine.add_records(&[Record::from(doc_c())]).await })
    };
    let reader = {
        let engine = Arc::clone(&engine);
        tokio::spawn(async move {
            engine
                .query("Grace Hopper Harvard", 10, &options(json!({"max_hops": 0})))
                .await
        })
    };

    assert!(writer.await.unwrap());
    let result = reader.await.unwrap().unwrap();
    let keys: Vec<String> = result.results().iter().map(Evidence::key).collect();
    let has_hopper = keys.contains(&"entity:grace-hopper".to_string());
    let has_harvard = keys.contains(&"entity:harvard".to_string());
    assert_eq!(has_hopper, has_harvard);
}
