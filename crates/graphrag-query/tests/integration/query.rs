//! Integration tests for `query`.

use graphrag_query::{Error, Evidence, GraphQueryEngine, QueryResult};
use serde_json::{Map, json};

use crate::common::{memory_engine, options, seeded_engine};

fn evidence_sources(result: &QueryResult) -> Vec<String> {
    let mut sources = Vec::new();
    for item in result.results() {
        let nodes = match item {
            Evidence::Node { node, .. } => vec![node],
            Evidence::Path { nodes, .. } => nodes.iter().collect(),
            Evidence::Edge { .. } => Vec::new(),
        };
        for node in nodes {
            sources.extend(node.sources.iter().cloned());
        }
    }
    sources
}

#[tokio::test]
async fn test_two_results_drawn_from_corpus() {
    let engine = seeded_engine().await;
    let result = engine
        .query("What did Babbage design?", 2, &Map::new())
        .await
        .unwrap();

    assert!(result.len() <= 2);
    assert!(!result.is_empty());
    for source in evidence_sources(&result) {
        assert!(source == "doc-a" || source == "doc-b", "unexpected source {source}");
    }
}

#[tokio::test]
async fn test_results_ranked_by_score() {
    let engine = seeded_engine().await;
    let result = engine
        .query("Analytical Engine", 20, &options(json!({"max_hops": 2})))
        .await
        .unwrap();

    assert_eq!(result.results()[0].key(), "entity:analytical-engine");
    let scores: Vec<f32> = result.results().iter().map(Evidence::score).collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    assert!(result.results().iter().any(|e| e.kind() == "path"));
}

#[tokio::test]
async fn test_repeated_queries_identical() {
    let engine = seeded_engine().await;
    let opts = options(json!({"max_hops": 3}));

    let first = engine.query("Lovelace and London", 10, &opts).await.unwrap();
    let second = engine.query("Lovelace and London", 10, &opts).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_nothing_found() {
    let engine = seeded_engine().await;
    let result = engine.query("Turing", 5, &Map::new()).await.unwrap();
    assert_eq!(result, QueryResult::empty());
}

#[tokio::test]
async fn test_lookup_mode_has_no_answer() {
    let engine = seeded_engine().await;
    let result = engine
        .query("Babbage", 3, &options(json!({"answer_mode": "none"})))
        .await
        .unwrap();

    assert!(result.answer().is_none());
    assert!(!result.results().is_empty());
}

#[tokio::test]
async fn test_template_answer_names_top_entity() {
    let engine = seeded_engine().await;
    let result = engine.ask("Babbage").await.unwrap();

    assert_eq!(result.len(), 1);
    assert_eq!(result.answer(), Some("Most relevant: Charles Babbage."));
}

#[tokio::test]
async fn test_unknown_option_rejected() {
    let engine = seeded_engine().await;
    let err = engine
        .query("Babbage", 3, &options(json!({"temperature": 0.2})))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::QueryTranslation(_)));
}

#[tokio::test]
async fn test_invalid_requests_are_translation_errors() {
    let engine = seeded_engine().await;

    let err = engine.query("", 3, &Map::new()).await.unwrap_err();
    assert!(matches!(err, Error::QueryTranslation(_)));

    let err = engine.query("Babbage", 0, &Map::new()).await.unwrap_err();
    assert!(matches!(err, Error::QueryTranslation(_)));

    let err = engine.query("the of and", 3, &Map::new()).await.unwrap_err();
    assert!(matches!(err, Error::QueryTranslation(_)));
}

#[tokio::test]
async fn test_threshold_excludes_weak_seeds() {
    let engine = seeded_engine().await;
    let opts = options(json!({"similarity_threshold": 0.9, "max_hops": 0}));

    // "london" matches one of two terms: seed score 0.5.
    let result = engine.query("London Turing", 10, &opts).await.unwrap();
    assert!(result.is_empty());
}

#[tokio::test]
async fn test_query_before_init() {
    let err = memory_engine().ask("Babbage").await.unwrap_err();
    assert!(matches!(err, Error::QueryExecution(_)));
}
