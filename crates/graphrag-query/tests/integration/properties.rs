//! Property tests for query invariants.

use graphrag_query::{Evidence, GraphQueryEngine, GraphRagEngine};
use proptest::prelude::*;
use serde_json::json;
use tokio::runtime::Runtime;

use crate::common::{options, seeded_engine};

const WORDS: &[&str] = &[
    "Lovelace",
    "Babbage",
    "London",
    "Analytical",
    "Engine",
    "Hopper",
    "Charles",
];

fn runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

fn engine(rt: &Runtime) -> GraphRagEngine {
    rt.block_on(seeded_engine())
}

proptest! {
    #[test]
    fn prop_results_never_exceed_limit(
        picks in proptest::collection::vec(0..WORDS.len(), 1..4),
        n in 1usize..25,
        hops in 0usize..4,
    ) {
        let rt = runtime();
        let engine = engine(&rt);
        let question: Vec<&str> = picks.iter().map(|&i| WORDS[i]).collect();
        let opts = options(json!({"max_hops": hops}));

        let result = rt
            .block_on(engine.query(&question.join(" "), n, &opts))
            .unwrap();

        prop_assert!(result.len() <= n);
        let scores: Vec<f32> = result.results().iter().map(Evidence::score).collect();
        prop_assert!(scores.windows(2).all(|w| w[0] >= w[1]));
        prop_assert!(scores.iter().all(|s| (0.0..=1.0).contains(s)));
    }

    #[test]
    fn prop_queries_are_deterministic(
        picks in proptest::collection::vec(0..WORDS.len(), 1..4),
        n in 1usize..10,
    ) {
        let rt = runtime();
        let engine = engine(&rt);
        let question: Vec<&str> = picks.iter().map(|&i| WORDS[i]).collect();
        let opts = options(json!({"max_hops": 2}));

        let first = rt.block_on(engine.query(&question.join(" "), n, &opts)).unwrap();
        let second = rt.block_on(engine.query(&question.join(" "), n, &opts)).unwrap();
        prop_assert_eq!(first, second);
    }
}
