//! Subcommand implementations.

use crate::cli::{Cli, Command};
use crate::config::{GraphRagConfig, StoreBackend};
use crate::config_handlers::handle_config_command;
use crate::error::{Error, Result};
use crate::loader::load_documents;
use graphrag_core::ConfigManager;
use graphrag_graph::{BuildStats, GraphStats};
use graphrag_query::{Evidence, GraphQueryEngine, GraphRagEngine, QueryResult};
use serde_json::{Map, Value, json};
use std::path::Path;

/// Flags that override `[query]` defaults for one query.
#[derive(Debug, Default, Clone)]
pub struct QueryFlags {
    pub max_hops: Option<usize>,
    pub threshold: Option<f32>,
    pub no_answer: bool,
}

impl QueryFlags {
    /// Engine options map for these flags.
    pub fn to_options(&self) -> Map<String, Value> {
        let mut options = Map::new();
        if let Some(hops) = self.max_hops {
            options.insert("max_hops".to_string(), json!(hops));
        }
        if let Some(threshold) = self.threshold {
            options.insert("similarity_threshold".to_string(), json!(threshold));
        }
        if self.no_answer {
            options.insert("answer_mode".to_string(), json!("none"));
        }
        options
    }
}

/// Dispatch a parsed command line.
pub async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();
    match cli.command {
        Command::Config { action } => Ok(handle_config_command(config_path, action)?),
        Command::Index { dir, skip_invalid } => {
            let config = GraphRagConfig::load(config_path)?;
            let stats = cmd_index(&config, &dir, skip_invalid).await?;
            print_build_stats(&stats);
            Ok(())
        }
        Command::Query {
            question,
            n_results,
            max_hops,
            threshold,
            no_answer,
            json,
        } => {
            let config = GraphRagConfig::load(config_path)?;
            let flags = QueryFlags {
                max_hops,
                threshold,
                no_answer,
            };
            let result = cmd_query(&config, &question, n_results, &flags).await?;
            if json {
                let rendered = serde_json::to_string_pretty(&result)
                    .map_err(|e| Error::Core(graphrag_core::Error::from(e)))?;
                println!("{rendered}");
            } else {
                print!("{}", format_result(&result));
            }
            Ok(())
        }
        Command::Info => {
            let config = GraphRagConfig::load(config_path)?;
            let stats = cmd_info(&config).await?;
            print!("{}", format_graph_stats(&stats));
            Ok(())
        }
    }
}

// ============================================================================
// Commands
// ============================================================================

/// Build the graph from a directory and commit it to the configured store.
pub async fn cmd_index(config: &GraphRagConfig, dir: &Path, skip_invalid: bool) -> Result<BuildStats> {
    if config.store.backend == StoreBackend::Memory {
        log::warn!("Memory store selected; the indexed graph will not outlive this process");
    }
    if config.store.backend == StoreBackend::File {
        // The CLI owns its data directory, so it creates what `FileStore`
        // refuses to create on its own.
        let path = config.graph_path()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| graphrag_core::Error::io_with_path(e, parent))?;
        }
    }

    let skip = skip_invalid || config.build.skip_invalid;
    let corpus = load_documents(dir, skip)?;
    let engine = engine(config, skip_invalid)?;
    let mut stats = engine.init_db_with_stats(Some(&corpus.documents)).await?;
    stats.documents_skipped += corpus.skipped.len();
    stats.errors.extend(corpus.skipped);
    log::info!(
        "Indexed {} documents from {}",
        stats.documents_processed,
        dir.display()
    );
    Ok(stats)
}

/// Answer a question from the committed graph.
pub async fn cmd_query(
    config: &GraphRagConfig,
    question: &str,
    n_results: usize,
    flags: &QueryFlags,
) -> Result<QueryResult> {
    let engine = open_engine(config).await?;
    Ok(engine.query(question, n_results, &flags.to_options()).await?)
}

/// Statistics for the committed graph.
pub async fn cmd_info(config: &GraphRagConfig) -> Result<GraphStats> {
    let engine = open_engine(config).await?;
    engine
        .stats()
        .await
        .ok_or_else(|| Error::NoGraph(store_label(config)))
}

fn engine(config: &GraphRagConfig, skip_invalid: bool) -> Result<GraphRagEngine> {
    Ok(GraphRagEngine::with_config(
        config.create_store()?,
        config.engine_config(skip_invalid)?,
    ))
}

async fn open_engine(config: &GraphRagConfig) -> Result<GraphRagEngine> {
    let engine = engine(config, false)?;
    if !engine.open().await? {
        return Err(Error::NoGraph(store_label(config)));
    }
    Ok(engine)
}

fn store_label(config: &GraphRagConfig) -> String {
    match config.store.backend {
        StoreBackend::Memory => "the memory store".to_string(),
        StoreBackend::File => config
            .graph_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| "the file store".to_string()),
    }
}

// ============================================================================
// Output
// ============================================================================

fn print_build_stats(stats: &BuildStats) {
    println!("Documents processed: {}", stats.documents_processed);
    if stats.documents_skipped > 0 {
        println!("Documents skipped:   {}", stats.documents_skipped);
        for error in &stats.errors {
            println!("  {}: {}", error.document_id, error.message);
        }
    }
    println!("Nodes created:       {}", stats.nodes_created);
    println!("Edges created:       {}", stats.edges_created);
}

/// Human-readable rendering of a query result.
pub fn format_result(result: &QueryResult) -> String {
    let mut out = String::new();
    if let Some(answer) = result.answer() {
        out.push_str(&format!("{answer}\n\n"));
    }
    if result.is_empty() {
        out.push_str("No matching evidence.\n");
        return out;
    }
    for (i, item) in result.results().iter().enumerate() {
        out.push_str(&format!(
            "{:>2}. [{}] {:.3}  {}\n",
            i + 1,
            item.kind(),
            item.score(),
            describe(item)
        ));
    }
    out
}

fn describe(item: &Evidence) -> String {
    match item {
        Evidence::Node { node, .. } => format!("{} ({})", node.title, node.id),
        Evidence::Edge { edge, .. } => {
            format!("{} -{}-> {}", edge.from, edge.relationship.name(), edge.to)
        }
        Evidence::Path { nodes, .. } => nodes
            .iter()
            .map(|n| n.title.as_str())
            .collect::<Vec<_>>()
            .join(" -> "),
    }
}

/// Human-readable rendering of graph statistics.
pub fn format_graph_stats(stats: &GraphStats) -> String {
    let mut out = format!(
        "Nodes: {}\nEdges: {}\nIsolated nodes: {}\n",
        stats.node_count, stats.edge_count, stats.isolated_nodes
    );
    for (kind, count) in &stats.nodes_by_kind {
        out.push_str(&format!("  {kind}: {count}\n"));
    }
    for (relationship, count) in &stats.edges_by_relationship {
        out.push_str(&format!("  {relationship}: {count}\n"));
    }
    out
}

// ============================================================================
// Tests
// ============================================================================
