//! Command-line definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Graph-backed retrieval over a directory of notes.
#[derive(Parser, Debug)]
#[command(name = "graphrag", author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the graph from `*.md` and `*.txt` files under DIR
    Index {
        /// Directory to index
        dir: PathBuf,

        /// Skip malformed documents instead of aborting
        #[arg(long)]
        skip_invalid: bool,
    },

    /// Ask a question against the indexed graph
    Query {
        /// The question
        question: String,

        /// Maximum number of evidence items
        #[arg(short = 'n', long = "results", default_value_t = 1)]
        n_results: usize,

        /// Traversal depth from matched nodes
        #[arg(long)]
        max_hops: Option<usize>,

        /// Minimum seed match score in [0, 1]
        #[arg(long)]
        threshold: Option<f32>,

        /// Return evidence only
        #[arg(long)]
        no_answer: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show statistics for the indexed graph
    Info,

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the config file path
    Path,

    /// Write a default config file
    Init {
        /// Destination (defaults to the platform config directory)
        #[arg(long)]
        file: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print one value by dotted key, e.g. `query.max_hops`
    Get {
        /// Dotted key
        key: String,
    },

    /// Set one value by dotted key
    Set {
        /// Dotted key
        key: String,
        /// New value
        value: String,
    },

    /// Print the effective configuration
    Show,

    /// Print the configuration as environment variables
    Export {
        /// Format as `--env KEY=VALUE` for `docker run`
        #[arg(long)]
        docker_env: bool,
    },
}
