//! # graphrag-cli
//!
//! The `graphrag` command-line tool: index a directory of notes into a
//! knowledge graph, then ask questions against it.
//!
//! - `graphrag index <DIR>` builds and persists the graph
//! - `graphrag query <QUESTION>` answers from the persisted graph
//! - `graphrag info` prints graph statistics
//! - `graphrag config ...` manages the TOML configuration file

#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_handlers;
pub mod error;
pub mod loader;

pub use cli::{Cli, Command, ConfigAction};
pub use commands::run;
pub use config::GraphRagConfig;
pub use error::{Error, Result};
