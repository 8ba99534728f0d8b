//! GraphRAG core: shared types, traits, errors and utilities.
//!
//! This crate provides the foundational types used across all GraphRAG
//! crates. It has no internal GraphRAG dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`document`]: Input document type
//! - [`service`]: Engine lifecycle state
//! - [`traits`]: Configuration management trait
//! - [`util`]: ID utilities

#![doc = include_str!("../README.md")]

pub mod document;
pub mod error;
pub mod service;
pub mod traits;
pub mod util;

// Re-export key types at crate root for convenience
pub use document::Document;
pub use error::{Error, Result};
pub use service::{ServiceHandle, ServiceState};
pub use traits::ConfigManager;

pub use util::ids::{entity_id, id_from_path, normalize_id};
