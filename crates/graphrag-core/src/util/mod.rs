//! Utility modules.
//!
//! - [`ids`]: ID normalization and computation

pub mod ids;
