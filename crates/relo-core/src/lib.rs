//! Core types, location map, and configuration for the relo import fixer.
//!
//! This crate provides the foundational types used across the workspace:
//!
//! - [`LocationMap`] - the relocation plan (logical name to canonical location)
//! - Configuration structures ([`Config`], [`RewriteConfig`], [`ScanConfig`])
//! - Error types for configuration loading ([`ConfigError`])
//! - Domain types ([`SourceFile`], [`FileClass`], [`ImportStatement`], [`ImportClass`])
//! - Type aliases for `FxHashMap`/`FxHashSet` (faster than std)

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod hash;
pub mod location_map;
pub mod types;

pub use config::{Config, RewriteConfig, ScanConfig};
pub use error::ConfigError;
pub use hash::{FxHashMap, FxHashSet};
pub use location_map::LocationMap;
pub use types::{
    FileClass, ImportClass, ImportKind, ImportStatement, QuoteStyle, SourceFile, SourceLocation,
};
