//! Domain types for the relo import fixer.
//!
//! # Module Organization
//!
//! - [`file`] - Source files and their relocation class
//! - [`import`] - Import statements, quote styles, and classifications
//! - [`location`] - Source code locations
//!
//! All public types are re-exported here and at the crate root:
//!
//! ```
//! use relo_core::{FileClass, ImportStatement, QuoteStyle, SourceFile};
//! ```

mod file;
mod import;
mod location;

pub use file::{FileClass, SourceFile};
pub use import::{ImportClass, ImportKind, ImportStatement, QuoteStyle};
pub use location::SourceLocation;
