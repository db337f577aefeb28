//! Error types for the relo-rewrite crate.
//!
//! - [`ResolveError`] - a relative specifier could not be computed
//! - [`StatementError`] - a single import statement could not be rewritten
//! - [`RewriteError`] - the rewriter itself could not be built
//!
//! Statement errors never abort a file: the statement is left unchanged and
//! the error is reported in the [`RewriteOutcome`](crate::RewriteOutcome).

use std::path::PathBuf;

use camino::Utf8PathBuf;
use relo_core::SourceLocation;

/// Errors computing a relative path between two locations.
///
/// # Examples
///
/// ```
/// use relo_rewrite::ResolveError;
/// use camino::Utf8PathBuf;
///
/// let err = ResolveError::NoParent(Utf8PathBuf::from("/"));
/// assert_eq!(err.to_string(), "file has no parent directory: /");
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The importing file has no parent directory.
    #[error("file has no parent directory: {0}")]
    NoParent(Utf8PathBuf),

    /// The target cannot be expressed relative to the importing directory,
    /// e.g. one path is absolute and the other is not, or the base contains
    /// `..` segments that cannot be eliminated.
    #[error("cannot express {to} relative to {from}")]
    Unrelated {
        /// The importing directory.
        from: Utf8PathBuf,
        /// The absolute target location.
        to: Utf8PathBuf,
    },

    /// The computed path is not valid UTF-8.
    #[error("relative path is not valid UTF-8: {}", _0.display())]
    NonUtf8(PathBuf),
}

/// A statement that was left unchanged because its path could not be resolved.
#[derive(Debug, thiserror::Error)]
#[error("line {}: cannot rewrite '{specifier}': {source}", .location.line)]
pub struct StatementError {
    /// The path literal of the statement.
    pub specifier: String,
    /// Where the statement starts.
    pub location: SourceLocation,
    /// Why resolution failed.
    #[source]
    pub source: ResolveError,
}

/// Errors building an [`ImportRewriter`](crate::ImportRewriter).
#[derive(Debug, thiserror::Error)]
pub enum RewriteError {
    /// An import pattern failed to compile.
    #[error("invalid import pattern: {0}")]
    Pattern(#[from] regex::Error),
}
