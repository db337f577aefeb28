//! Pre-compiled patterns for locating import path literals.
//!
//! Two shapes are recognized:
//!
//! - [`STATIC_IMPORT_PATTERN`]: `import <bindings> from '<path>'` and
//!   `export <bindings> from '<path>'`, bindings may span several lines
//! - [`DYNAMIC_IMPORT_PATTERN`]: `import('<path>')`
//!
//! The `regex` crate has no backreferences, so both patterns accept either
//! quote on each side. Callers must check that the closing quote matches the
//! opening one (see [`ImportRewriter`](crate::ImportRewriter)).

use std::sync::OnceLock;

use regex::Regex;

use crate::error::RewriteError;

/// Static import / re-export pattern.
///
/// Bindings cannot contain quotes, backticks or `;`, so a match never runs
/// across a preceding side-effect import or an unrelated statement.
///
/// # Capture Groups
///
/// 1. prefix - keyword through `from` and the whitespace after it
/// 2. keyword - `import` or `export`
/// 3. opening quote
/// 4. path literal
/// 5. suffix - closing quote and an optional `;`
pub const STATIC_IMPORT_PATTERN: &str =
    r#"\b((import|export)\s[^;'"`]*?\bfrom\s*)(["'])([^"'\r\n]*)(["'];?)"#;

/// Dynamic `import()` pattern.
///
/// # Capture Groups
///
/// 1. prefix - `import(` with any inner whitespace
/// 2. opening quote
/// 3. path literal
/// 4. suffix - closing quote and `)`
pub const DYNAMIC_IMPORT_PATTERN: &str = r#"\b(import\s*\(\s*)(["'])([^"'\r\n]*)(["']\s*\))"#;

/// Capture index of the prefix in both patterns.
pub const GROUP_PREFIX: usize = 1;

/// Capture index of the keyword in [`STATIC_IMPORT_PATTERN`].
pub const STATIC_GROUP_KEYWORD: usize = 2;

/// Capture index of the opening quote in [`STATIC_IMPORT_PATTERN`].
pub const STATIC_GROUP_QUOTE: usize = 3;

/// Capture index of the path literal in [`STATIC_IMPORT_PATTERN`].
pub const STATIC_GROUP_PATH: usize = 4;

/// Capture index of the suffix in [`STATIC_IMPORT_PATTERN`].
pub const STATIC_GROUP_SUFFIX: usize = 5;

/// Capture index of the opening quote in [`DYNAMIC_IMPORT_PATTERN`].
pub const DYNAMIC_GROUP_QUOTE: usize = 2;

/// Capture index of the path literal in [`DYNAMIC_IMPORT_PATTERN`].
pub const DYNAMIC_GROUP_PATH: usize = 3;

/// Capture index of the suffix in [`DYNAMIC_IMPORT_PATTERN`].
pub const DYNAMIC_GROUP_SUFFIX: usize = 4;

static COMPILED_STATIC: OnceLock<Regex> = OnceLock::new();

static COMPILED_DYNAMIC: OnceLock<Regex> = OnceLock::new();

/// Returns the compiled static import pattern.
///
/// Compiled once and shared by every rewriter; thread-safe.
///
/// # Errors
///
/// Returns [`RewriteError::Pattern`] if the pattern fails to compile.
pub fn static_import_regex() -> Result<&'static Regex, RewriteError> {
    cached(&COMPILED_STATIC, STATIC_IMPORT_PATTERN)
}

/// Returns the compiled dynamic import pattern.
///
/// # Errors
///
/// Returns [`RewriteError::Pattern`] if the pattern fails to compile.
pub fn dynamic_import_regex() -> Result<&'static Regex, RewriteError> {
    cached(&COMPILED_DYNAMIC, DYNAMIC_IMPORT_PATTERN)
}

fn cached(cell: &'static OnceLock<Regex>, pattern: &str) -> Result<&'static Regex, RewriteError> {
    if let Some(regex) = cell.get() {
        return Ok(regex);
    }

    let regex = Regex::new(pattern)?;
    Ok(cell.get_or_init(|| regex))
}
