//! Import path rewriting for relocated TypeScript modules.
//!
//! This crate fixes the import statements of a source tree after some of its
//! files were moved:
//!
//! - Resolve the relative specifier between any two locations in the tree
//! - Give shared-folder references (`../lib`, `../hooks`, ...) one extra level
//!   when the importing file itself moved deeper
//! - Replace stale paths to relocated components, keeping quotes and syntax
//!
//! # Overview
//!
//! The main entry point is [`ImportRewriter`]. It is built once per run from
//! a source root and a [`RewriteConfig`](relo_core::RewriteConfig), then
//! shared by every worker:
//!
//! ```
//! use relo_core::RewriteConfig;
//! use relo_rewrite::ImportRewriter;
//!
//! let rewriter = ImportRewriter::new("/repo/src", RewriteConfig::default())?;
//! let outcome = rewriter.rewrite_source(
//!     "/repo/src/App.tsx",
//!     "import Sidebar from './components/Sidebar';\n",
//! );
//!
//! assert_eq!(
//!     outcome.content.as_deref(),
//!     Some("import Sidebar from './components/layout/Sidebar';\n")
//! );
//! assert_eq!(outcome.replacements.len(), 1);
//! # Ok::<(), relo_rewrite::RewriteError>(())
//! ```
//!
//! # Statement Detection
//!
//! Statements are found with regular expressions, not a parser:
//!
//! | Pattern | Example | Kind |
//! |---------|---------|------|
//! | Static | `import { Foo } from './Foo'` | `Static` |
//! | Re-export | `export * from './Foo'` | `ReExport` |
//! | Dynamic | `import('./Foo')` | `Dynamic` |
//!
//! Side-effect imports (`import './styles.css'`) carry no bindings and are
//! never matched. Matches inside `//` and `/* */` comments are skipped.
//!
//! # Classification
//!
//! | Path | Class | Rewritten |
//! |------|-------|-----------|
//! | `react`, `@scope/pkg` | External | no |
//! | `./Foo.module.css` | Stylesheet | no |
//! | `../Sidebar` (name in the plan) | Relocatable | yes |
//! | `./helper` | Unmapped | no |
//!
//! # Thread Safety
//!
//! [`ImportRewriter`] is `Send + Sync`. The compiled patterns are shared
//! globally and the relocation plan is read-only.

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod depth;
pub mod error;
pub mod lexer;
pub mod patterns;
mod resolver;
mod rewriter;

pub use depth::{correct_depth, DepthCorrection};
pub use error::{ResolveError, RewriteError, StatementError};
pub use resolver::RelativePathResolver;
pub use rewriter::{ImportRewriter, Replacement, RewriteOutcome};
