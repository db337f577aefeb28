//! Error types for the relo-scanner crate.
//!
//! [`ScanError`] covers everything that can go wrong between walking the
//! source root and writing a fixed file back.

use camino::Utf8PathBuf;

/// Errors that can occur during a run.
///
/// Only [`ScanError::Read`] and [`ScanError::Write`] are per-file: the file
/// is reported and the run moves on. Everything else stops the run.
///
/// Statement-level failures are not scan errors: they are reported in the
/// file's [`RewriteOutcome`](relo_rewrite::RewriteOutcome) and the file is
/// still processed.
///
/// # Examples
///
/// ```
/// use relo_scanner::ScanError;
///
/// fn describe(err: &ScanError) -> String {
///     match err {
///         ScanError::Walk(e) => format!("walk: {e}"),
///         ScanError::Read { path, .. } => format!("read: {path}"),
///         ScanError::Write { path, .. } => format!("write: {path}"),
///         ScanError::Config(msg) => format!("config: {msg}"),
///         ScanError::NonUtf8Path(p) => format!("path: {}", p.display()),
///         ScanError::Rewriter(e) => format!("rewriter: {e}"),
///         ScanError::ThreadPool(e) => format!("pool: {e}"),
///     }
/// }
///
/// assert_eq!(describe(&ScanError::config("bad")), "config: bad");
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// The directory walk failed.
    #[error("cannot walk source root: {0}")]
    Walk(#[from] ignore::Error),

    /// A source file could not be read.
    #[error("cannot read {path}: {source}")]
    Read {
        /// The unreadable file.
        path: Utf8PathBuf,
        /// Cause.
        #[source]
        source: std::io::Error,
    },

    /// A fixed file could not be written back.
    #[error("cannot write {path}: {source}")]
    Write {
        /// The file left with its old content.
        path: Utf8PathBuf,
        /// Cause.
        #[source]
        source: std::io::Error,
    },

    /// The run configuration is unusable.
    #[error("bad configuration: {0}")]
    Config(String),

    /// A walked path is not UTF-8.
    #[error("non UTF-8 path under source root: {}", _0.display())]
    NonUtf8Path(std::path::PathBuf),

    /// The import rewriter could not be built.
    #[error("failed to build rewriter: {0}")]
    Rewriter(#[from] relo_rewrite::RewriteError),

    /// The worker pool could not be created.
    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl ScanError {
    /// Shorthand for [`ScanError::Read`].
    #[inline]
    pub fn read(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Shorthand for [`ScanError::Write`].
    #[inline]
    pub fn write(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    /// Shorthand for [`ScanError::Config`].
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether the run carries on past this error.
    #[inline]
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Read { .. } | Self::Write { .. })
    }

    /// Whether this error aborts the run.
    #[inline]
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !self.is_recoverable()
    }

    /// The file this error belongs to, for per-file errors.
    #[must_use]
    pub fn path(&self) -> Option<&Utf8PathBuf> {
        match self {
            Self::Read { path, .. } | Self::Write { path, .. } => Some(path),
            Self::Walk(_)
            | Self::Config(_)
            | Self::NonUtf8Path(_)
            | Self::Rewriter(_)
            | Self::ThreadPool(_) => None,
        }
    }
}
