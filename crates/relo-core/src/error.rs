//! Error types for the relo-core crate.
//!
//! [`ConfigError`] is returned while loading a config file or building a
//! [`LocationMap`](crate::LocationMap) from custom entries.

use camino::Utf8PathBuf;

/// A configuration that cannot be used.
///
/// # Examples
///
/// ```
/// use relo_core::{ConfigError, LocationMap};
///
/// let err = LocationMap::from_entries([("Help", "../Help")]).unwrap_err();
/// assert!(matches!(err, ConfigError::InvalidTarget { .. }));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A configured path exists but cannot be used.
    #[error("unusable path '{path}': {reason}")]
    InvalidPath {
        /// The rejected path.
        path: Utf8PathBuf,
        /// Why it was rejected.
        reason: String,
    },

    /// The source root does not exist.
    #[error("source root not found: {0}")]
    MissingDirectory(Utf8PathBuf),

    /// A logical name is mapped to two different canonical locations.
    #[error("'{name}' is mapped to both '{first}' and '{second}'")]
    ConflictingEntry {
        /// The duplicated logical name.
        name: String,
        /// The location registered first.
        first: String,
        /// The conflicting location.
        second: String,
    },

    /// A canonical location is not a usable path under the source root.
    #[error("invalid location for '{name}': '{target}' ({reason})")]
    InvalidTarget {
        /// The logical name owning the target.
        name: String,
        /// The rejected target.
        target: String,
        /// Explanation of why the target is rejected.
        reason: &'static str,
    },

    /// The config file could not be read.
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid JSON for [`Config`](crate::Config).
    #[error("malformed config file: {0}")]
    Parse(#[from] serde_json::Error),
}
