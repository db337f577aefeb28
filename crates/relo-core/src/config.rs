//! Configuration structures for the relo import fixer.
//!
//! - [`RewriteConfig`] - What the rewriter matches and how files are classified
//! - [`ScanConfig`] - Which files are visited and how the run is executed
//! - [`Config`] - Root configuration combining both
//!
//! All configuration types implement [`Default`] with the values of the
//! built-in relocation plan, and deserialize with `#[serde(default)]` so a
//! configuration file only needs the fields it changes.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::location_map::LocationMap;

/// Configuration for the import rewriter.
///
/// # Examples
///
/// ```
/// use relo_core::RewriteConfig;
///
/// let config = RewriteConfig::default();
/// assert!(config.shared_folders.iter().any(|f| f == "hooks"));
/// assert_eq!(config.feature_dir, "features");
/// assert!(config.locations.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriteConfig {
    /// Shared top-level folders whose `../<folder>` references get one extra
    /// level when the referencing file was relocated.
    pub shared_folders: Vec<String>,

    /// Extensions (without dot) of stylesheet imports, which are never rewritten.
    pub stylesheet_extensions: Vec<String>,

    /// Extensions (without dot) stripped from a path literal's basename
    /// before the location map lookup.
    pub source_extensions: Vec<String>,

    /// Path fragments that mark a stale reference into the old layout.
    pub legacy_hints: Vec<String>,

    /// Top-level folder holding relocated feature files.
    pub feature_dir: String,

    /// Folders (relative to the source root) whose direct children were relocated.
    pub layout_dirs: Vec<String>,

    /// Relocation plan override. `None` uses [`LocationMap::builtin`].
    pub locations: Option<LocationMap>,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            shared_folders: ["lib", "hooks", "contexts", "assets", "utils", "types"]
                .map(str::to_owned)
                .to_vec(),
            stylesheet_extensions: ["css", "scss", "sass", "less"]
                .map(str::to_owned)
                .to_vec(),
            source_extensions: vec!["ts".to_owned(), "tsx".to_owned()],
            legacy_hints: vec!["components/".to_owned()],
            feature_dir: "features".to_owned(),
            layout_dirs: vec![
                "components/layout".to_owned(),
                "components/common".to_owned(),
            ],
            locations: None,
        }
    }
}

impl RewriteConfig {
    /// Returns the configured relocation plan, or the built-in one.
    #[must_use]
    pub fn location_map(&self) -> LocationMap {
        self.locations.clone().unwrap_or_else(LocationMap::builtin)
    }
}

/// Configuration for a run over a source tree.
///
/// # Examples
///
/// ```
/// use relo_core::ScanConfig;
///
/// let config = ScanConfig::default();
/// assert_eq!(config.root_path, "src");
/// assert_eq!(config.file_extensions, vec!["ts", "tsx"]);
/// assert!(!config.dry_run);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// The source root every canonical location is relative to.
    pub root_path: Utf8PathBuf,

    /// File extensions (without dot) of the files to rewrite.
    pub file_extensions: Vec<String>,

    /// Directory names skipped during traversal, in addition to `.gitignore`.
    pub skip_dirs: Vec<String>,

    /// Whether to follow symbolic links.
    pub follow_links: bool,

    /// Maximum number of parallel jobs.
    /// `None` means use all available CPU cores.
    pub max_parallel_jobs: Option<usize>,

    /// Compute changes without writing any file.
    pub dry_run: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            root_path: Utf8PathBuf::from("src"),
            file_extensions: vec!["ts".to_owned(), "tsx".to_owned()],
            skip_dirs: ["node_modules", "dist", "build", ".git", "coverage"]
                .map(str::to_owned)
                .to_vec(),
            follow_links: false,
            max_parallel_jobs: None,
            dry_run: false,
        }
    }
}

/// Root configuration for the relo import fixer.
///
/// # Examples
///
/// ```
/// use relo_core::Config;
///
/// let config: Config = serde_json::from_str(r#"{"scan": {"dry_run": true}}"#)?;
/// assert!(config.scan.dry_run);
/// assert_eq!(config.rewrite.feature_dir, "features");
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Run configuration.
    pub scan: ScanConfig,

    /// Rewriter configuration.
    pub rewrite: RewriteConfig,
}

impl Config {
    /// Loads a configuration file in JSON format.
    ///
    /// Missing fields take their default values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Parse`] if it is not valid JSON for this structure
    /// (including an invalid `locations` table).
    pub fn from_json_file(path: &Utf8Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let config = serde_json::from_str(&text)?;
        Ok(config)
    }

    /// Checks that the source root exists and is a directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingDirectory`] if the root does not exist
    /// and [`ConfigError::InvalidPath`] if it is not a directory.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let root = &self.scan.root_path;
        if !root.exists() {
            return Err(ConfigError::MissingDirectory(root.clone()));
        }
        if !root.is_dir() {
            return Err(ConfigError::InvalidPath {
                path: root.clone(),
                reason: "source root is not a directory".to_owned(),
            });
        }
        Ok(())
    }
}
