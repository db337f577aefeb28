//! Source files and their relocation class.
//!
//! A [`SourceFile`] is one file of the tree being fixed. Its [`FileClass`] is
//! derived purely from where the file lives *now*: files that sit under a
//! feature folder or directly under a layout/common folder are the ones that
//! moved one level deeper and need their shared-folder references corrected.

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

use crate::config::RewriteConfig;

/// Whether a file was itself relocated, and how.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use relo_core::{FileClass, RewriteConfig};
///
/// let config = RewriteConfig::default();
/// let class = FileClass::classify(Utf8Path::new("features/capture/LiveTranscript.tsx"), &config);
/// assert_eq!(class, FileClass::RelocatedFeature);
/// assert!(class.is_relocated());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileClass {
    /// Lives three or more segments deep under the feature folder.
    RelocatedFeature,

    /// Lives directly under one of the layout/common folders.
    RelocatedLayout,

    /// Any other file.
    #[default]
    Unmoved,
}

impl FileClass {
    /// Classifies a path relative to the source root.
    #[must_use]
    pub fn classify(relative: &Utf8Path, config: &RewriteConfig) -> Self {
        let first = relative.iter().next();

        if first == Some(config.feature_dir.as_str()) && relative.iter().count() >= 3 {
            return Self::RelocatedFeature;
        }

        let parent = relative.parent();
        let in_layout_dir = config
            .layout_dirs
            .iter()
            .any(|dir| parent == Some(Utf8Path::new(dir.trim_end_matches('/'))));
        if in_layout_dir {
            return Self::RelocatedLayout;
        }

        Self::Unmoved
    }

    /// Returns `true` if the file moved and needs depth correction.
    #[inline]
    #[must_use]
    pub const fn is_relocated(self) -> bool {
        !matches!(self, Self::Unmoved)
    }

    /// Returns a short human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::RelocatedFeature => "feature",
            Self::RelocatedLayout => "layout",
            Self::Unmoved => "unmoved",
        }
    }
}

/// A source file under the source root.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use relo_core::{FileClass, RewriteConfig, SourceFile};
///
/// let file = SourceFile::new(
///     "/repo/src/components/layout/Sidebar.tsx",
///     Utf8Path::new("/repo/src"),
///     String::new(),
///     &RewriteConfig::default(),
/// );
/// assert_eq!(file.depth, 3);
/// assert_eq!(file.class, FileClass::RelocatedLayout);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    /// Absolute path of the file.
    pub path: Utf8PathBuf,

    /// Path relative to the source root, or `None` if the file lies outside it.
    pub relative: Option<Utf8PathBuf>,

    /// Number of path segments below the source root (the file name included).
    pub depth: usize,

    /// Relocation class derived from the current location.
    pub class: FileClass,

    /// Raw text content.
    #[serde(skip)]
    pub content: String,
}

impl SourceFile {
    /// Creates a source file, deriving depth and class from its location.
    ///
    /// Files outside `root` are treated as [`FileClass::Unmoved`] with depth 0.
    #[must_use]
    pub fn new(
        path: impl Into<Utf8PathBuf>,
        root: &Utf8Path,
        content: String,
        config: &RewriteConfig,
    ) -> Self {
        let path = path.into();
        let relative = path.strip_prefix(root).ok().map(Utf8Path::to_path_buf);
        let depth = relative.as_ref().map_or(0, |rel| rel.iter().count());
        let class = relative
            .as_deref()
            .map_or(FileClass::Unmoved, |rel| FileClass::classify(rel, config));

        Self {
            path,
            relative,
            depth,
            class,
            content,
        }
    }

    /// Returns `true` if this file was itself relocated.
    #[inline]
    #[must_use]
    pub const fn is_relocated(&self) -> bool {
        self.class.is_relocated()
    }
}
