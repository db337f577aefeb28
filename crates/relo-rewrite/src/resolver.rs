//! Relative module specifiers between two locations in the source tree.
//!
//! [`RelativePathResolver`] turns "file X wants component at canonical
//! location Y" into the specifier X should write: the shortest relative path
//! from X's directory to `root/Y`, with forward slashes and an explicit `./`
//! or `../` lead.
//!
//! The computation is purely lexical: nothing is read from disk and the
//! target is assumed to exist.

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::ResolveError;

/// Computes import specifiers relative to an importing file.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use relo_rewrite::RelativePathResolver;
///
/// let resolver = RelativePathResolver::new("/repo/src");
/// let spec = resolver.resolve(
///     Utf8Path::new("/repo/src/features/capture/RecordingControls.tsx"),
///     "components/layout/Sidebar",
/// )?;
/// assert_eq!(spec, "../../components/layout/Sidebar");
/// # Ok::<(), relo_rewrite::ResolveError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelativePathResolver {
    root: Utf8PathBuf,
}

impl RelativePathResolver {
    /// Creates a resolver for canonical locations under `root`.
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The source root canonical locations are joined onto.
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Returns the specifier `from_file` should use to import `canonical`.
    ///
    /// The common prefix of the two directory chains is dropped, one `..` is
    /// emitted per remaining segment of the importing directory, and the rest
    /// of the target is appended. A result that does not climb gets a `./`
    /// lead.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::NoParent`] if `from_file` has no parent directory.
    /// - [`ResolveError::Unrelated`] if exactly one of the two paths is
    ///   absolute, or the importing directory contains `..` that cannot be
    ///   eliminated.
    pub fn resolve(&self, from_file: &Utf8Path, canonical: &str) -> Result<String, ResolveError> {
        let from_dir = from_file
            .parent()
            .ok_or_else(|| ResolveError::NoParent(from_file.to_owned()))?;
        let target = self.root.join(canonical);

        let unrelated = || ResolveError::Unrelated {
            from: from_dir.to_owned(),
            to: target.clone(),
        };

        if from_dir.is_absolute() != target.is_absolute() {
            return Err(unrelated());
        }

        let relative = pathdiff::diff_paths(target.as_std_path(), from_dir.as_std_path())
            .ok_or_else(unrelated)?;
        let relative = Utf8PathBuf::from_path_buf(relative).map_err(ResolveError::NonUtf8)?;

        Ok(to_specifier(&relative))
    }
}

/// Joins path components with `/` and adds the `./` lead when needed.
fn to_specifier(relative: &Utf8Path) -> String {
    let joined = relative
        .components()
        .map(|component| component.as_str())
        .collect::<Vec<_>>()
        .join("/");

    if joined == ".." || joined.starts_with("../") {
        joined
    } else {
        format!("./{joined}")
    }
}
