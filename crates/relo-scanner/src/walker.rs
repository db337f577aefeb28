//! Directory traversal for source files.
//!
//! [`FileWalker`] lists the `.ts`/`.tsx` files under the source root with
//! the `ignore` crate, so `.gitignore` rules apply. Skipped directories such
//! as `node_modules` are pruned without being entered, and the result is
//! sorted so runs are reproducible.
//!
//! # Examples
//!
//! ```no_run
//! use relo_scanner::FileWalker;
//! use camino::Utf8Path;
//!
//! let walker = FileWalker::new(Utf8Path::new("./src"))?;
//! let paths = walker.collect_paths()?;
//! println!("Found {} files", paths.len());
//! # Ok::<(), relo_scanner::ScanError>(())
//! ```

use std::ffi::OsStr;

use camino::{Utf8Path, Utf8PathBuf};
use ignore::WalkBuilder;
use relo_core::FxHashSet;

use crate::error::ScanError;

/// Extensions visited when none are configured.
const DEFAULT_EXTENSIONS: &[&str] = &["ts", "tsx"];

/// A file walker that discovers source files in a directory tree.
///
/// Paths are collected first (single-threaded, I/O bound) and then processed
/// in parallel by the caller.
#[derive(Debug)]
pub struct FileWalker {
    root: Utf8PathBuf,
    /// Directory names pruned from the walk.
    skip_dirs: FxHashSet<String>,
    /// Extensions (without dot) of the files to collect.
    extensions: FxHashSet<String>,
    follow_links: bool,
}

impl FileWalker {
    /// Creates a walker over `root` with the default extensions.
    ///
    /// # Errors
    ///
    /// [`ScanError::Config`] unless `root` is an existing directory.
    pub fn new(root: &Utf8Path) -> Result<Self, ScanError> {
        if !root.exists() {
            return Err(ScanError::config(format!(
                "source root {root} does not exist"
            )));
        }
        if !root.is_dir() {
            return Err(ScanError::config(format!(
                "source root {root} is not a directory"
            )));
        }

        Ok(Self {
            root: root.to_owned(),
            skip_dirs: FxHashSet::default(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|&e| e.to_owned()).collect(),
            follow_links: false,
        })
    }

    /// Adds directory names to prune during traversal.
    #[must_use]
    pub fn with_skip_dirs<S: AsRef<str>>(mut self, dirs: &[S]) -> Self {
        self.skip_dirs
            .extend(dirs.iter().map(|d| d.as_ref().to_owned()));
        self
    }

    /// Replaces the set of collected file extensions.
    #[must_use]
    pub fn with_extensions<S: AsRef<str>>(mut self, extensions: &[S]) -> Self {
        self.extensions = extensions
            .iter()
            .map(|e| e.as_ref().trim_start_matches('.').to_owned())
            .collect();
        self
    }

    /// Follow symlinks while walking. Off by default.
    #[must_use]
    pub const fn with_follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Collects all matching file paths in the directory tree, sorted.
    ///
    /// # Errors
    ///
    /// [`ScanError::Walk`] on a traversal failure, [`ScanError::NonUtf8Path`]
    /// for a file name that is not UTF-8.
    pub fn collect_paths(&self) -> Result<Vec<Utf8PathBuf>, ScanError> {
        let mut paths = Vec::new();

        for result in self.build_walker() {
            let entry = result?;

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let path = entry.path();
            let utf8_path =
                Utf8Path::from_path(path).ok_or_else(|| ScanError::NonUtf8Path(path.to_owned()))?;

            if self.is_source_file(utf8_path) {
                paths.push(utf8_path.to_owned());
            }
        }

        paths.sort();
        Ok(paths)
    }

    fn build_walker(&self) -> ignore::Walk {
        let skip_dirs = self.skip_dirs.clone();

        WalkBuilder::new(&self.root)
            .standard_filters(true)
            .follow_links(self.follow_links)
            .require_git(false)
            .filter_entry(move |entry| {
                let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
                !(is_dir && entry.depth() > 0 && is_skipped(&skip_dirs, entry.file_name()))
            })
            .build()
    }

    fn is_source_file(&self, path: &Utf8Path) -> bool {
        path.extension()
            .is_some_and(|ext| self.extensions.contains(ext))
    }

    /// The walked directory.
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }
}

fn is_skipped(skip_dirs: &FxHashSet<String>, name: &OsStr) -> bool {
    name.to_str().is_some_and(|name| skip_dirs.contains(name))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn tree() -> (tempfile::TempDir, Utf8PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        for file in [
            "App.tsx",
            "main.ts",
            "styles.css",
            "features/capture/LiveTranscript.tsx",
            "components/layout/Sidebar.tsx",
            "node_modules/pkg/index.ts",
            "dist/bundle.ts",
            "lib/api.js",
        ] {
            let path = root.join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, "").unwrap();
        }
        (dir, root)
    }

    fn relative(root: &Utf8Path, paths: &[Utf8PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_collect_paths_filters_and_sorts() {
        let (_dir, root) = tree();
        let walker = FileWalker::new(&root)
            .unwrap()
            .with_skip_dirs(&["node_modules", "dist"]);

        let paths = walker.collect_paths().unwrap();
        assert_eq!(
            relative(&root, &paths),
            vec![
                "App.tsx",
                "components/layout/Sidebar.tsx",
                "features/capture/LiveTranscript.tsx",
                "main.ts",
            ]
        );
    }

    #[test]
    fn test_with_extensions() {
        let (_dir, root) = tree();
        let walker = FileWalker::new(&root)
            .unwrap()
            .with_skip_dirs(&["node_modules", "dist"])
            .with_extensions(&[".js", "css"]);

        let paths = walker.collect_paths().unwrap();
        assert_eq!(relative(&root, &paths), vec!["lib/api.js", "styles.css"]);
    }

    #[test]
    fn test_skip_dirs_only_prune_below_root() {
        let dir = tempfile::tempdir().unwrap();
        let base = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        let root = base.join("build");
        fs::create_dir_all(root.join("features/a")).unwrap();
        fs::write(root.join("features/a/A.tsx"), "").unwrap();

        let walker = FileWalker::new(&root).unwrap().with_skip_dirs(&["build"]);
        assert_eq!(walker.collect_paths().unwrap().len(), 1);
    }

    #[test]
    fn test_respects_gitignore() {
        let (_dir, root) = tree();
        fs::write(root.join(".gitignore"), "features/\n").unwrap();

        let walker = FileWalker::new(&root)
            .unwrap()
            .with_skip_dirs(&["node_modules", "dist"]);
        let paths = relative(&root, &walker.collect_paths().unwrap());
        assert!(!paths.iter().any(|p| p.starts_with("features")));
        assert!(paths.contains(&"App.tsx".to_owned()));
    }

    #[test]
    fn test_new_rejects_missing_root() {
        let err = FileWalker::new(Utf8Path::new("/nonexistent/path/that/does/not/exist"))
            .unwrap_err();
        assert!(matches!(err, ScanError::Config(_)));
    }

    #[test]
    fn test_new_rejects_file_root() {
        let (_dir, root) = tree();
        let err = FileWalker::new(&root.join("App.tsx")).unwrap_err();
        assert!(err.to_string().contains("is not a directory"));
    }

    #[cfg(unix)]
    #[test]
    fn test_follow_links_reaches_linked_folder() {
        let (_dir, root) = tree();
        let outside = tempfile::tempdir().unwrap();
        fs::write(outside.path().join("Linked.tsx"), "").unwrap();
        std::os::unix::fs::symlink(outside.path(), root.join("linked")).unwrap();

        let skip = ["node_modules", "dist"];
        let plain = FileWalker::new(&root).unwrap().with_skip_dirs(&skip);
        assert!(
            !relative(&root, &plain.collect_paths().unwrap())
                .contains(&"linked/Linked.tsx".to_owned())
        );

        let following = FileWalker::new(&root)
            .unwrap()
            .with_skip_dirs(&skip)
            .with_follow_links(true);
        assert_eq!(following.root(), root.as_path());
        assert!(
            relative(&root, &following.collect_paths().unwrap())
                .contains(&"linked/Linked.tsx".to_owned())
        );
    }
}
