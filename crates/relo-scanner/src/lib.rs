//! Source tree runner for the relo import fixer.
//!
//! This crate walks a source root, runs the
//! [`ImportRewriter`](relo_rewrite::ImportRewriter) over every matching file
//! in parallel, and writes back the files whose content changed.
//!
//! # Overview
//!
//! The main entry point is [`Scanner`], which combines:
//!
//! - [`FileWalker`]: Directory traversal respecting `.gitignore` patterns
//! - [`FileProcessor`]: Parallel read, rewrite and conditional write with rayon
//! - [`RunStats`]: Atomic statistics for the run summary
//!
//! # Example
//!
//! ```no_run
//! use relo_core::Config;
//! use relo_scanner::Scanner;
//!
//! let mut config = Config::default();
//! config.scan.root_path = "./src".into();
//! config.scan.dry_run = true;
//!
//! let scanner = Scanner::new(config)?;
//! let result = scanner.run()?;
//! println!("{} of {} files would change", result.stats.updated, result.stats.total);
//! # Ok::<(), relo_scanner::ScanError>(())
//! ```
//!
//! # Architecture
//!
//! ```text
//! Scanner (main entry point)
//!     │
//!     ├── FileWalker (collect paths)
//!     │       │
//!     │       └── WalkBuilder (ignore crate)
//!     │
//!     ├── FileProcessor (parallel rewrite)
//!     │       │
//!     │       └── ImportRewriter (relo-rewrite, shared read-only)
//!     │
//!     └── RunStats (atomic counters)
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

mod error;
mod processor;
mod stats;
mod walker;

pub use error::ScanError;
pub use processor::{FileProcessor, FileReport};
pub use stats::{RunStats, StatsSnapshot};
pub use walker::FileWalker;

use camino::{Utf8Path, Utf8PathBuf};
use relo_core::{Config, ImportClass, ImportStatement, LocationMap};
use relo_rewrite::ImportRewriter;
use tracing::info;

/// Result of a run over the source tree.
#[derive(Debug)]
pub struct RunResult {
    /// Statistics snapshot from the run.
    pub stats: StatsSnapshot,
    /// One report per successfully processed file, in walk order.
    pub reports: Vec<FileReport>,
    /// Files that could not be read or written.
    pub errors: Vec<(Utf8PathBuf, ScanError)>,
}

impl RunResult {
    /// Reports for the files whose content changed.
    pub fn changed(&self) -> impl Iterator<Item = &FileReport> {
        self.reports.iter().filter(|report| report.changed)
    }
}

/// The import statements of one file and how each was classified.
#[derive(Debug)]
pub struct FileStatements {
    /// The file path.
    pub path: Utf8PathBuf,
    /// Statements in source order.
    pub statements: Vec<(ImportStatement, ImportClass)>,
}

/// Runs the import fixer over a source tree.
///
/// # Examples
///
/// ```no_run
/// use relo_core::Config;
/// use relo_scanner::Scanner;
///
/// let scanner = Scanner::new(Config::default())?;
/// assert!(scanner.locations().contains("Sidebar"));
/// # Ok::<(), relo_scanner::ScanError>(())
/// ```
#[derive(Debug)]
pub struct Scanner {
    /// Run configuration.
    config: Config,
    /// Canonical source root.
    root: Utf8PathBuf,
    /// Shared rewriter.
    rewriter: ImportRewriter,
}

impl Scanner {
    /// Creates a scanner for `config.scan.root_path`.
    ///
    /// The root is canonicalized so that every file path handed to the
    /// rewriter is absolute.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Config`] if the root does not exist or is not a
    /// directory, [`ScanError::NonUtf8Path`] if its canonical form is not
    /// UTF-8, and [`ScanError::Rewriter`] if the rewriter cannot be built.
    pub fn new(config: Config) -> Result<Self, ScanError> {
        config
            .validate()
            .map_err(|e| ScanError::config(e.to_string()))?;

        let root_path = &config.scan.root_path;
        let root = root_path
            .canonicalize()
            .map_err(|e| ScanError::config(format!("cannot resolve {root_path}: {e}")))?;
        let root = Utf8PathBuf::from_path_buf(root).map_err(ScanError::NonUtf8Path)?;

        let rewriter = ImportRewriter::new(root.clone(), config.rewrite.clone())?;

        info!(
            root = %root,
            locations = rewriter.locations().len(),
            dry_run = config.scan.dry_run,
            "Creating scanner"
        );

        Ok(Self {
            config,
            root,
            rewriter,
        })
    }

    /// Fixes every file under the source root.
    ///
    /// Files are processed in parallel on a dedicated pool when
    /// `max_parallel_jobs` is set, or on the global rayon pool otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Walk`] if directory traversal fails and
    /// [`ScanError::ThreadPool`] if the worker pool cannot be built.
    /// Per-file failures are collected in [`RunResult::errors`].
    pub fn run(&self) -> Result<RunResult, ScanError> {
        info!(root = %self.root, dry_run = self.config.scan.dry_run, "Starting import fix");

        let paths = self.build_walker()?.collect_paths()?;
        info!(count = paths.len(), "Collected source files");

        let stats = RunStats::new();
        let processor =
            FileProcessor::new(&self.rewriter, &stats).with_dry_run(self.config.scan.dry_run);

        let results = match self.config.scan.max_parallel_jobs {
            Some(jobs) => rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build()?
                .install(|| processor.process_files(&paths)),
            None => processor.process_files(&paths),
        };

        let mut reports = Vec::with_capacity(results.len());
        let mut errors = Vec::new();
        for (path, result) in results {
            match result {
                Ok(report) => reports.push(report),
                Err(e) => errors.push((path, e)),
            }
        }

        let stats = stats.snapshot();
        info!(
            total = stats.total,
            updated = stats.updated,
            replacements = stats.replacements,
            depth_corrections = stats.depth_corrections,
            statement_errors = stats.statement_errors,
            file_errors = stats.file_errors,
            "Done"
        );

        Ok(RunResult {
            stats,
            reports,
            errors,
        })
    }

    /// Lists the import statements of every file without changing anything.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Walk`] if directory traversal fails. Unreadable
    /// files are returned alongside the successful ones.
    pub fn scan_statements(
        &self,
    ) -> Result<Vec<(Utf8PathBuf, Result<FileStatements, ScanError>)>, ScanError> {
        use rayon::prelude::*;

        let paths = self.build_walker()?.collect_paths()?;
        Ok(paths
            .par_iter()
            .map(|path| (path.clone(), self.statements_of(path)))
            .collect())
    }

    fn statements_of(&self, path: &Utf8Path) -> Result<FileStatements, ScanError> {
        let content = std::fs::read_to_string(path).map_err(|e| ScanError::read(path, e))?;
        let statements = self
            .rewriter
            .scan(&content)
            .into_iter()
            .map(|statement| {
                let class = self.rewriter.classify(&statement);
                (statement, class)
            })
            .collect();

        Ok(FileStatements {
            path: path.to_owned(),
            statements,
        })
    }

    /// The canonical source root.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// The relocation plan in use.
    #[must_use]
    pub const fn locations(&self) -> &LocationMap {
        self.rewriter.locations()
    }

    /// Returns the scanner configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Builds a file walker with the current configuration.
    fn build_walker(&self) -> Result<FileWalker, ScanError> {
        let scan = &self.config.scan;
        Ok(FileWalker::new(&self.root)?
            .with_skip_dirs(&scan.skip_dirs)
            .with_extensions(&scan.file_extensions)
            .with_follow_links(scan.follow_links))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use relo_core::ImportKind;

    use super::*;

    fn tree(files: &[(&str, &str)]) -> (tempfile::TempDir, Config) {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(dir.path().join("src")).unwrap();
        for (relative, content) in files {
            let path = root.join(relative);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, content).unwrap();
        }
        fs::create_dir_all(&root).unwrap();

        let mut config = Config::default();
        config.scan.root_path = root;
        (dir, config)
    }

    fn read(config: &Config, relative: &str) -> String {
        fs::read_to_string(config.scan.root_path.join(relative)).unwrap()
    }

    const APP: &str = "\
import React from 'react';
import Sidebar from './components/Sidebar';
const Settings = lazy(() => import('./components/Settings'));
";

    const CONTROLS: &str = "\
import { api } from '../lib/api';
import Sidebar from '../Sidebar';
import styles from './RecordingControls.module.css';
";

    #[test]
    fn test_run_fixes_tree() {
        let (_dir, config) = tree(&[
            ("App.tsx", APP),
            ("features/capture/RecordingControls.tsx", CONTROLS),
            ("lib/api.ts", "export const api = {};\n"),
            ("node_modules/pkg/index.ts", "import x from '../Sidebar';\n"),
        ]);

        let scanner = Scanner::new(config.clone()).unwrap();
        let result = scanner.run().unwrap();

        assert_eq!(result.stats.total, 3);
        assert_eq!(result.stats.updated, 2);
        assert_eq!(result.stats.unchanged, 1);
        assert!(result.errors.is_empty());
        assert_eq!(result.changed().count(), 2);

        assert_eq!(
            read(&config, "App.tsx"),
            "\
import React from 'react';
import Sidebar from './components/layout/Sidebar';
const Settings = lazy(() => import('./features/settings/Settings'));
"
        );
        assert_eq!(
            read(&config, "features/capture/RecordingControls.tsx"),
            "\
import { api } from '../../lib/api';
import Sidebar from '../../components/layout/Sidebar';
import styles from './RecordingControls.module.css';
"
        );
        assert_eq!(
            read(&config, "node_modules/pkg/index.ts"),
            "import x from '../Sidebar';\n"
        );
    }

    #[test]
    fn test_run_twice_is_idempotent() {
        let (_dir, config) = tree(&[
            ("App.tsx", APP),
            ("features/capture/RecordingControls.tsx", CONTROLS),
        ]);

        let scanner = Scanner::new(config.clone()).unwrap();
        scanner.run().unwrap();
        let after_first = read(&config, "features/capture/RecordingControls.tsx");

        let second = scanner.run().unwrap();
        assert_eq!(second.stats.updated, 0);
        assert_eq!(
            read(&config, "features/capture/RecordingControls.tsx"),
            after_first
        );
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let (_dir, mut config) = tree(&[("App.tsx", APP)]);
        config.scan.dry_run = true;
        config.scan.max_parallel_jobs = Some(2);

        let result = Scanner::new(config.clone()).unwrap().run().unwrap();
        assert_eq!(result.stats.updated, 1);
        assert!(!result.reports[0].written);
        assert_eq!(read(&config, "App.tsx"), APP);
    }

    #[test]
    fn test_scan_statements_classifies() {
        let (_dir, config) = tree(&[("features/capture/RecordingControls.tsx", CONTROLS)]);
        let scanner = Scanner::new(config).unwrap();

        let files = scanner.scan_statements().unwrap();
        assert_eq!(files.len(), 1);
        let file = files[0].1.as_ref().unwrap();
        let classes: Vec<&str> = file.statements.iter().map(|(_, c)| c.label()).collect();
        assert_eq!(classes, vec!["unmapped", "relocatable", "stylesheet"]);
        assert!(file
            .statements
            .iter()
            .all(|(s, _)| s.kind == ImportKind::Static));
    }

    #[test]
    fn test_scanner_invalid_root() {
        let mut config = Config::default();
        config.scan.root_path = Utf8PathBuf::from("/nonexistent/path/that/does/not/exist");
        let result = Scanner::new(config);
        assert!(matches!(result, Err(ScanError::Config(_))));
    }

    #[test]
    fn test_scanner_accessors() {
        let (_dir, config) = tree(&[]);
        let scanner = Scanner::new(config).unwrap();
        assert!(scanner.root().is_absolute());
        assert!(scanner.locations().contains("Sidebar"));
        assert!(!scanner.config().scan.dry_run);
    }
}
