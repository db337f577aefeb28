//! Parallel read, rewrite and write-back of source files.
//!
//! This module provides [`FileProcessor`], which runs the
//! [`ImportRewriter`] over a list of paths with `rayon`.
//!
//! # Design
//!
//! Uses the "collect-then-parallelize" pattern:
//!
//! 1. Paths are collected first by [`FileWalker`](crate::FileWalker)
//! 2. `FileProcessor` handles one file per task with `rayon::par_iter()`
//! 3. The rewriter is shared by reference; the only shared mutable state is
//!    the atomic [`RunStats`]
//!
//! A file is written only when its content changed, so untouched files keep
//! their modification time. A read or write failure is reported for that file
//! and the others carry on.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use rayon::prelude::*;
use relo_core::FileClass;
use relo_rewrite::{ImportRewriter, Replacement, StatementError};
use smallvec::SmallVec;
use tracing::{debug, info, warn};

use crate::error::ScanError;
use crate::stats::RunStats;

/// What happened to one file.
#[derive(Debug)]
pub struct FileReport {
    /// The file path.
    pub path: Utf8PathBuf,
    /// Relocation class of the file.
    pub class: FileClass,
    /// Whether the content changed.
    pub changed: bool,
    /// Whether the new content was written to disk.
    pub written: bool,
    /// Shared-folder references given an extra level.
    pub depth_corrections: usize,
    /// Import paths that were replaced.
    pub replacements: SmallVec<[Replacement; 8]>,
    /// Statements left unchanged because their path could not be resolved.
    pub errors: SmallVec<[StatementError; 2]>,
}

/// Parallel file processor.
///
/// # Examples
///
/// ```no_run
/// use camino::Utf8PathBuf;
/// use relo_core::RewriteConfig;
/// use relo_rewrite::ImportRewriter;
/// use relo_scanner::{FileProcessor, RunStats};
///
/// let rewriter = ImportRewriter::new("/repo/src", RewriteConfig::default())?;
/// let stats = RunStats::new();
/// let processor = FileProcessor::new(&rewriter, &stats);
///
/// let paths = vec![Utf8PathBuf::from("/repo/src/App.tsx")];
/// for (path, result) in processor.process_files(&paths) {
///     match result {
///         Ok(report) if report.changed => println!("updated {path}"),
///         Ok(_) => {}
///         Err(e) => eprintln!("{e}"),
///     }
/// }
/// # Ok::<(), relo_rewrite::RewriteError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FileProcessor<'a> {
    rewriter: &'a ImportRewriter,
    stats: &'a RunStats,
    dry_run: bool,
}

impl<'a> FileProcessor<'a> {
    /// Creates a processor that writes changed files back.
    #[must_use]
    pub const fn new(rewriter: &'a ImportRewriter, stats: &'a RunStats) -> Self {
        Self {
            rewriter,
            stats,
            dry_run: false,
        }
    }

    /// Configures whether changed files are left on disk untouched.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Processes files in parallel.
    ///
    /// Results come back in the order of `paths`.
    #[must_use]
    pub fn process_files(
        &self,
        paths: &[Utf8PathBuf],
    ) -> Vec<(Utf8PathBuf, Result<FileReport, ScanError>)> {
        paths
            .par_iter()
            .map(|path| (path.clone(), self.process_file(path)))
            .collect()
    }

    /// Reads, rewrites and (unless in a dry run) writes back one file.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Read`] or [`ScanError::Write`] if the file cannot
    /// be read or written. Statement-level failures are not errors; they are
    /// listed in [`FileReport::errors`].
    pub fn process_file(&self, path: &Utf8Path) -> Result<FileReport, ScanError> {
        self.stats.increment_total();

        let result = self.process_file_inner(path);
        match &result {
            Ok(report) => {
                if report.changed {
                    self.stats.increment_updated();
                } else {
                    self.stats.increment_unchanged();
                }
                self.stats.add_replacements(report.replacements.len());
                self.stats.add_depth_corrections(report.depth_corrections);
                self.stats.add_statement_errors(report.errors.len());
            }
            Err(e) => {
                self.stats.increment_file_errors();
                warn!(path = %path, error = %e, "Failed to process file");
            }
        }
        result
    }

    fn process_file_inner(&self, path: &Utf8Path) -> Result<FileReport, ScanError> {
        let content = fs::read_to_string(path).map_err(|e| ScanError::read(path, e))?;
        let file = self.rewriter.source_file(path, content);
        let outcome = self.rewriter.rewrite(&file);

        let changed = outcome.is_changed();
        let mut written = false;
        match &outcome.content {
            Some(new_content) if !self.dry_run => {
                info!(path = %path, replacements = outcome.replacements.len(), "Updating file");
                fs::write(path, new_content).map_err(|e| ScanError::write(path, e))?;
                written = true;
            }
            Some(_) => {
                info!(path = %path, replacements = outcome.replacements.len(), "Would update file");
            }
            None => debug!(path = %path, "Unchanged"),
        }

        Ok(FileReport {
            path: file.path,
            class: file.class,
            changed,
            written,
            depth_corrections: outcome.depth_corrections,
            replacements: outcome.replacements,
            errors: outcome.errors,
        })
    }
}
