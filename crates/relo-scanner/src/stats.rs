//! Run statistics with atomic counters.
//!
//! [`RunStats`] is shared by every worker of a run; [`StatsSnapshot`] is the
//! plain-value view returned to callers and printed by the CLI.
//!
//! # Thread Safety
//!
//! All counters use [`AtomicU64`] with [`Relaxed`](std::sync::atomic::Ordering::Relaxed)
//! ordering. The counts are only read once the run is over.
//!
//! # Examples
//!
//! ```
//! use relo_scanner::RunStats;
//!
//! let stats = RunStats::new();
//! stats.increment_total();
//! stats.increment_updated();
//! stats.add_replacements(3);
//!
//! let snapshot = stats.snapshot();
//! assert_eq!(snapshot.updated, 1);
//! assert_eq!(snapshot.replacements, 3);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Atomic counters for a run over the source tree.
#[derive(Debug, Default)]
pub struct RunStats {
    /// Files visited.
    total: AtomicU64,
    /// Files whose content changed (written, or would be in a dry run).
    updated: AtomicU64,
    /// Files left byte-for-byte identical.
    unchanged: AtomicU64,
    /// Files that could not be read or written.
    file_errors: AtomicU64,
    /// Import statements left unchanged because resolution failed.
    statement_errors: AtomicU64,
    /// Import paths replaced.
    replacements: AtomicU64,
    /// Shared-folder references given an extra level.
    depth_corrections: AtomicU64,
}

impl RunStats {
    /// Creates a new [`RunStats`] with all counters at zero.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the visited files counter.
    #[inline]
    pub fn increment_total(&self) {
        self.total.fetch_add(1, Ordering::Relaxed);
    }

    /// Increments the updated files counter.
    #[inline]
    pub fn increment_updated(&self) {
        self.updated.fetch_add(1, Ordering::Relaxed);
    }

    /// Increments the unchanged files counter.
    #[inline]
    pub fn increment_unchanged(&self) {
        self.unchanged.fetch_add(1, Ordering::Relaxed);
    }

    /// Increments the file error counter.
    #[inline]
    pub fn increment_file_errors(&self) {
        self.file_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Adds to the statement error counter.
    #[inline]
    pub fn add_statement_errors(&self, count: usize) {
        self.statement_errors
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    /// Adds to the replacement counter.
    #[inline]
    pub fn add_replacements(&self, count: usize) {
        self.replacements.fetch_add(count as u64, Ordering::Relaxed);
    }

    /// Adds to the depth correction counter.
    #[inline]
    pub fn add_depth_corrections(&self, count: usize) {
        self.depth_corrections
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    /// Returns a point-in-time snapshot of all counters.
    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            total: self.total.load(Ordering::Relaxed),
            updated: self.updated.load(Ordering::Relaxed),
            unchanged: self.unchanged.load(Ordering::Relaxed),
            file_errors: self.file_errors.load(Ordering::Relaxed),
            statement_errors: self.statement_errors.load(Ordering::Relaxed),
            replacements: self.replacements.load(Ordering::Relaxed),
            depth_corrections: self.depth_corrections.load(Ordering::Relaxed),
        }
    }

    /// Resets all counters to zero.
    pub fn reset(&self) {
        self.total.store(0, Ordering::Relaxed);
        self.updated.store(0, Ordering::Relaxed);
        self.unchanged.store(0, Ordering::Relaxed);
        self.file_errors.store(0, Ordering::Relaxed);
        self.statement_errors.store(0, Ordering::Relaxed);
        self.replacements.store(0, Ordering::Relaxed);
        self.depth_corrections.store(0, Ordering::Relaxed);
    }
}

/// A point-in-time snapshot of run statistics.
///
/// # Examples
///
/// ```
/// use relo_scanner::StatsSnapshot;
///
/// let snap = StatsSnapshot {
///     total: 10,
///     updated: 4,
///     unchanged: 5,
///     file_errors: 1,
///     ..Default::default()
/// };
/// assert!(snap.has_changes());
/// assert!(snap.has_errors());
/// assert!((snap.success_rate() - 90.0).abs() < 0.1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatsSnapshot {
    /// Files visited.
    pub total: u64,
    /// Files whose content changed.
    pub updated: u64,
    /// Files left unchanged.
    pub unchanged: u64,
    /// Files that could not be read or written.
    pub file_errors: u64,
    /// Import statements left unchanged because resolution failed.
    pub statement_errors: u64,
    /// Import paths replaced.
    pub replacements: u64,
    /// Shared-folder references given an extra level.
    pub depth_corrections: u64,
}

impl StatsSnapshot {
    /// Returns `true` if any file changed.
    #[inline]
    #[must_use]
    pub const fn has_changes(&self) -> bool {
        self.updated > 0
    }

    /// Returns `true` if any file or statement error occurred.
    #[inline]
    #[must_use]
    pub const fn has_errors(&self) -> bool {
        self.file_errors > 0 || self.statement_errors > 0
    }

    /// Returns the share of files processed without a file error, in percent.
    ///
    /// Returns 100.0 if no file was visited.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Acceptable for statistics display
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }

        ((self.total - self.file_errors) as f64 / self.total as f64) * 100.0
    }
}
