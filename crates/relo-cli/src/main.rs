//! CLI entry point for the relo import fixer.
//!
//! This binary rewrites the relative imports of a TypeScript source tree
//! after components were relocated into feature and layout folders.
//!
//! # Usage
//!
//! ```bash
//! relo [OPTIONS] <COMMAND>
//!
//! # Rewrite imports in place
//! relo fix --root ./src
//!
//! # Show what would change without writing
//! relo fix --dry-run
//!
//! # Fail (exit code 1) if any file still needs fixing
//! relo check --format json
//!
//! # Print the relocation plan
//! relo map
//!
//! # List every import with its classification
//! relo scan
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

use std::io::Write;
use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand, ValueEnum};
use relo_core::{Config, FileClass, ImportClass, ImportKind};
use relo_rewrite::Replacement;
use relo_scanner::{FileReport, RunResult, Scanner, StatsSnapshot};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// =============================================================================
// CLI ARGUMENT TYPES
// =============================================================================

/// Fixes relative import paths after components were relocated.
///
/// Walks the source root, gives shared-folder references of moved files one
/// extra `../`, and points imports of relocated components at their new home.
#[derive(Parser)]
#[command(name = "relo", version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    command: Commands,

    /// Source root directory.
    ///
    /// Defaults to `./src` (or the configuration file's `root_path`).
    #[arg(short, long, global = true, env = "RELO_ROOT")]
    root: Option<Utf8PathBuf>,

    /// JSON configuration file.
    #[arg(short, long, global = true, env = "RELO_CONFIG")]
    config: Option<Utf8PathBuf>,

    /// Maximum number of parallel jobs (defaults to all cores).
    #[arg(short, long, global = true)]
    jobs: Option<usize>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Rewrite imports in place.
    Fix {
        /// Report files that would change without writing them.
        #[arg(long)]
        dry_run: bool,
    },

    /// Like `fix --dry-run`, but exit with status 1 if any file would change.
    Check,

    /// Print the active relocation plan as JSON.
    Map,

    /// List the import statements of every file with their classification.
    Scan {
        /// Only list statements that would be rewritten.
        #[arg(long)]
        relocatable: bool,
    },
}

/// Summary output format.
#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human-readable text.
    Text,
    /// JSON document.
    Json,
}

// =============================================================================
// INITIALIZATION FUNCTIONS
// =============================================================================

/// Initializes the tracing subscriber for logging.
///
/// Respects the `RUST_LOG` environment variable if set. Otherwise, uses
/// `debug` level if `--verbose` is set, or `info` level by default.
/// Logs go to stderr so that stdout only carries command output.
fn init_tracing(verbose: bool, no_color: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "info" };
        EnvFilter::new(format!("{level},ignore=warn,globset=warn"))
    });

    // Check if colors should be disabled (flag or NO_COLOR env var)
    let use_ansi = !no_color && std::env::var("NO_COLOR").is_err();

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(use_ansi)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

/// Builds a [`Config`] from the configuration file and CLI arguments.
///
/// Command-line values take precedence over the file.
///
/// # Errors
///
/// Returns an error if the configuration file cannot be loaded, or (when
/// `require_root` is set) the root does not exist or isn't a directory.
fn build_config(cli: &Cli, dry_run: bool, require_root: bool) -> color_eyre::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_json_file(path)
            .map_err(|e| color_eyre::eyre::eyre!("Failed to load {path}: {e}"))?,
        None => Config::default(),
    };

    if let Some(root) = &cli.root {
        config.scan.root_path.clone_from(root);
    }
    if cli.jobs.is_some() {
        config.scan.max_parallel_jobs = cli.jobs;
    }
    config.scan.dry_run |= dry_run;

    if !require_root {
        return Ok(config);
    }

    let root = &config.scan.root_path;
    if !root.exists() {
        return Err(color_eyre::eyre::eyre!("Path does not exist: {root}"));
    }
    if !root.is_dir() {
        return Err(color_eyre::eyre::eyre!("Path is not a directory: {root}"));
    }

    Ok(config)
}

/// Creates a [`Scanner`] from the configuration.
fn create_scanner(config: Config) -> color_eyre::Result<Scanner> {
    Scanner::new(config).map_err(|e| color_eyre::eyre::eyre!("Failed to create scanner: {}", e))
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

/// Runs the fixer, writing changes unless `config.scan.dry_run` is set.
///
/// Exits with status 1 if a file could not be processed, or, when
/// `fail_on_change` is set, if any file needs fixing.
fn run_fix(
    config: Config,
    format: OutputFormat,
    fail_on_change: bool,
) -> color_eyre::Result<ExitCode> {
    let dry_run = config.scan.dry_run;
    let scanner = create_scanner(config)?;
    let result = scanner.run()?;

    match format {
        OutputFormat::Text => print_run_summary(&result, dry_run),
        OutputFormat::Json => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", generate_json_report(&result, dry_run)?)?;
        }
    }

    if !result.errors.is_empty() {
        let stderr = std::io::stderr();
        let mut handle = stderr.lock();
        writeln!(handle)?;
        writeln!(handle, "Errors ({}):", result.errors.len())?;
        for (path, error) in &result.errors {
            writeln!(handle, "  {path} - {error}")?;
        }
    }

    let failed = !result.errors.is_empty() || (fail_on_change && result.stats.has_changes());
    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Prints the active relocation plan as pretty JSON.
fn run_map(config: &Config) -> color_eyre::Result<()> {
    let locations = config.rewrite.location_map();
    info!(entries = locations.len(), "Printing relocation plan");

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{}", serde_json::to_string_pretty(&locations)?)?;
    Ok(())
}

/// Lists import statements per file.
fn run_scan(
    config: Config,
    format: OutputFormat,
    relocatable_only: bool,
) -> color_eyre::Result<()> {
    #[derive(Serialize)]
    struct StatementView<'a> {
        line: u32,
        kind: ImportKind,
        path: &'a str,
        #[serde(flatten)]
        class: &'a ImportClass,
    }

    #[derive(Serialize)]
    struct FileView<'a> {
        path: &'a str,
        statements: Vec<StatementView<'a>>,
    }

    let scanner = create_scanner(config)?;
    let files = scanner.scan_statements()?;

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    let stderr = std::io::stderr();

    let mut views = Vec::with_capacity(files.len());
    for (path, result) in &files {
        let file = match result {
            Ok(file) => file,
            Err(e) => {
                writeln!(stderr.lock(), "  {path} - {e}")?;
                continue;
            }
        };

        let statements: Vec<StatementView<'_>> = file
            .statements
            .iter()
            .filter(|(_, class)| !relocatable_only || class.is_relocatable())
            .map(|(statement, class)| StatementView {
                line: statement.location.line,
                kind: statement.kind,
                path: &statement.path,
                class,
            })
            .collect();

        if !statements.is_empty() {
            views.push(FileView {
                path: file.path.as_str(),
                statements,
            });
        }
    }

    match format {
        OutputFormat::Json => writeln!(handle, "{}", serde_json::to_string_pretty(&views)?)?,
        OutputFormat::Text => {
            for file in &views {
                writeln!(handle, "{}", display_path(scanner.root(), file.path))?;
                for statement in &file.statements {
                    let target = match statement.class {
                        ImportClass::Relocatable { target, .. } => format!(" -> {target}"),
                        _ => String::new(),
                    };
                    writeln!(
                        handle,
                        "  {:>5}  {:<9}  {:<11}  {}{target}",
                        statement.line,
                        statement.kind.label(),
                        statement.class.label(),
                        statement.path,
                    )?;
                }
            }
        }
    }

    Ok(())
}

// =============================================================================
// OUTPUT HELPERS
// =============================================================================

/// Returns `path` relative to `root` when possible.
fn display_path<'a>(root: &camino::Utf8Path, path: &'a str) -> &'a str {
    camino::Utf8Path::new(path)
        .strip_prefix(root)
        .map_or(path, camino::Utf8Path::as_str)
}

/// Prints the run summary and the list of changed files.
fn print_run_summary(result: &RunResult, dry_run: bool) {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    let stats = &result.stats;
    let verb = if dry_run { "Would update" } else { "Updated" };

    let changed: Vec<&FileReport> = result.changed().collect();
    if !changed.is_empty() {
        let _ = writeln!(handle, "{verb} ({}):", changed.len());
        for report in changed {
            let _ = writeln!(handle, "  {} [{}]", report.path, report.class.label());
            for replacement in &report.replacements {
                let _ = writeln!(
                    handle,
                    "    line {:>4}: {} -> {}",
                    replacement.location.line, replacement.from, replacement.to
                );
            }
            if report.depth_corrections > 0 {
                let _ = writeln!(
                    handle,
                    "    {} shared-folder reference(s) deepened",
                    report.depth_corrections
                );
            }
        }
    }

    let statement_errors: Vec<_> = result
        .reports
        .iter()
        .flat_map(|report| report.errors.iter().map(move |e| (&report.path, e)))
        .collect();
    if !statement_errors.is_empty() {
        let _ = writeln!(handle);
        let _ = writeln!(handle, "Imports left unchanged ({}):", statement_errors.len());
        for (path, error) in statement_errors {
            let _ = writeln!(handle, "  {path} - {error}");
        }
    }

    let _ = writeln!(handle);
    let _ = writeln!(handle, "Import Fix Summary");
    let _ = writeln!(handle, "==================");
    let _ = writeln!(handle);
    let _ = writeln!(handle, "Files scanned:      {}", stats.total);
    let _ = writeln!(handle, "  {verb:<17} {}", stats.updated);
    let _ = writeln!(handle, "  Unchanged:        {}", stats.unchanged);
    let _ = writeln!(handle, "  Errors:           {}", stats.file_errors);
    let _ = writeln!(handle, "Imports rewritten:  {}", stats.replacements);
    let _ = writeln!(handle, "Depth corrections:  {}", stats.depth_corrections);
    let _ = writeln!(handle, "Statement errors:   {}", stats.statement_errors);
}

/// Generates the JSON report of a run.
fn generate_json_report(result: &RunResult, dry_run: bool) -> color_eyre::Result<String> {
    #[derive(Serialize)]
    struct FileView<'a> {
        path: &'a str,
        class: FileClass,
        written: bool,
        depth_corrections: usize,
        replacements: &'a [Replacement],
        errors: Vec<String>,
    }

    #[derive(Serialize)]
    struct ErrorView {
        path: String,
        error: String,
    }

    #[derive(Serialize)]
    struct Report<'a> {
        dry_run: bool,
        stats: &'a StatsSnapshot,
        files: Vec<FileView<'a>>,
        errors: Vec<ErrorView>,
    }

    let files = result
        .reports
        .iter()
        .filter(|report| report.changed || !report.errors.is_empty())
        .map(|report| FileView {
            path: report.path.as_str(),
            class: report.class,
            written: report.written,
            depth_corrections: report.depth_corrections,
            replacements: &report.replacements,
            errors: report.errors.iter().map(ToString::to_string).collect(),
        })
        .collect();

    let errors = result
        .errors
        .iter()
        .map(|(path, error)| ErrorView {
            path: path.to_string(),
            error: error.to_string(),
        })
        .collect();

    let report = Report {
        dry_run,
        stats: &result.stats,
        files,
        errors,
    };
    serde_json::to_string_pretty(&report)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to serialize JSON: {}", e))
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Application entry point.
fn main() -> color_eyre::Result<ExitCode> {
    // 1. Install color-eyre FIRST (before any potential panics)
    color_eyre::install()?;

    // 2. Parse CLI arguments
    let cli = Cli::parse();

    // 3. Initialize tracing (handles --no-color for log output)
    init_tracing(cli.verbose, cli.no_color);

    // 4. Route to appropriate command
    match &cli.command {
        Commands::Fix { dry_run } => {
            let config = build_config(&cli, *dry_run, true)?;
            run_fix(config, cli.format, false)
        }
        Commands::Check => {
            let config = build_config(&cli, true, true)?;
            run_fix(config, cli.format, true)
        }
        Commands::Map => {
            let config = build_config(&cli, true, false)?;
            run_map(&config)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Scan { relocatable } => {
            let config = build_config(&cli, true, true)?;
            run_scan(config, cli.format, *relocatable)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
