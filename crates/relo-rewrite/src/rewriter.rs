//! The import rewriter.
//!
//! [`ImportRewriter`] runs the per-file pipeline:
//!
//! 1. depth correction, only when the file itself was relocated
//! 2. component import correction over static imports, re-exports and
//!    dynamic imports
//! 3. change detection: new content is returned only when the text differs
//!
//! The rewriter is immutable after construction and is shared by reference
//! across worker threads.

use std::ops::Range;

use camino::{Utf8Path, Utf8PathBuf};
use regex::{Captures, Regex};
use relo_core::{
    ImportClass, ImportKind, ImportStatement, LocationMap, QuoteStyle, RewriteConfig, SourceFile,
    SourceLocation,
};
use serde::Serialize;
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::depth::correct_depth;
use crate::error::{RewriteError, StatementError};
use crate::lexer::CommentMask;
use crate::patterns::{
    self, DYNAMIC_GROUP_PATH, DYNAMIC_GROUP_QUOTE, DYNAMIC_GROUP_SUFFIX, GROUP_PREFIX,
    STATIC_GROUP_KEYWORD, STATIC_GROUP_PATH, STATIC_GROUP_QUOTE, STATIC_GROUP_SUFFIX,
};
use crate::resolver::RelativePathResolver;

/// A path literal that was replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Replacement {
    /// Where the statement starts in the rewritten file.
    pub location: SourceLocation,
    /// The statement shape.
    pub kind: ImportKind,
    /// The original path literal.
    pub from: String,
    /// The corrected path literal.
    pub to: String,
}

/// The result of rewriting one file.
#[derive(Debug, Default)]
pub struct RewriteOutcome {
    /// New file content, or `None` when the text is unchanged.
    pub content: Option<String>,
    /// Number of shared-folder references given an extra `../`.
    pub depth_corrections: usize,
    /// Import paths that were replaced.
    pub replacements: SmallVec<[Replacement; 8]>,
    /// Statements left unchanged because their path could not be resolved.
    pub errors: SmallVec<[StatementError; 2]>,
}

impl RewriteOutcome {
    /// Returns `true` if the file content changed.
    #[inline]
    #[must_use]
    pub const fn is_changed(&self) -> bool {
        self.content.is_some()
    }
}

/// A statement together with the byte range of its path literal.
#[derive(Debug)]
struct Matched {
    statement: ImportStatement,
    start: usize,
    path: Range<usize>,
}

/// Rewrites import paths after files were relocated.
///
/// # Examples
///
/// ```
/// use relo_core::RewriteConfig;
/// use relo_rewrite::ImportRewriter;
///
/// let rewriter = ImportRewriter::new("/repo/src", RewriteConfig::default())?;
/// let outcome = rewriter.rewrite_source(
///     "/repo/src/features/capture/RecordingControls.tsx",
///     "import Sidebar from '../Sidebar';\nimport { api } from '../lib/api';\n",
/// );
///
/// assert_eq!(
///     outcome.content.as_deref(),
///     Some(
///         "import Sidebar from '../../components/layout/Sidebar';\n\
///          import { api } from '../../lib/api';\n"
///     )
/// );
/// # Ok::<(), relo_rewrite::RewriteError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ImportRewriter {
    locations: LocationMap,
    resolver: RelativePathResolver,
    config: RewriteConfig,
    static_re: &'static Regex,
    dynamic_re: &'static Regex,
}

impl ImportRewriter {
    /// Creates a rewriter for the tree at `root` using the configured
    /// relocation plan.
    ///
    /// # Errors
    ///
    /// Returns [`RewriteError::Pattern`] if the import patterns fail to compile.
    pub fn new(root: impl Into<Utf8PathBuf>, config: RewriteConfig) -> Result<Self, RewriteError> {
        let locations = config.location_map();
        Self::with_locations(root, locations, config)
    }

    /// Creates a rewriter with an explicit relocation plan, ignoring
    /// `config.locations`.
    ///
    /// # Errors
    ///
    /// Returns [`RewriteError::Pattern`] if the import patterns fail to compile.
    pub fn with_locations(
        root: impl Into<Utf8PathBuf>,
        locations: LocationMap,
        config: RewriteConfig,
    ) -> Result<Self, RewriteError> {
        Ok(Self {
            locations,
            resolver: RelativePathResolver::new(root),
            config,
            static_re: patterns::static_import_regex()?,
            dynamic_re: patterns::dynamic_import_regex()?,
        })
    }

    /// The relocation plan in use.
    #[inline]
    #[must_use]
    pub const fn locations(&self) -> &LocationMap {
        &self.locations
    }

    /// The source root.
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        self.resolver.root()
    }

    /// The rewriter configuration.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &RewriteConfig {
        &self.config
    }

    /// Wraps `content` in a [`SourceFile`] classified against this root.
    #[must_use]
    pub fn source_file(&self, path: impl Into<Utf8PathBuf>, content: String) -> SourceFile {
        SourceFile::new(path, self.resolver.root(), content, &self.config)
    }

    /// Lists every import statement in `content`, in source order.
    ///
    /// Statements inside comments and literals with mismatched quotes are
    /// not reported.
    #[must_use]
    pub fn scan(&self, content: &str) -> Vec<ImportStatement> {
        self.find(content)
            .into_iter()
            .map(|matched| matched.statement)
            .collect()
    }

    /// Decides what kind of import a statement is.
    ///
    /// The checks run in order: bare specifiers are external, stylesheets
    /// are left alone, a basename (source extension stripped) found in the
    /// relocation plan is relocatable, and a path through a legacy folder
    /// whose file stem is in the plan is relocatable too.
    #[must_use]
    pub fn classify(&self, statement: &ImportStatement) -> ImportClass {
        if !statement.is_relative() {
            return ImportClass::External;
        }

        let path = Utf8Path::new(&statement.path);
        if path
            .extension()
            .is_some_and(|ext| self.config.stylesheet_extensions.iter().any(|s| s == ext))
        {
            return ImportClass::Stylesheet;
        }

        let basename = statement.basename();
        let name = self.strip_source_extension(basename);
        if let Some(target) = self.locations.lookup(name) {
            return ImportClass::Relocatable {
                name: name.to_owned(),
                target: target.to_owned(),
                via_legacy_hint: false,
            };
        }

        let through_legacy_folder = self
            .config
            .legacy_hints
            .iter()
            .any(|hint| statement.path.contains(hint.as_str()));
        if through_legacy_folder {
            let stem = Utf8Path::new(basename).file_stem().unwrap_or(basename);
            if let Some(target) = self.locations.lookup(stem) {
                return ImportClass::Relocatable {
                    name: stem.to_owned(),
                    target: target.to_owned(),
                    via_legacy_hint: true,
                };
            }
        }

        ImportClass::Unmapped
    }

    /// Rewrites the imports of a file held in memory.
    #[must_use]
    pub fn rewrite_source(&self, path: impl Into<Utf8PathBuf>, content: &str) -> RewriteOutcome {
        let file = self.source_file(path, content.to_owned());
        self.rewrite(&file)
    }

    /// Rewrites the imports of `file`.
    ///
    /// Statement-level resolution failures leave the statement unchanged and
    /// are collected in [`RewriteOutcome::errors`]; they never stop the file.
    #[must_use]
    pub fn rewrite(&self, file: &SourceFile) -> RewriteOutcome {
        let original = file.content.as_str();
        let mut outcome = RewriteOutcome::default();

        let corrected = if file.is_relocated() {
            let correction = correct_depth(original, &self.config.shared_folders);
            outcome.depth_corrections = correction.replacements;
            correction.text
        } else {
            original.into()
        };
        let text: &str = &corrected;

        let mut edits: Vec<(Range<usize>, String)> = Vec::new();
        for matched in self.find(text) {
            let statement = &matched.statement;
            let ImportClass::Relocatable { target, .. } = self.classify(statement) else {
                continue;
            };

            match self.resolver.resolve(&file.path, &target) {
                Ok(specifier) if specifier == statement.path => {}
                Ok(specifier) => {
                    debug!(
                        file = %file.path,
                        line = statement.location.line,
                        from = %statement.path,
                        to = %specifier,
                        "Rewriting import"
                    );
                    outcome.replacements.push(Replacement {
                        location: statement.location,
                        kind: statement.kind,
                        from: statement.path.clone(),
                        to: specifier.clone(),
                    });
                    edits.push((matched.path.clone(), specifier));
                }
                Err(source) => {
                    let error = StatementError {
                        specifier: statement.path.clone(),
                        location: statement.location,
                        source,
                    };
                    warn!(file = %file.path, error = %error, "Import left unchanged");
                    outcome.errors.push(error);
                }
            }
        }

        let rewritten = splice(text, &edits);
        if rewritten != original {
            outcome.content = Some(rewritten);
        }
        outcome
    }

    fn strip_source_extension<'a>(&self, basename: &'a str) -> &'a str {
        self.config
            .source_extensions
            .iter()
            .find_map(|ext| {
                basename
                    .strip_suffix(ext.as_str())
                    .and_then(|rest| rest.strip_suffix('.'))
            })
            .unwrap_or(basename)
    }

    /// Collects static and dynamic matches outside comments, sorted by
    /// position, dropping any match that overlaps an earlier one.
    fn find(&self, text: &str) -> Vec<Matched> {
        let mask = CommentMask::new(text);

        let statics = self.static_re.captures_iter(text).filter_map(|caps| {
            let kind = if &caps[STATIC_GROUP_KEYWORD] == "export" {
                ImportKind::ReExport
            } else {
                ImportKind::Static
            };
            build_match(
                text,
                &caps,
                kind,
                STATIC_GROUP_QUOTE,
                STATIC_GROUP_PATH,
                STATIC_GROUP_SUFFIX,
            )
        });
        let dynamics = self.dynamic_re.captures_iter(text).filter_map(|caps| {
            build_match(
                text,
                &caps,
                ImportKind::Dynamic,
                DYNAMIC_GROUP_QUOTE,
                DYNAMIC_GROUP_PATH,
                DYNAMIC_GROUP_SUFFIX,
            )
        });

        let mut found: Vec<Matched> = statics
            .chain(dynamics)
            .filter(|matched| !mask.contains(matched.start))
            .collect();
        found.sort_by_key(|matched| matched.start);

        let mut end = 0;
        found.retain(|matched| {
            if matched.start < end {
                return false;
            }
            end = matched.path.end;
            true
        });
        found
    }
}

/// Builds a [`Matched`] from a capture, rejecting mismatched quotes.
fn build_match(
    text: &str,
    caps: &Captures<'_>,
    kind: ImportKind,
    quote_group: usize,
    path_group: usize,
    suffix_group: usize,
) -> Option<Matched> {
    let whole = caps.get(0)?;
    let prefix = caps.get(GROUP_PREFIX)?;
    let open = caps.get(quote_group)?.as_str().chars().next()?;
    let path = caps.get(path_group)?;
    let suffix = caps.get(suffix_group)?;

    if !suffix.as_str().starts_with(open) {
        return None;
    }

    Some(Matched {
        statement: ImportStatement {
            kind,
            prefix: prefix.as_str().to_owned(),
            quote: QuoteStyle::from_char(open)?,
            path: path.as_str().to_owned(),
            suffix: suffix.as_str().to_owned(),
            location: SourceLocation::from_offset(text, whole.start()),
        },
        start: whole.start(),
        path: path.range(),
    })
}

/// Applies non-overlapping, position-sorted edits to `text`.
fn splice(text: &str, edits: &[(Range<usize>, String)]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for (range, replacement) in edits {
        out.push_str(&text[last..range.start]);
        out.push_str(replacement);
        last = range.end;
    }
    out.push_str(&text[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOT: &str = "/repo/src";

    fn rewriter() -> ImportRewriter {
        ImportRewriter::new(ROOT, RewriteConfig::default()).unwrap()
    }

    fn rewrite(path: &str, content: &str) -> RewriteOutcome {
        rewriter().rewrite_source(format!("{ROOT}/{path}"), content)
    }

    fn rewritten(path: &str, content: &str) -> String {
        rewrite(path, content)
            .content
            .unwrap_or_else(|| content.to_owned())
    }

    #[test]
    fn test_relocated_component_import() {
        let out = rewritten(
            "features/capture/RecordingControls.tsx",
            "import Sidebar from '../Sidebar';\n",
        );
        assert_eq!(out, "import Sidebar from '../../components/layout/Sidebar';\n");
    }

    #[test]
    fn test_rewrite_is_idempotent() {
        let input = "\
import { api } from '../lib/api';
import { useThing } from '../hooks/useThing';
import Sidebar from './Sidebar';
import { AIChat } from './AIChat';
const Settings = lazy(() => import('./Settings'));
";
        let path = "features/memory/MeetingHistory.tsx";
        let once = rewritten(path, input);
        let twice = rewritten(path, &once);
        assert_eq!(once, twice);
        assert!(rewrite(path, &once).content.is_none());
        assert!(once.contains("'../../lib/api'"));
        assert!(once.contains("'../../components/layout/Sidebar'"));
        assert!(once.contains("'../intelligence/AIChat'"));
        assert!(once.contains("import('../settings/Settings')"));
    }

    #[test]
    fn test_quote_style_is_preserved() {
        let out = rewritten(
            "features/analytics/AdminConsole.tsx",
            "import Help from \"../Help\";\nimport KB from '../KBSearch';\n",
        );
        assert_eq!(
            out,
            "import Help from \"../../components/layout/Help\";\n\
             import KB from '../../components/common/KBSearch';\n"
        );
    }

    #[test]
    fn test_external_and_unmapped_pass_through() {
        let input = "\
import React from 'react';
import { invoke } from '@tauri-apps/api/core';
import Button from '../ui/Button';
import { helper } from './helper';
";
        let outcome = rewrite("features/settings/AISettings.tsx", input);
        assert!(outcome.content.is_none());
        assert!(outcome.replacements.is_empty());
    }

    #[test]
    fn test_depth_correction_only_for_relocated_files() {
        let input = "import { api } from '../lib/api';\n";

        let unmoved = rewrite("components/Button.tsx", input);
        assert!(unmoved.content.is_none());
        assert_eq!(unmoved.depth_corrections, 0);

        let layout = rewrite("components/layout/Sidebar.tsx", input);
        assert_eq!(layout.depth_corrections, 1);
        assert_eq!(
            layout.content.as_deref(),
            Some("import { api } from '../../lib/api';\n")
        );
    }

    #[test]
    fn test_dynamic_import_in_same_directory() {
        let input = "const Settings = lazy(() => import(\"./Settings\"));\n";
        let outcome = rewrite("features/settings/FullSettings.tsx", input);
        assert!(outcome.content.is_none());
        assert!(outcome.replacements.is_empty());
    }

    #[test]
    fn test_dynamic_import_is_rewritten() {
        let out = rewritten(
            "App.tsx",
            "const Settings = lazy(() => import(\"./components/Settings\"));\n",
        );
        assert_eq!(
            out,
            "const Settings = lazy(() => import(\"./features/settings/Settings\"));\n"
        );
    }

    #[test]
    fn test_stylesheets_are_never_rewritten() {
        let input = "\
import styles from './VideoDiagnostics.module.css';
import theme from '../Sidebar.scss';
";
        let outcome = rewrite("features/capture/VideoDiagnostics.tsx", input);
        assert!(outcome.content.is_none());

        let statements = rewriter().scan(input);
        assert_eq!(statements.len(), 2);
        for statement in &statements {
            assert_eq!(rewriter().classify(statement), ImportClass::Stylesheet);
        }
    }

    #[test]
    fn test_source_extension_is_stripped() {
        let out = rewritten("App.tsx", "import Help from './components/Help.tsx';\n");
        assert_eq!(out, "import Help from './components/layout/Help';\n");
    }

    #[test]
    fn test_legacy_hint_matches_other_extensions() {
        let rewriter = rewriter();
        let statement = rewriter
            .scan("import Help from '../components/Help.jsx';")
            .remove(0);
        assert_eq!(
            rewriter.classify(&statement),
            ImportClass::Relocatable {
                name: "Help".to_owned(),
                target: "components/layout/Help".to_owned(),
                via_legacy_hint: true,
            }
        );

        let without_hint = rewriter.scan("import Help from '../old/Help.jsx';").remove(0);
        assert_eq!(rewriter.classify(&without_hint), ImportClass::Unmapped);
    }

    #[test]
    fn test_re_exports_are_rewritten() {
        let input = "export { default as Sidebar } from './Sidebar';\nexport * from \"./Help\";\n";
        let outcome = rewrite("components/index.ts", input);
        assert_eq!(
            outcome.content.as_deref(),
            Some(
                "export { default as Sidebar } from './layout/Sidebar';\n\
                 export * from \"./layout/Help\";\n"
            )
        );
        assert!(outcome
            .replacements
            .iter()
            .all(|r| r.kind == ImportKind::ReExport));
    }

    #[test]
    fn test_commented_imports_are_skipped() {
        let input = "\
// import Sidebar from '../Sidebar';
/* import Help from '../Help'; */
import Settings from '../Settings';
";
        let outcome = rewrite("features/analytics/AuditLog.tsx", input);
        assert_eq!(outcome.replacements.len(), 1);
        let content = outcome.content.unwrap();
        assert!(content.starts_with("// import Sidebar from '../Sidebar';\n"));
        assert!(content.contains("/* import Help from '../Help'; */"));
        assert!(content.contains("import Settings from '../settings/Settings';"));
    }

    #[test]
    fn test_mismatched_quotes_are_ignored() {
        let input = "import Sidebar from \"../Sidebar';\n";
        assert!(rewriter().scan(input).is_empty());
        assert!(rewrite("features/capture/X.tsx", input).content.is_none());
    }

    #[test]
    fn test_multiline_import() {
        let input = "import {\n  Sidebar,\n  SidebarItem,\n} from '../Sidebar';\n";
        let out = rewritten("features/capture/LiveTranscript.tsx", input);
        assert_eq!(
            out,
            "import {\n  Sidebar,\n  SidebarItem,\n} from '../../components/layout/Sidebar';\n"
        );
    }

    #[test]
    fn test_replacements_record_locations() {
        let input = "import React from 'react';\n\nimport Help from '../Help';\n";
        let outcome = rewrite("features/onboarding/SetupWizard.tsx", input);
        assert_eq!(outcome.replacements.len(), 1);
        let replacement = &outcome.replacements[0];
        assert_eq!(replacement.location.line, 3);
        assert_eq!(replacement.from, "../Help");
        assert_eq!(replacement.to, "../../components/layout/Help");
        assert_eq!(replacement.kind, ImportKind::Static);
    }

    #[test]
    fn test_statement_error_does_not_stop_file() {
        let rewriter = ImportRewriter::new("src", RewriteConfig::default()).unwrap();
        let input = "import Help from '../Help';\nimport { api } from '../lib/api';\n";
        let outcome = rewriter.rewrite_source("/abs/src/features/a/A.tsx", input);

        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].specifier, "../Help");
        assert!(outcome.replacements.is_empty());
        assert!(outcome.content.is_none());
    }

    #[test]
    fn test_statement_error_keeps_other_edits() {
        let rewriter = ImportRewriter::new("src", RewriteConfig::default()).unwrap();
        let file = SourceFile {
            path: Utf8PathBuf::from("/abs/src/features/a/A.tsx"),
            relative: Some(Utf8PathBuf::from("features/a/A.tsx")),
            depth: 3,
            class: relo_core::FileClass::RelocatedFeature,
            content: "import Help from '../Help';\nimport { api } from '../lib/api';\n".to_owned(),
        };
        let outcome = rewriter.rewrite(&file);

        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.depth_corrections, 1);
        assert_eq!(
            outcome.content.as_deref(),
            Some("import Help from '../Help';\nimport { api } from '../../lib/api';\n")
        );
    }

    #[test]
    fn test_custom_location_map() {
        let locations = LocationMap::from_entries([("Widget", "features/widgets/Widget")]).unwrap();
        let rewriter =
            ImportRewriter::with_locations(ROOT, locations, RewriteConfig::default()).unwrap();
        assert_eq!(rewriter.locations().len(), 1);

        let outcome = rewriter.rewrite_source(
            "/repo/src/App.tsx",
            "import Widget from './components/Widget';\nimport Help from './Help';\n",
        );
        assert_eq!(
            outcome.content.as_deref(),
            Some("import Widget from './features/widgets/Widget';\nimport Help from './Help';\n")
        );
    }

    #[test]
    fn test_scan_reports_kinds_in_order() {
        let input = "\
import a from './a';
export { b } from \"./b\";
const c = import('./c');
";
        let statements = rewriter().scan(input);
        let kinds: Vec<_> = statements.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![ImportKind::Static, ImportKind::ReExport, ImportKind::Dynamic]
        );
        assert_eq!(statements[1].quote, QuoteStyle::Double);
        assert_eq!(statements[2].location.line, 3);
        assert_eq!(statements[0].render(), "import a from './a';");
    }

    #[test]
    fn test_accessors() {
        let rewriter = rewriter();
        assert_eq!(rewriter.root(), Utf8Path::new(ROOT));
        assert_eq!(rewriter.locations(), &LocationMap::builtin());
        assert_eq!(rewriter.config().feature_dir, "features");

        let file = rewriter.source_file("/repo/src/features/a/A.tsx", String::new());
        assert!(file.is_relocated());
    }
}
