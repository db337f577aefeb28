//! Import statement types.
//!
//! An [`ImportStatement`] is a textual match inside a file, split into the
//! four parts the rewriter needs to substitute a path without disturbing the
//! rest of the statement: prefix, quote, path literal, and suffix.

use serde::{Deserialize, Serialize};

use super::location::SourceLocation;

/// The syntactic shape of a matched statement.
///
/// # Examples
///
/// ```
/// use relo_core::ImportKind;
///
/// assert!(ImportKind::Dynamic.is_dynamic());
/// assert!(!ImportKind::ReExport.is_dynamic());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ImportKind {
    /// Static import: `import { Foo } from './Foo'`
    Static,

    /// Dynamic import: `import('./Foo')`
    Dynamic,

    /// Re-export: `export { Foo } from './Foo'`
    ReExport,
}

impl ImportKind {
    /// Returns `true` if this is a dynamic `import()` expression.
    #[inline]
    #[must_use]
    pub const fn is_dynamic(self) -> bool {
        matches!(self, Self::Dynamic)
    }

    /// Returns a short human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Dynamic => "dynamic",
            Self::ReExport => "re-export",
        }
    }
}

/// The quote character delimiting a path literal.
///
/// # Examples
///
/// ```
/// use relo_core::QuoteStyle;
///
/// assert_eq!(QuoteStyle::from_char('\''), Some(QuoteStyle::Single));
/// assert_eq!(QuoteStyle::Double.as_char(), '"');
/// assert_eq!(QuoteStyle::from_char('`'), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStyle {
    /// `'...'`
    Single,
    /// `"..."`
    Double,
}

impl QuoteStyle {
    /// Parses a quote character.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '\'' => Some(Self::Single),
            '"' => Some(Self::Double),
            _ => None,
        }
    }

    /// Returns the quote character.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Single => '\'',
            Self::Double => '"',
        }
    }
}

/// An import statement found in a file.
///
/// `prefix` runs from the keyword up to (not including) the opening quote and
/// `suffix` holds everything after the path literal that belongs to the
/// match: the closing quote plus a `;` or `)` when present. Rendering the
/// four parts back in order reproduces the matched text exactly.
///
/// # Examples
///
/// ```
/// use relo_core::{ImportKind, ImportStatement, QuoteStyle, SourceLocation};
///
/// let stmt = ImportStatement {
///     kind: ImportKind::Static,
///     prefix: "import Help from ".to_owned(),
///     quote: QuoteStyle::Single,
///     path: "../Help".to_owned(),
///     suffix: "';".to_owned(),
///     location: SourceLocation::default(),
/// };
///
/// assert_eq!(stmt.render(), "import Help from '../Help';");
/// assert_eq!(
///     stmt.render_with_path("../../components/layout/Help"),
///     "import Help from '../../components/layout/Help';"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportStatement {
    /// The statement shape.
    pub kind: ImportKind,

    /// Text before the opening quote (`import X from `, `import(`).
    pub prefix: String,

    /// Quote character around the path literal.
    pub quote: QuoteStyle,

    /// The raw path literal, without quotes.
    pub path: String,

    /// Closing quote and trailing syntax.
    pub suffix: String,

    /// Location of the start of the statement.
    pub location: SourceLocation,
}

impl ImportStatement {
    /// Reproduces the original statement text.
    #[must_use]
    pub fn render(&self) -> String {
        self.render_with_path(&self.path)
    }

    /// Renders the statement with `path` substituted, keeping the prefix,
    /// the opening quote, and the suffix verbatim.
    #[must_use]
    pub fn render_with_path(&self, path: &str) -> String {
        let mut out =
            String::with_capacity(self.prefix.len() + path.len() + self.suffix.len() + 1);
        out.push_str(&self.prefix);
        out.push(self.quote.as_char());
        out.push_str(path);
        out.push_str(&self.suffix);
        out
    }

    /// Returns `true` if the path is relative (`./`, `../`, or any leading dot).
    #[inline]
    #[must_use]
    pub fn is_relative(&self) -> bool {
        self.path.starts_with('.')
    }

    /// Returns the last path segment of the literal.
    ///
    /// # Examples
    ///
    /// ```
    /// use relo_core::{ImportKind, ImportStatement, QuoteStyle, SourceLocation};
    ///
    /// let stmt = ImportStatement {
    ///     kind: ImportKind::Dynamic,
    ///     prefix: "import(".to_owned(),
    ///     quote: QuoteStyle::Double,
    ///     path: "./settings/Settings.tsx".to_owned(),
    ///     suffix: "\")".to_owned(),
    ///     location: SourceLocation::default(),
    /// };
    /// assert_eq!(stmt.basename(), "Settings.tsx");
    /// ```
    #[must_use]
    pub fn basename(&self) -> &str {
        self.path
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default()
    }
}

/// How the rewriter classified a statement's path literal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "class", rename_all = "snake_case")]
pub enum ImportClass {
    /// Bare specifier (`react`, `@scope/pkg`); never rewritten.
    External,

    /// Stylesheet import; never rewritten.
    Stylesheet,

    /// Refers to a relocated component.
    Relocatable {
        /// Logical component name that matched the location map.
        name: String,
        /// Canonical location of the component.
        target: String,
        /// Matched through the legacy folder hint rather than the basename.
        via_legacy_hint: bool,
    },

    /// Relative import of something that did not move.
    Unmapped,
}

impl ImportClass {
    /// Returns `true` if the statement refers to a relocated component.
    #[inline]
    #[must_use]
    pub const fn is_relocatable(&self) -> bool {
        matches!(self, Self::Relocatable { .. })
    }

    /// Returns a short human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::External => "external",
            Self::Stylesheet => "stylesheet",
            Self::Relocatable { .. } => "relocatable",
            Self::Unmapped => "unmapped",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statement(kind: ImportKind, prefix: &str, quote: QuoteStyle, path: &str, suffix: &str) -> ImportStatement {
        ImportStatement {
            kind,
            prefix: prefix.to_owned(),
            quote,
            path: path.to_owned(),
            suffix: suffix.to_owned(),
            location: SourceLocation::default(),
        }
    }

    #[test]
    fn test_import_kind_labels() {
        assert_eq!(ImportKind::Static.label(), "static");
        assert_eq!(ImportKind::Dynamic.label(), "dynamic");
        assert_eq!(ImportKind::ReExport.label(), "re-export");
        assert!(ImportKind::Dynamic.is_dynamic());
        assert!(!ImportKind::Static.is_dynamic());
    }

    #[test]
    fn test_quote_style_roundtrip() {
        for quote in [QuoteStyle::Single, QuoteStyle::Double] {
            assert_eq!(QuoteStyle::from_char(quote.as_char()), Some(quote));
        }
        assert_eq!(QuoteStyle::from_char('a'), None);
    }

    #[test]
    fn test_render_preserves_multiline_prefix() {
        let stmt = statement(
            ImportKind::Static,
            "import {\n  A,\n  B,\n} from ",
            QuoteStyle::Double,
            "./Sidebar",
            "\";",
        );
        assert_eq!(stmt.render(), "import {\n  A,\n  B,\n} from \"./Sidebar\";");
        assert_eq!(
            stmt.render_with_path("../layout/Sidebar"),
            "import {\n  A,\n  B,\n} from \"../layout/Sidebar\";"
        );
    }

    #[test]
    fn test_render_dynamic() {
        let stmt = statement(ImportKind::Dynamic, "import(", QuoteStyle::Single, "./Settings", "')");
        assert_eq!(stmt.render(), "import('./Settings')");
    }

    #[test]
    fn test_is_relative() {
        let relative = statement(ImportKind::Static, "import x from ", QuoteStyle::Single, "../x", "'");
        let external = statement(ImportKind::Static, "import x from ", QuoteStyle::Single, "react", "'");
        assert!(relative.is_relative());
        assert!(!external.is_relative());
    }

    #[test]
    fn test_basename() {
        let cases = [
            ("./Sidebar", "Sidebar"),
            ("../components/layout/Sidebar.tsx", "Sidebar.tsx"),
            ("./folder/", "folder"),
            (".", "."),
        ];
        for (path, expected) in cases {
            let stmt = statement(ImportKind::Static, "import x from ", QuoteStyle::Single, path, "'");
            assert_eq!(stmt.basename(), expected, "basename of {path}");
        }
    }

    #[test]
    fn test_import_class_labels() {
        let relocatable = ImportClass::Relocatable {
            name: "Help".to_owned(),
            target: "components/layout/Help".to_owned(),
            via_legacy_hint: false,
        };
        assert!(relocatable.is_relocatable());
        assert_eq!(relocatable.label(), "relocatable");
        assert_eq!(ImportClass::External.label(), "external");
        assert_eq!(ImportClass::Stylesheet.label(), "stylesheet");
        assert!(!ImportClass::Unmapped.is_relocatable());
    }

    #[test]
    fn test_import_class_serialization() {
        let json = serde_json::to_string(&ImportClass::External).unwrap();
        assert_eq!(json, r#"{"class":"external"}"#);
    }
}
