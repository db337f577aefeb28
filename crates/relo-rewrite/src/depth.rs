//! Depth correction for files that moved one level deeper.
//!
//! A relocated file that used to reach a shared folder with `../lib/api` now
//! needs `../../lib/api`. [`correct_depth`] adds the missing `../` to every
//! `../<folder>` reference that is not already preceded by another `../`,
//! which makes the pass idempotent: corrected text is never corrected again.

use std::borrow::Cow;

const PARENT: &str = "../";

/// Result of a depth correction pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepthCorrection<'a> {
    /// The corrected text, borrowed when nothing changed.
    pub text: Cow<'a, str>,
    /// Number of `../` segments inserted.
    pub replacements: usize,
}

impl DepthCorrection<'_> {
    /// Returns `true` if at least one reference was corrected.
    #[inline]
    #[must_use]
    pub const fn is_changed(&self) -> bool {
        self.replacements > 0
    }
}

/// Adds one `../` to each `../<folder>` reference in `text`.
///
/// A reference matches only when the folder name ends at a segment boundary
/// (`../lib/x` and `../lib'` match, `../library` does not) and the `../` is
/// not itself preceded by `../`.
///
/// # Examples
///
/// ```
/// use relo_rewrite::correct_depth;
///
/// let once = correct_depth("import { api } from '../lib/api';", &["lib"]);
/// assert_eq!(once.text, "import { api } from '../../lib/api';");
///
/// let twice = correct_depth(&once.text, &["lib"]);
/// assert_eq!(twice.replacements, 0);
/// ```
#[must_use]
pub fn correct_depth<'a, S: AsRef<str>>(text: &'a str, folders: &[S]) -> DepthCorrection<'a> {
    let insert_at: Vec<usize> = text
        .match_indices(PARENT)
        .map(|(pos, _)| pos)
        .filter(|&pos| !text[..pos].ends_with(PARENT))
        .filter(|&pos| {
            let rest = &text[pos + PARENT.len()..];
            folders
                .iter()
                .any(|folder| names_folder(rest, folder.as_ref()))
        })
        .collect();

    if insert_at.is_empty() {
        return DepthCorrection {
            text: Cow::Borrowed(text),
            replacements: 0,
        };
    }

    let mut out = String::with_capacity(text.len() + insert_at.len() * PARENT.len());
    let mut last = 0;
    for &pos in &insert_at {
        out.push_str(&text[last..pos]);
        out.push_str(PARENT);
        last = pos;
    }
    out.push_str(&text[last..]);

    DepthCorrection {
        text: Cow::Owned(out),
        replacements: insert_at.len(),
    }
}

/// Returns `true` if `rest` starts with `folder` followed by a segment boundary.
fn names_folder(rest: &str, folder: &str) -> bool {
    if folder.is_empty() {
        return false;
    }
    rest.strip_prefix(folder).is_some_and(|after| {
        after
            .chars()
            .next()
            .is_none_or(|c| !(c.is_alphanumeric() || c == '_' || c == '-'))
    })
}
