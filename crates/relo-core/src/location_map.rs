//! The relocation plan: logical component names and their canonical locations.
//!
//! A [`LocationMap`] answers one question: "where does the component called
//! `X` live now?". Keys are bare basenames without extension (`Sidebar`),
//! values are slash-separated paths relative to the source root, also without
//! extension (`components/layout/Sidebar`).
//!
//! The map is an immutable value handed to the rewriter at construction time.
//! [`LocationMap::builtin`] carries the compiled-in plan; tests and config
//! files build their own with [`LocationMap::from_entries`].
//!
//! # Examples
//!
//! ```
//! use relo_core::LocationMap;
//!
//! let map = LocationMap::builtin();
//! assert_eq!(map.lookup("Sidebar"), Some("components/layout/Sidebar"));
//! assert_eq!(map.lookup("NotMoved"), None);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::hash::{fx_hash_map_with_capacity, FxHashMap};

/// Compiled-in relocation plan.
const BUILTIN_LOCATIONS: &[(&str, &str)] = &[
    ("SetupWizard", "features/onboarding/SetupWizard"),
    ("RecordingControls", "features/capture/RecordingControls"),
    ("LiveTranscript", "features/capture/LiveTranscript"),
    ("MeetingDetectionBanner", "features/capture/MeetingDetectionBanner"),
    ("VideoDiagnostics", "features/capture/VideoDiagnostics"),
    ("MeetingHistory", "features/memory/MeetingHistory"),
    ("RewindTimeline", "features/memory/RewindTimeline"),
    ("RewindGallery", "features/memory/RewindGallery"),
    ("SyncedTimeline", "features/memory/SyncedTimeline"),
    ("AmbientTimeline", "features/memory/AmbientTimeline"),
    ("ActivityTimeline", "features/memory/ActivityTimeline"),
    ("RecordingsLibrary", "features/memory/RecordingsLibrary"),
    ("AIChat", "features/intelligence/AIChat"),
    ("CopilotPanel", "features/intelligence/CopilotPanel"),
    ("MeetingIntelPanel", "features/intelligence/MeetingIntelPanel"),
    ("LearnedDataEditor", "features/intelligence/LearnedDataEditor"),
    ("EntitiesView", "features/intelligence/EntitiesView"),
    ("PromptBrowser", "features/intelligence/PromptBrowser"),
    ("PromptLibrary", "features/intelligence/PromptLibrary"),
    ("ComparisonLab", "features/intelligence/ComparisonLab"),
    ("Settings", "features/settings/Settings"),
    ("FullSettings", "features/settings/FullSettings"),
    ("AISettings", "features/settings/AISettings"),
    ("IngestSettings", "features/settings/IngestSettings"),
    ("KnowledgeBaseSettings", "features/settings/KnowledgeBaseSettings"),
    ("PermissionsStatus", "features/settings/PermissionsStatus"),
    ("ThemeSelector", "features/settings/ThemeSelector"),
    ("TranscriptionSettings", "features/settings/TranscriptionSettings"),
    ("AlwaysOnSettings", "features/settings/AlwaysOnSettings"),
    ("ActivityThemesSettings", "features/settings/ActivityThemesSettings"),
    ("InsightsView", "features/analytics/InsightsView"),
    ("StorageMeter", "features/analytics/StorageMeter"),
    ("SystemStatus", "features/analytics/SystemStatus"),
    ("AuditLog", "features/analytics/AuditLog"),
    ("AdminConsole", "features/analytics/AdminConsole"),
    ("ToolsConsole", "features/analytics/ToolsConsole"),
    ("GlobalErrorBoundary", "components/common/GlobalErrorBoundary"),
    ("CommandPalette", "components/common/CommandPalette"),
    ("SearchBar", "components/common/SearchBar"),
    ("KBSearch", "components/common/KBSearch"),
    ("Sidebar", "components/layout/Sidebar"),
    ("Help", "components/layout/Help"),
];

/// Mapping from logical component name to canonical location.
///
/// Lookups are pure and total: a missing name means "not relocated", never an
/// error. Construction through [`from_entries`](Self::from_entries) rejects a
/// name mapped to two different locations.
///
/// Serializes as a JSON object `{ "Name": "path/to/Name" }`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, String>",
    into = "BTreeMap<String, String>"
)]
pub struct LocationMap {
    entries: FxHashMap<String, String>,
}

impl LocationMap {
    /// Returns the compiled-in relocation plan.
    #[must_use]
    pub fn builtin() -> Self {
        let mut entries = fx_hash_map_with_capacity(BUILTIN_LOCATIONS.len());
        for (name, target) in BUILTIN_LOCATIONS {
            entries.insert((*name).to_owned(), (*target).to_owned());
        }
        Self { entries }
    }

    /// Builds a map from `(name, location)` pairs.
    ///
    /// Locations are normalized to forward slashes with any leading `./` and
    /// trailing `/` removed. Repeating an identical pair is accepted.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::ConflictingEntry`] if a name maps to two locations.
    /// - [`ConfigError::InvalidTarget`] if a name is not a bare basename, or a
    ///   location is empty, absolute, or climbs out of the source root.
    ///
    /// # Examples
    ///
    /// ```
    /// use relo_core::LocationMap;
    ///
    /// let map = LocationMap::from_entries([("Help", "./components/layout/Help/")])?;
    /// assert_eq!(map.lookup("Help"), Some("components/layout/Help"));
    ///
    /// let conflict = LocationMap::from_entries([
    ///     ("Help", "components/layout/Help"),
    ///     ("Help", "features/help/Help"),
    /// ]);
    /// assert!(conflict.is_err());
    /// # Ok::<(), relo_core::ConfigError>(())
    /// ```
    pub fn from_entries<I, N, T>(entries: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (N, T)>,
        N: Into<String>,
        T: AsRef<str>,
    {
        let mut map: FxHashMap<String, String> = FxHashMap::default();

        for (name, target) in entries {
            let name = name.into();
            let target = normalize_target(&name, target.as_ref())?;

            if let Some(existing) = map.get(&name) {
                if *existing != target {
                    return Err(ConfigError::ConflictingEntry {
                        first: existing.clone(),
                        second: target,
                        name,
                    });
                }
                continue;
            }

            map.insert(name, target);
        }

        Ok(Self { entries: map })
    }

    /// Returns the canonical location of `name`, if it was relocated.
    #[inline]
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Returns `true` if `name` has a canonical location.
    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of relocated components.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing was relocated.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(name, location)` pairs sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        let mut pairs: Vec<(&str, &str)> = self
            .entries
            .iter()
            .map(|(name, target)| (name.as_str(), target.as_str()))
            .collect();
        pairs.sort_unstable();
        pairs.into_iter()
    }
}

impl TryFrom<BTreeMap<String, String>> for LocationMap {
    type Error = ConfigError;

    fn try_from(value: BTreeMap<String, String>) -> Result<Self, Self::Error> {
        Self::from_entries(value)
    }
}

impl From<LocationMap> for BTreeMap<String, String> {
    fn from(value: LocationMap) -> Self {
        value.entries.into_iter().collect()
    }
}

fn normalize_target(name: &str, target: &str) -> Result<String, ConfigError> {
    let invalid = |reason: &'static str| ConfigError::InvalidTarget {
        name: name.to_owned(),
        target: target.to_owned(),
        reason,
    };

    if name.is_empty() || name.contains(['/', '\\']) {
        return Err(invalid("logical name must be a bare basename"));
    }

    let unified = target.replace('\\', "/");
    if unified.starts_with('/') || unified.as_bytes().get(1) == Some(&b':') {
        return Err(invalid("must be relative to the source root"));
    }

    let mut segments = Vec::new();
    for segment in unified.split('/') {
        match segment {
            "" | "." => {}
            ".." => return Err(invalid("must not leave the source root")),
            other => segments.push(other),
        }
    }

    if segments.is_empty() {
        return Err(invalid("must not be empty"));
    }

    Ok(segments.join("/"))
}
