//! Label content catalog
//!
//! A static, hand-authored mapping from label name to curated content: up to
//! three text snippets, up to three image references, and up to three video
//! links per label. Loaded once at process start and never mutated at runtime.
//!
//! Image entries may be external URLs or inline `data:` URIs; the catalog
//! treats both as opaque strings and leaves rendering to the consumer.

use serde::{Deserialize, Serialize};
use snaplens_core::{Error, Label, Result};
use std::collections::HashMap;
use std::path::Path;
use tracing::warn;

/// Maximum entries shown per content kind.
const MAX_ENTRIES_PER_KIND: usize = 3;

/// The curated texts/images/videos associated with one label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBundle {
    /// Text snippets (at most 3)
    #[serde(default)]
    pub texts: Vec<String>,

    /// Image references: external URLs or inline `data:` URIs (at most 3)
    #[serde(default)]
    pub images: Vec<String>,

    /// Video URLs (at most 3)
    #[serde(default)]
    pub videos: Vec<String>,
}

impl ContentBundle {
    /// True when no content of any kind is configured for the label.
    ///
    /// Callers use this to render a single "no content" placeholder instead of
    /// three empty sections.
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty() && self.images.is_empty() && self.videos.is_empty()
    }
}

/// Static mapping from label name to curated content.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentCatalog {
    /// Content by label name
    #[serde(default)]
    labels: HashMap<Label, ContentBundle>,
}

impl ContentCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from label/bundle pairs
    pub fn from_entries(entries: impl IntoIterator<Item = (Label, ContentBundle)>) -> Self {
        Self {
            labels: entries.into_iter().collect(),
        }
    }

    /// Load a catalog from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&contents)
            .map_err(|e| Error::config(format!("failed to parse catalog {}: {}", path.display(), e)))
    }

    /// Look up the content for a label.
    ///
    /// Unknown or uncurated labels yield an empty bundle; this is an expected
    /// condition, not an error. Blank entries are filtered before the cap of 3
    /// is applied, so a blank never uses up a slot. This is the single
    /// truncation point; consumers must not re-cap.
    pub fn lookup(&self, label: &str) -> ContentBundle {
        match self.labels.get(label) {
            Some(bundle) => ContentBundle {
                texts: pick_top3(&bundle.texts),
                images: pick_top3(&bundle.images),
                videos: pick_top3(&bundle.videos),
            },
            None => ContentBundle::default(),
        }
    }

    /// Report catalog keys that do not correspond to any known label.
    ///
    /// Emits one warning per unmatched key and returns the unmatched keys.
    /// Typos in the hand-authored catalog would otherwise silently degrade to
    /// empty bundles.
    pub fn validate(&self, known_labels: &[Label]) -> Vec<Label> {
        let mut unmatched: Vec<Label> = self
            .labels
            .keys()
            .filter(|key| !known_labels.iter().any(|l| l == *key))
            .cloned()
            .collect();
        unmatched.sort();
        for key in &unmatched {
            warn!(label = %key, "catalog entry does not match any classifier label");
        }
        unmatched
    }

    /// Number of curated labels
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// True when no labels are curated
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Filter blank entries (whitespace-only counts as blank), preserving order,
/// then truncate to the first 3. Filter-then-truncate, never the reverse.
pub fn pick_top3(entries: &[String]) -> Vec<String> {
    entries
        .iter()
        .filter(|s| !s.trim().is_empty())
        .take(MAX_ENTRIES_PER_KIND)
        .cloned()
        .collect()
}
