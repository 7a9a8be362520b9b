//! Manifest — per-component metadata built from a story index.
//!
//! DESIGN
//! ======
//! The documentation build writes `index.json` as `{v, entries}` where each
//! entry is one story (or docs page) of one component. `build_manifest`
//! folds the `story` entries in document order into `ComponentRecord`s keyed
//! by the component slug. The manifest is immutable once built; a reload
//! builds a new one and swaps it in whole.
//!
//! Records are stored in a `Vec` with a slug → index table so lookups are
//! O(1) and iteration order is the order components first appeared in the
//! index. `suggest-composition` depends on that order.

pub mod loader;

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

const STORY_KIND: &str = "story";

// =============================================================================
// INDEX FORMAT
// =============================================================================

/// The story index document written by the documentation build.
///
/// `entries` keeps document order (`serde_json` is built with `preserve_order`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoryIndex {
    #[serde(default)]
    pub v: u32,
    #[serde(default)]
    pub entries: serde_json::Map<String, Value>,
}

/// One index entry: a single story or docs page of one component.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoryEntry {
    pub id: String,
    pub name: String,
    /// Slash-delimited path; the last segment is the component name.
    pub title: String,
    pub import_path: String,
    /// `story`, `docs`, or something newer we don't know about.
    pub kind: Option<String>,
    /// `parameters.docs.description.component`.
    pub description: Option<String>,
}

impl StoryEntry {
    /// Read one raw index entry field by field.
    ///
    /// A field that is missing or has an unexpected shape reads as empty, so
    /// a malformed optional field never hides the entry itself. `key` stands
    /// in for a missing `id`.
    #[must_use]
    pub fn from_value(key: &str, value: &Value) -> Self {
        let text = |field: &str| value.get(field).and_then(Value::as_str).unwrap_or_default().to_string();

        let mut id = text("id");
        if id.is_empty() {
            key.clone_into(&mut id);
        }

        Self {
            id,
            name: text("name"),
            title: text("title"),
            import_path: text("importPath"),
            kind: value.get("type").and_then(Value::as_str).map(str::to_string),
            description: value
                .pointer("/parameters/docs/description/component")
                .and_then(Value::as_str)
                .map(str::to_string),
        }
    }

    #[must_use]
    pub fn is_story(&self) -> bool {
        self.kind.as_deref() == Some(STORY_KIND)
    }

    /// Component name: last `/` segment of the title.
    #[must_use]
    pub fn component_name(&self) -> &str {
        match self.title.rsplit('/').next() {
            Some(last) if !last.is_empty() => last,
            _ => &self.title,
        }
    }

    /// The component description, when present and non-empty.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.trim().is_empty())
    }
}

// =============================================================================
// MANIFEST
// =============================================================================

/// Which source the manifest was loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Live index fetched from a running documentation server.
    Dev,
    /// Pre-built `index.json` read from disk.
    Static,
}

impl Source {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dev => "dev",
            Self::Static => "static",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoryRef {
    pub id: String,
    pub name: String,
}

/// All stories of one component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentRecord {
    pub id: String,
    pub name: String,
    pub title: String,
    pub path: String,
    pub description: Option<String>,
    pub stories: Vec<StoryRef>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    components: Vec<ComponentRecord>,
    by_id: HashMap<String, usize>,
    stories: usize,
    source: Source,
}

impl Manifest {
    /// Manifest with no components, used when nothing could be loaded.
    #[must_use]
    pub fn empty() -> Self {
        Self { components: Vec::new(), by_id: HashMap::new(), stories: 0, source: Source::Static }
    }

    /// Records in the order they first appeared in the index.
    pub fn components(&self) -> impl ExactSizeIterator<Item = &ComponentRecord> {
        self.components.iter()
    }

    /// Component ids in manifest order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.components.iter().map(|c| c.id.as_str())
    }

    /// Exact lookup by id. The key is lower-cased first.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ComponentRecord> {
        self.by_id
            .get(&id.to_lowercase())
            .map(|&idx| &self.components[idx])
    }

    /// Exact id lookup, then a case-insensitive match on name or id.
    #[must_use]
    pub fn resolve(&self, id_or_name: &str) -> Option<&ComponentRecord> {
        if let Some(found) = self.get(id_or_name) {
            return Some(found);
        }
        let needle = id_or_name.to_lowercase();
        self.components
            .iter()
            .find(|c| c.name.to_lowercase() == needle || c.id.to_lowercase() == needle)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Number of `story` entries in the source index.
    #[must_use]
    pub fn story_count(&self) -> usize {
        self.stories
    }

    #[must_use]
    pub fn source(&self) -> Source {
        self.source
    }

    #[must_use]
    pub fn with_source(mut self, source: Source) -> Self {
        self.source = source;
        self
    }
}

impl Default for Manifest {
    fn default() -> Self {
        Self::empty()
    }
}

// =============================================================================
// BUILDER
// =============================================================================

/// Lower-cased component name with each whitespace run replaced by `-`.
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut in_space = false;
    for ch in name.to_lowercase().chars() {
        if ch.is_whitespace() {
            if !in_space {
                slug.push('-');
            }
            in_space = true;
        } else {
            slug.push(ch);
            in_space = false;
        }
    }
    slug
}

/// Fold a story index into a manifest. Non-`story` entries are skipped.
#[must_use]
pub fn build_manifest(index: &StoryIndex, source: Source) -> Manifest {
    let entries = index.entries.iter().map(|(key, value)| StoryEntry::from_value(key, value));
    build_from_entries(entries, source)
}

/// Fold already-decoded entries, in order, into a manifest.
pub fn build_from_entries<I>(entries: I, source: Source) -> Manifest
where
    I: IntoIterator<Item = StoryEntry>,
{
    let mut manifest = Manifest::empty().with_source(source);

    for entry in entries {
        if !entry.is_story() {
            continue;
        }
        manifest.stories += 1;

        let name = entry.component_name().to_string();
        let id = slugify(&name);
        let idx = match manifest.by_id.get(&id) {
            Some(&idx) => idx,
            None => {
                manifest.components.push(ComponentRecord {
                    id: id.clone(),
                    name,
                    title: entry.title.clone(),
                    path: entry.import_path.clone(),
                    description: None,
                    stories: Vec::new(),
                });
                let idx = manifest.components.len() - 1;
                manifest.by_id.insert(id, idx);
                idx
            }
        };

        let record = &mut manifest.components[idx];
        if record.description.is_none() {
            record.description = entry.description().map(str::to_string);
        }
        record.stories.push(StoryRef { id: entry.id, name: entry.name });
    }

    manifest
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
