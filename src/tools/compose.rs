//! `suggest-composition` — keyword-driven component suggestions.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::manifest::Manifest;

const FALLBACK_SUGGESTIONS: usize = 5;
const PACKAGE_NAME: &str = "@org/design-system";

/// Keyword groups checked in order; each maps to the root word a
/// component's name must contain.
const CATEGORIES: [(&[&str], &str); 3] = [
    (&["header", "top", "nav"], "header"),
    (&["card", "grid", "list"], "card"),
    (&["button", "action", "cta"], "button"),
];

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SuggestInput {
    pub use_case: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestOutput {
    pub use_case: String,
    pub suggested_components: Vec<String>,
    pub plan: String,
}

#[must_use]
pub fn suggest_composition(input: &SuggestInput, manifest: &Manifest) -> SuggestOutput {
    let use_case = input.use_case.clone().unwrap_or_default();
    let haystack = use_case.to_lowercase();
    let mut suggestions = Vec::new();
    // Tracked only; a component matching two groups is suggested twice.
    let mut used = HashSet::new();

    for (keywords, root) in CATEGORIES {
        if !keywords.iter().any(|k| haystack.contains(k)) {
            continue;
        }
        if let Some(found) = manifest.components().find(|c| c.name.to_lowercase().contains(root)) {
            suggestions.push(found.name.clone());
            used.insert(found.id.as_str());
        }
    }

    if suggestions.is_empty() {
        suggestions.extend(manifest.components().take(FALLBACK_SUGGESTIONS).map(|c| c.name.clone()));
    }

    let plan = format!(
        "Create a composition using: {}. Import from {PACKAGE_NAME} and compose them according to the use case.",
        suggestions.join(", ")
    );
    tracing::debug!(suggested = suggestions.len(), matched_ids = used.len(), "composition suggested");

    SuggestOutput { use_case, suggested_components: suggestions, plan }
}

#[cfg(test)]
#[path = "compose_test.rs"]
mod tests;
