//! Component lookup tools: list, search, stories, documentation.

use serde::{Deserialize, Serialize};

use super::ToolError;
use super::render::render_component_markdown;
use crate::manifest::{ComponentRecord, Manifest, StoryRef};

// =============================================================================
// INPUTS
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FindInput {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComponentIdInput {
    pub component_id: Option<String>,
}

impl ComponentIdInput {
    fn id(&self) -> &str {
        self.component_id.as_deref().unwrap_or_default()
    }
}

// =============================================================================
// OUTPUTS
// =============================================================================

/// One row of `list-all-components` / `find-component-by-name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSummary {
    pub id: String,
    pub name: String,
    pub title: String,
    pub stories_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<&ComponentRecord> for ComponentSummary {
    fn from(record: &ComponentRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            title: record.title.clone(),
            stories_count: record.stories.len(),
            description: record.description.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentList {
    pub components: Vec<ComponentSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentStories {
    pub id: String,
    pub name: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub stories: Vec<StoryRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoriesOutput {
    pub component: ComponentStories,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextContent {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: String,
}

impl TextContent {
    #[must_use]
    pub fn new(text: String) -> Self {
        Self { kind: "text", text }
    }
}

/// Content payload; `is_error` flags a not-found result without failing the call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentationOutput {
    pub content: Vec<TextContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

// =============================================================================
// TOOLS
// =============================================================================

#[must_use]
pub fn list_all_components(manifest: &Manifest) -> ComponentList {
    ComponentList { components: manifest.components().map(ComponentSummary::from).collect() }
}

/// Case-insensitive substring match on name, id, or title. Empty matches all.
#[must_use]
pub fn find_component_by_name(input: &FindInput, manifest: &Manifest) -> ComponentList {
    let query = input.name.as_deref().unwrap_or_default().to_lowercase();
    let components = manifest
        .components()
        .filter(|c| {
            c.name.to_lowercase().contains(&query)
                || c.id.to_lowercase().contains(&query)
                || c.title.to_lowercase().contains(&query)
        })
        .map(ComponentSummary::from)
        .collect();
    ComponentList { components }
}

/// # Errors
///
/// Returns `NotFound` when no component matches the id or name.
pub fn get_component_stories(input: &ComponentIdInput, manifest: &Manifest) -> Result<StoriesOutput, ToolError> {
    let record = manifest
        .resolve(input.id())
        .ok_or_else(|| ToolError::NotFound { component_id: input.id().to_string() })?;

    Ok(StoriesOutput {
        component: ComponentStories {
            id: record.id.clone(),
            name: record.name.clone(),
            title: record.title.clone(),
            description: record.description.clone(),
            stories: record.stories.clone(),
        },
    })
}

/// Renders the component as markdown. An unknown component yields a
/// flagged payload listing every known id instead of an error.
#[must_use]
pub fn get_component_documentation(input: &ComponentIdInput, manifest: &Manifest) -> DocumentationOutput {
    match manifest.resolve(input.id()) {
        Some(record) => DocumentationOutput {
            content: vec![TextContent::new(render_component_markdown(record))],
            is_error: None,
        },
        None => {
            let available = manifest.ids().collect::<Vec<_>>().join(", ");
            let text = format!(
                "Component not found: \"{}\". Available components: {available}. \
                 Use the list-all-components tool to see all available components.",
                input.id()
            );
            DocumentationOutput { content: vec![TextContent::new(text)], is_error: Some(true) }
        }
    }
}

#[cfg(test)]
#[path = "components_test.rs"]
mod tests;
