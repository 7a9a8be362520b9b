//! Discovery tools exposed through `tools/list` and `tools/call`.
//!
//! DESIGN
//! ======
//! Every tool is a pure function of its arguments and a `Manifest`. The
//! transport resolves a tool by name, hands it the raw `arguments` object and
//! serializes whatever comes back. Tools never touch shared state.
//!
//! A missing or `null` string argument is treated as empty; an argument of
//! the wrong JSON type is an `InvalidArguments` error.

pub mod components;
pub mod compose;
pub mod render;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::manifest::Manifest;

pub const LIST_ALL_COMPONENTS: &str = "list-all-components";
pub const FIND_COMPONENT_BY_NAME: &str = "find-component-by-name";
pub const GET_COMPONENT_STORIES: &str = "get-component-stories";
pub const GET_COMPONENT_DOCUMENTATION: &str = "get-component-documentation";
pub const SUGGEST_COMPOSITION: &str = "suggest-composition";

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ToolError {
    #[error("Component '{component_id}' not found. Use list-all-components to see available components.")]
    NotFound { component_id: String },
    #[error("{0}")]
    InvalidArguments(String),
    #[error("failed to encode tool output: {0}")]
    Output(String),
}

// =============================================================================
// DISPATCH
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    ListAllComponents,
    FindComponentByName,
    GetComponentStories,
    GetComponentDocumentation,
    SuggestComposition,
}

impl Tool {
    pub const ALL: [Self; 5] = [
        Self::ListAllComponents,
        Self::FindComponentByName,
        Self::GetComponentStories,
        Self::GetComponentDocumentation,
        Self::SuggestComposition,
    ];

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.name() == name)
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::ListAllComponents => LIST_ALL_COMPONENTS,
            Self::FindComponentByName => FIND_COMPONENT_BY_NAME,
            Self::GetComponentStories => GET_COMPONENT_STORIES,
            Self::GetComponentDocumentation => GET_COMPONENT_DOCUMENTATION,
            Self::SuggestComposition => SUGGEST_COMPOSITION,
        }
    }

    /// Run the tool against `manifest`.
    ///
    /// # Errors
    ///
    /// `InvalidArguments` when `arguments` has the wrong shape; `NotFound`
    /// from `get-component-stories` for an unknown component.
    pub fn call(self, arguments: &Value, manifest: &Manifest) -> Result<Value, ToolError> {
        match self {
            Self::ListAllComponents => to_value(components::list_all_components(manifest)),
            Self::FindComponentByName => {
                let input: components::FindInput = parse_args(arguments)?;
                to_value(components::find_component_by_name(&input, manifest))
            }
            Self::GetComponentStories => {
                let input: components::ComponentIdInput = parse_args(arguments)?;
                to_value(components::get_component_stories(&input, manifest)?)
            }
            Self::GetComponentDocumentation => {
                let input: components::ComponentIdInput = parse_args(arguments)?;
                to_value(components::get_component_documentation(&input, manifest))
            }
            Self::SuggestComposition => {
                let input: compose::SuggestInput = parse_args(arguments)?;
                to_value(compose::suggest_composition(&input, manifest))
            }
        }
    }
}

fn parse_args<T>(arguments: &Value) -> Result<T, ToolError>
where
    T: DeserializeOwned + Default,
{
    match arguments {
        Value::Null => Ok(T::default()),
        other => T::deserialize(other).map_err(|e| ToolError::InvalidArguments(e.to_string())),
    }
}

fn to_value<T: Serialize>(output: T) -> Result<Value, ToolError> {
    serde_json::to_value(output).map_err(|e| ToolError::Output(e.to_string()))
}

// =============================================================================
// CATALOG
// =============================================================================

/// Catalog entry returned by `tools/list`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

/// The static tool catalog, in `tools/list` order.
#[must_use]
pub fn catalog() -> Vec<ToolSpec> {
    vec![
        ToolSpec {
            name: LIST_ALL_COMPONENTS.into(),
            description: "List all available components from the design system".into(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {}
            }),
        },
        ToolSpec {
            name: FIND_COMPONENT_BY_NAME.into(),
            description: "Find a component by name (case-insensitive partial match)".into(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "name": { "type": "string", "description": "Component name to search for" }
                },
                "required": ["name"]
            }),
        },
        ToolSpec {
            name: GET_COMPONENT_STORIES.into(),
            description: "Get all stories for a specific component".into(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "componentId": { "type": "string", "description": "Component ID or name" }
                },
                "required": ["componentId"]
            }),
        },
        ToolSpec {
            name: GET_COMPONENT_DOCUMENTATION.into(),
            description: "Get detailed documentation for a specific UI component".into(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "componentId": { "type": "string", "description": "Component ID or name" }
                },
                "required": ["componentId"]
            }),
        },
        ToolSpec {
            name: SUGGEST_COMPOSITION.into(),
            description: "Suggest a composition of components for a given use case".into(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "useCase": { "type": "string", "description": "Description of the use case or screen to build" }
                },
                "required": ["useCase"]
            }),
        },
    ]
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
