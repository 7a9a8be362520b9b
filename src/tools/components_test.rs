use super::*;
use crate::manifest::test_helpers::design_system_manifest;
use std::collections::BTreeSet;

fn find(name: &str) -> ComponentList {
    find_component_by_name(&FindInput { name: Some(name.into()) }, &design_system_manifest())
}

fn by_id(id: &str) -> ComponentIdInput {
    ComponentIdInput { component_id: Some(id.into()) }
}

fn ids(list: &ComponentList) -> BTreeSet<String> {
    list.components.iter().map(|c| c.id.clone()).collect()
}

// =============================================================================
// list-all-components
// =============================================================================

#[test]
fn list_projects_every_record_in_order() {
    let list = list_all_components(&design_system_manifest());
    let names: Vec<&str> = list.components.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Button", "Card", "Header"]);
    assert_eq!(list.components[0].stories_count, 2);
    assert_eq!(list.components[0].title, "Design System/Button");
}

#[test]
fn list_serializes_camel_case_and_omits_missing_description() {
    let list = list_all_components(&design_system_manifest());
    let value = serde_json::to_value(&list).unwrap();
    let first = &value["components"][0];
    assert_eq!(first["storiesCount"], 2);
    assert!(first.get("description").is_none());
}

// =============================================================================
// find-component-by-name
// =============================================================================

#[test]
fn find_empty_query_matches_list() {
    let manifest = design_system_manifest();
    let all = list_all_components(&manifest);
    assert_eq!(ids(&find("")), ids(&all));
}

#[test]
fn find_missing_query_matches_everything() {
    let list = find_component_by_name(&FindInput::default(), &design_system_manifest());
    assert_eq!(list.components.len(), 3);
}

#[test]
fn find_is_case_insensitive_substring() {
    assert_eq!(ids(&find("BUT")), BTreeSet::from(["button".to_string()]));
    assert_eq!(ids(&find("ead")), BTreeSet::from(["header".to_string()]));
}

#[test]
fn find_matches_title_path() {
    assert_eq!(find("design system/").components.len(), 3);
}

#[test]
fn find_no_match_is_empty_not_error() {
    assert!(find("carousel").components.is_empty());
}

// =============================================================================
// get-component-stories
// =============================================================================

#[test]
fn stories_resolve_by_id_and_name_any_case() {
    let manifest = design_system_manifest();
    for query in ["card", "CARD", "Card", "cArD"] {
        let out = get_component_stories(&by_id(query), &manifest).unwrap();
        assert_eq!(out.component.id, "card");
        let names: Vec<&str> = out.component.stories.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Default", "With Image"]);
    }
}

#[test]
fn stories_unknown_component_is_not_found() {
    let err = get_component_stories(&by_id("carousel"), &design_system_manifest()).unwrap_err();
    assert_eq!(err, ToolError::NotFound { component_id: "carousel".into() });
    assert_eq!(
        err.to_string(),
        "Component 'carousel' not found. Use list-all-components to see available components."
    );
}

#[test]
fn stories_missing_argument_is_not_found() {
    let err = get_component_stories(&ComponentIdInput::default(), &design_system_manifest()).unwrap_err();
    assert!(matches!(err, ToolError::NotFound { .. }));
}

// =============================================================================
// get-component-documentation
// =============================================================================

#[test]
fn documentation_renders_markdown_for_name() {
    let out = get_component_documentation(&by_id("Header"), &design_system_manifest());
    assert!(out.is_error.is_none());
    assert_eq!(out.content.len(), 1);
    assert_eq!(out.content[0].kind, "text");
    assert!(out.content[0].text.starts_with("# Header\n"));
    assert!(out.content[0].text.contains("- **Logged In** (`design-system-header--logged-in`)"));
}

#[test]
fn documentation_unknown_component_is_flagged_and_lists_ids() {
    let manifest = design_system_manifest();
    let out = get_component_documentation(&by_id("carousel"), &manifest);
    assert_eq!(out.is_error, Some(true));
    let text = &out.content[0].text;
    assert!(text.starts_with("Component not found: \"carousel\"."));
    for summary in list_all_components(&manifest).components {
        assert!(text.contains(&summary.id), "missing {} in {text}", summary.id);
    }
    assert!(text.contains("Available components: button, card, header."));
}

#[test]
fn documentation_flag_serializes_as_is_error() {
    let out = get_component_documentation(&by_id("nope"), &design_system_manifest());
    let value = serde_json::to_value(&out).unwrap();
    assert_eq!(value["isError"], true);
    assert_eq!(value["content"][0]["type"], "text");

    let ok = get_component_documentation(&by_id("button"), &design_system_manifest());
    let value = serde_json::to_value(&ok).unwrap();
    assert!(value.get("isError").is_none());
}
