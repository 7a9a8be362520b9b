use super::*;
use serde_json::json;

fn index_from(value: serde_json::Value) -> StoryIndex {
    serde_json::from_value(value).expect("index should decode")
}

fn design_system_index() -> StoryIndex {
    index_from(json!({
        "v": 5,
        "entries": {
            "design-system-button--docs": {
                "id": "design-system-button--docs",
                "name": "Docs",
                "title": "Design System/Button",
                "importPath": "./src/components/Button/Button.stories.tsx",
                "type": "docs"
            },
            "design-system-button--primary": {
                "id": "design-system-button--primary",
                "name": "Primary",
                "title": "Design System/Button",
                "importPath": "./src/components/Button/Button.stories.tsx",
                "type": "story",
                "parameters": { "docs": { "description": { "component": "Primary UI button" } } }
            },
            "design-system-button--secondary": {
                "id": "design-system-button--secondary",
                "name": "Secondary",
                "title": "Design System/Button",
                "importPath": "./src/components/Button/Button.stories.tsx",
                "type": "story"
            },
            "design-system-card--default": {
                "id": "design-system-card--default",
                "name": "Default",
                "title": "Design System/Card",
                "importPath": "./src/components/Card/Card.stories.tsx",
                "type": "story"
            },
            "design-system-header--logged-in": {
                "id": "design-system-header--logged-in",
                "name": "Logged In",
                "title": "Design System/Header",
                "importPath": "./src/components/Header/Header.stories.tsx",
                "type": "story"
            }
        }
    }))
}

#[test]
fn button_stories_fold_into_one_record() {
    let manifest = build_manifest(&design_system_index(), Source::Static);
    let button = manifest.get("button").expect("button record");
    assert_eq!(button.id, "button");
    assert_eq!(button.name, "Button");
    assert_eq!(button.title, "Design System/Button");
    assert_eq!(button.path, "./src/components/Button/Button.stories.tsx");
    let names: Vec<&str> = button.stories.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Primary", "Secondary"]);
    assert_eq!(button.description.as_deref(), Some("Primary UI button"));
}

#[test]
fn story_count_counts_story_entries_only() {
    let manifest = build_manifest(&design_system_index(), Source::Dev);
    assert_eq!(manifest.story_count(), 4);
    assert_eq!(manifest.len(), 3);
    assert_eq!(manifest.source(), Source::Dev);
}

#[test]
fn docs_entries_never_appear_in_records() {
    let manifest = build_manifest(&design_system_index(), Source::Static);
    for record in manifest.components() {
        assert!(record.stories.iter().all(|s| !s.id.ends_with("--docs")));
    }
}

#[test]
fn unknown_and_missing_kinds_are_skipped() {
    let index = index_from(json!({
        "v": 5,
        "entries": {
            "a--one": { "id": "a--one", "name": "One", "title": "A", "type": "component" },
            "a--two": { "id": "a--two", "name": "Two", "title": "A" },
            "a--three": { "id": "a--three", "name": "Three", "title": "A", "type": "story" }
        }
    }));
    let manifest = build_manifest(&index, Source::Static);
    assert_eq!(manifest.story_count(), 1);
    assert_eq!(manifest.get("a").map(|c| c.stories.len()), Some(1));
}

#[test]
fn order_follows_first_appearance() {
    let manifest = build_manifest(&design_system_index(), Source::Static);
    let ids: Vec<&str> = manifest.ids().collect();
    assert_eq!(ids, ["button", "card", "header"]);
}

#[test]
fn title_without_slash_uses_whole_title() {
    let entry = StoryEntry { title: "Badge".into(), ..StoryEntry::default() };
    assert_eq!(entry.component_name(), "Badge");
}

#[test]
fn title_with_trailing_slash_falls_back_to_whole_title() {
    let entry = StoryEntry { title: "Forms/".into(), ..StoryEntry::default() };
    assert_eq!(entry.component_name(), "Forms/");
}

#[test]
fn slugify_lowercases_and_hyphenates_whitespace_runs() {
    assert_eq!(slugify("Button"), "button");
    assert_eq!(slugify("Icon Button"), "icon-button");
    assert_eq!(slugify("Date  \t Picker"), "date-picker");
}

#[test]
fn multi_word_component_is_keyed_by_slug() {
    let index = index_from(json!({
        "v": 5,
        "entries": {
            "forms-text-field--basic": {
                "id": "forms-text-field--basic",
                "name": "Basic",
                "title": "Forms/Text Field",
                "importPath": "./TextField.stories.tsx",
                "type": "story"
            }
        }
    }));
    let manifest = build_manifest(&index, Source::Static);
    let record = manifest.get("TEXT-FIELD").expect("case-insensitive id lookup");
    assert_eq!(record.name, "Text Field");
    for record in manifest.components() {
        assert_eq!(manifest.get(&slugify(&record.name)), Some(record));
    }
}

#[test]
fn later_description_fills_empty_one() {
    let index = index_from(json!({
        "v": 5,
        "entries": {
            "card--a": { "id": "card--a", "name": "A", "title": "Card", "type": "story" },
            "card--b": {
                "id": "card--b", "name": "B", "title": "Card", "type": "story",
                "parameters": { "docs": { "description": { "component": "Surface container" } } }
            },
            "card--c": {
                "id": "card--c", "name": "C", "title": "Card", "type": "story",
                "parameters": { "docs": { "description": { "component": "Ignored" } } }
            }
        }
    }));
    let manifest = build_manifest(&index, Source::Static);
    assert_eq!(
        manifest.get("card").and_then(|c| c.description.as_deref()),
        Some("Surface container")
    );
}

#[test]
fn entry_without_id_takes_map_key() {
    let index = index_from(json!({
        "v": 5,
        "entries": {
            "header--plain": { "name": "Plain", "title": "Header", "type": "story" }
        }
    }));
    let manifest = build_manifest(&index, Source::Static);
    let header = manifest.get("header").expect("header record");
    assert_eq!(header.stories[0].id, "header--plain");
}

#[test]
fn resolve_falls_back_to_name_match() {
    let manifest = build_manifest(&design_system_index(), Source::Static);
    assert_eq!(manifest.resolve("HEADER").map(|c| c.id.as_str()), Some("header"));
    assert_eq!(manifest.resolve("Card").map(|c| c.id.as_str()), Some("card"));
    assert!(manifest.resolve("carousel").is_none());
}

#[test]
fn empty_manifest_is_static_and_empty() {
    let manifest = Manifest::empty();
    assert!(manifest.is_empty());
    assert_eq!(manifest.story_count(), 0);
    assert_eq!(manifest.source(), Source::Static);
}

#[test]
fn source_serializes_lowercase() {
    assert_eq!(serde_json::to_value(Source::Dev).unwrap(), json!("dev"));
    assert_eq!(Source::Static.to_string(), "static");
}

#[test]
fn malformed_parameters_still_count_as_stories() {
    let index = index_from(json!({
        "v": 5,
        "entries": {
            "card--plain-description": {
                "id": "card--plain-description", "name": "Plain", "title": "DS/Card", "type": "story",
                "parameters": { "docs": { "description": "plain text" } }
            },
            "card--docs-disabled": {
                "id": "card--docs-disabled", "name": "Disabled", "title": "DS/Card", "type": "story",
                "parameters": { "docs": false }
            }
        }
    }));
    let manifest = build_manifest(&index, Source::Static);
    assert_eq!(manifest.story_count(), 2);
    assert_eq!(manifest.len(), 1);
    let card = manifest.get("card").expect("card record");
    let names: Vec<&str> = card.stories.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Plain", "Disabled"]);
    assert_eq!(card.description, None);
}

#[test]
fn wrongly_typed_fields_read_as_empty() {
    let entry = StoryEntry::from_value(
        "grid--numeric",
        &json!({ "id": 7, "name": null, "title": "Layout/Grid", "type": "story", "parameters": [] }),
    );
    assert_eq!(entry.id, "grid--numeric");
    assert_eq!(entry.name, "");
    assert!(entry.is_story());
    assert_eq!(entry.component_name(), "Grid");
    assert_eq!(entry.description(), None);
}

#[test]
fn non_object_entries_are_skipped_by_kind() {
    let index = index_from(json!({
        "v": 5,
        "entries": {
            "junk": "not an entry",
            "tag--a": { "id": "tag--a", "name": "A", "title": "Tag", "type": "story" }
        }
    }));
    let manifest = build_manifest(&index, Source::Static);
    assert_eq!(manifest.story_count(), 1);
    assert_eq!(manifest.ids().collect::<Vec<_>>(), ["tag"]);
}

#[test]
fn blank_description_reads_as_none() {
    let entry = StoryEntry::from_value(
        "x--a",
        &json!({ "type": "story", "parameters": { "docs": { "description": { "component": "  " } } } }),
    );
    assert_eq!(entry.description(), None);
}
