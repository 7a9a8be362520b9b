//! Markdown rendering of a component record.

use std::fmt::Write;

use crate::manifest::ComponentRecord;

/// Render `record` as a markdown document: title, optional description,
/// a details block, and the story list when there is one.
#[must_use]
pub fn render_component_markdown(record: &ComponentRecord) -> String {
    let mut out = format!("# {}\n\n", record.name);

    if let Some(description) = &record.description {
        let _ = write!(out, "{description}\n\n");
    }

    out.push_str("## Details\n\n");
    let _ = writeln!(out, "- **ID**: `{}`", record.id);
    let _ = writeln!(out, "- **Title**: {}", record.title);
    let _ = writeln!(out, "- **Path**: `{}`", record.path);
    let _ = write!(out, "- **Stories**: {}\n\n", record.stories.len());

    if !record.stories.is_empty() {
        out.push_str("## Stories\n\n");
        for story in &record.stories {
            let _ = writeln!(out, "- **{}** (`{}`)", story.name, story.id);
        }
    }

    out
}
