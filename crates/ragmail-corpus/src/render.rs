//! Dense textual rendering of project records for embedding.

use std::fmt::Write;

use ragmail_core::ProjectRecord;

/// Render a project record into one text block.
///
/// The field order is fixed (title, type, domain, technologies, description,
/// detailed description, impact, bulleted features, keywords) so that the
/// rendering is deterministic and two builds of the same corpus produce
/// identical index entries.
pub fn render_project(record: &ProjectRecord) -> String {
    let mut out = String::new();

    writeln!(out, "Project: {}", record.title).ok();
    writeln!(out, "Type: {}", record.kind).ok();
    writeln!(out, "Domain: {}", record.domain.join(", ")).ok();
    writeln!(out, "Technologies: {}", record.technologies.join(", ")).ok();
    writeln!(out).ok();
    writeln!(out, "Description: {}", record.description).ok();
    writeln!(out).ok();
    writeln!(out, "Detailed Overview: {}", record.detailed_description).ok();
    writeln!(out).ok();
    writeln!(out, "Impact: {}", record.impact).ok();
    writeln!(out).ok();
    writeln!(out, "Key Features:").ok();
    for feature in &record.key_features {
        writeln!(out, "- {}", feature).ok();
    }
    writeln!(out).ok();
    write!(
        out,
        "Research Keywords: {}",
        record.research_keywords.join(", ")
    )
    .ok();

    out
}
