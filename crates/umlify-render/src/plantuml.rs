//! Diagram document writer
//!
//! Output layout, in order:
//!
//! 1. one `package "<pkg>" { ... }` block per entity, entities ordered by id;
//! 2. containment, composition, use and return edges;
//! 3. implements edges;
//! 4. one package-scoped note block per constant group, each followed by its
//!    frame-to-owner edge.
//!
//! Edge lines in (2) and (3) are deduplicated and sorted by their text.
//! Member lines are indented with tabs, which the compact encoder strips.

use std::collections::BTreeSet;
use std::fmt::Write;
use std::time::Instant;

use umlify_core::{Edge, EdgeKind, Entity, EntityKind, Note, Snapshot};

use crate::error::Result;

pub const START_MARKER: &str = "@startuml";
pub const END_MARKER: &str = "@enduml";

/// Serialize a snapshot into a complete document.
pub fn render(snapshot: &Snapshot) -> Result<String> {
    let start = Instant::now();
    let mut out = String::new();

    writeln!(out, "{START_MARKER}")?;
    for entity in snapshot.entities() {
        write_entity(&mut out, entity)?;
    }
    write_edges(&mut out, snapshot.relations())?;
    write_edges(&mut out, snapshot.implementations())?;
    for note in snapshot.notes() {
        write_note(&mut out, note)?;
    }
    writeln!(out, "{END_MARKER}")?;

    tracing::debug!(bytes = out.len(), ms = start.elapsed().as_millis() as u64, "rendered document");
    Ok(out)
}

/// Header line naming the entity and its kind.
pub fn kind_marker(entity: &Entity) -> String {
    let name = &entity.id.name;
    let alias = entity.id.short();
    match entity.kind {
        EntityKind::Interface => format!(r#"interface "{name}" as {alias}"#),
        EntityKind::ValueObject => format!(r#"class "{name}" as {alias} <<V,Orchid>>"#),
        EntityKind::Entity => format!(r#"class "{name}" as {alias} <<E,#FFCC00>>"#),
    }
}

fn visibility(exported: bool) -> char {
    if exported { '+' } else { '-' }
}

fn write_entity(out: &mut String, entity: &Entity) -> Result<()> {
    writeln!(out, r#"package "{}" {{"#, entity.id.package_name())?;
    let marker = kind_marker(entity);
    if entity.has_body() {
        writeln!(out, "\t{marker} {{")?;
        for field in &entity.fields {
            writeln!(out, "\t\t{}{}: {}", visibility(field.exported), field.name, field.type_text)?;
        }
        for method in &entity.methods {
            writeln!(out, "\t\t{}{}{}", visibility(method.exported), method.name, method.signature)?;
        }
        writeln!(out, "\t}}")?;
    } else {
        writeln!(out, "\t{marker}")?;
    }
    writeln!(out, "}}")?;
    Ok(())
}

/// One edge as a single document line, without newline.
pub fn edge_line(edge: &Edge) -> String {
    let from = edge.from.short();
    let to = edge.to.short();
    match edge.kind {
        EdgeKind::Containment => format!("{from} --> {to}"),
        EdgeKind::Composition => format!("{from} *-- {to}"),
        EdgeKind::Use => format!("{from} ..> {to} : <<use>>"),
        EdgeKind::Return => format!("{from} ..> {to} : <<return>>"),
        EdgeKind::Implements => format!("{from} --|> {to}"),
    }
}

fn write_edges(out: &mut String, edges: impl Iterator<Item = Edge>) -> Result<()> {
    let lines: BTreeSet<String> = edges.map(|e| edge_line(&e)).collect();
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

fn write_note(out: &mut String, note: &Note) -> Result<()> {
    let frame = note.frame();
    writeln!(out, r#"package "{}" {{"#, note.owner.package_name())?;
    writeln!(out, "\tnote as {frame}")?;
    writeln!(out, "\t\t<b>{}</b>", note.owner.name)?;
    for constant in &note.constants {
        writeln!(out, "\t\t{constant}")?;
    }
    writeln!(out, "\tend note")?;
    writeln!(out, "}}")?;
    writeln!(out, "{frame} --> {}", note.owner.short())?;
    Ok(())
}
