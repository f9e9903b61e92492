//! Export a family graph (or subtree) as DOT (Graphviz).

use crate::config::ExportConfig;
use kin_core::graph::{Edge, FamilyGraph, SubtreeView};
use kin_core::model::{Person, RelationshipType};
use std::collections::HashSet;

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

fn edge_style(kind: &RelationshipType) -> &'static str {
    match kind {
        RelationshipType::Parent => "solid",
        RelationshipType::Spouse => "dashed",
        RelationshipType::Other(_) => "dotted",
    }
}

/// Render nodes and indexed edges. Edges whose index is in `highlight` are
/// drawn bold in the configured highlight colour.
pub fn render_dot<'a>(
    persons: impl Iterator<Item = &'a Person>,
    edges: impl Iterator<Item = (usize, &'a Edge)>,
    highlight: &[usize],
    config: &ExportConfig,
) -> String {
    let highlight: HashSet<usize> = highlight.iter().copied().collect();
    let mut lines = vec![
        "digraph Family {".to_string(),
        format!("  rankdir={};", config.rankdir),
        "  node [shape=box, fontsize=10];".to_string(),
        String::new(),
    ];

    for person in persons {
        let mut label = escape(&person.display_name());
        if let Some(dob) = person.dob {
            label.push_str(&format!("\\n{}", dob.format("%Y-%m-%d")));
        }
        lines.push(format!("  \"{}\" [label=\"{}\"];", person.person_id, label));
    }

    lines.push(String::new());

    for (idx, edge) in edges {
        let mut attrs = vec![
            format!("style={}", edge_style(edge.kind())),
            format!("label=\"{}\"", escape(edge.kind().as_str())),
        ];
        if edge.kind().is_spouse() {
            attrs.push("arrowhead=none".to_string());
        }
        if highlight.contains(&idx) {
            attrs.push(format!("color=\"{}\"", escape(&config.highlight_color)));
            attrs.push("penwidth=2.5".to_string());
        }
        lines.push(format!(
            "  \"{}\" -> \"{}\" [{}];",
            edge.from,
            edge.to,
            attrs.join(", ")
        ));
    }

    lines.push("}".to_string());
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Export the whole graph.
pub fn export_graph(graph: &FamilyGraph, highlight: &[usize], config: &ExportConfig) -> String {
    render_dot(
        graph.persons(),
        graph.edges().iter().enumerate(),
        highlight,
        config,
    )
}

/// Export a subtree. Highlight indices refer to the parent graph's edges.
pub fn export_subtree(view: &SubtreeView<'_>, highlight: &[usize], config: &ExportConfig) -> String {
    render_dot(view.persons(), view.edges(), highlight, config)
}
