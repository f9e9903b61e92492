//! Command implementations. Each renders its result as text or JSON.

use crate::config::KinConfig;
use crate::export;
use anyhow::Result;
use kin_core::graph::FamilyGraph;
use kin_core::model::{PersonId, RelationshipType};
use kin_core::selection::{SelectionChange, SelectionQueue};
use kin_core::{KinshipError, lca, paths, relate};
use serde_json::json;
use std::collections::BTreeSet;

/// Message shown when two persons have no common ancestor.
pub const NO_RELATIONSHIP: &str = "no known relationship";

fn describe(graph: &FamilyGraph, id: PersonId) -> String {
    match graph.person(id) {
        Some(p) => format!("{} [{}]", p.display_name(), id),
        None => format!("[{}]", id),
    }
}

fn pretty(value: &serde_json::Value) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn render_set(graph: &FamilyGraph, title: &str, ids: &BTreeSet<PersonId>) -> String {
    let mut out = format!("{} ({}):\n", title, ids.len());
    for &id in ids {
        out.push_str(&format!("  {}\n", describe(graph, id)));
    }
    out
}

pub fn info(graph: &FamilyGraph, json: bool) -> Result<String> {
    let mut parent = 0;
    let mut spouse = 0;
    let mut other = 0;
    for edge in graph.edges() {
        match edge.kind() {
            RelationshipType::Parent => parent += 1,
            RelationshipType::Spouse => spouse += 1,
            RelationshipType::Other(_) => other += 1,
        }
    }
    let mut roots = 0;
    for person in graph.persons() {
        if graph.ancestors(person.person_id)?.is_empty() {
            roots += 1;
        }
    }

    if json {
        return pretty(&json!({
            "persons": graph.len(),
            "edges": graph.edge_count(),
            "parent_edges": parent,
            "spouse_edges": spouse,
            "other_edges": other,
            "roots": roots,
        }));
    }
    Ok(format!(
        "Persons: {}\nEdges:   {} (parent {}, spouse {}, other {})\nRoots:   {}\n",
        graph.len(),
        graph.edge_count(),
        parent,
        spouse,
        other,
        roots
    ))
}

pub fn ancestors(graph: &FamilyGraph, id: PersonId, json: bool) -> Result<String> {
    let set = graph.ancestors(id)?;
    if json {
        return pretty(&json!({ "person": id, "ancestors": set }));
    }
    Ok(render_set(
        graph,
        &format!("Ancestors of {}", describe(graph, id)),
        &set,
    ))
}

pub fn descendants(graph: &FamilyGraph, id: PersonId, json: bool) -> Result<String> {
    let set = graph.descendants(id)?;
    if json {
        return pretty(&json!({ "person": id, "descendants": set }));
    }
    Ok(render_set(
        graph,
        &format!("Descendants of {}", describe(graph, id)),
        &set,
    ))
}

pub fn common_ancestor(
    graph: &FamilyGraph,
    a: PersonId,
    b: PersonId,
    json: bool,
) -> Result<String> {
    let found = match lca::lowest_common_ancestor(graph, a, b) {
        Ok(id) => Some(id),
        Err(KinshipError::NoCommonAncestor(..)) => None,
        Err(e) => return Err(e.into()),
    };
    if json {
        return pretty(&json!({ "a": a, "b": b, "lca": found }));
    }
    Ok(match found {
        Some(id) => format!("Lowest common ancestor: {}\n", describe(graph, id)),
        None => format!("{}\n", NO_RELATIONSHIP),
    })
}

pub fn path(graph: &FamilyGraph, a: PersonId, b: PersonId, json: bool) -> Result<String> {
    let edges = match paths::shortest_path(graph, a, b) {
        Ok(edges) => edges,
        Err(KinshipError::NoCommonAncestor(..)) => {
            return if json {
                pretty(&json!({ "a": a, "b": b, "edges": null, "edge_indices": null }))
            } else {
                Ok(format!("{}\n", NO_RELATIONSHIP))
            };
        }
        Err(e) => return Err(e.into()),
    };
    let indices = paths::edge_indices(graph, &edges);

    if json {
        return pretty(&json!({ "a": a, "b": b, "edges": edges, "edge_indices": indices }));
    }
    let mut out = format!("Path {} → {}:\n", describe(graph, a), describe(graph, b));
    for (from, to) in &edges {
        out.push_str(&format!(
            "  {} → {}\n",
            describe(graph, *from),
            describe(graph, *to)
        ));
    }
    out.push_str(&format!("Edge indices: {:?}\n", indices));
    Ok(out)
}

pub fn relationship(
    graph: &FamilyGraph,
    a: PersonId,
    b: PersonId,
    json: bool,
) -> Result<String> {
    let kinship = match relate(graph, a, b) {
        Ok(k) => k,
        Err(KinshipError::NoCommonAncestor(..)) => {
            return if json {
                pretty(&json!({ "a": a, "b": b, "label": null }))
            } else {
                Ok(format!("{}\n", NO_RELATIONSHIP))
            };
        }
        Err(e) => return Err(e.into()),
    };
    if json {
        return pretty(&serde_json::to_value(&kinship)?);
    }
    Ok(format!(
        "{} is the {} of {}\nCommon ancestor: {} (generations {} / {})\n",
        describe(graph, a),
        kinship.label,
        describe(graph, b),
        describe(graph, kinship.common_ancestor),
        kinship.generations.0,
        kinship.generations.1,
    ))
}

pub fn subtree(graph: &FamilyGraph, id: PersonId, json: bool) -> Result<String> {
    let view = graph.subtree(id)?;
    let members = view.person_ids();
    if json {
        let edges: Vec<_> = view.edges().map(|(i, e)| json!([i, e.from, e.to])).collect();
        return pretty(&json!({ "root": id, "persons": members, "edges": edges }));
    }
    let mut out = render_set(
        graph,
        &format!("Subtree of {}", describe(graph, id)),
        &members,
    );
    out.push_str(&format!("Edges: {}\n", view.edge_count()));
    Ok(out)
}

/// Replay selections through a bounded queue, then relate the final pair.
pub fn select(
    graph: &FamilyGraph,
    ids: &[PersonId],
    config: &KinConfig,
    json: bool,
) -> Result<String> {
    let mut queue = SelectionQueue::new(config.selection.max_selected);
    let mut log = Vec::new();
    for &id in ids {
        if !graph.contains(id) {
            return Err(KinshipError::UnknownNode(id).into());
        }
        let line = match queue.toggle(id) {
            SelectionChange::Selected { evicted: Some(old) } => {
                format!("select {} (evicts {})", id, old)
            }
            SelectionChange::Selected { evicted: None } => format!("select {}", id),
            SelectionChange::Deselected(old) => format!("deselect {}", old),
        };
        log.push(line);
    }

    let selected: Vec<PersonId> = queue.items().copied().collect();
    let label = match queue.pair() {
        Some((&a, &b)) => match kin_core::classify(graph, a, b) {
            Ok(label) => Some(label),
            Err(KinshipError::NoCommonAncestor(..)) => Some(NO_RELATIONSHIP.to_string()),
            Err(e) => return Err(e.into()),
        },
        None => None,
    };

    if json {
        return pretty(&json!({ "steps": log, "selected": selected, "relationship": label }));
    }
    let mut out = String::new();
    for line in &log {
        out.push_str(line);
        out.push('\n');
    }
    out.push_str(&format!("Selected: {:?}\n", selected));
    if let Some(label) = label {
        out.push_str(&format!("Relationship: {}\n", label));
    }
    Ok(out)
}

/// DOT export of the graph or a subtree, optionally highlighting the path between two persons.
pub fn export_dot(
    graph: &FamilyGraph,
    root: Option<PersonId>,
    highlight: Option<(PersonId, PersonId)>,
    config: &KinConfig,
) -> Result<String> {
    let indices = match highlight {
        Some((a, b)) => match paths::shortest_path(graph, a, b) {
            Ok(edges) => paths::edge_indices(graph, &edges),
            Err(KinshipError::NoCommonAncestor(..)) => Vec::new(),
            Err(e) => return Err(e.into()),
        },
        None => Vec::new(),
    };
    Ok(match root {
        Some(id) => export::export_subtree(&graph.subtree(id)?, &indices, &config.export),
        None => export::export_graph(graph, &indices, &config.export),
    })
}
