//! Paths through the common ancestor, and their translation to edge indices.

use crate::error::{KinshipError, Result};
use crate::graph::{Direction, FamilyGraph};
use crate::lca::lowest_common_ancestor;
use crate::model::PersonId;
use std::collections::{HashSet, VecDeque};

/// Shortest forward path (in hops) from `source` to `target`, as slots.
/// Neighbours are explored in edge enumeration order, so the result is deterministic.
fn bfs_path(graph: &FamilyGraph, source: usize, target: usize) -> Option<Vec<usize>> {
    let mut came_from: Vec<Option<usize>> = vec![None; graph.len()];
    let mut visited = vec![false; graph.len()];
    visited[source] = true;
    let mut queue = VecDeque::from([source]);

    while let Some(slot) = queue.pop_front() {
        if slot == target {
            let mut path = vec![target];
            let mut cur = target;
            while let Some(prev) = came_from[cur] {
                path.push(prev);
                cur = prev;
            }
            path.reverse();
            return Some(path);
        }
        for (_, next) in graph.neighbors(slot, Direction::Forward) {
            if !visited[next] {
                visited[next] = true;
                came_from[next] = Some(slot);
                queue.push_back(next);
            }
        }
    }
    None
}

/// Consecutive `(from, to)` pairs along a node sequence.
pub fn edges_from_nodes(nodes: &[PersonId]) -> Vec<(PersonId, PersonId)> {
    nodes.windows(2).map(|w| (w[0], w[1])).collect()
}

/// Node sequence from `a` up to the common ancestor and back down to `b`.
pub fn path_nodes(graph: &FamilyGraph, a: PersonId, b: PersonId) -> Result<Vec<PersonId>> {
    let lca = lowest_common_ancestor(graph, a, b)?;
    let root = graph.slot(lca)?;

    let unreachable = || KinshipError::NoCommonAncestor(a, b);
    let mut up = bfs_path(graph, root, graph.slot(a)?).ok_or_else(unreachable)?;
    let down = bfs_path(graph, root, graph.slot(b)?).ok_or_else(unreachable)?;

    // a … lca reversed, minus the lca itself, then lca … b.
    up.reverse();
    up.pop();
    up.extend(down);
    Ok(up.into_iter().map(|slot| graph.id_at(slot)).collect())
}

/// Edges connecting `a` and `b` through their lowest common ancestor.
///
/// The route is deliberately not a general shortest path: it always climbs
/// from `a` to the common ancestor and descends to `b`. Pairs on the climbing
/// half run against the stored edge direction.
pub fn shortest_path(
    graph: &FamilyGraph,
    a: PersonId,
    b: PersonId,
) -> Result<Vec<(PersonId, PersonId)>> {
    Ok(edges_from_nodes(&path_nodes(graph, a, b)?))
}

/// Positions within [`FamilyGraph::edges`] of the edges named by `path`.
///
/// A pair also matches the edge stored in the opposite direction. Indices come
/// back in enumeration order, each at most once.
pub fn edge_indices(graph: &FamilyGraph, path: &[(PersonId, PersonId)]) -> Vec<usize> {
    let wanted: HashSet<(PersonId, PersonId)> = path.iter().copied().collect();
    graph
        .edges()
        .iter()
        .enumerate()
        .filter(|(_, e)| wanted.contains(&(e.from, e.to)) || wanted.contains(&(e.to, e.from)))
        .map(|(i, _)| i)
        .collect()
}
