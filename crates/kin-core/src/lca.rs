//! Lowest common ancestor and generation distance over the family graph.

use crate::error::{KinshipError, Result};
use crate::graph::{Direction, FamilyGraph};
use crate::model::PersonId;
use std::collections::VecDeque;

/// Hop distances from every slot to `target`, following edges backward.
/// `target` itself is at distance 0; unreachable slots are `None`.
fn distances_to(graph: &FamilyGraph, target: usize) -> Vec<Option<usize>> {
    let mut dist = vec![None; graph.len()];
    dist[target] = Some(0);
    let mut queue = VecDeque::from([target]);
    while let Some(slot) = queue.pop_front() {
        let next_dist = dist[slot].map(|d| d + 1);
        for (_, prev) in graph.neighbors(slot, Direction::Backward) {
            if dist[prev].is_none() {
                dist[prev] = next_dist;
                queue.push_back(prev);
            }
        }
    }
    dist
}

fn ancestor_count(dist: &[Option<usize>]) -> usize {
    dist.iter().flatten().count().saturating_sub(1)
}

/// Lowest common ancestor of `a` and `b`.
///
/// A node counts as its own ancestor, so `lca(n, n) == n` and an ancestor of
/// the other node is the answer. When several lowest candidates exist (for
/// example both parents of two siblings, with no spouse edge between them) the
/// one closest to both nodes wins, then the smallest id.
///
/// Before the lookup the pair is put in call order, the node with fewer
/// ancestors first (ties keep input order). Every later step is symmetric in
/// the two nodes, so the order never changes the answer: `lca(a, b)` and
/// `lca(b, a)` agree, and a `NoCommonAncestor` error names `a` and `b` as given.
pub fn lowest_common_ancestor(graph: &FamilyGraph, a: PersonId, b: PersonId) -> Result<PersonId> {
    let slot_a = graph.slot(a)?;
    let slot_b = graph.slot(b)?;

    let dist_a = distances_to(graph, slot_a);
    let dist_b = distances_to(graph, slot_b);

    // Normalize call order: the node with fewer ancestors goes first; ties keep input order.
    let (first, second) = if ancestor_count(&dist_b) < ancestor_count(&dist_a) {
        (&dist_b, &dist_a)
    } else {
        (&dist_a, &dist_b)
    };

    let common: Vec<(usize, usize)> = first
        .iter()
        .zip(second.iter())
        .enumerate()
        .filter_map(|(slot, (d1, d2))| Some((slot, (*d1)? + (*d2)?)))
        .collect();
    if common.is_empty() {
        return Err(KinshipError::NoCommonAncestor(a, b));
    }

    let is_common = |slot: usize| first[slot].is_some() && second[slot].is_some();
    // The common set is closed under ancestry, so a common ancestor is lowest
    // exactly when none of its direct successors is common.
    let lowest: Vec<(usize, usize)> = common
        .iter()
        .copied()
        .filter(|&(slot, _)| {
            !graph
                .neighbors(slot, Direction::Forward)
                .any(|(_, next)| next != slot && is_common(next))
        })
        .collect();
    // Only empty when every common ancestor sits on a directed (spouse) cycle.
    let candidates = if lowest.is_empty() { &common } else { &lowest };

    candidates
        .iter()
        .map(|&(slot, total)| (total, graph.id_at(slot)))
        .min()
        .map(|(_, id)| id)
        .ok_or(KinshipError::NoCommonAncestor(a, b))
}

/// Number of generations from `ancestor` down to `descendant`.
///
/// Each non-spouse edge on the way counts as one generation; spouse edges stay
/// within a generation. Returns `None` when `descendant` is not reachable.
pub fn generations(
    graph: &FamilyGraph,
    ancestor: PersonId,
    descendant: PersonId,
) -> Result<Option<usize>> {
    let start = graph.slot(ancestor)?;
    let target = graph.slot(descendant)?;

    // 0-1 BFS: spouse hops go to the front of the deque.
    let mut dist: Vec<Option<usize>> = vec![None; graph.len()];
    dist[start] = Some(0);
    let mut deque = VecDeque::from([start]);
    while let Some(slot) = deque.pop_front() {
        let Some(here) = dist[slot] else { continue };
        if slot == target {
            return Ok(Some(here));
        }
        for (edge_idx, next) in graph.neighbors(slot, Direction::Forward) {
            let cost = usize::from(!graph.edges()[edge_idx].kind().is_spouse());
            let candidate = here + cost;
            if dist[next].is_none_or(|d| candidate < d) {
                dist[next] = Some(candidate);
                if cost == 0 {
                    deque.push_front(next);
                } else {
                    deque.push_back(next);
                }
            }
        }
    }
    Ok(dist[target])
}
