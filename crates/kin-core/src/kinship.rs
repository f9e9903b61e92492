//! Kinship classification: turns generation counts to the lowest common
//! ancestor into a human-readable label.
//!
//! The label describes the first node relative to the second, so
//! `classify(parent, child)` is `"parent"` and `classify(child, parent)` is
//! `"child"`.
//!
//! | gens_1 \ gens_2 | 0          | 1            | 2           |
//! |-----------------|------------|--------------|-------------|
//! | 0               | self       | parent       | grandparent |
//! | 1               | child      | sibling      | aunt/uncle  |
//! | 2               | grandchild | niece/nephew | cousin      |
//!
//! Larger gaps prepend `grand` to collateral cells and `{n}x great-` once the
//! gap exceeds two. When both nodes are more than one generation below the
//! common ancestor the pair are cousins: `"{level}x cousins, {removed}x removed"`.
//!
//! Spouse edges do not add a generation, so two distinct persons joined only
//! by spouse edges land on cell `(0, 0)`; they are labelled [`SPOUSE_LABEL`]
//! rather than `self`.

use crate::error::{KinshipError, Result};
use crate::graph::FamilyGraph;
use crate::lca::{generations, lowest_common_ancestor};
use crate::model::PersonId;
use crate::paths::shortest_path;
use serde::Serialize;

/// Base labels indexed by `[min(gens_1, 2)][min(gens_2, 2)]`.
pub const RELATIONSHIP_MATRIX: [[&str; 3]; 3] = [
    ["self", "parent", "grandparent"],
    ["child", "sibling", "aunt/uncle"],
    ["grandchild", "niece/nephew", "cousin"],
];

/// Label for two distinct persons in the same generation as their common
/// ancestor, reached only through spouse edges.
pub const SPOUSE_LABEL: &str = "spouse";

/// Label for a pair whose generation distances to their common ancestor
/// are `gens_1` and `gens_2`.
pub fn label(gens_1: usize, gens_2: usize) -> String {
    let nearest = gens_1.min(gens_2);
    let gap = gens_1.abs_diff(gens_2);

    if nearest > 1 {
        return format!("{}x cousins, {}x removed", nearest - 1, gap);
    }

    let mut out = String::new();
    if gap > 2 {
        out.push_str(&format!("{}x great-", gap - 2));
    }
    // Direct-line cells (row or column 0) already carry the "grand".
    if gap > 1 && nearest > 0 {
        out.push_str("grand");
    }
    out.push_str(RELATIONSHIP_MATRIX[gens_1.min(2)][gens_2.min(2)]);
    out
}

/// Generation distances of `a` and `b` below their lowest common ancestor.
fn generation_pair(
    graph: &FamilyGraph,
    a: PersonId,
    b: PersonId,
) -> Result<(PersonId, usize, usize)> {
    let lca = lowest_common_ancestor(graph, a, b)?;
    let missing = || KinshipError::NoCommonAncestor(a, b);
    let gens_1 = generations(graph, lca, a)?.ok_or_else(missing)?;
    let gens_2 = generations(graph, lca, b)?.ok_or_else(missing)?;
    Ok((lca, gens_1, gens_2))
}

fn pair_label(a: PersonId, b: PersonId, gens_1: usize, gens_2: usize) -> String {
    if a != b && gens_1 == 0 && gens_2 == 0 {
        return SPOUSE_LABEL.to_string();
    }
    label(gens_1, gens_2)
}

/// Kinship label of `a` relative to `b`.
pub fn classify(graph: &FamilyGraph, a: PersonId, b: PersonId) -> Result<String> {
    let (_, gens_1, gens_2) = generation_pair(graph, a, b)?;
    Ok(pair_label(a, b, gens_1, gens_2))
}

/// Everything known about how two persons are related.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Kinship {
    pub from: PersonId,
    pub to: PersonId,
    pub common_ancestor: PersonId,
    pub generations: (usize, usize),
    pub label: String,
    /// Edges from `from` through the common ancestor to `to`.
    pub path: Vec<(PersonId, PersonId)>,
}

pub fn relate(graph: &FamilyGraph, a: PersonId, b: PersonId) -> Result<Kinship> {
    let (lca, gens_1, gens_2) = generation_pair(graph, a, b)?;
    Ok(Kinship {
        from: a,
        to: b,
        common_ancestor: lca,
        generations: (gens_1, gens_2),
        label: pair_label(a, b, gens_1, gens_2),
        path: shortest_path(graph, a, b)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_line_labels() {
        assert_eq!(label(0, 0), "self");
        assert_eq!(label(0, 1), "parent");
        assert_eq!(label(0, 2), "grandparent");
        assert_eq!(label(0, 3), "1x great-grandparent");
        assert_eq!(label(0, 5), "3x great-grandparent");
        assert_eq!(label(1, 0), "child");
        assert_eq!(label(2, 0), "grandchild");
        assert_eq!(label(4, 0), "2x great-grandchild");
    }

    #[test]
    fn test_collateral_labels() {
        assert_eq!(label(1, 1), "sibling");
        assert_eq!(label(1, 2), "aunt/uncle");
        assert_eq!(label(1, 3), "grandaunt/uncle");
        assert_eq!(label(1, 4), "1x great-grandaunt/uncle");
        assert_eq!(label(2, 1), "niece/nephew");
        assert_eq!(label(3, 1), "grandniece/nephew");
    }

    #[test]
    fn test_same_generation_distinct_pair_is_spouse() {
        assert_eq!(pair_label(1, 2, 0, 0), SPOUSE_LABEL);
        assert_eq!(pair_label(2, 2, 0, 0), "self");
        assert_eq!(pair_label(1, 2, 1, 1), "sibling");
    }

    #[test]
    fn test_cousin_labels() {
        assert_eq!(label(2, 2), "1x cousins, 0x removed");
        assert_eq!(label(2, 4), "1x cousins, 2x removed");
        assert_eq!(label(4, 3), "2x cousins, 1x removed");
    }
}
