//! Error taxonomy for graph construction and queries.

use crate::model::{PersonId, RelationshipId};

/// Errors raised while building or querying a [`FamilyGraph`](crate::graph::FamilyGraph).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KinshipError {
    /// Two input persons share the same id.
    #[error("duplicate person id {0}")]
    DuplicatePersonId(PersonId),

    /// A relationship names a person that is not part of the input batch.
    #[error("relationship {relationship_id} references unknown person {person_id}")]
    UnknownPersonReference {
        relationship_id: RelationshipId,
        person_id: PersonId,
    },

    /// Parent edges form a directed cycle, so ancestry is not well-founded.
    #[error("parent relationships form a cycle: {}", format_cycle(.cycle))]
    CyclicAncestry { cycle: Vec<PersonId> },

    /// A query named a node that is not in the graph.
    #[error("unknown node {0}")]
    UnknownNode(PersonId),

    /// The two nodes share no ancestor; there is no defined kinship.
    #[error("no common ancestor between {0} and {1}")]
    NoCommonAncestor(PersonId, PersonId),
}

pub type Result<T> = std::result::Result<T, KinshipError>;

/// Render a cycle as "1 → 2 → 3 → 1".
fn format_cycle(cycle: &[PersonId]) -> String {
    let Some(first) = cycle.first() else {
        return String::new();
    };
    let mut parts: Vec<String> = cycle.iter().map(ToString::to_string).collect();
    parts.push(first.to_string());
    parts.join(" → ")
}
