//! Core graph engine for genealogical kinship queries.
//!
//! Builds an immutable [`graph::FamilyGraph`] from [`model::Person`] and
//! [`model::Relationship`] records, then answers ancestry queries, lowest
//! common ancestor lookups, LCA-routed paths, and kinship labels
//! ("sibling", "1x cousins, 2x removed", ...).

pub mod error;
pub mod graph;
pub mod kinship;
pub mod lca;
pub mod model;
pub mod paths;
pub mod selection;

pub use error::{KinshipError, Result};
pub use graph::{Edge, FamilyGraph, SubtreeView};
pub use kinship::{Kinship, classify, relate};
pub use model::{Person, PersonId, Relationship, RelationshipId, RelationshipType};
