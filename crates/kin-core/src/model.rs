//! Entity model: persons (graph nodes) and typed relationships (graph edges).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable, unique identifier of a person. Used as the graph vertex key.
pub type PersonId = u64;

/// Identifier of a relationship record.
pub type RelationshipId = u64;

/// Edge weight for `Parent` relationships.
pub const PARENT_WEIGHT: f64 = 2.0;
/// Edge weight for `Spouse` relationships.
pub const SPOUSE_WEIGHT: f64 = 0.25;
/// Edge weight for any other relationship type.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// A person in the family graph. All descriptive fields are optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub person_id: PersonId,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub middle_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub suffix: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub maiden_name: Option<String>,
    #[serde(default)]
    pub dob: Option<NaiveDate>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Person {
    /// Create a person with only an id.
    pub fn new(person_id: PersonId) -> Self {
        Self {
            person_id,
            first_name: None,
            middle_name: None,
            last_name: None,
            suffix: None,
            nickname: None,
            maiden_name: None,
            dob: None,
            gender: None,
            description: None,
        }
    }

    /// Create a person with a first and last name.
    pub fn named(
        person_id: PersonId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            first_name: Some(first_name.into()),
            last_name: Some(last_name.into()),
            ..Self::new(person_id)
        }
    }

    /// Human-readable name: first, middle, last and suffix joined by spaces.
    /// Falls back to the nickname, then to `#<id>`.
    pub fn display_name(&self) -> String {
        let parts: Vec<&str> = [
            &self.first_name,
            &self.middle_name,
            &self.last_name,
            &self.suffix,
        ]
        .into_iter()
        .filter_map(|p| p.as_deref())
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

        if !parts.is_empty() {
            return parts.join(" ");
        }
        match self.nickname.as_deref().map(str::trim) {
            Some(nick) if !nick.is_empty() => nick.to_string(),
            _ => format!("#{}", self.person_id),
        }
    }
}

/// The type of a relationship. Open enumeration: unknown types are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RelationshipType {
    /// Points from parent to child.
    Parent,
    Spouse,
    Other(String),
}

impl RelationshipType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Parent => "Parent",
            Self::Spouse => "Spouse",
            Self::Other(s) => s,
        }
    }

    /// Fixed type → weight table.
    pub fn weight(&self) -> f64 {
        match self {
            Self::Parent => PARENT_WEIGHT,
            Self::Spouse => SPOUSE_WEIGHT,
            Self::Other(_) => DEFAULT_WEIGHT,
        }
    }

    pub fn is_parent(&self) -> bool {
        matches!(self, Self::Parent)
    }

    pub fn is_spouse(&self) -> bool {
        matches!(self, Self::Spouse)
    }
}

impl From<String> for RelationshipType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Parent" => Self::Parent,
            "Spouse" => Self::Spouse,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for RelationshipType {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<RelationshipType> for String {
    fn from(t: RelationshipType) -> Self {
        match t {
            RelationshipType::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directed, typed relationship between two persons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    pub relationship_id: RelationshipId,
    pub from_person_id: PersonId,
    pub to_person_id: PersonId,
    pub relationship_type: RelationshipType,
}

impl Relationship {
    pub fn new(
        relationship_id: RelationshipId,
        from_person_id: PersonId,
        to_person_id: PersonId,
        relationship_type: impl Into<RelationshipType>,
    ) -> Self {
        Self {
            relationship_id,
            from_person_id,
            to_person_id,
            relationship_type: relationship_type.into(),
        }
    }

    /// `parent` → `child` relationship.
    pub fn parent(relationship_id: RelationshipId, parent: PersonId, child: PersonId) -> Self {
        Self::new(relationship_id, parent, child, RelationshipType::Parent)
    }

    pub fn spouse(relationship_id: RelationshipId, from: PersonId, to: PersonId) -> Self {
        Self::new(relationship_id, from, to, RelationshipType::Spouse)
    }

    pub fn weight(&self) -> f64 {
        self.relationship_type.weight()
    }

    /// Layout length hint; always equal to the weight.
    pub fn length(&self) -> f64 {
        self.weight()
    }
}
