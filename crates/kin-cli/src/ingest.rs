//! Load person and relationship records from JSON or CSV and build the graph.

use crate::config::IngestConfig;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use kin_core::graph::FamilyGraph;
use kin_core::model::{Person, PersonId, Relationship, RelationshipId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Where the family records come from.
#[derive(Debug, Clone)]
pub enum Source {
    /// A single JSON file with `people` and `relationships` arrays.
    Json(PathBuf),
    /// A people CSV and a relationships CSV.
    Csv {
        people: PathBuf,
        relationships: PathBuf,
    },
}

/// Parsed records, ready for graph construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FamilyRecords {
    #[serde(default)]
    pub people: Vec<Person>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

/// One row of the people spreadsheet.
#[derive(Debug, Deserialize)]
struct PersonRow {
    #[serde(rename = "PersonId")]
    person_id: PersonId,
    #[serde(rename = "First Name", default)]
    first_name: Option<String>,
    #[serde(rename = "Middle Name", default)]
    middle_name: Option<String>,
    #[serde(rename = "Last Name", default)]
    last_name: Option<String>,
    #[serde(rename = "Suffix", default)]
    suffix: Option<String>,
    #[serde(rename = "Nickname", default)]
    nickname: Option<String>,
    #[serde(rename = "DOB", default)]
    dob: Option<String>,
    #[serde(rename = "Gender", default)]
    gender: Option<String>,
    #[serde(rename = "Maiden Name", default)]
    maiden_name: Option<String>,
    #[serde(rename = "Description", default)]
    description: Option<String>,
}

/// One row of the relationships spreadsheet.
#[derive(Debug, Deserialize)]
struct RelationshipRow {
    #[serde(rename = "RelationshipId")]
    relationship_id: RelationshipId,
    #[serde(rename = "Id1")]
    from: PersonId,
    #[serde(rename = "Id2")]
    to: PersonId,
    #[serde(rename = "Relationship")]
    kind: String,
}

/// Parse a date of birth in `YYYY-MM-DD` or `MM/DD/YYYY` form.
pub fn parse_dob(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    ["%Y-%m-%d", "%m/%d/%Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

impl PersonRow {
    fn into_person(self) -> Person {
        let dob = self.dob.as_deref().and_then(|raw| {
            let parsed = parse_dob(raw);
            if parsed.is_none() {
                warn!(person_id = self.person_id, dob = raw, "unparseable DOB, ignoring");
            }
            parsed
        });
        Person {
            person_id: self.person_id,
            first_name: self.first_name,
            middle_name: self.middle_name,
            last_name: self.last_name,
            suffix: self.suffix,
            nickname: self.nickname,
            maiden_name: self.maiden_name,
            dob,
            gender: self.gender,
            description: self.description,
        }
    }
}

pub fn read_people_csv<R: Read>(reader: R) -> Result<Vec<Person>> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut people = Vec::new();
    for (idx, row) in reader.deserialize::<PersonRow>().enumerate() {
        let row = row.with_context(|| format!("failed to read people row {}", idx + 1))?;
        people.push(row.into_person());
    }
    Ok(people)
}

pub fn read_relationships_csv<R: Read>(reader: R) -> Result<Vec<Relationship>> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut relationships = Vec::new();
    for (idx, row) in reader.deserialize::<RelationshipRow>().enumerate() {
        let row: RelationshipRow =
            row.with_context(|| format!("failed to read relationship row {}", idx + 1))?;
        relationships.push(Relationship::new(
            row.relationship_id,
            row.from,
            row.to,
            row.kind.trim(),
        ));
    }
    Ok(relationships)
}

pub fn read_json<R: Read>(reader: R) -> Result<FamilyRecords> {
    serde_json::from_reader(reader).context("failed to parse family JSON")
}

fn open(path: &Path) -> Result<std::io::BufReader<std::fs::File>> {
    let file =
        std::fs::File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    Ok(std::io::BufReader::new(file))
}

/// Read raw records from `source` without filtering.
pub fn read_source(source: &Source) -> Result<FamilyRecords> {
    match source {
        Source::Json(path) => {
            read_json(open(path)?).with_context(|| format!("in {}", path.display()))
        }
        Source::Csv {
            people,
            relationships,
        } => Ok(FamilyRecords {
            people: read_people_csv(open(people)?)
                .with_context(|| format!("in {}", people.display()))?,
            relationships: read_relationships_csv(open(relationships)?)
                .with_context(|| format!("in {}", relationships.display()))?,
        }),
    }
}

/// Drop relationship types listed in the ingest config, and optionally the
/// persons they point at.
pub fn apply_filters(records: FamilyRecords, config: &IngestConfig) -> FamilyRecords {
    let skip: HashSet<&str> = config
        .skip_relationship_types
        .iter()
        .map(String::as_str)
        .collect();

    let (skipped, mut relationships): (Vec<Relationship>, Vec<Relationship>) = records
        .relationships
        .into_iter()
        .partition(|r| skip.contains(r.relationship_type.as_str()));

    for rel in &skipped {
        debug!(
            relationship_id = rel.relationship_id,
            kind = %rel.relationship_type,
            "skipping relationship"
        );
    }

    let mut people = records.people;
    if config.drop_skipped_targets && !skipped.is_empty() {
        let targets: HashSet<PersonId> = skipped.iter().map(|r| r.to_person_id).collect();
        let before = people.len();
        people.retain(|p| !targets.contains(&p.person_id));
        // Relationships touching a dropped person would dangle.
        relationships.retain(|r| {
            !targets.contains(&r.from_person_id) && !targets.contains(&r.to_person_id)
        });
        debug!(dropped = before - people.len(), "dropped skipped-relationship targets");
    }

    FamilyRecords {
        people,
        relationships,
    }
}

/// Read, filter, and build the graph.
pub fn load_graph(source: &Source, config: &IngestConfig) -> Result<FamilyGraph> {
    let raw = read_source(source)?;
    let raw_relationships = raw.relationships.len();
    let records = apply_filters(raw, config);
    info!(
        people = records.people.len(),
        relationships = records.relationships.len(),
        skipped = raw_relationships - records.relationships.len(),
        "loaded family records"
    );
    FamilyGraph::new(&records.people, &records.relationships)
        .context("failed to build family graph")
}
