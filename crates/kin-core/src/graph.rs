//! Family graph data model: nodes are persons, directed edges are relationships.

use crate::error::{KinshipError, Result};
use crate::model::{Person, PersonId, Relationship, RelationshipType};
use std::collections::{BTreeSet, HashMap, VecDeque};

/// A directed edge `from → to` carrying a copy of its relationship record.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub from: PersonId,
    pub to: PersonId,
    pub relationship: Relationship,
    /// Fixed at construction from the relationship type.
    pub weight: f64,
    pub length: f64,
}

impl Edge {
    fn from_relationship(relationship: Relationship) -> Self {
        let weight = relationship.weight();
        Self {
            from: relationship.from_person_id,
            to: relationship.to_person_id,
            length: relationship.length(),
            weight,
            relationship,
        }
    }

    pub fn kind(&self) -> &RelationshipType {
        &self.relationship.relationship_type
    }

    /// `(from, to)` tuple.
    pub fn endpoints(&self) -> (PersonId, PersonId) {
        (self.from, self.to)
    }
}

/// Immutable genealogical graph built once from a batch of persons and relationships.
///
/// Nodes keep their input order. Edges are enumerated grouped by source node
/// (in node order), then by relationship insertion order; that enumeration is
/// what edge indices refer to.
#[derive(Debug, Clone)]
pub struct FamilyGraph {
    persons: Vec<Person>,
    /// person id → slot in `persons`.
    index: HashMap<PersonId, usize>,
    edges: Vec<Edge>,
    /// Per-slot outgoing edge indices, in enumeration order.
    outgoing: Vec<Vec<usize>>,
    /// Per-slot incoming edge indices, in enumeration order.
    incoming: Vec<Vec<usize>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Forward,
    Backward,
}

impl FamilyGraph {
    /// Build a graph from deep copies of `persons` and `relationships`.
    ///
    /// Fails without producing a graph when ids collide, when a relationship
    /// references an unknown person, or when parent edges form a cycle.
    pub fn new(persons: &[Person], relationships: &[Relationship]) -> Result<Self> {
        let mut index: HashMap<PersonId, usize> = HashMap::with_capacity(persons.len());
        for (slot, person) in persons.iter().enumerate() {
            if index.insert(person.person_id, slot).is_some() {
                return Err(KinshipError::DuplicatePersonId(person.person_id));
            }
        }

        // Staged as (source slot, edge); a repeated (from, to) pair overwrites in place.
        let mut staged: Vec<(usize, Edge)> = Vec::with_capacity(relationships.len());
        let mut by_pair: HashMap<(PersonId, PersonId), usize> = HashMap::new();
        for rel in relationships {
            let Some(&source_slot) = index.get(&rel.from_person_id) else {
                return Err(KinshipError::UnknownPersonReference {
                    relationship_id: rel.relationship_id,
                    person_id: rel.from_person_id,
                });
            };
            if !index.contains_key(&rel.to_person_id) {
                return Err(KinshipError::UnknownPersonReference {
                    relationship_id: rel.relationship_id,
                    person_id: rel.to_person_id,
                });
            }

            let edge = Edge::from_relationship(rel.clone());
            match by_pair.get(&edge.endpoints()) {
                Some(&pos) => staged[pos].1 = edge,
                None => {
                    by_pair.insert(edge.endpoints(), staged.len());
                    staged.push((source_slot, edge));
                }
            }
        }
        staged.sort_by_key(|(slot, _)| *slot);
        let edges = staged.into_iter().map(|(_, edge)| edge).collect();

        let graph = Self::assemble(persons.to_vec(), index, edges);
        if let Some(cycle) = graph.find_parent_cycle() {
            return Err(KinshipError::CyclicAncestry { cycle });
        }
        Ok(graph)
    }

    /// Build adjacency lists over already-validated parts.
    fn assemble(persons: Vec<Person>, index: HashMap<PersonId, usize>, edges: Vec<Edge>) -> Self {
        let mut outgoing = vec![Vec::new(); persons.len()];
        let mut incoming = vec![Vec::new(); persons.len()];
        for (i, edge) in edges.iter().enumerate() {
            outgoing[index[&edge.from]].push(i);
            incoming[index[&edge.to]].push(i);
        }
        Self {
            persons,
            index,
            edges,
            outgoing,
            incoming,
        }
    }

    /// Depth-first search over `Parent` edges only. Returns the first cycle found,
    /// in traversal order, scanning start nodes in insertion order.
    fn find_parent_cycle(&self) -> Option<Vec<PersonId>> {
        const UNVISITED: u8 = 0;
        const ON_STACK: u8 = 1;
        const DONE: u8 = 2;

        let mut state = vec![UNVISITED; self.persons.len()];
        for start in 0..self.persons.len() {
            if state[start] != UNVISITED {
                continue;
            }
            // (slot, position in its outgoing list)
            let mut stack: Vec<(usize, usize)> = vec![(start, 0)];
            state[start] = ON_STACK;

            while let Some((slot, pos)) = stack.last_mut() {
                let slot = *slot;
                let Some(&edge_idx) = self.outgoing[slot].get(*pos) else {
                    state[slot] = DONE;
                    stack.pop();
                    continue;
                };
                *pos += 1;

                let edge = &self.edges[edge_idx];
                if !edge.kind().is_parent() {
                    continue;
                }
                let next = self.index[&edge.to];
                match state[next] {
                    UNVISITED => {
                        state[next] = ON_STACK;
                        stack.push((next, 0));
                    }
                    ON_STACK => {
                        let begin = stack.iter().position(|&(s, _)| s == next).unwrap_or(0);
                        return Some(
                            stack[begin..]
                                .iter()
                                .map(|&(s, _)| self.persons[s].person_id)
                                .collect(),
                        );
                    }
                    _ => {}
                }
            }
        }
        None
    }

    pub fn len(&self) -> usize {
        self.persons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }

    pub fn contains(&self, id: PersonId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn person(&self, id: PersonId) -> Option<&Person> {
        self.index.get(&id).map(|&slot| &self.persons[slot])
    }

    /// Persons in insertion order.
    pub fn persons(&self) -> impl Iterator<Item = &Person> {
        self.persons.iter()
    }

    /// The canonical edge enumeration.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Edge between `from` and `to` in that direction, if any.
    pub fn edge(&self, from: PersonId, to: PersonId) -> Option<&Edge> {
        let slot = *self.index.get(&from)?;
        self.outgoing[slot]
            .iter()
            .map(|&i| &self.edges[i])
            .find(|e| e.to == to)
    }

    pub(crate) fn slot(&self, id: PersonId) -> Result<usize> {
        self.index
            .get(&id)
            .copied()
            .ok_or(KinshipError::UnknownNode(id))
    }

    pub(crate) fn id_at(&self, slot: usize) -> PersonId {
        self.persons[slot].person_id
    }

    /// Neighbouring `(edge index, slot)` pairs in the given direction.
    pub(crate) fn neighbors(
        &self,
        slot: usize,
        direction: Direction,
    ) -> impl Iterator<Item = (usize, usize)> + '_ {
        let list = match direction {
            Direction::Forward => &self.outgoing[slot],
            Direction::Backward => &self.incoming[slot],
        };
        list.iter().map(move |&i| {
            let edge = &self.edges[i];
            let other = match direction {
                Direction::Forward => edge.to,
                Direction::Backward => edge.from,
            };
            (i, self.index[&other])
        })
    }

    /// Slots reachable from `start` (excluding `start` itself) by breadth-first search.
    pub(crate) fn reachable(&self, start: usize, direction: Direction) -> Vec<bool> {
        let mut seen = vec![false; self.persons.len()];
        let mut queue = VecDeque::from([start]);
        while let Some(slot) = queue.pop_front() {
            for (_, next) in self.neighbors(slot, direction) {
                if !seen[next] {
                    seen[next] = true;
                    queue.push_back(next);
                }
            }
        }
        seen[start] = false;
        seen
    }

    fn collect_ids(&self, mask: &[bool]) -> BTreeSet<PersonId> {
        mask.iter()
            .enumerate()
            .filter(|&(_, &hit)| hit)
            .map(|(slot, _)| self.id_at(slot))
            .collect()
    }

    /// All nodes with a directed path to `id`, over every edge type.
    pub fn ancestors(&self, id: PersonId) -> Result<BTreeSet<PersonId>> {
        let slot = self.slot(id)?;
        Ok(self.collect_ids(&self.reachable(slot, Direction::Backward)))
    }

    /// All nodes reachable from `id`, over every edge type.
    pub fn descendants(&self, id: PersonId) -> Result<BTreeSet<PersonId>> {
        let slot = self.slot(id)?;
        Ok(self.collect_ids(&self.reachable(slot, Direction::Forward)))
    }

    /// Induced subgraph over `id` and its descendants.
    pub fn subtree(&self, id: PersonId) -> Result<SubtreeView<'_>> {
        let slot = self.slot(id)?;
        let mut members = self.reachable(slot, Direction::Forward);
        members[slot] = true;
        let edge_indices = self
            .edges
            .iter()
            .enumerate()
            .filter(|(_, e)| members[self.index[&e.from]] && members[self.index[&e.to]])
            .map(|(i, _)| i)
            .collect();
        Ok(SubtreeView {
            graph: self,
            root: id,
            members,
            edge_indices,
        })
    }
}

/// Read-only view of an induced subgraph of a [`FamilyGraph`].
#[derive(Debug, Clone)]
pub struct SubtreeView<'g> {
    graph: &'g FamilyGraph,
    root: PersonId,
    /// Membership mask indexed by parent-graph slot.
    members: Vec<bool>,
    /// Indices into the parent graph's edge enumeration.
    edge_indices: Vec<usize>,
}

impl<'g> SubtreeView<'g> {
    pub fn root(&self) -> PersonId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.members.iter().filter(|&&m| m).count()
    }

    /// Always false: the root is a member.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, id: PersonId) -> bool {
        self.graph
            .index
            .get(&id)
            .is_some_and(|&slot| self.members[slot])
    }

    pub fn person_ids(&self) -> BTreeSet<PersonId> {
        self.graph.collect_ids(&self.members)
    }

    /// Member persons in the parent graph's insertion order.
    pub fn persons(&self) -> impl Iterator<Item = &'g Person> + '_ {
        self.graph
            .persons
            .iter()
            .enumerate()
            .filter(|&(slot, _)| self.members[slot])
            .map(|(_, p)| p)
    }

    /// Member edges paired with their index in the parent graph.
    pub fn edges(&self) -> impl Iterator<Item = (usize, &'g Edge)> + '_ {
        let graph = self.graph;
        self.edge_indices.iter().map(move |&i| (i, &graph.edges[i]))
    }

    pub fn edge_count(&self) -> usize {
        self.edge_indices.len()
    }

    /// Materialize the view as an owned graph.
    pub fn to_graph(&self) -> FamilyGraph {
        let persons: Vec<Person> = self.persons().cloned().collect();
        let index = persons
            .iter()
            .enumerate()
            .map(|(slot, p)| (p.person_id, slot))
            .collect();
        let edges = self.edges().map(|(_, e)| e.clone()).collect();
        FamilyGraph::assemble(persons, index, edges)
    }
}
