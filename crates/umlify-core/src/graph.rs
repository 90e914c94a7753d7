//! Relation graph using petgraph::StableDiGraph keyed by QualifiedId

use std::collections::HashMap;

use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use crate::model::*;

/// Diagram entities and the typed relations between them.
pub struct RelationGraph {
    inner: StableDiGraph<Entity, EdgeKind>,
    by_id: HashMap<QualifiedId, NodeIndex>,
}

impl std::fmt::Debug for RelationGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelationGraph")
            .field("entity_count", &self.inner.node_count())
            .field("edge_count", &self.inner.edge_count())
            .finish()
    }
}

impl RelationGraph {
    pub fn new() -> Self {
        RelationGraph {
            inner: StableDiGraph::new(),
            by_id: HashMap::new(),
        }
    }

    /// Add an entity. Returns false, leaving the graph unchanged, if an entity
    /// with the same id is already present.
    pub fn add_entity(&mut self, entity: Entity) -> bool {
        if self.by_id.contains_key(&entity.id) {
            return false;
        }
        let id = entity.id.clone();
        let idx = self.inner.add_node(entity);
        self.by_id.insert(id, idx);
        true
    }

    /// Add an edge between two known entities. Returns false if either
    /// endpoint is missing or the same (from, to, kind) edge already exists.
    pub fn add_edge(&mut self, edge: &Edge) -> bool {
        let (Some(&from), Some(&to)) = (self.by_id.get(&edge.from), self.by_id.get(&edge.to)) else {
            return false;
        };
        if self.has_edge_between(&edge.from, &edge.to, edge.kind) {
            return false;
        }
        self.inner.add_edge(from, to, edge.kind);
        true
    }

    /// Get an entity by id.
    pub fn entity(&self, id: &QualifiedId) -> Option<&Entity> {
        self.by_id.get(id).and_then(|&idx| self.inner.node_weight(idx))
    }

    /// Total number of entities.
    pub fn entity_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Total number of edges.
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Iterate over all entities in insertion order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.inner
            .node_indices()
            .filter_map(move |idx| self.inner.node_weight(idx))
    }

    /// Iterate over all edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.inner.edge_indices().filter_map(move |idx| {
            let (from, to) = self.inner.edge_endpoints(idx)?;
            let kind = *self.inner.edge_weight(idx)?;
            Some(self.to_edge(from, to, kind))
        })
    }

    /// All edges leaving an entity.
    pub fn edges_from(&self, id: &QualifiedId) -> Vec<Edge> {
        self.edges_directed(id, Direction::Outgoing)
    }

    /// All edges arriving at an entity.
    pub fn edges_to(&self, id: &QualifiedId) -> Vec<Edge> {
        self.edges_directed(id, Direction::Incoming)
    }

    /// Check if an edge of a specific kind exists between two entities.
    pub fn has_edge_between(&self, from: &QualifiedId, to: &QualifiedId, kind: EdgeKind) -> bool {
        let (Some(&from), Some(&to)) = (self.by_id.get(from), self.by_id.get(to)) else {
            return false;
        };
        self.inner
            .edges_directed(from, Direction::Outgoing)
            .any(|e| e.target() == to && *e.weight() == kind)
    }

    /// Get all entities of a specific kind.
    pub fn entities_of_kind(&self, kind: EntityKind) -> impl Iterator<Item = &Entity> + '_ {
        self.entities().filter(move |e| e.kind == kind)
    }

    fn edges_directed(&self, id: &QualifiedId, direction: Direction) -> Vec<Edge> {
        let Some(&idx) = self.by_id.get(id) else {
            return Vec::new();
        };
        self.inner
            .edges_directed(idx, direction)
            .map(|e| self.to_edge(e.source(), e.target(), *e.weight()))
            .collect()
    }

    fn to_edge(&self, from: NodeIndex, to: NodeIndex, kind: EdgeKind) -> Edge {
        Edge {
            from: self.inner[from].id.clone(),
            to: self.inner[to].id.clone(),
            kind,
        }
    }
}

impl Default for RelationGraph {
    fn default() -> Self {
        Self::new()
    }
}
