//! Snapshot assembly across declaration sets
//!
//! Each declaration set is built independently (in parallel when there are
//! several). Finished partial models are handed to the [`Assembler`], whose
//! single lock is the only shared mutable state. Once every set is in,
//! [`Assembler::finish`] computes implements edges over all entities and
//! freezes the result into a [`Snapshot`].

use std::collections::{BTreeSet, HashSet};
use std::sync::Mutex;
use std::time::Instant;

use rayon::prelude::*;

use crate::builder::{MethodSet, ModelBuilder, PartialModel};
use crate::error::{CoreError, Result};
use crate::graph::RelationGraph;
use crate::index::ExistenceIndex;
use crate::model::*;
use crate::notes::merge_notes;
use crate::relations;

/// Collects partial models from concurrent builders.
pub struct Assembler {
    index: ExistenceIndex,
    parts: Mutex<Vec<(usize, PartialModel)>>,
}

impl Assembler {
    pub fn new(index: ExistenceIndex) -> Self {
        Assembler {
            index,
            parts: Mutex::new(Vec::new()),
        }
    }

    pub fn index(&self) -> &ExistenceIndex {
        &self.index
    }

    /// Hand in the model built for the set at position `order`. The position
    /// decides precedence between duplicate declarations, not arrival time.
    pub fn submit(&self, order: usize, part: PartialModel) -> Result<()> {
        let mut parts = self.parts.lock().map_err(|_| CoreError::Poisoned)?;
        parts.push((order, part));
        Ok(())
    }

    /// Merge all submitted parts, add implements edges and freeze.
    pub fn finish(self) -> Result<Snapshot> {
        let start = Instant::now();
        let mut parts = self.parts.into_inner().map_err(|_| CoreError::Poisoned)?;
        parts.sort_by_key(|(order, _)| *order);

        let mut seen = HashSet::new();
        let mut seen_sets = HashSet::new();
        let mut entities = Vec::new();
        let mut method_sets: Vec<MethodSet> = Vec::new();
        let mut edges = BTreeSet::new();
        let mut notes = Vec::new();

        for (_, part) in parts {
            // Ids whose declaration this part contributed; edges of skipped
            // duplicates go with them.
            let mut kept = HashSet::new();
            for entity in part.entities {
                if seen.insert(entity.id.clone()) {
                    kept.insert(entity.id.clone());
                    entities.push(entity);
                } else {
                    tracing::warn!(id = %entity.id, "duplicate type declaration skipped");
                }
            }
            for set in part.method_sets {
                if kept.contains(&set.id) && seen_sets.insert(set.id.clone()) {
                    method_sets.push(set);
                }
            }
            edges.extend(part.edges.into_iter().filter(|e| kept.contains(&e.from)));
            notes.extend(part.notes);
        }

        edges.extend(relations::implements(&method_sets));
        entities.sort_by(|a, b| a.id.cmp(&b.id));

        let mut graph = RelationGraph::new();
        for entity in entities {
            graph.add_entity(entity);
        }
        for edge in &edges {
            if !graph.add_edge(edge) {
                tracing::trace!(from = %edge.from, to = %edge.to, "edge endpoint has no entity");
            }
        }

        let snapshot = Snapshot {
            graph,
            notes: merge_notes(notes),
        };
        tracing::debug!(
            entities = snapshot.graph.entity_count(),
            edges = snapshot.graph.edge_count(),
            notes = snapshot.notes.len(),
            ms = start.elapsed().as_millis() as u64,
            "snapshot assembled"
        );
        Ok(snapshot)
    }
}

/// Immutable result of a build: entities, edges and notes, in a stable order.
#[derive(Debug)]
pub struct Snapshot {
    graph: RelationGraph,
    notes: Vec<Note>,
}

impl Snapshot {
    pub fn graph(&self) -> &RelationGraph {
        &self.graph
    }

    /// Entities ordered by qualified id.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.graph.entities()
    }

    /// Containment, composition, use and return edges.
    pub fn relations(&self) -> impl Iterator<Item = Edge> + '_ {
        self.graph.edges().filter(|e| e.kind != EdgeKind::Implements)
    }

    /// Implements edges.
    pub fn implementations(&self) -> impl Iterator<Item = Edge> + '_ {
        self.graph.edges().filter(|e| e.kind == EdgeKind::Implements)
    }

    /// Notes ordered by owner id.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }
}

/// Build one snapshot from any number of declaration sets.
pub fn build_snapshot(sets: &[DeclarationSet]) -> Result<Snapshot> {
    let index = ExistenceIndex::build(sets);
    let assembler = Assembler::new(index);

    sets.par_iter().enumerate().try_for_each(|(order, set)| {
        let part = ModelBuilder::new(assembler.index()).build(set);
        assembler.submit(order, part)
    })?;

    assembler.finish()
}
