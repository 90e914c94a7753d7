//! Existence index of locally declared types

use std::collections::HashSet;

use dashmap::DashSet;
use rayon::prelude::*;

use crate::model::{DeclarationSet, QualifiedId};

/// Registration side of the index. Thread-safe so several declaration sets can
/// be scanned concurrently; call [`IndexBuilder::finish`] before deriving any edge.
pub struct IndexBuilder {
    ids: DashSet<QualifiedId>,
}

impl IndexBuilder {
    pub fn new() -> Self {
        IndexBuilder { ids: DashSet::new() }
    }

    /// Register one id. Returns false if it was already present.
    pub fn register(&self, id: QualifiedId) -> bool {
        self.ids.insert(id)
    }

    /// Register every type declared in `set`.
    pub fn register_set(&self, set: &DeclarationSet) {
        for decl in &set.types {
            if !self.register(decl.id.clone()) {
                tracing::trace!(id = %decl.id, "type registered twice");
            }
        }
    }

    /// Freeze into the immutable index.
    pub fn finish(self) -> ExistenceIndex {
        ExistenceIndex {
            ids: self.ids.into_iter().collect(),
        }
    }
}

impl Default for IndexBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Set of qualified ids of all locally declared types. Gates edge creation.
#[derive(Debug, Clone, Default)]
pub struct ExistenceIndex {
    ids: HashSet<QualifiedId>,
}

impl ExistenceIndex {
    /// Scan all sets in parallel and freeze the result.
    pub fn build(sets: &[DeclarationSet]) -> Self {
        let builder = IndexBuilder::new();
        sets.par_iter().for_each(|set| builder.register_set(set));
        let index = builder.finish();
        tracing::debug!(types = index.len(), sets = sets.len(), "existence index built");
        index
    }

    pub fn contains(&self, id: &QualifiedId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl FromIterator<QualifiedId> for ExistenceIndex {
    fn from_iter<I: IntoIterator<Item = QualifiedId>>(iter: I) -> Self {
        ExistenceIndex {
            ids: iter.into_iter().collect(),
        }
    }
}
