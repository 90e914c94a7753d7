//! Constant groups rendered as notes on their owning type

use std::collections::{BTreeMap, BTreeSet};

use crate::index::ExistenceIndex;
use crate::model::{ConstDecl, Note, QualifiedId};

/// Groups constants by owning type. Constants without an owner, or whose
/// owner is not locally declared, are ignored.
pub struct NoteCollector<'a> {
    index: &'a ExistenceIndex,
    groups: BTreeMap<QualifiedId, BTreeSet<String>>,
}

impl<'a> NoteCollector<'a> {
    pub fn new(index: &'a ExistenceIndex) -> Self {
        NoteCollector {
            index,
            groups: BTreeMap::new(),
        }
    }

    /// Returns whether the constant was kept.
    pub fn add(&mut self, constant: &ConstDecl) -> bool {
        let Some(owner) = &constant.owner else {
            return false;
        };
        if !self.index.contains(owner) {
            return false;
        }
        self.groups
            .entry(owner.clone())
            .or_default()
            .insert(constant.name.clone());
        true
    }

    /// One note per owner, ordered by owner id.
    pub fn finish(self) -> Vec<Note> {
        self.groups
            .into_iter()
            .map(|(owner, constants)| Note {
                owner,
                constants: constants.into_iter().collect(),
            })
            .collect()
    }
}

/// Fold notes for the same owner coming from different declaration sets.
pub fn merge_notes(notes: impl IntoIterator<Item = Note>) -> Vec<Note> {
    let mut groups: BTreeMap<QualifiedId, BTreeSet<String>> = BTreeMap::new();
    for note in notes {
        groups.entry(note.owner).or_default().extend(note.constants);
    }
    groups
        .into_iter()
        .map(|(owner, constants)| Note {
            owner,
            constants: constants.into_iter().collect(),
        })
        .collect()
}
