//! Umlify Core — declaration model, existence index and relation graph

pub mod model;
pub mod index;
pub mod builder;
pub mod relations;
pub mod notes;
pub mod graph;
pub mod assembly;
pub mod error;


#[cfg(test)]
pub mod test_utils;

pub use model::{QualifiedId, TypeRef, Param, Signature, FieldDecl, MethodDecl, Shape, TypeDecl, ConstDecl, DeclarationSet, EntityKind, Field, Method, Entity, EdgeKind, Edge, Note, NOTE_FRAME_PREFIX};
pub use index::{ExistenceIndex, IndexBuilder};
pub use builder::{ModelBuilder, PartialModel, MethodSet};
pub use notes::NoteCollector;
pub use graph::RelationGraph;
pub use assembly::{Assembler, Snapshot, build_snapshot};
pub use error::CoreError;
