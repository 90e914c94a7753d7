//! Model builder: declarations to entities
//!
//! One [`ModelBuilder`] handles one declaration set. It classifies each type,
//! collects its members, derives its outgoing edges against the shared
//! [`ExistenceIndex`] and groups the set's constants into notes. The result is
//! a [`PartialModel`]; implements edges need every entity and are computed by
//! the [`Assembler`](crate::assembly::Assembler).

use std::time::Instant;

use crate::index::ExistenceIndex;
use crate::model::*;
use crate::notes::NoteCollector;
use crate::relations;

/// Entities, edges and notes of a single declaration set.
#[derive(Debug, Clone, Default)]
pub struct PartialModel {
    pub entities: Vec<Entity>,
    pub edges: Vec<Edge>,
    pub notes: Vec<Note>,
    /// Interface method sets, kept for the implements pass.
    pub method_sets: Vec<MethodSet>,
}

/// Methods a type offers, as seen by the implements check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSet {
    pub id: QualifiedId,
    pub is_interface: bool,
    pub methods: Vec<MethodDecl>,
}

impl MethodSet {
    /// Whether every method of `iface` is present by name and signature shape.
    ///
    /// An interface contributes its own methods; any other type contributes its
    /// pointer method set, which holds value- and pointer-receiver methods alike.
    pub fn satisfies(&self, iface: &MethodSet) -> bool {
        iface.methods.iter().all(|wanted| {
            self.methods
                .iter()
                .any(|m| m.name == wanted.name && m.signature.same_shape(&wanted.signature))
        })
    }
}

pub struct ModelBuilder<'a> {
    index: &'a ExistenceIndex,
    entities: Vec<Entity>,
    edges: Vec<Edge>,
    method_sets: Vec<MethodSet>,
    notes: NoteCollector<'a>,
}

impl<'a> ModelBuilder<'a> {
    pub fn new(index: &'a ExistenceIndex) -> Self {
        ModelBuilder {
            index,
            entities: Vec::new(),
            edges: Vec::new(),
            method_sets: Vec::new(),
            notes: NoteCollector::new(index),
        }
    }

    /// Build everything declared in `set`.
    pub fn build(mut self, set: &DeclarationSet) -> PartialModel {
        let start = Instant::now();

        for decl in &set.types {
            self.add_type(decl);
        }
        for constant in &set.constants {
            self.notes.add(constant);
        }

        tracing::debug!(
            package = %set.package,
            entities = self.entities.len(),
            edges = self.edges.len(),
            ms = start.elapsed().as_millis() as u64,
            "built declaration set"
        );

        PartialModel {
            entities: self.entities,
            edges: self.edges,
            notes: self.notes.finish(),
            method_sets: self.method_sets,
        }
    }

    /// Turn one declared type into an entity and derive its edges.
    pub fn add_type(&mut self, decl: &TypeDecl) {
        let entity = build_entity(decl);
        self.edges.extend(relations::extract(decl, self.index));
        self.method_sets.push(method_set(decl));
        self.entities.push(entity);
    }
}

/// Classify and populate a single entity.
pub fn build_entity(decl: &TypeDecl) -> Entity {
    let mut fields = Vec::new();
    let mut methods: Vec<Method> = Vec::new();
    let mut wrap = None;

    let kind = classify(decl);

    match &decl.shape {
        Shape::Struct { fields: declared } => {
            fields = declared
                .iter()
                .map(|f| Field {
                    name: f.name.clone(),
                    type_text: f.ty.to_string(),
                    exported: f.exported,
                })
                .collect();
        }
        Shape::Interface { methods: declared } => {
            methods.extend(declared.iter().map(Method::from_decl));
        }
        Shape::Collection { element } => {
            if let TypeRef::Named { id, .. } = element {
                wrap = Some(id.clone());
            }
        }
        Shape::Signature { signature } => {
            methods.push(Method {
                name: decl.id.name.clone(),
                exported: decl.exported,
                pointer_receiver: false,
                signature: signature.clone(),
            });
        }
        Shape::Other => {
            if decl.methods.is_empty() {
                tracing::trace!(id = %decl.id, "no recognised shape, empty body");
            }
        }
    }

    if !matches!(decl.shape, Shape::Interface { .. }) {
        methods.extend(decl.methods.iter().map(Method::from_decl));
    }

    Entity {
        id: decl.id.clone(),
        kind,
        fields,
        methods,
        wrap,
    }
}

/// Interface first, then Entity if any method is a command, else ValueObject.
pub fn classify(decl: &TypeDecl) -> EntityKind {
    if matches!(decl.shape, Shape::Interface { .. }) {
        EntityKind::Interface
    } else if decl.methods.iter().any(MethodDecl::is_command) {
        EntityKind::Entity
    } else {
        EntityKind::ValueObject
    }
}

fn method_set(decl: &TypeDecl) -> MethodSet {
    match &decl.shape {
        Shape::Interface { methods } => MethodSet {
            id: decl.id.clone(),
            is_interface: true,
            methods: methods.clone(),
        },
        _ => MethodSet {
            id: decl.id.clone(),
            is_interface: false,
            methods: decl.methods.clone(),
        },
    }
}
