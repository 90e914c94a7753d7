//! Relation extraction
//!
//! Every candidate target goes through [`TypeRef::unwrap_target`] and is then
//! checked against the [`ExistenceIndex`]; targets that are not locally
//! declared are dropped without error.

use crate::builder::MethodSet;
use crate::index::ExistenceIndex;
use crate::model::*;

/// Containment, composition, use and return edges leaving `decl`.
pub fn extract(decl: &TypeDecl, index: &ExistenceIndex) -> Vec<Edge> {
    let mut edges = Vec::new();
    let from = &decl.id;

    match &decl.shape {
        Shape::Struct { fields } => {
            for field in fields {
                // Collection-typed fields own their elements exclusively.
                let kind = if field.ty.is_collection() {
                    EdgeKind::Composition
                } else {
                    EdgeKind::Containment
                };
                push_if_known(&mut edges, index, from, &field.ty, kind);
            }
        }
        Shape::Collection { element } => {
            if let TypeRef::Named { id, .. } = element {
                if index.contains(id) {
                    edges.push(Edge {
                        from: from.clone(),
                        to: id.clone(),
                        kind: EdgeKind::Composition,
                    });
                }
            }
        }
        Shape::Signature { signature } if decl.exported => {
            signature_edges(&mut edges, index, from, signature);
        }
        _ => {}
    }

    let own_methods = match &decl.shape {
        Shape::Interface { methods } => methods,
        _ => &decl.methods,
    };
    for method in own_methods.iter().filter(|m| m.exported) {
        signature_edges(&mut edges, index, from, &method.signature);
    }

    edges
}

fn signature_edges(edges: &mut Vec<Edge>, index: &ExistenceIndex, from: &QualifiedId, signature: &Signature) {
    for param in &signature.params {
        push_if_known(edges, index, from, &param.ty, EdgeKind::Use);
    }
    for result in &signature.results {
        push_if_known(edges, index, from, &result.ty, EdgeKind::Return);
    }
}

fn push_if_known(edges: &mut Vec<Edge>, index: &ExistenceIndex, from: &QualifiedId, ty: &TypeRef, kind: EdgeKind) {
    let Some(to) = ty.unwrap_target() else {
        return;
    };
    if !index.contains(to) {
        tracing::trace!(from = %from, to = %to, ?kind, "dropping edge to undeclared type");
        return;
    }
    edges.push(Edge {
        from: from.clone(),
        to: to.clone(),
        kind,
    });
}

/// Implements edges over every ordered pair of distinct types.
pub fn implements(method_sets: &[MethodSet]) -> Vec<Edge> {
    let mut edges = Vec::new();
    for iface in method_sets.iter().filter(|u| u.is_interface) {
        for candidate in method_sets {
            if candidate.id == iface.id {
                continue;
            }
            if candidate.satisfies(iface) {
                edges.push(Edge {
                    from: candidate.id.clone(),
                    to: iface.id.clone(),
                    kind: EdgeKind::Implements,
                });
            }
        }
    }
    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    fn index_of(ids: &[(&str, &str)]) -> ExistenceIndex {
        ids.iter().map(|(p, n)| QualifiedId::new(*p, *n)).collect()
    }

    fn kinds_to(edges: &[Edge], name: &str) -> Vec<EdgeKind> {
        edges.iter().filter(|e| e.to.name == name).map(|e| e.kind).collect()
    }

    #[test]
    fn test_plain_field_is_containment() {
        let index = index_of(&[("p", "Foo"), ("p", "Bar")]);
        let foo = structure("p", "Foo", vec![field("Bar", TypeRef::named("p", "Bar"))]);

        let edges = extract(&foo, &index);
        assert_eq!(
            edges,
            vec![Edge {
                from: QualifiedId::new("p", "Foo"),
                to: QualifiedId::new("p", "Bar"),
                kind: EdgeKind::Containment,
            }]
        );
    }

    #[test]
    fn test_pointer_field_is_containment() {
        let index = index_of(&[("p", "Foo"), ("p", "Bar")]);
        let foo = structure("p", "Foo", vec![field("Bar", TypeRef::pointer(TypeRef::named("p", "Bar")))]);
        assert_eq!(kinds_to(&extract(&foo, &index), "Bar"), vec![EdgeKind::Containment]);
    }

    #[test]
    fn test_collection_fields_are_composition() {
        let index = index_of(&[("p", "Foo"), ("p", "Bar")]);
        let foo = structure(
            "p",
            "Foo",
            vec![
                field("List", TypeRef::slice(TypeRef::named("p", "Bar"))),
                field("ByName", TypeRef::map(TypeRef::builtin("string"), TypeRef::pointer(TypeRef::named("p", "Bar")))),
                field("Ref", TypeRef::pointer(TypeRef::slice(TypeRef::named("p", "Bar")))),
            ],
        );

        // map[string]*Bar keeps the pointer after taking the element, so it never matches.
        assert_eq!(
            kinds_to(&extract(&foo, &index), "Bar"),
            vec![EdgeKind::Composition, EdgeKind::Containment]
        );
    }

    #[test]
    fn test_unregistered_targets_are_dropped() {
        let index = index_of(&[("p", "Foo")]);
        let foo = structure(
            "p",
            "Foo",
            vec![
                field("When", TypeRef::named("time", "Time")),
                field("Count", TypeRef::builtin("int")),
            ],
        );
        assert!(extract(&foo, &index).is_empty());
    }

    #[test]
    fn test_only_exported_methods_produce_edges() {
        let index = index_of(&[("p", "Svc"), ("p", "Req"), ("p", "Resp")]);
        let mut svc = structure("p", "Svc", vec![]);
        let params = [("r", TypeRef::pointer(TypeRef::named("p", "Req")))];
        let results = [TypeRef::named("p", "Resp")];
        svc.methods = vec![
            method("Handle", &params, &results),
            method("handle", &params, &results),
        ];

        let edges = extract(&svc, &index);
        assert_eq!(edges.len(), 2);
        assert_eq!(kinds_to(&edges, "Req"), vec![EdgeKind::Use]);
        assert_eq!(kinds_to(&edges, "Resp"), vec![EdgeKind::Return]);
    }

    #[test]
    fn test_wrap_is_composition_when_registered() {
        let index = index_of(&[("p", "Items"), ("p", "Item")]);
        let items = collection("p", "Items", TypeRef::named("p", "Item"));
        assert_eq!(kinds_to(&extract(&items, &index), "Item"), vec![EdgeKind::Composition]);

        let foreign = collection("p", "Items", TypeRef::named("q", "Item"));
        assert!(extract(&foreign, &index).is_empty());
    }

    #[test]
    fn test_interface_methods_produce_edges() {
        let index = index_of(&[("p", "Repo"), ("p", "User")]);
        let repo = interface(
            "p",
            "Repo",
            vec![method("Find", &[("id", TypeRef::builtin("int"))], &[TypeRef::pointer(TypeRef::named("p", "User"))])],
        );
        assert_eq!(kinds_to(&extract(&repo, &index), "User"), vec![EdgeKind::Return]);
    }

    #[test]
    fn test_implements_matches_by_name_and_signature() {
        let cry = method("Cry", &[], &[TypeRef::builtin("string")]);
        let sets = vec![
            MethodSet {
                id: QualifiedId::new("zoo", "Animal"),
                is_interface: true,
                methods: vec![cry.clone()],
            },
            MethodSet {
                id: QualifiedId::new("zoo", "Cat"),
                is_interface: false,
                methods: vec![cry],
            },
            MethodSet {
                id: QualifiedId::new("zoo", "Rock"),
                is_interface: false,
                methods: vec![method("Cry", &[], &[TypeRef::builtin("int")])],
            },
        ];

        let edges = implements(&sets);
        assert_eq!(
            edges,
            vec![Edge {
                from: QualifiedId::new("zoo", "Cat"),
                to: QualifiedId::new("zoo", "Animal"),
                kind: EdgeKind::Implements,
            }]
        );
    }

    #[test]
    fn test_pointer_receiver_methods_count_for_implements() {
        let sets = vec![
            MethodSet {
                id: QualifiedId::new("io", "Closer"),
                is_interface: true,
                methods: vec![method("Close", &[], &[TypeRef::builtin("error")])],
            },
            MethodSet {
                id: QualifiedId::new("io", "File"),
                is_interface: false,
                methods: vec![pointer_method("Close", &[], &[TypeRef::builtin("error").with_failure()])],
            },
        ];
        assert_eq!(implements(&sets).len(), 1);
    }

    fn handler(exported: bool) -> TypeDecl {
        TypeDecl {
            id: QualifiedId::new("web", if exported { "HandlerFunc" } else { "handlerFunc" }),
            exported,
            shape: Shape::Signature {
                signature: Signature {
                    params: vec![Param::new("r", TypeRef::pointer(TypeRef::named("web", "Request")))],
                    results: vec![Param::new("", TypeRef::named("web", "Response"))],
                },
            },
            methods: vec![],
        }
    }

    #[test]
    fn test_exported_signature_type_uses_and_returns() {
        let index = index_of(&[("web", "HandlerFunc"), ("web", "Request"), ("web", "Response")]);
        let edges = extract(&handler(true), &index);

        assert_eq!(kinds_to(&edges, "Request"), vec![EdgeKind::Use]);
        assert_eq!(kinds_to(&edges, "Response"), vec![EdgeKind::Return]);
    }

    #[test]
    fn test_unexported_signature_type_has_no_edges() {
        let index = index_of(&[("web", "handlerFunc"), ("web", "Request"), ("web", "Response")]);
        assert!(extract(&handler(false), &index).is_empty());
    }
}
