//! Declaration fixtures for tests

use crate::model::*;

fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

fn to_params(list: &[(&str, TypeRef)]) -> Vec<Param> {
    list.iter().map(|(name, ty)| Param::new(name, ty.clone())).collect()
}

fn to_results(list: &[TypeRef]) -> Vec<Param> {
    list.iter().map(|ty| Param::new("", ty.clone())).collect()
}

/// Value-receiver method; exported when capitalised.
pub fn method(name: &str, params: &[(&str, TypeRef)], results: &[TypeRef]) -> MethodDecl {
    MethodDecl {
        name: name.to_string(),
        exported: is_exported(name),
        pointer_receiver: false,
        signature: Signature {
            params: to_params(params),
            results: to_results(results),
        },
    }
}

/// Pointer-receiver method; exported when capitalised.
pub fn pointer_method(name: &str, params: &[(&str, TypeRef)], results: &[TypeRef]) -> MethodDecl {
    MethodDecl {
        pointer_receiver: true,
        ..method(name, params, results)
    }
}

/// Unexported method without parameters or results.
pub fn unexported(name: &str) -> MethodDecl {
    method(name, &[], &[])
}

pub fn field(name: &str, ty: TypeRef) -> FieldDecl {
    FieldDecl {
        name: name.to_string(),
        ty,
        exported: is_exported(name),
    }
}

pub fn structure(package: &str, name: &str, fields: Vec<FieldDecl>) -> TypeDecl {
    TypeDecl {
        id: QualifiedId::new(package, name),
        exported: is_exported(name),
        shape: Shape::Struct { fields },
        methods: vec![],
    }
}

pub fn interface(package: &str, name: &str, methods: Vec<MethodDecl>) -> TypeDecl {
    TypeDecl {
        id: QualifiedId::new(package, name),
        exported: is_exported(name),
        shape: Shape::Interface { methods },
        methods: vec![],
    }
}

pub fn collection(package: &str, name: &str, element: TypeRef) -> TypeDecl {
    TypeDecl {
        id: QualifiedId::new(package, name),
        exported: is_exported(name),
        shape: Shape::Collection { element },
        methods: vec![],
    }
}

pub fn basic(package: &str, name: &str) -> TypeDecl {
    TypeDecl {
        id: QualifiedId::new(package, name),
        exported: is_exported(name),
        shape: Shape::Other,
        methods: vec![],
    }
}

pub fn constant(name: &str, owner: &QualifiedId) -> ConstDecl {
    ConstDecl {
        name: name.to_string(),
        owner: Some(owner.clone()),
    }
}

pub fn declaration_set(package: &str, types: Vec<TypeDecl>, constants: Vec<ConstDecl>) -> DeclarationSet {
    DeclarationSet {
        package: package.to_string(),
        types,
        constants,
    }
}
