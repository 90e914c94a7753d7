//! Core data structures: resolved declarations in, diagram entities out

use std::fmt;

use serde::{Deserialize, Serialize};

/// Package-qualified identifier of a declared type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QualifiedId {
    /// Full import path, e.g. `github.com/acme/shop/model/item`.
    pub package: String,
    pub name: String,
}

impl QualifiedId {
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        QualifiedId {
            package: package.into(),
            name: name.into(),
        }
    }

    /// Parse `path/to/pkg.Name`. The name starts after the last `.` that
    /// follows the last `/`.
    pub fn parse(full: &str) -> Option<Self> {
        let tail_start = full.rfind('/').map_or(0, |i| i + 1);
        let dot = tail_start + full[tail_start..].rfind('.')?;
        let (package, name) = (&full[..dot], &full[dot + 1..]);
        if package.is_empty() || name.is_empty() {
            return None;
        }
        Some(QualifiedId::new(package, name))
    }

    /// Last segment of the import path.
    pub fn package_name(&self) -> &str {
        self.package.rsplit('/').next().unwrap_or(&self.package)
    }

    /// Diagram alias: `<package_name>.<name>`.
    pub fn short(&self) -> String {
        format!("{}.{}", self.package_name(), self.name)
    }

    /// Node name of the note frame attached to this type.
    pub fn note_frame(&self) -> String {
        let safe: String = self
            .short()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
            .collect();
        format!("{NOTE_FRAME_PREFIX}{safe}")
    }
}

impl fmt::Display for QualifiedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.package, self.name)
    }
}

/// Marker distinguishing note frames from entity nodes.
pub const NOTE_FRAME_PREFIX: &str = "N_";

// ── Input: the resolved Declaration Set ─────────────────────

/// Reference to a type as it appears in a field, parameter or result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeRef {
    /// A named (declared) type.
    Named {
        id: QualifiedId,
        /// Satisfies the failure capability (an error type).
        #[serde(default)]
        failure: bool,
    },
    /// A predeclared type such as `int`, `string` or `error`.
    Builtin {
        name: String,
        #[serde(default)]
        failure: bool,
    },
    Pointer { elem: Box<TypeRef> },
    Slice { elem: Box<TypeRef> },
    Array { len: u64, elem: Box<TypeRef> },
    Map { key: Box<TypeRef>, value: Box<TypeRef> },
    /// Anonymous struct literal type.
    Struct { fields: Vec<FieldDecl> },
    Func { signature: Signature },
    /// Anything the resolver could only describe textually.
    Other { text: String },
}

impl TypeRef {
    pub fn named(package: &str, name: &str) -> Self {
        TypeRef::Named {
            id: QualifiedId::new(package, name),
            failure: false,
        }
    }

    pub fn builtin(name: &str) -> Self {
        TypeRef::Builtin {
            name: name.to_string(),
            failure: false,
        }
    }

    /// Tag a named or builtin type as failure-capable.
    pub fn with_failure(mut self) -> Self {
        if let TypeRef::Named { failure, .. } | TypeRef::Builtin { failure, .. } = &mut self {
            *failure = true;
        }
        self
    }

    pub fn pointer(elem: TypeRef) -> Self {
        TypeRef::Pointer { elem: Box::new(elem) }
    }

    pub fn slice(elem: TypeRef) -> Self {
        TypeRef::Slice { elem: Box::new(elem) }
    }

    pub fn map(key: TypeRef, value: TypeRef) -> Self {
        TypeRef::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Whether this is a map, slice or array.
    pub fn is_collection(&self) -> bool {
        matches!(
            self,
            TypeRef::Slice { .. } | TypeRef::Array { .. } | TypeRef::Map { .. }
        )
    }

    /// Whether the type carries the failure capability tag.
    pub fn is_failure(&self) -> bool {
        match self {
            TypeRef::Named { failure, .. } | TypeRef::Builtin { failure, .. } => *failure,
            TypeRef::Pointer { elem } => elem.is_failure(),
            _ => false,
        }
    }

    /// Structural type identity. The failure tag is a capability of the
    /// type, not part of it, and is ignored.
    pub fn same_type(&self, other: &TypeRef) -> bool {
        match (self, other) {
            (TypeRef::Named { id: a, .. }, TypeRef::Named { id: b, .. }) => a == b,
            (TypeRef::Builtin { name: a, .. }, TypeRef::Builtin { name: b, .. }) => a == b,
            (TypeRef::Pointer { elem: a }, TypeRef::Pointer { elem: b })
            | (TypeRef::Slice { elem: a }, TypeRef::Slice { elem: b }) => a.same_type(b),
            (TypeRef::Array { len: la, elem: a }, TypeRef::Array { len: lb, elem: b }) => {
                la == lb && a.same_type(b)
            }
            (TypeRef::Map { key: ka, value: va }, TypeRef::Map { key: kb, value: vb }) => {
                ka.same_type(kb) && va.same_type(vb)
            }
            (TypeRef::Struct { fields: a }, TypeRef::Struct { fields: b }) => {
                a.len() == b.len()
                    && a.iter().zip(b).all(|(x, y)| x.name == y.name && x.ty.same_type(&y.ty))
            }
            (TypeRef::Func { signature: a }, TypeRef::Func { signature: b }) => a.same_shape(b),
            (TypeRef::Other { text: a }, TypeRef::Other { text: b }) => a == b,
            _ => false,
        }
    }

    /// Strip at most one pointer, then take the element of a map, slice or
    /// array, and return the named type that remains.
    pub fn unwrap_target(&self) -> Option<&QualifiedId> {
        let mut ty = self;
        if let TypeRef::Pointer { elem } = ty {
            ty = elem.as_ref();
        }
        match ty {
            TypeRef::Slice { elem } | TypeRef::Array { elem, .. } => ty = elem.as_ref(),
            TypeRef::Map { value, .. } => ty = value.as_ref(),
            _ => {}
        }
        match ty {
            TypeRef::Named { id, .. } => Some(id),
            _ => None,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Named { id, .. } => f.write_str(&id.short()),
            TypeRef::Builtin { name, .. } => f.write_str(name),
            TypeRef::Pointer { elem } => write!(f, "*{elem}"),
            TypeRef::Slice { elem } => write!(f, "[]{elem}"),
            TypeRef::Array { len, elem } => write!(f, "[{len}]{elem}"),
            TypeRef::Map { key, value } => write!(f, "map[{key}]{value}"),
            TypeRef::Struct { fields } => {
                f.write_str("struct{")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    write!(f, "{}: {}", field.name, field.ty)?;
                }
                f.write_str("}")
            }
            TypeRef::Func { signature } => write!(f, "func{signature}"),
            TypeRef::Other { text } => f.write_str(text),
        }
    }
}

/// A named (or unnamed) parameter or result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Param {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
}

impl Param {
    pub fn new(name: &str, ty: TypeRef) -> Self {
        Param {
            name: name.to_string(),
            ty,
        }
    }
}

/// Parameter and result lists of a function or method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signature {
    #[serde(default)]
    pub params: Vec<Param>,
    #[serde(default)]
    pub results: Vec<Param>,
}

impl Signature {
    /// Same parameter and result types, ignoring names and failure tags.
    pub fn same_shape(&self, other: &Signature) -> bool {
        fn same(a: &[Param], b: &[Param]) -> bool {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.ty.same_type(&y.ty))
        }
        same(&self.params, &other.params) && same(&self.results, &other.results)
    }
}

/// `(a: T, b: U): R` or `(a: T): (r: R, error)`.
impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, p) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", p.name, p.ty)?;
        }
        f.write_str(")")?;

        if self.results.is_empty() {
            return Ok(());
        }
        f.write_str(": ")?;
        let grouped = self.results.len() > 1;
        if grouped {
            f.write_str("(")?;
        }
        for (i, r) in self.results.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            if !r.name.is_empty() {
                write!(f, "{}: ", r.name)?;
            }
            write!(f, "{}", r.ty)?;
        }
        if grouped {
            f.write_str(")")?;
        }
        Ok(())
    }
}

/// One struct field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default)]
    pub exported: bool,
}

/// One entry of a method set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodDecl {
    pub name: String,
    #[serde(default)]
    pub exported: bool,
    #[serde(default)]
    pub pointer_receiver: bool,
    #[serde(flatten)]
    pub signature: Signature,
}

impl MethodDecl {
    /// A mutating method: pointer receiver, and either no results or a single
    /// failure-capable result.
    pub fn is_command(&self) -> bool {
        if !self.pointer_receiver {
            return false;
        }
        match self.signature.results.as_slice() {
            [] => true,
            [only] => only.ty.is_failure(),
            _ => false,
        }
    }
}

/// Underlying shape of a declared type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    Struct {
        #[serde(default)]
        fields: Vec<FieldDecl>,
    },
    Interface {
        #[serde(default)]
        methods: Vec<MethodDecl>,
    },
    /// Named slice, array or map; `element` is the element (value) type.
    Collection { element: TypeRef },
    Signature { signature: Signature },
    #[serde(other)]
    Other,
}

/// A locally declared type as handed over by the type resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDecl {
    pub id: QualifiedId,
    #[serde(default)]
    pub exported: bool,
    pub shape: Shape,
    /// Full declared method set, value and pointer receivers alike.
    #[serde(default)]
    pub methods: Vec<MethodDecl>,
}

/// A declared constant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstDecl {
    pub name: String,
    /// Named type of the constant, if it has one.
    #[serde(default)]
    pub owner: Option<QualifiedId>,
}

/// Everything resolved for one package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationSet {
    pub package: String,
    #[serde(default)]
    pub types: Vec<TypeDecl>,
    #[serde(default)]
    pub constants: Vec<ConstDecl>,
}

// ── Output: the diagram model ───────────────────────────────

/// Classification of a diagram entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Interface,
    /// Stateful type with at least one command method.
    Entity,
    ValueObject,
}

/// Field line of an entity body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub type_text: String,
    pub exported: bool,
}

/// Method line of an entity body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    pub name: String,
    pub exported: bool,
    pub pointer_receiver: bool,
    pub signature: Signature,
}

impl Method {
    pub fn from_decl(decl: &MethodDecl) -> Self {
        Method {
            name: decl.name.clone(),
            exported: decl.exported,
            pointer_receiver: decl.pointer_receiver,
            signature: decl.signature.clone(),
        }
    }
}

/// A class or interface node of the diagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub id: QualifiedId,
    pub kind: EntityKind,
    pub fields: Vec<Field>,
    pub methods: Vec<Method>,
    /// Element type when the entity is a named collection of another named type.
    pub wrap: Option<QualifiedId>,
}

impl Entity {
    pub fn has_body(&self) -> bool {
        !self.fields.is_empty() || !self.methods.is_empty()
    }
}

/// What kind of relationship an edge represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EdgeKind {
    // ── Structural ──────────────────────────────────────────
    Containment,
    Composition,

    // ── Behavioural (exported methods only) ─────────────────
    Use,
    Return,

    // ── Global ──────────────────────────────────────────────
    Implements,
}

/// A directed, typed relation between two entities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Edge {
    pub from: QualifiedId,
    pub to: QualifiedId,
    pub kind: EdgeKind,
}

/// Constants grouped under their owning type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub owner: QualifiedId,
    /// Lexicographically ordered, without duplicates.
    pub constants: Vec<String>,
}

impl Note {
    pub fn frame(&self) -> String {
        self.owner.note_frame()
    }
}
