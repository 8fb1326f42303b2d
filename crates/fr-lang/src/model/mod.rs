mod annotation;
mod contract;
mod expr;
mod interface;
mod links;
mod node;
mod types;
mod walk;

pub use annotation::*;
pub use contract::*;
pub use expr::*;
pub use interface::*;
pub use node::*;
pub use types::*;
pub use walk::{ExprRole, ExprSite, TypeRefSite};

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Arena identifiers
// ---------------------------------------------------------------------------

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub usize);

        impl $name {
            pub fn index(self) -> usize {
                self.0
            }
        }
    };
}

arena_id!(
    /// Index into [`Model::collections`].
    CollectionId
);
arena_id!(
    /// Index into [`Model::interfaces`].
    InterfaceId
);
arena_id!(
    /// Index into [`Model::types`].
    TypeId
);
arena_id!(
    /// Index into [`Model::constants`].
    ConstId
);

/// Byte range of an element in its source file.
///
/// The default `0..0` span marks a synthesized element without a source
/// position; position-dependent checks skip such elements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    pub fn is_unknown(&self) -> bool {
        self.start == 0 && self.end == 0
    }
}

/// The container that defines a type or constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Owner {
    Collection(CollectionId),
    Interface(InterfaceId),
}

impl From<CollectionId> for Owner {
    fn from(id: CollectionId) -> Self {
        Owner::Collection(id)
    }
}

impl From<InterfaceId> for Owner {
    fn from(id: InterfaceId) -> Self {
        Owner::Interface(id)
    }
}

impl Owner {
    /// The interface an element is confined to, if any.
    pub fn interface(self) -> Option<InterfaceId> {
        match self {
            Owner::Interface(id) => Some(id),
            Owner::Collection(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Model root
// ---------------------------------------------------------------------------

/// A non-inheriting, globally visible group of types and constants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeCollection {
    pub name: String,
    #[serde(default)]
    pub span: Span,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub types: Vec<TypeId>,
    #[serde(default)]
    pub constants: Vec<ConstId>,
}

/// A fully linked model snapshot, as handed over by the parser/linker.
///
/// Every declaration lives in one of the arenas below; cross references are
/// arena ids. The snapshot is never mutated by validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Model {
    /// Package name of the model file.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub collections: Vec<TypeCollection>,
    #[serde(default)]
    pub interfaces: Vec<Interface>,
    #[serde(default)]
    pub types: Vec<TypeDef>,
    #[serde(default)]
    pub constants: Vec<ConstantDef>,
}

/// Failure to obtain a usable model snapshot.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("failed to read model snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed model snapshot: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{holder} references missing {what} #{index}")]
    DanglingRef {
        holder: String,
        what: &'static str,
        index: usize,
    },
}

impl Model {
    /// Parse a JSON snapshot and verify that all references are linked.
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let model: Model = serde_json::from_str(json)?;
        model.check_links()?;
        Ok(model)
    }

    /// Read a JSON snapshot from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn collection(&self, id: CollectionId) -> Option<&TypeCollection> {
        self.collections.get(id.0)
    }

    pub fn interface(&self, id: InterfaceId) -> Option<&Interface> {
        self.interfaces.get(id.0)
    }

    pub fn type_def(&self, id: TypeId) -> Option<&TypeDef> {
        self.types.get(id.0)
    }

    pub fn constant(&self, id: ConstId) -> Option<&ConstantDef> {
        self.constants.get(id.0)
    }

    pub fn interface_ids(&self) -> impl Iterator<Item = InterfaceId> + use<> {
        (0..self.interfaces.len()).map(InterfaceId)
    }

    pub fn type_ids(&self) -> impl Iterator<Item = TypeId> + use<> {
        (0..self.types.len()).map(TypeId)
    }

    pub fn const_ids(&self) -> impl Iterator<Item = ConstId> + use<> {
        (0..self.constants.len()).map(ConstId)
    }

    pub fn owner_name(&self, owner: Owner) -> &str {
        match owner {
            Owner::Collection(id) => self.collection(id).map_or("?", |c| c.name.as_str()),
            Owner::Interface(id) => self.interface(id).map_or("?", |i| i.name.as_str()),
        }
    }

    pub fn type_name(&self, id: TypeId) -> &str {
        self.type_def(id).map_or("?", |t| t.name.as_str())
    }

    pub fn interface_name(&self, id: InterfaceId) -> &str {
        self.interface(id).map_or("?", |i| i.name.as_str())
    }

    /// `Owner.Type` form used in listings.
    pub fn qualified_type_name(&self, id: TypeId) -> String {
        match self.type_def(id) {
            Some(t) => format!("{}.{}", self.owner_name(t.owner), t.name),
            None => format!("?#{}", id.0),
        }
    }

    /// Strict ancestors of an interface, nearest first.
    ///
    /// Stops at the first repeated interface, so an illegal inheritance cycle
    /// yields a finite chain.
    pub fn base_interfaces(&self, id: InterfaceId) -> Vec<InterfaceId> {
        let mut chain = Vec::new();
        let mut seen = HashSet::from([id]);
        let mut current = self.interface(id).and_then(|i| i.base);
        while let Some(base) = current {
            if !seen.insert(base) {
                break;
            }
            chain.push(base);
            current = self.interface(base).and_then(|i| i.base);
        }
        chain
    }

    /// The interface itself followed by all of its ancestors.
    pub fn inheritance_set(&self, id: InterfaceId) -> Vec<InterfaceId> {
        let mut set = vec![id];
        set.extend(self.base_interfaces(id));
        set
    }

    /// Base chain of a struct, union or enumeration type, nearest first.
    pub fn base_types(&self, id: TypeId) -> Vec<TypeId> {
        let mut chain = Vec::new();
        let mut seen = HashSet::from([id]);
        let mut current = self.type_def(id).and_then(|t| t.kind.base());
        while let Some(base) = current {
            if !seen.insert(base) {
                break;
            }
            chain.push(base);
            current = self.type_def(base).and_then(|t| t.kind.base());
        }
        chain
    }

    /// Follow alias definitions until a non-alias type reference is reached.
    ///
    /// Returns `None` for an alias cycle; those are reported by the cycle
    /// detector.
    pub fn resolve_alias<'a>(&'a self, tref: &'a TypeRef) -> Option<&'a TypeRef> {
        let mut current = tref;
        for _ in 0..=self.types.len() {
            match current.kind {
                TypeRefKind::Derived(id) => match self.type_def(id).map(|t| &t.kind) {
                    Some(TypeKind::Alias(actual)) => current = actual,
                    Some(_) => return Some(current),
                    None => return None,
                },
                _ => return Some(current),
            }
        }
        None
    }

    /// All fields of a struct or union, own fields last (base fields first).
    pub fn all_fields(&self, id: TypeId) -> Vec<(TypeId, usize, &Field)> {
        let mut chain = self.base_types(id);
        chain.reverse();
        chain.push(id);
        let mut out = Vec::new();
        for t in chain {
            if let Some(fields) = self.type_def(t).and_then(|d| d.kind.fields()) {
                out.extend(fields.iter().enumerate().map(|(i, f)| (t, i, f)));
            }
        }
        out
    }

    pub fn method(&self, r: MemberRef) -> Option<&Method> {
        self.interface(r.interface)?.methods.get(r.index)
    }

    pub fn broadcast(&self, r: MemberRef) -> Option<&Broadcast> {
        self.interface(r.interface)?.broadcasts.get(r.index)
    }

    pub fn attribute(&self, r: MemberRef) -> Option<&Attribute> {
        self.interface(r.interface)?.attributes.get(r.index)
    }

    pub fn argument(&self, r: ArgumentRef) -> Option<&Argument> {
        let iface = self.interface(r.interface)?;
        let args = match (r.operation, r.direction) {
            (Operation::Method(m), Direction::In) => &iface.methods.get(m)?.in_args,
            (Operation::Method(m), Direction::Out) => &iface.methods.get(m)?.out_args,
            (Operation::Broadcast(b), Direction::Out) => &iface.broadcasts.get(b)?.out_args,
            (Operation::Broadcast(_), Direction::In) => return None,
        };
        args.get(r.index)
    }

    /// Resolve an expression-level element reference.
    pub fn element(&self, r: &ElementRef) -> Option<Element<'_>> {
        match *r {
            ElementRef::Attribute { interface, index } => {
                let a = self.attribute(MemberRef { interface, index })?;
                Some(Element {
                    kind: ElementKind::Attribute,
                    name: &a.name,
                    owner: Owner::Interface(interface),
                    ty: Some((&a.ty, a.array)),
                })
            }
            ElementRef::Argument(arg) => {
                let a = self.argument(arg)?;
                Some(Element {
                    kind: ElementKind::Argument,
                    name: &a.name,
                    owner: Owner::Interface(arg.interface),
                    ty: Some((&a.ty, a.array)),
                })
            }
            ElementRef::Constant(id) => {
                let c = self.constant(id)?;
                Some(Element {
                    kind: ElementKind::Constant,
                    name: &c.name,
                    owner: c.owner,
                    ty: Some((&c.ty, c.array)),
                })
            }
            ElementRef::StateVariable { interface, index } => {
                let d = self.interface(interface)?.contract.as_ref()?.variables.get(index)?;
                Some(Element {
                    kind: ElementKind::StateVariable,
                    name: &d.name,
                    owner: Owner::Interface(interface),
                    ty: Some((&d.ty, d.array)),
                })
            }
            ElementRef::Field { owner, index } => {
                let t = self.type_def(owner)?;
                let f = t.kind.fields()?.get(index)?;
                Some(Element {
                    kind: ElementKind::Field,
                    name: &f.name,
                    owner: t.owner,
                    ty: Some((&f.ty, f.array)),
                })
            }
            ElementRef::Enumerator { owner, index } => {
                let t = self.type_def(owner)?;
                let e = t.kind.enumerators()?.get(index)?;
                Some(Element {
                    kind: ElementKind::Enumerator,
                    name: &e.name,
                    owner: t.owner,
                    ty: None,
                })
            }
        }
    }
}

/// A resolved [`ElementRef`].
#[derive(Debug, Clone, Copy)]
pub struct Element<'a> {
    pub kind: ElementKind,
    pub name: &'a str,
    /// Container that defines the element.
    pub owner: Owner,
    /// Declared type and implicit-array flag; `None` for enumerators, whose
    /// type is the enclosing enumeration.
    pub ty: Option<(&'a TypeRef, bool)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Attribute,
    Argument,
    Constant,
    StateVariable,
    Field,
    Enumerator,
}

impl ElementKind {
    pub fn label(self) -> &'static str {
        match self {
            ElementKind::Attribute => "Attribute",
            ElementKind::Argument => "Argument",
            ElementKind::Constant => "Constant",
            ElementKind::StateVariable => "State variable",
            ElementKind::Field => "Element of struct or union",
            ElementKind::Enumerator => "Enumerator",
        }
    }
}
