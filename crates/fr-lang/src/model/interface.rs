use serde::{Deserialize, Serialize};

use super::{Annotation, ConstId, Contract, Enumerator, InterfaceId, Span, TypeId, TypeRef};

/// Typed parameter of a method or broadcast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    pub name: String,
    #[serde(default)]
    pub span: Span,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    pub ty: TypeRef,
    #[serde(default)]
    pub array: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    #[serde(default)]
    pub span: Span,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    pub ty: TypeRef,
    #[serde(default)]
    pub array: bool,
    #[serde(default)]
    pub read_only: bool,
    #[serde(default)]
    pub no_subscriptions: bool,
}

/// Error return codes of a method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodErrors {
    /// `error SomeEnumeration`
    Enumeration(TypeId),
    /// `error extends Base { A B }`
    Inline {
        #[serde(default)]
        base: Option<TypeId>,
        #[serde(default)]
        enumerators: Vec<Enumerator>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Method {
    pub name: String,
    #[serde(default)]
    pub span: Span,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    /// Explicit overload selector (`method foo:sel`).
    #[serde(default)]
    pub selector: Option<String>,
    #[serde(default)]
    pub fire_and_forget: bool,
    #[serde(default)]
    pub in_args: Vec<Argument>,
    #[serde(default)]
    pub out_args: Vec<Argument>,
    #[serde(default)]
    pub errors: Option<MethodErrors>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Broadcast {
    pub name: String,
    #[serde(default)]
    pub span: Span,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub selector: Option<String>,
    #[serde(default)]
    pub selective: bool,
    #[serde(default)]
    pub out_args: Vec<Argument>,
}

/// A named API with single-parent inheritance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Interface {
    pub name: String,
    #[serde(default)]
    pub span: Span,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub base: Option<InterfaceId>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub methods: Vec<Method>,
    #[serde(default)]
    pub broadcasts: Vec<Broadcast>,
    #[serde(default)]
    pub types: Vec<TypeId>,
    #[serde(default)]
    pub constants: Vec<ConstId>,
    #[serde(default)]
    pub contract: Option<Contract>,
}

// ---------------------------------------------------------------------------
// Member references
// ---------------------------------------------------------------------------

/// Position of an attribute, method or broadcast inside an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberRef {
    pub interface: InterfaceId,
    pub index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Method(usize),
    Broadcast(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    In,
    Out,
}

/// Position of an argument inside a method or broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArgumentRef {
    pub interface: InterfaceId,
    pub operation: Operation,
    pub direction: Direction,
    pub index: usize,
}
