use serde::{Deserialize, Serialize};

use super::{Annotation, Expr, Owner, Span, TypeId};

// ---------------------------------------------------------------------------
// Type references
// ---------------------------------------------------------------------------

/// Built-in primitive types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Primitive {
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Boolean,
    Float,
    Double,
    String,
    ByteBuffer,
}

impl Primitive {
    /// Inclusive value range of an integer primitive.
    pub fn int_range(self) -> Option<(i128, i128)> {
        Some(match self {
            Primitive::Int8 => (i8::MIN.into(), i8::MAX.into()),
            Primitive::UInt8 => (0, u8::MAX.into()),
            Primitive::Int16 => (i16::MIN.into(), i16::MAX.into()),
            Primitive::UInt16 => (0, u16::MAX.into()),
            Primitive::Int32 => (i32::MIN.into(), i32::MAX.into()),
            Primitive::UInt32 => (0, u32::MAX.into()),
            Primitive::Int64 => (i64::MIN.into(), i64::MAX.into()),
            Primitive::UInt64 => (0, u64::MAX.into()),
            _ => return None,
        })
    }

    pub fn is_integer(self) -> bool {
        self.int_range().is_some()
    }

    pub fn is_floating(self) -> bool {
        matches!(self, Primitive::Float | Primitive::Double)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeRefKind {
    Primitive(Primitive),
    /// Integer constrained to `lower..=upper`; a missing bound is open.
    Interval {
        #[serde(default)]
        lower: Option<i64>,
        #[serde(default)]
        upper: Option<i64>,
    },
    /// Reference to a type defined elsewhere in the model.
    Derived(TypeId),
}

/// A non-owning use of a type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeRef {
    #[serde(default)]
    pub span: Span,
    pub kind: TypeRefKind,
}

impl TypeRef {
    pub fn primitive(p: Primitive) -> Self {
        TypeRef {
            span: Span::default(),
            kind: TypeRefKind::Primitive(p),
        }
    }

    pub fn derived(id: TypeId) -> Self {
        TypeRef {
            span: Span::default(),
            kind: TypeRefKind::Derived(id),
        }
    }

    pub fn interval(lower: Option<i64>, upper: Option<i64>) -> Self {
        TypeRef {
            span: Span::default(),
            kind: TypeRefKind::Interval { lower, upper },
        }
    }

    pub fn derived_id(&self) -> Option<TypeId> {
        match self.kind {
            TypeRefKind::Derived(id) => Some(id),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Type definitions
// ---------------------------------------------------------------------------

/// Named, typed member of a struct or union.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(default)]
    pub span: Span,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    pub ty: TypeRef,
    /// Implicit array (`Type[] name`).
    #[serde(default)]
    pub array: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enumerator {
    pub name: String,
    #[serde(default)]
    pub span: Span,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    /// Explicit value, if given.
    #[serde(default)]
    pub value: Option<Expr>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructType {
    #[serde(default)]
    pub base: Option<TypeId>,
    #[serde(default)]
    pub polymorphic: bool,
    #[serde(default)]
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnionType {
    #[serde(default)]
    pub base: Option<TypeId>,
    #[serde(default)]
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnumerationType {
    #[serde(default)]
    pub base: Option<TypeId>,
    #[serde(default)]
    pub enumerators: Vec<Enumerator>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Struct(StructType),
    Union(UnionType),
    Enumeration(EnumerationType),
    Array { element: TypeRef },
    Map { key: TypeRef, value: TypeRef },
    /// `typedef Name is Actual`.
    Alias(TypeRef),
}

impl TypeKind {
    pub fn base(&self) -> Option<TypeId> {
        match self {
            TypeKind::Struct(s) => s.base,
            TypeKind::Union(u) => u.base,
            TypeKind::Enumeration(e) => e.base,
            TypeKind::Array { .. } | TypeKind::Map { .. } | TypeKind::Alias(_) => None,
        }
    }

    pub fn fields(&self) -> Option<&[Field]> {
        match self {
            TypeKind::Struct(s) => Some(&s.fields),
            TypeKind::Union(u) => Some(&u.fields),
            _ => None,
        }
    }

    pub fn enumerators(&self) -> Option<&[Enumerator]> {
        match self {
            TypeKind::Enumeration(e) => Some(&e.enumerators),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TypeKind::Struct(_) => "struct",
            TypeKind::Union(_) => "union",
            TypeKind::Enumeration(_) => "enumeration",
            TypeKind::Array { .. } => "array",
            TypeKind::Map { .. } => "map",
            TypeKind::Alias(_) => "typedef",
        }
    }

    /// Member type references in declaration order.
    pub fn member_refs(&self) -> Vec<&TypeRef> {
        match self {
            TypeKind::Struct(StructType { fields, .. }) | TypeKind::Union(UnionType { fields, .. }) => {
                fields.iter().map(|f| &f.ty).collect()
            }
            TypeKind::Enumeration(_) => Vec::new(),
            TypeKind::Array { element } => vec![element],
            TypeKind::Map { key, value } => vec![key, value],
            TypeKind::Alias(actual) => vec![actual],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDef {
    pub name: String,
    #[serde(default)]
    pub span: Span,
    pub owner: Owner,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    pub kind: TypeKind,
}

/// Named constant bound to a declared type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstantDef {
    pub name: String,
    #[serde(default)]
    pub span: Span,
    pub owner: Owner,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    pub ty: TypeRef,
    #[serde(default)]
    pub array: bool,
    pub value: Expr,
}
