mod inheritance;
mod type_check;
mod visibility;

use crate::checker::check_model;
use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::model::{
    Argument, Attribute, Broadcast, CollectionId, ConstId, ConstantDef, Contract, EnumerationType,
    Enumerator, Expr, Field, Interface, InterfaceId, MemberRef, Method, Model, Owner, Primitive,
    Span, StructType, TypeCollection, TypeDef, TypeId, TypeKind, TypeRef, UnionType,
};

// ---------------------------------------------------------------------------
// Model builder
// ---------------------------------------------------------------------------

/// Assembles a linked model in arena form.
struct Builder {
    model: Model,
}

impl Builder {
    fn new() -> Self {
        Builder {
            model: Model {
                name: "test".into(),
                ..Model::default()
            },
        }
    }

    fn collection(&mut self, name: &str) -> Owner {
        self.model.collections.push(TypeCollection {
            name: name.into(),
            ..TypeCollection::default()
        });
        Owner::Collection(CollectionId(self.model.collections.len() - 1))
    }

    fn interface(&mut self, name: &str) -> InterfaceId {
        self.model.interfaces.push(Interface {
            name: name.into(),
            ..Interface::default()
        });
        InterfaceId(self.model.interfaces.len() - 1)
    }

    fn extends(&mut self, id: InterfaceId, base: InterfaceId) {
        self.model.interfaces[id.0].base = Some(base);
    }

    fn add_type(&mut self, owner: impl Into<Owner>, name: &str, kind: TypeKind) -> TypeId {
        let owner = owner.into();
        let id = TypeId(self.model.types.len());
        self.model.types.push(TypeDef {
            name: name.into(),
            span: Span::default(),
            owner,
            annotations: Vec::new(),
            kind,
        });
        match owner {
            Owner::Collection(c) => self.model.collections[c.0].types.push(id),
            Owner::Interface(i) => self.model.interfaces[i.0].types.push(id),
        }
        id
    }

    fn add_const(&mut self, owner: impl Into<Owner>, name: &str, ty: TypeRef, value: Expr) -> ConstId {
        self.add_const_def(owner, name, ty, false, value)
    }

    fn add_const_def(
        &mut self,
        owner: impl Into<Owner>,
        name: &str,
        ty: TypeRef,
        array: bool,
        value: Expr,
    ) -> ConstId {
        let owner = owner.into();
        let id = ConstId(self.model.constants.len());
        self.model.constants.push(ConstantDef {
            name: name.into(),
            span: Span::default(),
            owner,
            annotations: Vec::new(),
            ty,
            array,
            value,
        });
        match owner {
            Owner::Collection(c) => self.model.collections[c.0].constants.push(id),
            Owner::Interface(i) => self.model.interfaces[i.0].constants.push(id),
        }
        id
    }

    fn attribute(&mut self, id: InterfaceId, name: &str, ty: TypeRef) -> MemberRef {
        self.push_attribute(id, attr(name, ty))
    }

    fn push_attribute(&mut self, id: InterfaceId, a: Attribute) -> MemberRef {
        let list = &mut self.model.interfaces[id.0].attributes;
        list.push(a);
        MemberRef {
            interface: id,
            index: list.len() - 1,
        }
    }

    fn method(&mut self, id: InterfaceId, m: Method) -> MemberRef {
        let list = &mut self.model.interfaces[id.0].methods;
        list.push(m);
        MemberRef {
            interface: id,
            index: list.len() - 1,
        }
    }

    fn broadcast(&mut self, id: InterfaceId, b: Broadcast) -> MemberRef {
        let list = &mut self.model.interfaces[id.0].broadcasts;
        list.push(b);
        MemberRef {
            interface: id,
            index: list.len() - 1,
        }
    }

    fn contract(&mut self, id: InterfaceId, contract: Contract) {
        self.model.interfaces[id.0].contract = Some(contract);
    }

    fn build(self) -> Model {
        self.model
            .check_links()
            .expect("test model must be fully linked");
        self.model
    }
}

// ---------------------------------------------------------------------------
// Element helpers
// ---------------------------------------------------------------------------

fn prim(p: Primitive) -> TypeRef {
    TypeRef::primitive(p)
}

fn int32() -> TypeRef {
    prim(Primitive::Int32)
}

fn derived(id: TypeId) -> TypeRef {
    TypeRef::derived(id)
}

fn field(name: &str, ty: TypeRef) -> Field {
    Field {
        name: name.into(),
        span: Span::default(),
        annotations: Vec::new(),
        ty,
        array: false,
    }
}

fn struct_of(fields: Vec<Field>) -> TypeKind {
    TypeKind::Struct(StructType {
        fields,
        ..StructType::default()
    })
}

fn struct_extending(base: TypeId, fields: Vec<Field>) -> TypeKind {
    TypeKind::Struct(StructType {
        base: Some(base),
        fields,
        ..StructType::default()
    })
}

fn union_of(fields: Vec<Field>) -> TypeKind {
    TypeKind::Union(UnionType {
        fields,
        ..UnionType::default()
    })
}

fn enumerator(name: &str) -> Enumerator {
    Enumerator {
        name: name.into(),
        span: Span::default(),
        annotations: Vec::new(),
        value: None,
    }
}

fn enumeration(names: &[&str]) -> TypeKind {
    TypeKind::Enumeration(EnumerationType {
        base: None,
        enumerators: names.iter().map(|n| enumerator(n)).collect(),
    })
}

fn arg(name: &str, ty: TypeRef) -> Argument {
    Argument {
        name: name.into(),
        span: Span::default(),
        annotations: Vec::new(),
        ty,
        array: false,
    }
}

fn attr(name: &str, ty: TypeRef) -> Attribute {
    Attribute {
        name: name.into(),
        span: Span::default(),
        annotations: Vec::new(),
        ty,
        array: false,
        read_only: false,
        no_subscriptions: false,
    }
}

fn method(name: &str, in_args: Vec<Argument>, out_args: Vec<Argument>) -> Method {
    Method {
        name: name.into(),
        in_args,
        out_args,
        ..Method::default()
    }
}

// ---------------------------------------------------------------------------
// Assertions
// ---------------------------------------------------------------------------

fn diagnostics(model: &Model) -> Vec<Diagnostic> {
    check_model(model).into_vec()
}

/// Helper: check and return only the error messages for readability.
fn check_errors(model: &Model) -> Vec<String> {
    diagnostics(model)
        .into_iter()
        .filter(Diagnostic::is_error)
        .map(|d| d.message)
        .collect()
}

fn errors_of_kind(model: &Model, kind: DiagnosticKind) -> Vec<Diagnostic> {
    diagnostics(model)
        .into_iter()
        .filter(|d| d.is_error() && d.kind == kind)
        .collect()
}

/// Helper: assert that checking produces no errors.
fn assert_no_errors(model: &Model) {
    let errs = check_errors(model);
    assert!(errs.is_empty(), "expected no errors, got: {:?}", errs);
}

/// Helper: assert that at least one error message contains the given substring.
fn assert_has_error(model: &Model, substring: &str) {
    let errs = check_errors(model);
    assert!(
        errs.iter().any(|e| e.contains(substring)),
        "expected an error containing {:?}, got: {:?}",
        substring,
        errs
    );
}
