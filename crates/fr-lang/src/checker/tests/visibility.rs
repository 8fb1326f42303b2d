use super::*;
use crate::model::{ElementRef, Feature, MethodErrors, NodeId};

/// `Owner` interface declaring `Secret`, plus an unrelated `Stranger`.
fn two_interfaces() -> (Builder, InterfaceId, InterfaceId, TypeId) {
    let mut b = Builder::new();
    let owner = b.interface("Owner");
    let stranger = b.interface("Stranger");
    let secret = b.add_type(owner, "Secret", enumeration(&["HIDDEN"]));
    (b, owner, stranger, secret)
}

#[test]
fn collection_types_are_visible_everywhere() {
    let mut b = Builder::new();
    let tc = b.collection("Common");
    let i = b.interface("I");
    let shared = b.add_type(tc, "Shared", enumeration(&["A"]));
    b.attribute(i, "mode", derived(shared));
    b.add_type(tc, "Holder", struct_of(vec![field("s", derived(shared))]));
    assert_no_errors(&b.build());
}

#[test]
fn unrelated_interface_cannot_use_interface_type() {
    let (mut b, _owner, stranger, secret) = two_interfaces();
    let a = b.attribute(stranger, "peek", derived(secret));
    let errs = errors_of_kind(&b.build(), DiagnosticKind::VisibilityViolation);

    assert_eq!(errs.len(), 1, "{errs:?}");
    assert_eq!(errs[0].node, NodeId::Attribute(a));
    assert_eq!(errs[0].feature, Feature::Derived);
    assert_eq!(
        errs[0].message,
        "Type Secret can only be referenced inside interface Owner or derived interfaces"
    );
}

#[test]
fn owner_and_derived_interfaces_may_use_it() {
    let (mut b, owner, _stranger, secret) = two_interfaces();
    let child = b.interface("Child");
    let grandchild = b.interface("GrandChild");
    b.extends(child, owner);
    b.extends(grandchild, child);
    b.attribute(owner, "own", derived(secret));
    b.method(grandchild, method("get", vec![], vec![arg("s", derived(secret))]));
    assert_no_errors(&b.build());
}

#[test]
fn base_interface_cannot_use_type_of_derived() {
    let mut b = Builder::new();
    let base = b.interface("Base");
    let child = b.interface("Child");
    b.extends(child, base);
    let t = b.add_type(child, "Extra", enumeration(&["X"]));
    b.attribute(base, "extra", derived(t));
    assert_has_error(&b.build(), "Type Extra can only be referenced inside interface Child");
}

#[test]
fn collection_cannot_use_interface_type() {
    let (mut b, _owner, _stranger, secret) = two_interfaces();
    let tc = b.collection("Common");
    let holder = b.add_type(tc, "Holder", struct_of(vec![field("s", derived(secret))]));
    let errs = errors_of_kind(&b.build(), DiagnosticKind::VisibilityViolation);
    assert_eq!(errs.len(), 1, "{errs:?}");
    assert_eq!(errs[0].node, NodeId::Field(holder, 0));
}

#[test]
fn base_type_from_other_interface() {
    let mut b = Builder::new();
    let owner = b.interface("Owner");
    let stranger = b.interface("Stranger");
    let base = b.add_type(owner, "Base", struct_of(vec![field("x", int32())]));
    let ext = b.add_type(stranger, "Ext", struct_extending(base, vec![field("y", int32())]));
    let errs = errors_of_kind(&b.build(), DiagnosticKind::VisibilityViolation);
    assert_eq!(errs.len(), 1, "{errs:?}");
    assert_eq!((errs[0].node, errs[0].feature), (NodeId::Type(ext), Feature::Base));
}

#[test]
fn error_enumeration_from_other_interface() {
    let (mut b, _owner, stranger, secret) = two_interfaces();
    let m = b.method(
        stranger,
        Method {
            errors: Some(MethodErrors::Enumeration(secret)),
            ..method("fail", vec![], vec![])
        },
    );
    let errs = errors_of_kind(&b.build(), DiagnosticKind::VisibilityViolation);
    assert_eq!(errs.len(), 1, "{errs:?}");
    assert_eq!((errs[0].node, errs[0].feature), (NodeId::Method(m), Feature::Errors));
}

#[test]
fn constant_and_enumerator_references_in_values() {
    let (mut b, owner, stranger, secret) = two_interfaces();
    let limit = b.add_const(owner, "LIMIT", int32(), Expr::int(10));
    let k = b.add_const(stranger, "COPY", int32(), Expr::Ref(ElementRef::Constant(limit)));
    b.add_const(
        stranger,
        "PICK",
        derived(secret),
        Expr::Ref(ElementRef::Enumerator { owner: secret, index: 0 }),
    );
    let errs = errors_of_kind(&b.build(), DiagnosticKind::VisibilityViolation);

    let messages: Vec<_> = errs.iter().map(|e| e.message.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            // PICK's declared type.
            "Type Secret can only be referenced inside interface Owner or derived interfaces",
            "Constant LIMIT can only be referenced inside interface Owner or derived interfaces",
            "Enumerator HIDDEN can only be referenced inside interface Owner or derived interfaces",
        ]
    );
    assert_eq!((errs[1].node, errs[1].feature), (NodeId::Constant(k), Feature::Value));
}
