use super::*;
use crate::model::{Feature, NodeId};

#[test]
fn struct_base_must_be_a_struct() {
    let mut b = Builder::new();
    let tc = b.collection("Types");
    let u = b.add_type(tc, "Shape", union_of(vec![field("r", int32())]));
    let s = b.add_type(tc, "Circle", struct_extending(u, vec![field("x", int32())]));
    let errs = errors_of_kind(&b.build(), DiagnosticKind::InheritanceConflict);
    assert_eq!(errs.len(), 1, "{errs:?}");
    assert_eq!(errs[0].node, NodeId::Type(s));
    assert_eq!(errs[0].feature, Feature::Base);
    assert_eq!(
        errs[0].message,
        "Base of struct 'Circle' must be a struct, but 'Shape' is a union"
    );
}

#[test]
fn enumeration_extending_an_enumeration_is_fine() {
    let mut b = Builder::new();
    let tc = b.collection("Types");
    let base = b.add_type(tc, "Base", enumeration(&["A"]));
    b.add_type(
        tc,
        "Ext",
        TypeKind::Enumeration(EnumerationType {
            base: Some(base),
            enumerators: vec![enumerator("B")],
        }),
    );
    assert_no_errors(&b.build());
}

#[test]
fn attribute_redeclared_in_derived_interface() {
    let mut b = Builder::new();
    let base = b.interface("Base");
    let derived_if = b.interface("Derived");
    b.extends(derived_if, base);
    let inherited = b.attribute(base, "speed", int32());
    let local = b.attribute(derived_if, "speed", int32());
    b.attribute(derived_if, "heading", int32());
    let errs = errors_of_kind(&b.build(), DiagnosticKind::InheritanceConflict);

    assert_eq!(errs.len(), 2, "{errs:?}");
    assert_eq!(errs[0].node, NodeId::Attribute(local));
    assert_eq!(errs[1].node, NodeId::Attribute(inherited));
    assert!(errs.iter().all(|e| {
        e.message == "Duplicate attribute 'speed' in inheritance chain of interface 'Derived'"
    }));
}

#[test]
fn types_and_constants_clash_across_the_chain() {
    let mut b = Builder::new();
    let root = b.interface("Root");
    let mid = b.interface("Mid");
    let leaf = b.interface("Leaf");
    b.extends(mid, root);
    b.extends(leaf, mid);
    b.add_type(root, "Mode", enumeration(&["ON"]));
    b.add_type(leaf, "Mode", enumeration(&["OFF"]));
    b.add_const(mid, "LIMIT", int32(), Expr::int(1));
    b.add_const(leaf, "LIMIT", int32(), Expr::int(2));
    let errs = check_errors(&b.build());

    assert_eq!(
        errs,
        vec![
            "Duplicate type 'Mode' in inheritance chain of interface 'Leaf'".to_string(),
            "Duplicate type 'Mode' in inheritance chain of interface 'Leaf'".to_string(),
            "Duplicate constant 'LIMIT' in inheritance chain of interface 'Leaf'".to_string(),
            "Duplicate constant 'LIMIT' in inheritance chain of interface 'Leaf'".to_string(),
        ]
    );
}

#[test]
fn sibling_interfaces_may_reuse_names() {
    let mut b = Builder::new();
    let base = b.interface("Base");
    let left = b.interface("Left");
    let right = b.interface("Right");
    b.extends(left, base);
    b.extends(right, base);
    b.attribute(left, "value", int32());
    b.attribute(right, "value", int32());
    assert_no_errors(&b.build());
}

#[test]
fn derived_contract_cannot_replace_base_contract() {
    let mut b = Builder::new();
    let base = b.interface("Base");
    let mid = b.interface("Mid");
    let leaf = b.interface("Leaf");
    b.extends(mid, base);
    b.extends(leaf, mid);
    b.contract(base, Contract::default());
    b.contract(leaf, Contract::default());
    let errs = errors_of_kind(&b.build(), DiagnosticKind::InheritanceConflict);

    assert_eq!(errs.len(), 1, "{errs:?}");
    assert_eq!(errs[0].node, NodeId::Contract(leaf));
    assert_eq!(errs[0].feature, Feature::Contract);
    assert_eq!(
        errs[0].message,
        "Interface cannot overwrite base contract (inherited from 'Base')"
    );
}

#[test]
fn contract_in_derived_interface_alone_is_fine() {
    let mut b = Builder::new();
    let base = b.interface("Base");
    let derived_if = b.interface("Derived");
    b.extends(derived_if, base);
    b.contract(derived_if, Contract::default());
    assert_no_errors(&b.build());
}
