use super::*;
use crate::model::{
    BinaryOp, BracketItem, ElementRef, Feature, FieldInit, Literal, MethodErrors, NodeId,
};

fn interval(lower: Option<i64>, upper: Option<i64>) -> TypeRef {
    TypeRef::interval(lower, upper)
}

#[test]
fn reversed_interval_is_one_error() {
    let mut b = Builder::new();
    let tc = b.collection("Types");
    b.add_type(tc, "Range", TypeKind::Alias(interval(Some(10), Some(1))));
    let model = b.build();

    let errs = errors_of_kind(&model, DiagnosticKind::TypeMismatch);
    assert_eq!(errs.len(), 1, "{errs:?}");
    assert_eq!(errs[0].feature, Feature::Interval);
    assert!(errs[0].message.starts_with("Invalid interval specification"));
}

#[test]
fn open_or_ordered_intervals_are_fine() {
    let mut b = Builder::new();
    let tc = b.collection("Types");
    b.add_type(tc, "A", TypeKind::Alias(interval(Some(1), Some(1))));
    b.add_type(tc, "B", TypeKind::Alias(interval(None, Some(-5))));
    b.add_type(tc, "C", TypeKind::Alias(interval(Some(7), None)));
    assert_no_errors(&b.build());
}

#[test]
fn integer_constant_out_of_range() {
    let mut b = Builder::new();
    let tc = b.collection("Types");
    b.add_const(tc, "SMALL", prim(Primitive::UInt8), Expr::int(256));
    b.add_const(tc, "NEG", prim(Primitive::UInt16), Expr::int(-1));
    b.add_const(tc, "OK", prim(Primitive::Int8), Expr::int(-128));
    let errs = check_errors(&b.build());
    assert_eq!(errs.len(), 2, "{errs:?}");
    assert!(errs[0].contains("value 256 is out of range for UInt8"));
    assert!(errs[1].contains("value -1 is out of range for UInt16"));
}

#[test]
fn folded_constant_expression_respects_interval() {
    let mut b = Builder::new();
    let tc = b.collection("Types");
    let base = b.add_const(tc, "BASE", int32(), Expr::int(40));
    let sum = Expr::binary(BinaryOp::Add, Expr::Ref(ElementRef::Constant(base)), Expr::int(5));
    b.add_const(tc, "IN", interval(Some(0), Some(50)), sum.clone());
    b.add_const(tc, "OUT", interval(Some(0), Some(44)), sum);
    let errs = check_errors(&b.build());
    assert_eq!(errs.len(), 1, "{errs:?}");
    assert!(errs[0].contains("value 45 is out of range for Integer(0, 44)"));
}

#[test]
fn primitive_category_mismatch() {
    let mut b = Builder::new();
    let tc = b.collection("Types");
    b.add_const(tc, "NAME", prim(Primitive::String), Expr::int(3));
    b.add_const(tc, "FLAG", prim(Primitive::Boolean), Expr::string("yes"));
    b.add_const(tc, "RATIO", prim(Primitive::Double), Expr::int(1));
    b.add_const(tc, "PI", prim(Primitive::Float), Expr::Literal(Literal::Float(2.5)));
    let errs = check_errors(&b.build());
    assert_eq!(errs.len(), 2, "{errs:?}");
    assert!(errs[0].contains("expected String, found integer"));
    assert!(errs[1].contains("expected Boolean, found String"));
}

#[test]
fn mismatch_is_reported_on_the_constant_value() {
    let mut b = Builder::new();
    let tc = b.collection("Types");
    let k = b.add_const(tc, "NAME", prim(Primitive::String), Expr::boolean(true));
    let errs = errors_of_kind(&b.build(), DiagnosticKind::TypeMismatch);
    assert_eq!(errs.len(), 1);
    assert_eq!(errs[0].node, NodeId::Constant(k));
    assert_eq!(errs[0].feature, Feature::Value);
}

#[test]
fn operand_errors_replace_fit_error() {
    let mut b = Builder::new();
    let tc = b.collection("Types");
    b.add_const(
        tc,
        "X",
        int32(),
        Expr::binary(BinaryOp::Add, Expr::int(1), Expr::string("two")),
    );
    let errs = check_errors(&b.build());
    assert_eq!(errs.len(), 1, "{errs:?}");
    assert!(errs[0].contains("operator `+` requires numeric operands"));
}

#[test]
fn enumeration_constant_uses_enumerator_of_type_or_base() {
    let mut b = Builder::new();
    let tc = b.collection("Types");
    let base = b.add_type(tc, "Base", enumeration(&["A"]));
    let ext = b.add_type(
        tc,
        "Ext",
        TypeKind::Enumeration(EnumerationType {
            base: Some(base),
            enumerators: vec![enumerator("B")],
        }),
    );
    let other = b.add_type(tc, "Other", enumeration(&["Z"]));
    b.add_const(tc, "K1", derived(ext), Expr::Ref(ElementRef::Enumerator { owner: base, index: 0 }));
    b.add_const(tc, "K2", derived(ext), Expr::Ref(ElementRef::Enumerator { owner: ext, index: 0 }));
    b.add_const(tc, "K3", derived(ext), Expr::Ref(ElementRef::Enumerator { owner: other, index: 0 }));
    let errs = check_errors(&b.build());
    assert_eq!(errs.len(), 1, "{errs:?}");
    assert!(errs[0].contains("enumerator 'Z' belongs to Other, not to Ext"));
}

#[test]
fn struct_compound_initializer() {
    let mut b = Builder::new();
    let tc = b.collection("Types");
    let point = b.add_type(tc, "Point", struct_of(vec![field("x", int32()), field("y", int32())]));
    let init = |pairs: &[(usize, i64)]| {
        Expr::Compound(
            pairs
                .iter()
                .map(|(index, v)| FieldInit {
                    owner: point,
                    index: *index,
                    value: Expr::int(*v),
                })
                .collect(),
        )
    };
    b.add_const(tc, "ORIGIN", derived(point), init(&[(0, 0), (1, 0)]));
    b.add_const(tc, "HALF", derived(point), init(&[(0, 1)]));
    b.add_const(tc, "TWICE", derived(point), init(&[(0, 1), (0, 2), (1, 3)]));
    let errs = check_errors(&b.build());
    assert_eq!(errs.len(), 2, "{errs:?}");
    assert!(errs[0].contains("element 'y' is not initialized"));
    assert!(errs[1].contains("element 'x' is initialized twice"));
}

#[test]
fn struct_initializer_covers_inherited_elements() {
    let mut b = Builder::new();
    let tc = b.collection("Types");
    let base = b.add_type(tc, "Base", struct_of(vec![field("id", int32())]));
    let ext = b.add_type(tc, "Ext", struct_extending(base, vec![field("name", prim(Primitive::String))]));
    b.add_const(
        tc,
        "K",
        derived(ext),
        Expr::Compound(vec![
            FieldInit {
                owner: base,
                index: 0,
                value: Expr::int(7),
            },
            FieldInit {
                owner: ext,
                index: 0,
                value: Expr::string("seven"),
            },
        ]),
    );
    assert_no_errors(&b.build());
}

#[test]
fn union_initializer_takes_exactly_one_element() {
    let mut b = Builder::new();
    let tc = b.collection("Types");
    let u = b.add_type(tc, "U", union_of(vec![field("i", int32()), field("s", prim(Primitive::String))]));
    let fi = |index, value| FieldInit { owner: u, index, value };
    b.add_const(tc, "ONE", derived(u), Expr::Compound(vec![fi(1, Expr::string("x"))]));
    b.add_const(
        tc,
        "TWO",
        derived(u),
        Expr::Compound(vec![fi(0, Expr::int(1)), fi(1, Expr::string("x"))]),
    );
    let errs = check_errors(&b.build());
    assert_eq!(errs.len(), 1, "{errs:?}");
    assert!(errs[0].contains("exactly one element, found 2"));
}

#[test]
fn array_map_and_bytebuffer_initializers() {
    let mut b = Builder::new();
    let tc = b.collection("Types");
    let arr = b.add_type(tc, "Bytes", TypeKind::Array { element: prim(Primitive::UInt8) });
    let map = b.add_type(
        tc,
        "Names",
        TypeKind::Map {
            key: int32(),
            value: prim(Primitive::String),
        },
    );
    let item = |first| BracketItem { first, value: None };
    let entry = |k, v| BracketItem {
        first: k,
        value: Some(v),
    };
    b.add_const(tc, "A", derived(arr), Expr::Bracket(vec![item(Expr::int(1)), item(Expr::int(300))]));
    b.add_const(tc, "M", derived(map), Expr::Bracket(vec![entry(Expr::int(1), Expr::string("one"))]));
    b.add_const(tc, "BAD_M", derived(map), Expr::Bracket(vec![item(Expr::int(1))]));
    b.add_const(
        tc,
        "BB",
        prim(Primitive::ByteBuffer),
        Expr::Bracket(vec![item(Expr::int(0)), item(Expr::int(255))]),
    );
    b.add_const_def(tc, "IMPLICIT", int32(), true, Expr::Bracket(vec![item(Expr::boolean(true))]));
    let errs = check_errors(&b.build());
    assert_eq!(errs.len(), 3, "{errs:?}");
    assert!(errs[0].contains("item 1: value 300 is out of range for UInt8"));
    assert!(errs[1].contains("map initializer requires 'key => value' entries"));
    assert!(errs[2].contains("Int32[]") && errs[2].contains("expected integer, found Boolean"));
}

#[test]
fn alias_resolves_to_actual_type() {
    let mut b = Builder::new();
    let tc = b.collection("Types");
    let small = b.add_type(tc, "Small", TypeKind::Alias(prim(Primitive::Int8)));
    b.add_const(tc, "K", derived(small), Expr::int(1000));
    assert_has_error(&b.build(), "value 1000 is out of range for Int8");
}

#[test]
fn enumerator_values_must_be_integers_in_range() {
    let mut b = Builder::new();
    let tc = b.collection("Types");
    let mut e = EnumerationType::default();
    for (name, value) in [
        ("A", Some(Expr::int(1))),
        ("B", Some(Expr::string("two"))),
        ("C", Some(Expr::int(i64::from(u32::MAX) + 1))),
        ("D", None),
    ] {
        e.enumerators.push(Enumerator {
            value,
            ..enumerator(name)
        });
    }
    let t = b.add_type(tc, "E", TypeKind::Enumeration(e));
    let errs = errors_of_kind(&b.build(), DiagnosticKind::TypeMismatch);
    assert_eq!(errs.len(), 2, "{errs:?}");
    assert_eq!(errs[0].node, NodeId::Enumerator(t, 1));
    assert_eq!(errs[0].message, "Enumerator value must be an integer constant");
    assert_eq!(errs[1].node, NodeId::Enumerator(t, 2));
}

#[test]
fn inline_error_enumerator_value_is_checked() {
    let mut b = Builder::new();
    let i = b.interface("I");
    b.method(
        i,
        Method {
            errors: Some(MethodErrors::Inline {
                base: None,
                enumerators: vec![Enumerator {
                    value: Some(Expr::boolean(false)),
                    ..enumerator("FAIL")
                }],
            }),
            ..method("m", vec![], vec![])
        },
    );
    let errs = errors_of_kind(&b.build(), DiagnosticKind::TypeMismatch);
    assert_eq!(errs.len(), 1);
    assert_eq!(errs[0].feature, Feature::Errors);
    assert_eq!(errs[0].index, Some(0));
}

#[test]
fn interval_on_attribute_is_located_on_the_attribute() {
    let mut b = Builder::new();
    let i = b.interface("I");
    let a = b.attribute(i, "level", interval(Some(5), Some(0)));
    let errs = errors_of_kind(&b.build(), DiagnosticKind::TypeMismatch);
    assert_eq!(errs.len(), 1);
    assert_eq!(errs[0].node, NodeId::Attribute(a));
    assert_eq!(errs[0].feature, Feature::Interval);
}
