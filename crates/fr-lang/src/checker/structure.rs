//! Shape rules: unique names, required members, argument disjointness,
//! fire-and-forget restrictions, element order and annotation kinds.

use crate::diagnostic::{Diagnostic, DiagnosticKind, Diagnostics};
use crate::model::{
    Argument, ArgumentRef, CollectionId, ConstId, Direction, Feature, Interface, InterfaceId,
    MemberRef, MethodErrors, Model, NodeId, Operation, Span, TypeId, TypeKind,
};

use super::{Options, report_duplicates};

const KIND: DiagnosticKind = DiagnosticKind::StructuralViolation;

pub(super) fn check(model: &Model, options: &Options, sink: &mut Diagnostics) {
    check_top_level_names(model, sink);

    for coll in &model.collections {
        check_definition_names(model, &coll.types, &coll.constants, sink);
    }

    for (id, iface) in model.interface_ids().zip(&model.interfaces) {
        check_interface(model, id, iface, sink);
        if options.element_order {
            check_element_order(model, id, iface, sink);
        }
    }

    for (id, def) in model.type_ids().zip(&model.types) {
        check_type_shape(id, &def.kind, sink);
    }

    check_annotations(model, sink);
}

fn check_top_level_names(model: &Model, sink: &mut Diagnostics) {
    let collections = model
        .collections
        .iter()
        .enumerate()
        .map(|(i, c)| (c.name.as_str(), NodeId::Collection(CollectionId(i))));
    let interfaces = model
        .interface_ids()
        .zip(&model.interfaces)
        .map(|(id, i)| (i.name.as_str(), NodeId::Interface(id)));
    report_duplicates(
        collections.chain(interfaces),
        "type collection or interface name",
        KIND,
        sink,
    );
}

fn check_definition_names(
    model: &Model,
    types: &[TypeId],
    constants: &[ConstId],
    sink: &mut Diagnostics,
) {
    report_duplicates(
        types.iter().map(|t| (model.type_name(*t), NodeId::Type(*t))),
        "type name",
        KIND,
        sink,
    );
    report_duplicates(
        constants.iter().filter_map(|k| {
            model
                .constant(*k)
                .map(|c| (c.name.as_str(), NodeId::Constant(*k)))
        }),
        "constant name",
        KIND,
        sink,
    );
}

fn check_interface(model: &Model, id: InterfaceId, iface: &Interface, sink: &mut Diagnostics) {
    check_definition_names(model, &iface.types, &iface.constants, sink);

    report_duplicates(
        iface.attributes.iter().enumerate().map(|(index, a)| {
            (
                a.name.as_str(),
                NodeId::Attribute(MemberRef {
                    interface: id,
                    index,
                }),
            )
        }),
        "attribute name",
        KIND,
        sink,
    );

    for (m, method) in iface.methods.iter().enumerate() {
        let args = |direction, list| method_args(id, m, direction, list);
        report_duplicates(
            args(Direction::In, &method.in_args).map(|(n, r)| (n, NodeId::Argument(r))),
            "argument name",
            KIND,
            sink,
        );
        report_duplicates(
            args(Direction::Out, &method.out_args).map(|(n, r)| (n, NodeId::Argument(r))),
            "argument name",
            KIND,
            sink,
        );

        // In and out arguments share one namespace.
        for (out_name, out_ref) in args(Direction::Out, &method.out_args) {
            let Some((_, in_ref)) = args(Direction::In, &method.in_args).find(|(n, _)| *n == out_name)
            else {
                continue;
            };
            let msg = format!("Duplicate argument name '{out_name}' used for in and out");
            sink.error(KIND, NodeId::Argument(in_ref), Feature::Name, msg.clone());
            sink.error(KIND, NodeId::Argument(out_ref), Feature::Name, msg);
        }

        let node = NodeId::Method(MemberRef { interface: id, index: m });
        if method.fire_and_forget {
            if !method.out_args.is_empty() {
                sink.error(
                    KIND,
                    node,
                    Feature::FireAndForget,
                    "Fire-and-forget methods cannot have out arguments",
                );
            }
            if method.errors.is_some() {
                sink.error(
                    KIND,
                    node,
                    Feature::FireAndForget,
                    "Fire-and-forget methods cannot have error return codes",
                );
            }
        }

        if let Some(MethodErrors::Inline { enumerators, .. }) = &method.errors {
            let mut seen: Vec<&str> = Vec::new();
            for (k, e) in enumerators.iter().enumerate() {
                if seen.contains(&e.name.as_str()) {
                    sink.push(
                        Diagnostic::error(
                            KIND,
                            node,
                            Feature::Errors,
                            format!("Duplicate enumerator name '{}'", e.name),
                        )
                        .at_index(k),
                    );
                } else {
                    seen.push(&e.name);
                }
            }
        }
    }

    for (b, bc) in iface.broadcasts.iter().enumerate() {
        report_duplicates(
            bc.out_args.iter().enumerate().map(|(index, a)| {
                (
                    a.name.as_str(),
                    NodeId::Argument(ArgumentRef {
                        interface: id,
                        operation: Operation::Broadcast(b),
                        direction: Direction::Out,
                        index,
                    }),
                )
            }),
            "argument name",
            KIND,
            sink,
        );
    }
}

fn method_args(
    interface: InterfaceId,
    method: usize,
    direction: Direction,
    list: &[Argument],
) -> impl Iterator<Item = (&str, ArgumentRef)> {
    list.iter().enumerate().map(move |(index, a)| {
        (
            a.name.as_str(),
            ArgumentRef {
                interface,
                operation: Operation::Method(method),
                direction,
                index,
            },
        )
    })
}

fn check_type_shape(id: TypeId, kind: &TypeKind, sink: &mut Diagnostics) {
    let node = NodeId::Type(id);
    match kind {
        TypeKind::Struct(s) => {
            if s.base.is_none() && s.fields.is_empty() && !s.polymorphic {
                sink.error(
                    KIND,
                    node,
                    Feature::Name,
                    "Non-polymorphic structs must have own or inherited elements",
                );
            }
        }
        TypeKind::Union(u) => {
            if u.base.is_none() && u.fields.is_empty() {
                sink.error(KIND, node, Feature::Name, "Union must have own or inherited elements");
            }
        }
        TypeKind::Enumeration(e) => {
            if e.enumerators.is_empty() {
                sink.error(KIND, node, Feature::Name, "Enumeration must not be empty");
            }
            report_duplicates(
                e.enumerators
                    .iter()
                    .enumerate()
                    .map(|(i, en)| (en.name.as_str(), NodeId::Enumerator(id, i))),
                "enumerator name",
                KIND,
                sink,
            );
        }
        TypeKind::Array { .. } | TypeKind::Map { .. } | TypeKind::Alias(_) => {}
    }

    if let Some(fields) = kind.fields() {
        report_duplicates(
            fields
                .iter()
                .enumerate()
                .map(|(i, f)| (f.name.as_str(), NodeId::Field(id, i))),
            "element name",
            KIND,
            sink,
        );
    }
}

/// Types and constants after the contract are tolerated for compatibility
/// with older model files, but flagged.
fn check_element_order(model: &Model, id: InterfaceId, iface: &Interface, sink: &mut Diagnostics) {
    let Some(contract) = &iface.contract else {
        return;
    };
    if contract.span.is_unknown() {
        return;
    }
    let after_contract = |span: Span| !span.is_unknown() && span.start > contract.span.start;
    let msg = "Deprecated order of interface elements (contract should be at the end)";

    for (i, k) in iface.constants.iter().enumerate() {
        if model.constant(*k).is_some_and(|c| after_contract(c.span)) {
            sink.push(
                Diagnostic::warning(KIND, NodeId::Interface(id), Feature::Constants, msg).at_index(i),
            );
        }
    }
    for (i, t) in iface.types.iter().enumerate() {
        if model.type_def(*t).is_some_and(|d| after_contract(d.span)) {
            sink.push(Diagnostic::warning(KIND, NodeId::Interface(id), Feature::Types, msg).at_index(i));
        }
    }
}

fn check_annotations(model: &Model, sink: &mut Diagnostics) {
    for (node, annotations) in model.annotated() {
        for (i, a) in annotations.iter().enumerate() {
            if a.kind().is_none() {
                sink.push(
                    Diagnostic::error(
                        DiagnosticKind::InvalidAnnotation,
                        node,
                        Feature::Annotation,
                        format!("Invalid annotation type '@{}'", a.tag),
                    )
                    .at_index(i)
                    .with_span(a.span),
                );
            }
        }
    }
}
