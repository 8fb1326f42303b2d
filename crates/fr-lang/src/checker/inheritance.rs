//! Consistency of interface inheritance and of struct/union/enumeration
//! base types.

use indexmap::IndexSet;

use crate::diagnostic::{DiagnosticKind, Diagnostics};
use crate::model::{Feature, InterfaceId, MemberRef, Model, NodeId, TypeId, TypeKind};

const KIND: DiagnosticKind = DiagnosticKind::InheritanceConflict;

pub(super) fn check(model: &Model, sink: &mut Diagnostics) {
    for id in model.type_ids() {
        check_base_kind(model, id, sink);
    }

    for id in model.interface_ids() {
        check_inherited_names(model, id, sink);
        check_base_contract(model, id, sink);
    }
}

fn check_base_kind(model: &Model, id: TypeId, sink: &mut Diagnostics) {
    let Some(def) = model.type_def(id) else {
        return;
    };
    let Some(base) = def.kind.base() else {
        return;
    };
    let Some(base_def) = model.type_def(base) else {
        return;
    };
    let same_kind = matches!(
        (&def.kind, &base_def.kind),
        (TypeKind::Struct(_), TypeKind::Struct(_))
            | (TypeKind::Union(_), TypeKind::Union(_))
            | (TypeKind::Enumeration(_), TypeKind::Enumeration(_))
    );
    if !same_kind {
        sink.error(
            KIND,
            NodeId::Type(id),
            Feature::Base,
            format!(
                "Base of {} '{}' must be a {}, but '{}' is a {}",
                def.kind.label(),
                def.name,
                def.kind.label(),
                base_def.name,
                base_def.kind.label()
            ),
        );
    }
}

/// One named member contributed to an interface by itself or a base.
struct Contributed<'a> {
    name: &'a str,
    from: InterfaceId,
    node: NodeId,
}

/// Names that clash between an interface and its bases.
///
/// Clashes among an interface's own members are structural errors; here
/// only pairs of one local and one inherited member are reported.
fn check_inherited_names(model: &Model, id: InterfaceId, sink: &mut Diagnostics) {
    let chain = model.inheritance_set(id);
    if chain.len() < 2 {
        return;
    }

    let mut attributes = Vec::new();
    let mut types = Vec::new();
    let mut constants = Vec::new();
    for &from in &chain {
        let Some(iface) = model.interface(from) else {
            continue;
        };
        for (index, a) in iface.attributes.iter().enumerate() {
            attributes.push(Contributed {
                name: &a.name,
                from,
                node: NodeId::Attribute(MemberRef { interface: from, index }),
            });
        }
        for t in &iface.types {
            types.push(Contributed {
                name: model.type_name(*t),
                from,
                node: NodeId::Type(*t),
            });
        }
        for k in &iface.constants {
            if let Some(c) = model.constant(*k) {
                constants.push(Contributed {
                    name: &c.name,
                    from,
                    node: NodeId::Constant(*k),
                });
            }
        }
    }

    let iface_name = model.interface_name(id);
    for (what, members) in [
        ("attribute", attributes),
        ("type", types),
        ("constant", constants),
    ] {
        let mut flagged: IndexSet<NodeId> = IndexSet::new();
        for local in members.iter().filter(|m| m.from == id) {
            for inherited in members.iter().filter(|m| m.from != id && m.name == local.name) {
                flagged.insert(local.node);
                flagged.insert(inherited.node);
            }
        }
        for node in flagged {
            let name = members
                .iter()
                .find(|m| m.node == node)
                .map_or("?", |m| m.name);
            sink.error(
                KIND,
                node,
                Feature::Name,
                format!("Duplicate {what} '{name}' in inheritance chain of interface '{iface_name}'"),
            );
        }
    }
}

fn check_base_contract(model: &Model, id: InterfaceId, sink: &mut Diagnostics) {
    if model.interface(id).and_then(|i| i.contract.as_ref()).is_none() {
        return;
    }
    let base_with_contract = model
        .base_interfaces(id)
        .into_iter()
        .find(|b| model.interface(*b).is_some_and(|i| i.contract.is_some()));
    if let Some(base) = base_with_contract {
        sink.error(
            KIND,
            NodeId::Contract(id),
            Feature::Contract,
            format!(
                "Interface cannot overwrite base contract (inherited from '{}')",
                model.interface_name(base)
            ),
        );
    }
}
