//! Overloaded methods and broadcasts must be distinguishable by their
//! argument type signatures.

use crate::diagnostic::{DiagnosticKind, Diagnostics};
use crate::model::{Argument, Feature, InterfaceId, MemberRef, Model, NodeId, TypeRefKind};

/// A method or broadcast seen through an interface's inheritance chain.
struct Overload<'a> {
    member: MemberRef,
    name: &'a str,
    selector: Option<&'a str>,
    signature: Vec<(&'a TypeRefKind, bool)>,
}

/// Argument types in order, names ignored.
fn signature(args: &[Argument]) -> Vec<(&TypeRefKind, bool)> {
    args.iter().map(|a| (&a.ty.kind, a.array)).collect()
}

/// Two same-named operations clash when neither carries a distinct explicit
/// selector and one signature equals or is a strict prefix of the other.
fn ambiguous(a: &Overload<'_>, b: &Overload<'_>) -> bool {
    if let (Some(sa), Some(sb)) = (a.selector, b.selector)
        && sa != sb
    {
        return false;
    }
    let n = a.signature.len().min(b.signature.len());
    a.signature[..n] == b.signature[..n]
}

pub(super) fn check(model: &Model, sink: &mut Diagnostics) {
    for id in model.interface_ids() {
        let chain = model.inheritance_set(id);

        let mut methods = Vec::new();
        let mut broadcasts = Vec::new();
        for &from in &chain {
            let Some(iface) = model.interface(from) else {
                continue;
            };
            for (index, m) in iface.methods.iter().enumerate() {
                methods.push(Overload {
                    member: MemberRef { interface: from, index },
                    name: &m.name,
                    selector: m.selector.as_deref(),
                    signature: signature(&m.in_args),
                });
            }
            for (index, b) in iface.broadcasts.iter().enumerate() {
                broadcasts.push(Overload {
                    member: MemberRef { interface: from, index },
                    name: &b.name,
                    selector: b.selector.as_deref(),
                    signature: signature(&b.out_args),
                });
            }
        }

        report(model, id, &methods, "method", NodeId::Method, Feature::InArgs, sink);
        report(model, id, &broadcasts, "broadcast", NodeId::Broadcast, Feature::OutArgs, sink);
    }
}

/// Report every ambiguous pair with at least one member declared by `id`
/// itself; pairs entirely inside a base are reported for that base.
fn report(
    model: &Model,
    id: InterfaceId,
    overloads: &[Overload<'_>],
    what: &str,
    node: fn(MemberRef) -> NodeId,
    feature: Feature,
    sink: &mut Diagnostics,
) {
    for (i, a) in overloads.iter().enumerate() {
        for b in &overloads[i + 1..] {
            if a.name != b.name || (a.member.interface != id && b.member.interface != id) {
                continue;
            }
            if !ambiguous(a, b) {
                continue;
            }
            let msg = format!(
                "Ambiguous overloaded {what} '{}' in interface '{}': argument types do not distinguish the overloads",
                a.name,
                model.interface_name(id)
            );
            for m in [a, b] {
                sink.error(DiagnosticKind::InheritanceConflict, node(m.member), feature, msg.clone());
            }
        }
    }
}
