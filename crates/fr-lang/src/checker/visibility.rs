//! Interface-owned declarations may only be referenced from that interface
//! or interfaces derived from it.

use crate::diagnostic::{Diagnostic, DiagnosticKind, Diagnostics};
use crate::model::{
    ElementRef, Feature, InterfaceId, MemberRef, MethodErrors, Model, NodeId, Owner, Span, TypeId,
};

const KIND: DiagnosticKind = DiagnosticKind::VisibilityViolation;

/// The interface a referenced declaration is confined to, when the referrer
/// in `context` may not see it.
fn hidden_from(model: &Model, context: Owner, target: Owner) -> Option<InterfaceId> {
    let confined = target.interface()?;
    match context.interface() {
        Some(referrer) if model.inheritance_set(referrer).contains(&confined) => None,
        _ => Some(confined),
    }
}

fn message(model: &Model, what: &str, confined: InterfaceId) -> String {
    format!(
        "{what} can only be referenced inside interface {} or derived interfaces",
        model.interface_name(confined)
    )
}

struct Referrer {
    node: NodeId,
    feature: Feature,
    index: Option<usize>,
    span: Span,
    context: Owner,
}

fn check_type(model: &Model, referrer: Referrer, target: TypeId, sink: &mut Diagnostics) {
    let Some(def) = model.type_def(target) else {
        return;
    };
    if let Some(confined) = hidden_from(model, referrer.context, def.owner) {
        let mut d = Diagnostic::error(
            KIND,
            referrer.node,
            referrer.feature,
            message(model, &format!("Type {}", def.name), confined),
        )
        .with_span(referrer.span);
        d.index = referrer.index;
        sink.push(d);
    }
}

fn check_element(model: &Model, referrer: &Referrer, target: &ElementRef, sink: &mut Diagnostics) {
    let Some(element) = model.element(target) else {
        return;
    };
    if let Some(confined) = hidden_from(model, referrer.context, element.owner) {
        let what = format!("{} {}", element.kind.label(), element.name);
        let mut d = Diagnostic::error(KIND, referrer.node, referrer.feature, message(model, &what, confined))
            .with_span(referrer.span);
        d.index = referrer.index;
        sink.push(d);
    }
}

pub(super) fn check(model: &Model, sink: &mut Diagnostics) {
    // Derived type references.
    for site in model.type_ref_sites() {
        if let Some(target) = site.type_ref.derived_id() {
            let referrer = Referrer {
                node: site.node,
                feature: Feature::Derived,
                index: None,
                span: site.span(model),
                context: site.context,
            };
            check_type(model, referrer, target, sink);
        }
    }

    // Base types of structs, unions and enumerations.
    for (id, def) in model.type_ids().zip(&model.types) {
        if let Some(base) = def.kind.base() {
            let referrer = Referrer {
                node: NodeId::Type(id),
                feature: Feature::Base,
                index: None,
                span: def.span,
                context: def.owner,
            };
            check_type(model, referrer, base, sink);
        }
    }

    // Error enumerations of methods.
    for (id, iface) in model.interface_ids().zip(&model.interfaces) {
        for (index, method) in iface.methods.iter().enumerate() {
            let target = match &method.errors {
                Some(MethodErrors::Enumeration(t)) => *t,
                Some(MethodErrors::Inline { base: Some(t), .. }) => *t,
                _ => continue,
            };
            let referrer = Referrer {
                node: NodeId::Method(MemberRef { interface: id, index }),
                feature: Feature::Errors,
                index: None,
                span: method.span,
                context: Owner::Interface(id),
            };
            check_type(model, referrer, target, sink);
        }
    }

    // Element references inside expressions.
    for site in model.expr_sites() {
        let referrer = Referrer {
            node: site.node,
            feature: site.feature,
            index: site.index,
            span: model.span_of(site.node),
            context: site.context,
        };
        for target in site.expr.element_refs() {
            check_element(model, &referrer, &target, sink);
        }
    }

    // Assignment targets in contracts.
    for (id, iface) in model.interface_ids().zip(&model.interfaces) {
        let Some(contract) = &iface.contract else {
            continue;
        };
        for (s, state) in contract.states.iter().enumerate() {
            for (t, tr) in state.transitions.iter().enumerate() {
                for (k, asg) in tr.assignments.iter().enumerate() {
                    let referrer = Referrer {
                        node: NodeId::Transition {
                            interface: id,
                            state: s,
                            index: t,
                        },
                        feature: Feature::Target,
                        index: Some(k),
                        span: asg.span,
                        context: Owner::Interface(id),
                    };
                    check_element(model, &referrer, &asg.target, sink);
                }
            }
        }
    }
}
