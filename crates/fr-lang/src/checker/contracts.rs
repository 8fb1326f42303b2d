//! Behavioral contracts: triggers, guards, assignments and transition
//! targets of each state.

use crate::diagnostic::{Diagnostic, DiagnosticKind, Diagnostics};
use crate::model::{
    ArgumentRef, Contract, Direction, ElementKind, ElementRef, Event, Expr, Feature, InterfaceId,
    MemberRef, Model, NodeId, Operation, Transition,
};

use super::report_duplicates;
use super::types::{Ty, check_expr, infer, type_ref_label, value_fits};

const KIND: DiagnosticKind = DiagnosticKind::ContractViolation;

pub(super) fn check(model: &Model, sink: &mut Diagnostics) {
    for (id, iface) in model.interface_ids().zip(&model.interfaces) {
        if let Some(contract) = &iface.contract {
            check_contract(model, id, contract, sink);
        }
    }
}

fn check_contract(model: &Model, id: InterfaceId, contract: &Contract, sink: &mut Diagnostics) {
    report_duplicates(
        contract
            .variables
            .iter()
            .enumerate()
            .map(|(i, v)| (v.name.as_str(), NodeId::StateVariable(id, i))),
        "state variable name",
        KIND,
        sink,
    );
    report_duplicates(
        contract
            .states
            .iter()
            .enumerate()
            .map(|(i, s)| (s.name.as_str(), NodeId::State(id, i))),
        "state name",
        KIND,
        sink,
    );

    for (s, state) in contract.states.iter().enumerate() {
        for (t, tr) in state.transitions.iter().enumerate() {
            let node = NodeId::Transition {
                interface: id,
                state: s,
                index: t,
            };
            let cx = TransitionContext {
                model,
                interface: id,
                node,
                transition: tr,
            };
            if tr.to >= contract.states.len() {
                sink.push(
                    Diagnostic::error(
                        KIND,
                        node,
                        Feature::Element,
                        format!("Transition target state #{} does not exist", tr.to),
                    )
                    .with_span(tr.span),
                );
            }
            cx.check_trigger(sink);
            cx.check_guard(sink);
            for (k, asg) in tr.assignments.iter().enumerate() {
                cx.check_assignment(k, &asg.target, &asg.value, sink);
            }
        }
    }
}

struct TransitionContext<'a> {
    model: &'a Model,
    interface: InterfaceId,
    node: NodeId,
    transition: &'a Transition,
}

impl TransitionContext<'_> {
    fn error(&self, feature: Feature, message: String) -> Diagnostic {
        Diagnostic::error(KIND, self.node, feature, message)
    }

    fn check_trigger(&self, sink: &mut Diagnostics) {
        let model = self.model;
        let trigger = &self.transition.trigger;
        let member = trigger.event.member();
        let keyword = trigger.event.keyword();

        if !model.inheritance_set(self.interface).contains(&member.interface) {
            sink.push(
                self.error(
                    Feature::Trigger,
                    format!(
                        "Trigger '{keyword}' refers to a member of interface {}, which is not {} or one of its bases",
                        model.interface_name(member.interface),
                        model.interface_name(self.interface)
                    ),
                )
                .with_span(trigger.span),
            );
            return;
        }

        let problem = match trigger.event {
            Event::Call(_) | Event::Signal(_) => None,
            Event::Respond(m) => model.method(m).and_then(|method| {
                method.fire_and_forget.then(|| {
                    format!("Cannot trigger 'respond' on fire-and-forget method '{}'", method.name)
                })
            }),
            Event::Error(m) => model.method(m).and_then(|method| {
                if method.fire_and_forget {
                    Some(format!("Cannot trigger 'error' on fire-and-forget method '{}'", method.name))
                } else if method.errors.is_none() {
                    Some(format!("Method '{}' declares no errors, cannot trigger 'error'", method.name))
                } else {
                    None
                }
            }),
            Event::Set(m) => model.attribute(m).and_then(|a| {
                a.read_only
                    .then(|| format!("Attribute '{}' is readonly, cannot trigger 'set'", a.name))
            }),
            Event::Update(m) => model.attribute(m).and_then(|a| {
                a.no_subscriptions.then(|| {
                    format!("Attribute '{}' has no subscriptions, cannot trigger 'update'", a.name)
                })
            }),
        };
        if let Some(msg) = problem {
            sink.push(self.error(Feature::Trigger, msg).with_span(trigger.span));
        }
    }

    /// Arguments that the trigger event makes available to guards and
    /// assignments.
    fn argument_allowed(&self, arg: ArgumentRef) -> bool {
        let member = self.transition.trigger.event.member();
        let (operation, direction) = match self.transition.trigger.event {
            Event::Call(_) => (Operation::Method(member.index), Direction::In),
            Event::Respond(_) => (Operation::Method(member.index), Direction::Out),
            Event::Signal(_) => (Operation::Broadcast(member.index), Direction::Out),
            Event::Error(_) | Event::Set(_) | Event::Update(_) => return false,
        };
        arg.interface == member.interface && arg.operation == operation && arg.direction == direction
    }

    fn check_argument_refs(&self, expr: &Expr, feature: Feature, index: Option<usize>, sink: &mut Diagnostics) {
        for r in expr.element_refs() {
            let ElementRef::Argument(arg) = r else {
                continue;
            };
            if self.argument_allowed(arg) {
                continue;
            }
            let name = self.model.argument(arg).map_or("?", |a| a.name.as_str());
            let mut d = self.error(
                feature,
                format!(
                    "Argument '{name}' is not available for trigger '{}'",
                    self.transition.trigger.event.keyword()
                ),
            );
            d.index = index;
            sink.push(d);
        }
    }

    fn check_guard(&self, sink: &mut Diagnostics) {
        let Some(guard) = &self.transition.guard else {
            return;
        };
        let model = self.model;
        self.check_argument_refs(&guard.condition, Feature::Guard, None, sink);

        let mut problems = Vec::new();
        check_expr(model, &guard.condition, &mut problems);
        for msg in &problems {
            sink.push(self.error(Feature::Guard, format!("Invalid guard: {msg}")).with_span(guard.span));
        }
        if problems.is_empty() {
            match infer(model, &guard.condition) {
                Some(Ty::Boolean) => {}
                Some(other) => sink.push(
                    self.error(
                        Feature::Guard,
                        format!("Guard must be a Boolean expression, found {}", other.describe(model)),
                    )
                    .with_span(guard.span),
                ),
                None => sink.push(
                    self.error(Feature::Guard, "Guard must be a Boolean expression".to_string())
                        .with_span(guard.span),
                ),
            }
        }
    }

    fn check_assignment(&self, k: usize, target: &ElementRef, value: &Expr, sink: &mut Diagnostics) {
        let model = self.model;
        let push = |sink: &mut Diagnostics, feature, message| {
            sink.push(self.error(feature, message).at_index(k));
        };

        self.check_argument_refs(value, Feature::Assignment, Some(k), sink);

        let Some(element) = model.element(target) else {
            return;
        };
        let assignable = match (*target, element.kind) {
            (ElementRef::Attribute { interface, .. }, ElementKind::Attribute) => {
                model.inheritance_set(self.interface).contains(&interface)
            }
            (ElementRef::StateVariable { interface, .. }, ElementKind::StateVariable) => {
                interface == self.interface
            }
            _ => false,
        };
        if !assignable {
            push(
                sink,
                Feature::Target,
                format!(
                    "{} {} cannot be assigned, only attributes and state variables of this contract",
                    element.kind.label(),
                    element.name
                ),
            );
            return;
        }
        if let ElementRef::Attribute { interface, index } = *target
            && model
                .attribute(MemberRef { interface, index })
                .is_some_and(|a| a.read_only)
        {
            push(
                sink,
                Feature::Target,
                format!("Attribute '{}' is readonly and cannot be assigned", element.name),
            );
        }

        let Some((tref, array)) = element.ty else {
            return;
        };
        let mut problems = Vec::new();
        check_expr(model, value, &mut problems);
        if !problems.is_empty() {
            for msg in problems {
                push(sink, Feature::Assignment, format!("Invalid assignment value: {msg}"));
            }
            return;
        }
        if let Err(msg) = value_fits(model, value, tref, array) {
            push(
                sink,
                Feature::Assignment,
                format!(
                    "Incompatible assignment to '{}' of type {}: {msg}",
                    element.name,
                    type_ref_label(model, tref, array)
                ),
            );
        }
    }
}
