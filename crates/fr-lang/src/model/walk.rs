//! Flat enumeration of the places in a model where types, expressions and
//! annotations are used, so that checkers do not each re-implement the tree
//! traversal.

use super::{
    Annotation, ArgumentRef, CollectionId, Direction, Expr, Feature, InterfaceId, MemberRef,
    MethodErrors, Model, NodeId, Operation, Owner, Span, TypeId, TypeKind, TypeRef,
};

/// A type reference together with the element that holds it.
#[derive(Debug, Clone, Copy)]
pub struct TypeRefSite<'a> {
    pub node: NodeId,
    /// Container of the holder; decides what the reference may see.
    pub context: Owner,
    pub type_ref: &'a TypeRef,
}

impl TypeRefSite<'_> {
    /// The reference's own span, or the holder's when the reference has none.
    pub fn span(&self, model: &Model) -> Span {
        if self.type_ref.span.is_unknown() {
            model.span_of(self.node)
        } else {
            self.type_ref.span
        }
    }
}

/// What an expression is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprRole {
    ConstantValue,
    DeclarationInit,
    EnumeratorValue,
    Guard,
    AssignmentValue,
}

/// An expression together with the element that holds it.
#[derive(Debug, Clone, Copy)]
pub struct ExprSite<'a> {
    pub node: NodeId,
    pub feature: Feature,
    pub index: Option<usize>,
    pub context: Owner,
    pub role: ExprRole,
    pub expr: &'a Expr,
    /// Declared type the value must fit, for constants and declarations.
    pub expected: Option<(&'a TypeRef, bool)>,
}

impl Model {
    /// Every type reference in the model, in declaration order.
    pub fn type_ref_sites(&self) -> Vec<TypeRefSite<'_>> {
        let mut out = Vec::new();

        for (t, def) in self.types.iter().enumerate() {
            let t = TypeId(t);
            let mut push = |node, type_ref| {
                out.push(TypeRefSite {
                    node,
                    context: def.owner,
                    type_ref,
                })
            };
            match &def.kind {
                TypeKind::Struct(_) | TypeKind::Union(_) => {
                    for (i, f) in def.kind.fields().unwrap_or_default().iter().enumerate() {
                        push(NodeId::Field(t, i), &f.ty);
                    }
                }
                TypeKind::Enumeration(_) => {}
                TypeKind::Array { element } => push(NodeId::Type(t), element),
                TypeKind::Map { key, value } => {
                    push(NodeId::Type(t), key);
                    push(NodeId::Type(t), value);
                }
                TypeKind::Alias(actual) => push(NodeId::Type(t), actual),
            }
        }

        for (c, def) in self.constants.iter().enumerate() {
            out.push(TypeRefSite {
                node: NodeId::Constant(super::ConstId(c)),
                context: def.owner,
                type_ref: &def.ty,
            });
        }

        for (i, iface) in self.interfaces.iter().enumerate() {
            let id = InterfaceId(i);
            let context = Owner::Interface(id);
            for (index, a) in iface.attributes.iter().enumerate() {
                out.push(TypeRefSite {
                    node: NodeId::Attribute(MemberRef { interface: id, index }),
                    context,
                    type_ref: &a.ty,
                });
            }
            for (arg, a) in self.interface_arguments(id) {
                out.push(TypeRefSite {
                    node: NodeId::Argument(arg),
                    context,
                    type_ref: &a.ty,
                });
            }
            if let Some(contract) = &iface.contract {
                for (v, d) in contract.variables.iter().enumerate() {
                    out.push(TypeRefSite {
                        node: NodeId::StateVariable(id, v),
                        context,
                        type_ref: &d.ty,
                    });
                }
            }
        }

        out
    }

    /// All arguments of all methods and broadcasts of one interface.
    pub fn interface_arguments(
        &self,
        id: InterfaceId,
    ) -> Vec<(ArgumentRef, &super::Argument)> {
        let Some(iface) = self.interface(id) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        let mut push = |operation, direction, count: usize| {
            for index in 0..count {
                out.push(ArgumentRef {
                    interface: id,
                    operation,
                    direction,
                    index,
                });
            }
        };
        for (m, method) in iface.methods.iter().enumerate() {
            push(Operation::Method(m), Direction::In, method.in_args.len());
            push(Operation::Method(m), Direction::Out, method.out_args.len());
        }
        for (b, bc) in iface.broadcasts.iter().enumerate() {
            push(Operation::Broadcast(b), Direction::Out, bc.out_args.len());
        }
        out.into_iter()
            .filter_map(|r| self.argument(r).map(|a| (r, a)))
            .collect()
    }

    /// Every expression in the model, in declaration order.
    pub fn expr_sites(&self) -> Vec<ExprSite<'_>> {
        let mut out = Vec::new();

        for (c, def) in self.constants.iter().enumerate() {
            out.push(ExprSite {
                node: NodeId::Constant(super::ConstId(c)),
                feature: Feature::Value,
                index: None,
                context: def.owner,
                role: ExprRole::ConstantValue,
                expr: &def.value,
                expected: Some((&def.ty, def.array)),
            });
        }

        for (t, def) in self.types.iter().enumerate() {
            for (i, e) in def.kind.enumerators().unwrap_or_default().iter().enumerate() {
                if let Some(value) = &e.value {
                    out.push(ExprSite {
                        node: NodeId::Enumerator(TypeId(t), i),
                        feature: Feature::Value,
                        index: None,
                        context: def.owner,
                        role: ExprRole::EnumeratorValue,
                        expr: value,
                        expected: None,
                    });
                }
            }
        }

        for (i, iface) in self.interfaces.iter().enumerate() {
            let id = InterfaceId(i);
            let context = Owner::Interface(id);

            for (m, method) in iface.methods.iter().enumerate() {
                if let Some(MethodErrors::Inline { enumerators, .. }) = &method.errors {
                    for (k, e) in enumerators.iter().enumerate() {
                        if let Some(value) = &e.value {
                            out.push(ExprSite {
                                node: NodeId::Method(MemberRef { interface: id, index: m }),
                                feature: Feature::Errors,
                                index: Some(k),
                                context,
                                role: ExprRole::EnumeratorValue,
                                expr: value,
                                expected: None,
                            });
                        }
                    }
                }
            }

            let Some(contract) = &iface.contract else {
                continue;
            };
            for (v, d) in contract.variables.iter().enumerate() {
                if let Some(init) = &d.init {
                    out.push(ExprSite {
                        node: NodeId::StateVariable(id, v),
                        feature: Feature::Value,
                        index: None,
                        context,
                        role: ExprRole::DeclarationInit,
                        expr: init,
                        expected: Some((&d.ty, d.array)),
                    });
                }
            }
            for (s, state) in contract.states.iter().enumerate() {
                for (t, tr) in state.transitions.iter().enumerate() {
                    let node = NodeId::Transition {
                        interface: id,
                        state: s,
                        index: t,
                    };
                    if let Some(guard) = &tr.guard {
                        out.push(ExprSite {
                            node,
                            feature: Feature::Guard,
                            index: None,
                            context,
                            role: ExprRole::Guard,
                            expr: &guard.condition,
                            expected: None,
                        });
                    }
                    for (k, asg) in tr.assignments.iter().enumerate() {
                        out.push(ExprSite {
                            node,
                            feature: Feature::Assignment,
                            index: Some(k),
                            context,
                            role: ExprRole::AssignmentValue,
                            expr: &asg.value,
                            expected: None,
                        });
                    }
                }
            }
        }

        out
    }

    /// Every annotated element with its annotation list.
    pub fn annotated(&self) -> Vec<(NodeId, &[Annotation])> {
        let mut out: Vec<(NodeId, &[Annotation])> = Vec::new();

        for (c, coll) in self.collections.iter().enumerate() {
            out.push((NodeId::Collection(CollectionId(c)), &coll.annotations));
        }
        for (t, def) in self.types.iter().enumerate() {
            let t = TypeId(t);
            out.push((NodeId::Type(t), &def.annotations));
            for (i, f) in def.kind.fields().unwrap_or_default().iter().enumerate() {
                out.push((NodeId::Field(t, i), &f.annotations));
            }
            for (i, e) in def.kind.enumerators().unwrap_or_default().iter().enumerate() {
                out.push((NodeId::Enumerator(t, i), &e.annotations));
            }
        }
        for (c, def) in self.constants.iter().enumerate() {
            out.push((NodeId::Constant(super::ConstId(c)), &def.annotations));
        }
        for (i, iface) in self.interfaces.iter().enumerate() {
            let id = InterfaceId(i);
            out.push((NodeId::Interface(id), &iface.annotations));
            for (index, a) in iface.attributes.iter().enumerate() {
                out.push((NodeId::Attribute(MemberRef { interface: id, index }), &a.annotations));
            }
            for (index, m) in iface.methods.iter().enumerate() {
                out.push((NodeId::Method(MemberRef { interface: id, index }), &m.annotations));
            }
            for (index, b) in iface.broadcasts.iter().enumerate() {
                out.push((NodeId::Broadcast(MemberRef { interface: id, index }), &b.annotations));
            }
            for (arg, a) in self.interface_arguments(id) {
                out.push((NodeId::Argument(arg), &a.annotations));
            }
        }

        out.retain(|(_, list)| !list.is_empty());
        out
    }
}
