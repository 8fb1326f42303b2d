use super::{
    Event, Expr, MethodErrors, Model, ModelError, NodeId, Owner, TypeRef, TypeRefKind,
};

impl Model {
    /// Verify that every arena id in the snapshot points at an existing
    /// declaration.
    ///
    /// Validation assumes a fully linked model; a dangling id means the
    /// snapshot producer is broken, so it is a load error rather than a
    /// diagnostic.
    pub fn check_links(&self) -> Result<(), ModelError> {
        let dangling = |holder: String, what: &'static str, index: usize| ModelError::DanglingRef {
            holder,
            what,
            index,
        };

        for coll in &self.collections {
            let holder = || format!("typeCollection {}", coll.name);
            for t in &coll.types {
                self.type_def(*t).ok_or_else(|| dangling(holder(), "type", t.0))?;
            }
            for k in &coll.constants {
                self.constant(*k).ok_or_else(|| dangling(holder(), "constant", k.0))?;
            }
        }

        for iface in &self.interfaces {
            let holder = || format!("interface {}", iface.name);
            if let Some(base) = iface.base {
                self.interface(base).ok_or_else(|| dangling(holder(), "interface", base.0))?;
            }
            for t in &iface.types {
                self.type_def(*t).ok_or_else(|| dangling(holder(), "type", t.0))?;
            }
            for k in &iface.constants {
                self.constant(*k).ok_or_else(|| dangling(holder(), "constant", k.0))?;
            }
            for m in &iface.methods {
                match &m.errors {
                    Some(MethodErrors::Enumeration(t)) => {
                        self.type_def(*t).ok_or_else(|| dangling(holder(), "type", t.0))?;
                    }
                    Some(MethodErrors::Inline { base: Some(t), .. }) => {
                        self.type_def(*t).ok_or_else(|| dangling(holder(), "type", t.0))?;
                    }
                    _ => {}
                }
            }
            if let Some(contract) = &iface.contract {
                for state in &contract.states {
                    for tr in &state.transitions {
                        let member = tr.trigger.event.member();
                        let found = match tr.trigger.event {
                            Event::Call(m) | Event::Respond(m) | Event::Error(m) => {
                                self.method(m).is_some()
                            }
                            Event::Signal(m) => self.broadcast(m).is_some(),
                            Event::Set(m) | Event::Update(m) => self.attribute(m).is_some(),
                        };
                        if !found {
                            return Err(dangling(
                                format!("contract of interface {}", iface.name),
                                tr.trigger.event.keyword(),
                                member.index,
                            ));
                        }
                        for asg in &tr.assignments {
                            if self.element(&asg.target).is_none() {
                                return Err(dangling(
                                    format!("contract of interface {}", iface.name),
                                    "assignment target",
                                    0,
                                ));
                            }
                        }
                    }
                }
            }
        }

        for def in &self.types {
            self.check_owner(def.owner, || format!("type {}", def.name))?;
            if let Some(base) = def.kind.base() {
                self.type_def(base)
                    .ok_or_else(|| dangling(format!("type {}", def.name), "base type", base.0))?;
            }
        }

        for def in &self.constants {
            self.check_owner(def.owner, || format!("const {}", def.name))?;
        }

        for site in self.type_ref_sites() {
            self.check_type_ref(site.type_ref, || self.describe(site.node))?;
        }

        for site in self.expr_sites() {
            self.check_expr_links(site.expr, site.node)?;
        }

        Ok(())
    }

    fn check_owner(&self, owner: Owner, holder: impl Fn() -> String) -> Result<(), ModelError> {
        let ok = match owner {
            Owner::Collection(id) => self.collection(id).is_some(),
            Owner::Interface(id) => self.interface(id).is_some(),
        };
        if ok {
            Ok(())
        } else {
            let index = match owner {
                Owner::Collection(id) => id.0,
                Owner::Interface(id) => id.0,
            };
            Err(ModelError::DanglingRef {
                holder: holder(),
                what: "owner",
                index,
            })
        }
    }

    fn check_type_ref(&self, tref: &TypeRef, holder: impl Fn() -> String) -> Result<(), ModelError> {
        if let TypeRefKind::Derived(id) = tref.kind
            && self.type_def(id).is_none()
        {
            return Err(ModelError::DanglingRef {
                holder: holder(),
                what: "type",
                index: id.0,
            });
        }
        Ok(())
    }

    fn check_expr_links(&self, expr: &Expr, node: NodeId) -> Result<(), ModelError> {
        for r in expr.element_refs() {
            if self.element(&r).is_none() {
                return Err(ModelError::DanglingRef {
                    holder: self.describe(node),
                    what: "element",
                    index: 0,
                });
            }
        }
        Ok(())
    }
}
