use serde::Serialize;

use super::{
    ArgumentRef, CollectionId, ConstId, Direction, InterfaceId, MemberRef, Model, Operation, Span,
    TypeId,
};

/// Identity of a model element that a diagnostic can point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeId {
    Model,
    Collection(CollectionId),
    Interface(InterfaceId),
    Type(TypeId),
    Field(TypeId, usize),
    Enumerator(TypeId, usize),
    Constant(ConstId),
    Attribute(MemberRef),
    Method(MemberRef),
    Broadcast(MemberRef),
    Argument(ArgumentRef),
    Contract(InterfaceId),
    StateVariable(InterfaceId, usize),
    State(InterfaceId, usize),
    /// Transition `index` of state `state` in the contract of an interface.
    Transition {
        interface: InterfaceId,
        state: usize,
        index: usize,
    },
}

/// Structural slot of a node that a diagnostic refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Name,
    Base,
    Fields,
    Enumerators,
    Value,
    Type,
    Interval,
    Derived,
    FireAndForget,
    Errors,
    InArgs,
    OutArgs,
    Constants,
    Types,
    Contract,
    Element,
    Trigger,
    Guard,
    Assignment,
    Target,
    Annotation,
}

impl Feature {
    pub fn label(self) -> &'static str {
        match self {
            Feature::Name => "name",
            Feature::Base => "base",
            Feature::Fields => "fields",
            Feature::Enumerators => "enumerators",
            Feature::Value => "value",
            Feature::Type => "type",
            Feature::Interval => "interval",
            Feature::Derived => "derived",
            Feature::FireAndForget => "fireAndForget",
            Feature::Errors => "errors",
            Feature::InArgs => "inArgs",
            Feature::OutArgs => "outArgs",
            Feature::Constants => "constants",
            Feature::Types => "types",
            Feature::Contract => "contract",
            Feature::Element => "element",
            Feature::Trigger => "trigger",
            Feature::Guard => "guard",
            Feature::Assignment => "assignment",
            Feature::Target => "target",
            Feature::Annotation => "annotation",
        }
    }
}

impl Model {
    /// Human-readable path to a node, e.g. `interface Player / method play`.
    pub fn describe(&self, node: NodeId) -> String {
        match node {
            NodeId::Model => format!("model {}", self.name),
            NodeId::Collection(id) => {
                format!("typeCollection {}", self.collection(id).map_or("?", |c| &c.name))
            }
            NodeId::Interface(id) => format!("interface {}", self.interface_name(id)),
            NodeId::Type(id) => match self.type_def(id) {
                Some(t) => format!("{} / {} {}", self.describe_owner(t.owner), t.kind.label(), t.name),
                None => format!("type #{}", id.0),
            },
            NodeId::Field(t, i) => {
                let name = self
                    .type_def(t)
                    .and_then(|d| d.kind.fields())
                    .and_then(|f| f.get(i))
                    .map_or("?", |f| f.name.as_str());
                format!("{} / field {name}", self.describe(NodeId::Type(t)))
            }
            NodeId::Enumerator(t, i) => {
                let name = self
                    .type_def(t)
                    .and_then(|d| d.kind.enumerators())
                    .and_then(|e| e.get(i))
                    .map_or("?", |e| e.name.as_str());
                format!("{} / enumerator {name}", self.describe(NodeId::Type(t)))
            }
            NodeId::Constant(id) => match self.constant(id) {
                Some(c) => format!("{} / const {}", self.describe_owner(c.owner), c.name),
                None => format!("const #{}", id.0),
            },
            NodeId::Attribute(m) => format!(
                "interface {} / attribute {}",
                self.interface_name(m.interface),
                self.attribute(m).map_or("?", |a| a.name.as_str())
            ),
            NodeId::Method(m) => format!(
                "interface {} / method {}",
                self.interface_name(m.interface),
                self.method(m).map_or("?", |a| a.name.as_str())
            ),
            NodeId::Broadcast(m) => format!(
                "interface {} / broadcast {}",
                self.interface_name(m.interface),
                self.broadcast(m).map_or("?", |a| a.name.as_str())
            ),
            NodeId::Argument(a) => {
                let op = match a.operation {
                    Operation::Method(index) => NodeId::Method(MemberRef {
                        interface: a.interface,
                        index,
                    }),
                    Operation::Broadcast(index) => NodeId::Broadcast(MemberRef {
                        interface: a.interface,
                        index,
                    }),
                };
                let dir = match a.direction {
                    Direction::In => "in",
                    Direction::Out => "out",
                };
                format!(
                    "{} / {dir} {}",
                    self.describe(op),
                    self.argument(a).map_or("?", |x| x.name.as_str())
                )
            }
            NodeId::Contract(id) => format!("interface {} / contract", self.interface_name(id)),
            NodeId::StateVariable(id, i) => {
                let name = self
                    .interface(id)
                    .and_then(|x| x.contract.as_ref())
                    .and_then(|c| c.variables.get(i))
                    .map_or("?", |v| v.name.as_str());
                format!("interface {} / contract / var {name}", self.interface_name(id))
            }
            NodeId::State(id, i) => format!(
                "interface {} / contract / state {}",
                self.interface_name(id),
                self.state_name(id, i)
            ),
            NodeId::Transition {
                interface,
                state,
                index,
            } => format!(
                "interface {} / contract / state {} / transition {index}",
                self.interface_name(interface),
                self.state_name(interface, state)
            ),
        }
    }

    fn describe_owner(&self, owner: super::Owner) -> String {
        match owner {
            super::Owner::Collection(id) => self.describe(NodeId::Collection(id)),
            super::Owner::Interface(id) => self.describe(NodeId::Interface(id)),
        }
    }

    fn state_name(&self, interface: InterfaceId, state: usize) -> &str {
        self.interface(interface)
            .and_then(|x| x.contract.as_ref())
            .and_then(|c| c.states.get(state))
            .map_or("?", |s| s.name.as_str())
    }

    /// Source span of a node, `Span::default()` when unknown.
    pub fn span_of(&self, node: NodeId) -> Span {
        let contract = |id: InterfaceId| self.interface(id).and_then(|i| i.contract.as_ref());
        let span = match node {
            NodeId::Model => None,
            NodeId::Collection(id) => self.collection(id).map(|c| c.span),
            NodeId::Interface(id) => self.interface(id).map(|i| i.span),
            NodeId::Type(id) => self.type_def(id).map(|t| t.span),
            NodeId::Field(t, i) => self
                .type_def(t)
                .and_then(|d| d.kind.fields())
                .and_then(|f| f.get(i))
                .map(|f| f.span),
            NodeId::Enumerator(t, i) => self
                .type_def(t)
                .and_then(|d| d.kind.enumerators())
                .and_then(|e| e.get(i))
                .map(|e| e.span),
            NodeId::Constant(id) => self.constant(id).map(|c| c.span),
            NodeId::Attribute(m) => self.attribute(m).map(|a| a.span),
            NodeId::Method(m) => self.method(m).map(|a| a.span),
            NodeId::Broadcast(m) => self.broadcast(m).map(|a| a.span),
            NodeId::Argument(a) => self.argument(a).map(|x| x.span),
            NodeId::Contract(id) => contract(id).map(|c| c.span),
            NodeId::StateVariable(id, i) => contract(id).and_then(|c| c.variables.get(i)).map(|v| v.span),
            NodeId::State(id, i) => contract(id).and_then(|c| c.states.get(i)).map(|s| s.span),
            NodeId::Transition {
                interface,
                state,
                index,
            } => contract(interface)
                .and_then(|c| c.states.get(state))
                .and_then(|s| s.transitions.get(index))
                .map(|t| t.span),
        };
        span.unwrap_or_default()
    }
}
