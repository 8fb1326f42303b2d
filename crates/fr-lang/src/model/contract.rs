use serde::{Deserialize, Serialize};

use super::{ElementRef, Expr, MemberRef, Span, TypeRef};

/// Contract state variable (`vars { UInt32 count; }`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declaration {
    pub name: String,
    #[serde(default)]
    pub span: Span,
    pub ty: TypeRef,
    #[serde(default)]
    pub array: bool,
    #[serde(default)]
    pub init: Option<Expr>,
}

/// The event a transition reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    Call(MemberRef),
    Respond(MemberRef),
    Error(MemberRef),
    Signal(MemberRef),
    Set(MemberRef),
    Update(MemberRef),
}

impl Event {
    pub fn member(self) -> MemberRef {
        match self {
            Event::Call(m)
            | Event::Respond(m)
            | Event::Error(m)
            | Event::Signal(m)
            | Event::Set(m)
            | Event::Update(m) => m,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Event::Call(_) => "call",
            Event::Respond(_) => "respond",
            Event::Error(_) => "error",
            Event::Signal(_) => "signal",
            Event::Set(_) => "set",
            Event::Update(_) => "update",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trigger {
    #[serde(default)]
    pub span: Span,
    pub event: Event,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guard {
    #[serde(default)]
    pub span: Span,
    pub condition: Expr,
}

/// `target = value` executed when a transition fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    #[serde(default)]
    pub span: Span,
    pub target: ElementRef,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    #[serde(default)]
    pub span: Span,
    pub trigger: Trigger,
    #[serde(default)]
    pub guard: Option<Guard>,
    #[serde(default)]
    pub assignments: Vec<Assignment>,
    /// Index of the target state within the contract.
    pub to: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub name: String,
    #[serde(default)]
    pub span: Span,
    #[serde(default)]
    pub transitions: Vec<Transition>,
}

/// Behavioral contract of an interface: independently valid state
/// descriptions, no designated initial or terminal state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    #[serde(default)]
    pub span: Span,
    #[serde(default)]
    pub variables: Vec<Declaration>,
    #[serde(default)]
    pub states: Vec<State>,
}
