use serde::{Deserialize, Serialize};

use super::{ArgumentRef, ConstId, InterfaceId, TypeId};

// ---------------------------------------------------------------------------
// Element references
// ---------------------------------------------------------------------------

/// Resolved reference to a value-carrying element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementRef {
    Attribute { interface: InterfaceId, index: usize },
    Argument(ArgumentRef),
    Constant(ConstId),
    /// Variable declared in the contract of `interface`.
    StateVariable { interface: InterfaceId, index: usize },
    Field { owner: TypeId, index: usize },
    Enumerator { owner: TypeId, index: usize },
}

// ---------------------------------------------------------------------------
// Operators
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryOp {
    Not,
    Neg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOp {
    And,
    Or,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
        }
    }
}

// ---------------------------------------------------------------------------
// Expressions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Literal {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

/// `field = value` inside a compound initializer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldInit {
    /// Struct or union that declares the field.
    pub owner: TypeId,
    pub index: usize,
    pub value: Expr,
}

/// Element of a bracket initializer; `value` is set for map entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BracketItem {
    pub first: Expr,
    #[serde(default)]
    pub value: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    Literal(Literal),
    Ref(ElementRef),
    /// `base.field` access on a struct or union valued expression.
    Member {
        base: Box<Expr>,
        owner: TypeId,
        index: usize,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// `{ a: 1, b: 2 }` for structs and unions.
    Compound(Vec<FieldInit>),
    /// `[ 1, 2 ]` for arrays, `[ k => v ]` for maps.
    Bracket(Vec<BracketItem>),
}

impl Expr {
    pub fn int(v: i64) -> Self {
        Expr::Literal(Literal::Integer(v))
    }

    pub fn boolean(v: bool) -> Self {
        Expr::Literal(Literal::Bool(v))
    }

    pub fn string(v: impl Into<String>) -> Self {
        Expr::Literal(Literal::String(v.into()))
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Every element referenced anywhere inside this expression.
    pub fn element_refs(&self) -> Vec<ElementRef> {
        let mut out = Vec::new();
        self.collect_refs(&mut out);
        out
    }

    fn collect_refs(&self, out: &mut Vec<ElementRef>) {
        match self {
            Expr::Literal(_) => {}
            Expr::Ref(r) => out.push(*r),
            Expr::Member { base, owner, index } => {
                base.collect_refs(out);
                out.push(ElementRef::Field {
                    owner: *owner,
                    index: *index,
                });
            }
            Expr::Unary { operand, .. } => operand.collect_refs(out),
            Expr::Binary { left, right, .. } => {
                left.collect_refs(out);
                right.collect_refs(out);
            }
            Expr::Compound(inits) => {
                for init in inits {
                    init.value.collect_refs(out);
                }
            }
            Expr::Bracket(items) => {
                for item in items {
                    item.first.collect_refs(out);
                    if let Some(v) = &item.value {
                        v.collect_refs(out);
                    }
                }
            }
        }
    }
}
