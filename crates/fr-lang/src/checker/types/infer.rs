use crate::model::{BinaryOp, ElementRef, Expr, Literal, Model, UnaryOp};

use super::{Ty, compatible};

/// Infer the value type of an expression without a target type.
///
/// Returns `None` when the type cannot be determined: compound and bracket
/// initializers, ill-typed operands, unresolved references.
pub fn infer(model: &Model, expr: &Expr) -> Option<Ty> {
    match expr {
        Expr::Literal(lit) => Some(match lit {
            Literal::Bool(_) => Ty::Boolean,
            Literal::Integer(_) => Ty::Integer,
            Literal::Float(_) => Ty::Float,
            Literal::String(_) => Ty::String,
        }),
        Expr::Ref(r @ ElementRef::Enumerator { owner, .. }) => {
            model.element(r)?;
            Some(Ty::Derived(*owner))
        }
        Expr::Ref(r) => {
            let (tref, array) = model.element(r)?.ty?;
            Ty::of(model, tref, array)
        }
        Expr::Member { owner, index, .. } => {
            let field = model.type_def(*owner)?.kind.fields()?.get(*index)?;
            Ty::of(model, &field.ty, field.array)
        }
        Expr::Unary { op, operand } => {
            let t = infer(model, operand)?;
            match op {
                UnaryOp::Not => (t == Ty::Boolean).then_some(Ty::Boolean),
                UnaryOp::Neg => t.is_numeric().then_some(t),
            }
        }
        Expr::Binary { op, left, right } => match op {
            BinaryOp::And
            | BinaryOp::Or
            | BinaryOp::Eq
            | BinaryOp::Ne
            | BinaryOp::Lt
            | BinaryOp::Le
            | BinaryOp::Gt
            | BinaryOp::Ge => Some(Ty::Boolean),
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div => {
                match (infer(model, left)?, infer(model, right)?) {
                    (Ty::Integer, Ty::Integer) => Some(Ty::Integer),
                    (l, r) if l.is_numeric() && r.is_numeric() => Some(Ty::Float),
                    _ => None,
                }
            }
        },
        Expr::Compound(_) | Expr::Bracket(_) => None,
    }
}

/// Type-check the operands of every operator inside `expr`.
///
/// Only operands whose types are known are checked; each problem is pushed
/// as a message.
pub fn check_expr(model: &Model, expr: &Expr, errors: &mut Vec<String>) {
    match expr {
        Expr::Literal(_) | Expr::Ref(_) => {}
        Expr::Member { base, owner, index } => {
            check_expr(model, base, errors);
            if let Some(Ty::Derived(t)) = infer(model, base)
                && *owner != t
                && !model.base_types(t).contains(owner)
            {
                let name = model
                    .type_def(*owner)
                    .and_then(|d| d.kind.fields())
                    .and_then(|f| f.get(*index))
                    .map_or("?", |f| f.name.as_str());
                errors.push(format!(
                    "'{name}' is not an element of {}",
                    model.type_name(t)
                ));
            }
        }
        Expr::Unary { op, operand } => {
            check_expr(model, operand, errors);
            if let Some(t) = infer(model, operand) {
                match op {
                    UnaryOp::Not if t != Ty::Boolean => errors.push(format!(
                        "operator `!` requires a Boolean operand, found {}",
                        t.describe(model)
                    )),
                    UnaryOp::Neg if !t.is_numeric() => errors.push(format!(
                        "operator `-` requires a numeric operand, found {}",
                        t.describe(model)
                    )),
                    _ => {}
                }
            }
        }
        Expr::Binary { op, left, right } => {
            check_expr(model, left, errors);
            check_expr(model, right, errors);
            let (Some(l), Some(r)) = (infer(model, left), infer(model, right)) else {
                return;
            };
            let sym = op.symbol();
            match op {
                BinaryOp::And | BinaryOp::Or => {
                    for (side, t) in [("left", &l), ("right", &r)] {
                        if *t != Ty::Boolean {
                            errors.push(format!(
                                "logical `{sym}` requires Boolean operands, {side} side is {}",
                                t.describe(model)
                            ));
                        }
                    }
                }
                BinaryOp::Eq | BinaryOp::Ne => {
                    if !compatible(model, &l, &r) && !compatible(model, &r, &l) {
                        errors.push(format!(
                            "cannot compare {} with {} using `{sym}`",
                            l.describe(model),
                            r.describe(model)
                        ));
                    }
                }
                BinaryOp::Lt
                | BinaryOp::Le
                | BinaryOp::Gt
                | BinaryOp::Ge
                | BinaryOp::Add
                | BinaryOp::Sub
                | BinaryOp::Mul
                | BinaryOp::Div => {
                    if !l.is_numeric() || !r.is_numeric() {
                        errors.push(format!(
                            "operator `{sym}` requires numeric operands, found {} and {}",
                            l.describe(model),
                            r.describe(model)
                        ));
                    }
                }
            }
        }
        Expr::Compound(inits) => {
            for init in inits {
                check_expr(model, &init.value, errors);
            }
        }
        Expr::Bracket(items) => {
            for item in items {
                check_expr(model, &item.first, errors);
                if let Some(v) = &item.value {
                    check_expr(model, v, errors);
                }
            }
        }
    }
}
