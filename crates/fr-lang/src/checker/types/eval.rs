use crate::model::{BinaryOp, ElementRef, Expr, Literal, Model, UnaryOp};

/// Constants may refer to constants; deeper chains are not folded.
const MAX_DEPTH: usize = 32;

/// Fold an integer-valued expression to its value.
///
/// Handles literals, negation, arithmetic and references to other constants.
/// Returns `None` for anything else, on overflow and on division by zero.
pub fn fold_int(model: &Model, expr: &Expr) -> Option<i128> {
    fold(model, expr, 0)
}

fn fold(model: &Model, expr: &Expr, depth: usize) -> Option<i128> {
    if depth > MAX_DEPTH {
        return None;
    }
    match expr {
        Expr::Literal(Literal::Integer(v)) => Some(i128::from(*v)),
        Expr::Ref(ElementRef::Constant(id)) => {
            let c = model.constant(*id)?;
            if c.array {
                return None;
            }
            fold(model, &c.value, depth + 1)
        }
        Expr::Unary {
            op: UnaryOp::Neg,
            operand,
        } => fold(model, operand, depth + 1)?.checked_neg(),
        Expr::Binary { op, left, right } => {
            let l = fold(model, left, depth + 1)?;
            let r = fold(model, right, depth + 1)?;
            match op {
                BinaryOp::Add => l.checked_add(r),
                BinaryOp::Sub => l.checked_sub(r),
                BinaryOp::Mul => l.checked_mul(r),
                BinaryOp::Div => l.checked_div(r),
                _ => None,
            }
        }
        _ => None,
    }
}
