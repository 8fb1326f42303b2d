use crate::model::{
    BracketItem, ElementRef, Expr, FieldInit, Model, Primitive, TypeId, TypeKind, TypeRef,
    TypeRefKind,
};

use super::{Ty, compatible, fold_int, infer, type_ref_label};

/// Check that `expr` is a valid value for the declared type `tref`
/// (`array` marks an implicit array).
///
/// On mismatch the error describes the first problem found.
pub fn value_fits(model: &Model, expr: &Expr, tref: &TypeRef, array: bool) -> Result<(), String> {
    if array {
        return match expr {
            Expr::Bracket(items) => each_item(items, |v| value_fits(model, v, tref, false)),
            _ => by_inference(model, expr, tref, true),
        };
    }

    let Some(resolved) = model.resolve_alias(tref) else {
        // Alias cycles are reported by the cycle checker.
        return Ok(());
    };

    match &resolved.kind {
        TypeRefKind::Primitive(p) if p.is_integer() => {
            let (lo, hi) = p.int_range().unwrap_or((i128::MIN, i128::MAX));
            integer_in_range(model, expr, resolved, lo, hi)
        }
        TypeRefKind::Interval { lower, upper } => {
            let lo = lower.map_or(i128::MIN, i128::from);
            let hi = upper.map_or(i128::MAX, i128::from);
            integer_in_range(model, expr, resolved, lo, hi)
        }
        TypeRefKind::Primitive(Primitive::ByteBuffer) => match expr {
            Expr::Bracket(items) => each_item(items, |v| {
                integer_in_range(model, v, resolved, 0, u8::MAX.into())
            }),
            _ => by_inference(model, expr, resolved, false),
        },
        TypeRefKind::Primitive(_) => by_inference(model, expr, resolved, false),
        TypeRefKind::Derived(id) => derived_fits(model, expr, *id, resolved),
    }
}

fn derived_fits(model: &Model, expr: &Expr, id: TypeId, tref: &TypeRef) -> Result<(), String> {
    let Some(def) = model.type_def(id) else {
        return Ok(());
    };
    match (&def.kind, expr) {
        (TypeKind::Enumeration(_), Expr::Ref(ElementRef::Enumerator { owner, index })) => {
            if *owner == id || model.base_types(id).contains(owner) {
                Ok(())
            } else {
                let name = model
                    .type_def(*owner)
                    .and_then(|d| d.kind.enumerators())
                    .and_then(|e| e.get(*index))
                    .map_or("?", |e| e.name.as_str());
                Err(format!(
                    "enumerator '{name}' belongs to {}, not to {}",
                    model.type_name(*owner),
                    def.name
                ))
            }
        }
        (TypeKind::Struct(_), Expr::Compound(inits)) => struct_fits(model, id, inits),
        (TypeKind::Union(_), Expr::Compound(inits)) => match inits.as_slice() {
            [init] => field_init_fits(model, id, init),
            _ => Err(format!(
                "union {} is initialized by exactly one element, found {}",
                def.name,
                inits.len()
            )),
        },
        (TypeKind::Array { element }, Expr::Bracket(items)) => {
            each_item(items, |v| value_fits(model, v, element, false))
        }
        (TypeKind::Map { key, value }, Expr::Bracket(items)) => {
            for item in items {
                let Some(v) = &item.value else {
                    return Err("map initializer requires 'key => value' entries".into());
                };
                value_fits(model, &item.first, key, false)?;
                value_fits(model, v, value, false)?;
            }
            Ok(())
        }
        _ => by_inference(model, expr, tref, false),
    }
}

fn struct_fits(model: &Model, id: TypeId, inits: &[FieldInit]) -> Result<(), String> {
    let fields = model.all_fields(id);
    let mut seen = vec![false; fields.len()];
    for init in inits {
        let Some(pos) = fields
            .iter()
            .position(|(owner, index, _)| *owner == init.owner && *index == init.index)
        else {
            return Err(format!(
                "{} has no element matching this initializer",
                model.type_name(id)
            ));
        };
        let (_, _, field) = fields[pos];
        if seen[pos] {
            return Err(format!("element '{}' is initialized twice", field.name));
        }
        seen[pos] = true;
        value_fits(model, &init.value, &field.ty, field.array)
            .map_err(|e| format!("element '{}': {e}", field.name))?;
    }
    if let Some(pos) = seen.iter().position(|s| !s) {
        return Err(format!("element '{}' is not initialized", fields[pos].2.name));
    }
    Ok(())
}

fn field_init_fits(model: &Model, id: TypeId, init: &FieldInit) -> Result<(), String> {
    let Some((_, _, field)) = model
        .all_fields(id)
        .into_iter()
        .find(|(owner, index, _)| *owner == init.owner && *index == init.index)
    else {
        return Err(format!(
            "{} has no element matching this initializer",
            model.type_name(id)
        ));
    };
    value_fits(model, &init.value, &field.ty, field.array)
        .map_err(|e| format!("element '{}': {e}", field.name))
}

fn integer_in_range(model: &Model, expr: &Expr, tref: &TypeRef, lo: i128, hi: i128) -> Result<(), String> {
    match fold_int(model, expr) {
        Some(v) if v < lo || v > hi => Err(format!(
            "value {v} is out of range for {}",
            type_ref_label(model, tref, false)
        )),
        Some(_) => Ok(()),
        None => by_inference(model, expr, tref, false),
    }
}

fn each_item(
    items: &[BracketItem],
    mut fits: impl FnMut(&Expr) -> Result<(), String>,
) -> Result<(), String> {
    for (i, item) in items.iter().enumerate() {
        if item.value.is_some() {
            return Err(format!("item {i} is a map entry"));
        }
        fits(&item.first).map_err(|e| format!("item {i}: {e}"))?;
    }
    Ok(())
}

/// Fallback for references and operator expressions: compare the inferred
/// type with the declared one.
fn by_inference(model: &Model, expr: &Expr, tref: &TypeRef, array: bool) -> Result<(), String> {
    let Some(expected) = Ty::of(model, tref, array) else {
        return Ok(());
    };
    match infer(model, expr) {
        Some(actual) if compatible(model, &expected, &actual) => Ok(()),
        Some(actual) => Err(format!(
            "expected {}, found {}",
            expected.describe(model),
            actual.describe(model)
        )),
        None => Err(format!(
            "expression is not a valid {} value",
            expected.describe(model)
        )),
    }
}
