//! Type compatibility: constant and declaration values against their declared
//! types, enumerator values, interval bounds.

mod eval;
mod fit;
mod infer;

pub(crate) use eval::fold_int;
pub(crate) use fit::value_fits;
pub(crate) use infer::{check_expr, infer};

use crate::diagnostic::{Diagnostic, DiagnosticKind, Diagnostics};
use crate::model::{
    ExprRole, ExprSite, Feature, Model, Primitive, TypeId, TypeKind, TypeRef, TypeRefKind,
};

const KIND: DiagnosticKind = DiagnosticKind::TypeMismatch;

/// Enumerator values are stored as a signed 32-bit or unsigned 32-bit
/// integer by every supported backend.
const ENUMERATOR_RANGE: (i128, i128) = (i32::MIN as i128, u32::MAX as i128);

/// Value type of an expression, as far as it can be determined without
/// a target type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ty {
    Integer,
    Float,
    Boolean,
    String,
    ByteBuffer,
    /// A struct, union, enumeration or map type.
    Derived(TypeId),
    Array(Box<Ty>),
}

impl Ty {
    /// Value type of a declared type reference, looking through aliases.
    ///
    /// Returns `None` for a self-containing array; the cycle detector
    /// reports those.
    pub fn of(model: &Model, tref: &TypeRef, array: bool) -> Option<Ty> {
        Ty::nested(model, tref, array, 0)
    }

    /// An acyclic chain of nested arrays is at most one level per type.
    fn nested(model: &Model, tref: &TypeRef, array: bool, depth: usize) -> Option<Ty> {
        if depth > model.types.len() {
            return None;
        }
        let resolved = model.resolve_alias(tref)?;
        let ty = match resolved.kind {
            TypeRefKind::Primitive(p) => match p {
                Primitive::Boolean => Ty::Boolean,
                Primitive::String => Ty::String,
                Primitive::ByteBuffer => Ty::ByteBuffer,
                p if p.is_floating() => Ty::Float,
                _ => Ty::Integer,
            },
            TypeRefKind::Interval { .. } => Ty::Integer,
            TypeRefKind::Derived(id) => match &model.type_def(id)?.kind {
                TypeKind::Array { element } => Ty::Array(Box::new(Ty::nested(model, element, false, depth + 1)?)),
                _ => Ty::Derived(id),
            },
        };
        Some(if array { Ty::Array(Box::new(ty)) } else { ty })
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Ty::Integer | Ty::Float)
    }

    pub fn describe(&self, model: &Model) -> String {
        match self {
            Ty::Integer => "integer".into(),
            Ty::Float => "float".into(),
            Ty::Boolean => "Boolean".into(),
            Ty::String => "String".into(),
            Ty::ByteBuffer => "ByteBuffer".into(),
            Ty::Derived(id) => model.type_name(*id).to_string(),
            Ty::Array(inner) => format!("{}[]", inner.describe(model)),
        }
    }
}

/// Whether a value of type `actual` may be stored where `expected` is
/// declared.
///
/// Integers widen to floats; a struct or union value may be stored in any of
/// its base types.
pub fn compatible(model: &Model, expected: &Ty, actual: &Ty) -> bool {
    match (expected, actual) {
        (Ty::Float, Ty::Integer) => true,
        (Ty::Derived(e), Ty::Derived(a)) => e == a || model.base_types(*a).contains(e),
        (Ty::Array(e), Ty::Array(a)) => compatible(model, e, a),
        (e, a) => e == a,
    }
}

/// Source-like rendering of a type reference, e.g. `UInt8[]`.
pub fn type_ref_label(model: &Model, tref: &TypeRef, array: bool) -> String {
    let base = match &tref.kind {
        TypeRefKind::Primitive(p) => format!("{p:?}"),
        TypeRefKind::Interval { lower, upper } => {
            let bound = |b: &Option<i64>| b.map_or_else(|| "*".to_string(), |v| v.to_string());
            format!("Integer({}, {})", bound(lower), bound(upper))
        }
        TypeRefKind::Derived(id) => model.type_name(*id).to_string(),
    };
    if array { format!("{base}[]") } else { base }
}

pub(super) fn check(model: &Model, sink: &mut Diagnostics) {
    for site in model.type_ref_sites() {
        if let TypeRefKind::Interval {
            lower: Some(lower),
            upper: Some(upper),
        } = site.type_ref.kind
            && lower > upper
        {
            sink.push(
                Diagnostic::error(
                    KIND,
                    site.node,
                    Feature::Interval,
                    format!("Invalid interval specification: lower bound {lower} exceeds upper bound {upper}"),
                )
                .with_span(site.span(model)),
            );
        }
    }

    for site in model.expr_sites() {
        match site.role {
            ExprRole::ConstantValue | ExprRole::DeclarationInit => check_value(model, &site, sink),
            ExprRole::EnumeratorValue => check_enumerator_value(model, &site, sink),
            // Checked against the contract's context.
            ExprRole::Guard | ExprRole::AssignmentValue => {}
        }
    }
}

fn report(sink: &mut Diagnostics, site: &ExprSite<'_>, message: String) {
    let mut d = Diagnostic::error(KIND, site.node, site.feature, message);
    d.index = site.index;
    sink.push(d);
}

fn check_value(model: &Model, site: &ExprSite<'_>, sink: &mut Diagnostics) {
    let Some((tref, array)) = site.expected else {
        return;
    };
    let mut problems = Vec::new();
    check_expr(model, site.expr, &mut problems);
    if !problems.is_empty() {
        for msg in problems {
            report(sink, site, msg);
        }
        return;
    }
    if let Err(msg) = value_fits(model, site.expr, tref, array) {
        report(
            sink,
            site,
            format!(
                "Invalid value for type {}: {msg}",
                type_ref_label(model, tref, array)
            ),
        );
    }
}

fn check_enumerator_value(model: &Model, site: &ExprSite<'_>, sink: &mut Diagnostics) {
    match fold_int(model, site.expr) {
        Some(v) if v < ENUMERATOR_RANGE.0 || v > ENUMERATOR_RANGE.1 => report(
            sink,
            site,
            format!("Enumerator value {v} is out of range for an enumeration"),
        ),
        Some(_) => {}
        None => {
            if infer(model, site.expr) != Some(Ty::Integer) {
                report(sink, site, "Enumerator value must be an integer constant".to_string());
            }
        }
    }
}
