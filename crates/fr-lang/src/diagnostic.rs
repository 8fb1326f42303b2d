use std::fmt;

use serde::Serialize;

use crate::model::{Feature, NodeId, Span};

/// Severity level for semantic check diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

/// Category of a semantic problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    StructuralViolation,
    TypeMismatch,
    InheritanceConflict,
    VisibilityViolation,
    CyclicDependency,
    ContractViolation,
    InvalidAnnotation,
    /// Anything reported by an external validator.
    External,
}

impl DiagnosticKind {
    pub fn code(self) -> &'static str {
        match self {
            DiagnosticKind::StructuralViolation => "structural-violation",
            DiagnosticKind::TypeMismatch => "type-mismatch",
            DiagnosticKind::InheritanceConflict => "inheritance-conflict",
            DiagnosticKind::VisibilityViolation => "visibility-violation",
            DiagnosticKind::CyclicDependency => "cyclic-dependency",
            DiagnosticKind::ContractViolation => "contract-violation",
            DiagnosticKind::InvalidAnnotation => "invalid-annotation",
            DiagnosticKind::External => "external",
        }
    }
}

/// One semantic finding, attached to a model node and one of its features.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub node: NodeId,
    pub feature: Feature,
    /// Position inside a multi-valued feature; `None` means unspecified.
    pub index: Option<usize>,
    pub span: Span,
    pub message: String,
}

impl Diagnostic {
    pub fn error(kind: DiagnosticKind, node: NodeId, feature: Feature, message: impl Into<String>) -> Self {
        Diagnostic {
            severity: Severity::Error,
            kind,
            node,
            feature,
            index: None,
            span: Span::default(),
            message: message.into(),
        }
    }

    pub fn warning(kind: DiagnosticKind, node: NodeId, feature: Feature, message: impl Into<String>) -> Self {
        Diagnostic {
            severity: Severity::Warning,
            ..Diagnostic::error(kind, node, feature, message)
        }
    }

    pub fn at_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity.label(), self.kind.code(), self.message)
    }
}

/// Append-only collector shared by all checkers of one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    /// Shorthand for pushing an error without index or span.
    pub fn error(&mut self, kind: DiagnosticKind, node: NodeId, feature: Feature, message: impl Into<String>) {
        self.push(Diagnostic::error(kind, node, feature, message));
    }

    pub fn warning(&mut self, kind: DiagnosticKind, node: NodeId, feature: Feature, message: impl Into<String>) {
        self.push(Diagnostic::warning(kind, node, feature, message));
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.items.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.items.len() - self.error_count()
    }

    pub fn has_errors(&self) -> bool {
        self.items.iter().any(Diagnostic::is_error)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl Extend<Diagnostic> for Diagnostics {
    fn extend<T: IntoIterator<Item = Diagnostic>>(&mut self, iter: T) {
        self.items.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_by_severity() {
        let mut sink = Diagnostics::new();
        sink.error(DiagnosticKind::TypeMismatch, NodeId::Model, Feature::Value, "bad");
        sink.warning(DiagnosticKind::StructuralViolation, NodeId::Model, Feature::Name, "meh");
        sink.error(DiagnosticKind::TypeMismatch, NodeId::Model, Feature::Value, "bad");
        assert_eq!(sink.len(), 3);
        assert_eq!(sink.error_count(), 2);
        assert_eq!(sink.warning_count(), 1);
        assert!(sink.has_errors());
    }

    #[test]
    fn display_shows_kind_code() {
        let d = Diagnostic::error(
            DiagnosticKind::CyclicDependency,
            NodeId::Model,
            Feature::Name,
            "type 'A' is part of a cycle",
        );
        assert_eq!(d.to_string(), "error[cyclic-dependency]: type 'A' is part of a cycle");
    }

    #[test]
    fn builder_sets_index_and_span() {
        let d = Diagnostic::warning(DiagnosticKind::StructuralViolation, NodeId::Model, Feature::Types, "x")
            .at_index(2)
            .with_span(Span::new(4, 9));
        assert_eq!(d.index, Some(2));
        assert_eq!(d.span, Span::new(4, 9));
        assert!(!d.is_error());
    }
}
