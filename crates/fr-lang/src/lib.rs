#[macro_use]
mod log_macros;

mod checker;
mod diagnostic;
mod digraph;
pub mod model;

pub use checker::{
    CheckMode, CycleDetected, Dispatcher, Options, Ty, Validator, check_model, interface_graph,
    topological_type_order, type_graph,
};
pub use diagnostic::{Diagnostic, DiagnosticKind, Diagnostics, Severity};
pub use digraph::{CyclicGraph, Digraph};
pub use model::{Model, ModelError};
