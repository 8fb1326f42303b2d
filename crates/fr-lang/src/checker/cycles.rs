//! Dependency ordering of type definitions and cycle detection over type
//! and interface-inheritance graphs.

use crate::diagnostic::{DiagnosticKind, Diagnostics};
use crate::digraph::Digraph;
use crate::model::{Feature, InterfaceId, Model, NodeId, TypeDef, TypeId};

/// Returned by [`topological_type_order`] when type definitions depend on
/// each other in a cycle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cyclic type dependency among {} type(s)", .types.len())]
pub struct CycleDetected {
    /// Every type that lies on a cycle, in model order.
    pub types: Vec<TypeId>,
}

/// Types `def` cannot be laid out without.
fn type_dependencies(def: &TypeDef) -> Vec<TypeId> {
    def.kind
        .base()
        .into_iter()
        .chain(def.kind.member_refs().into_iter().filter_map(|r| r.derived_id()))
        .collect()
}

/// Dependency graph of every type in the model, edges from dependency to
/// dependent.
pub fn type_graph(model: &Model) -> Digraph<TypeId> {
    let mut graph = Digraph::new();
    model.type_ids().for_each(|id| graph.add_node(id));
    for (id, def) in model.type_ids().zip(&model.types) {
        for dep in type_dependencies(def) {
            graph.add_edge(dep, id);
        }
    }
    graph
}

/// Interface inheritance graph, edges from base to derived interface.
pub fn interface_graph(model: &Model) -> Digraph<InterfaceId> {
    let mut graph = Digraph::new();
    model.interface_ids().for_each(|id| graph.add_node(id));
    for (id, iface) in model.interface_ids().zip(&model.interfaces) {
        if let Some(base) = iface.base {
            graph.add_edge(base, id);
        }
    }
    graph
}

/// All types of the model ordered so that every base, field, element, key,
/// value and alias target type precedes the types that use it.
///
/// Unrelated types keep model order. Fails with every participating type
/// when the model contains a dependency cycle.
pub fn topological_type_order(model: &Model) -> Result<Vec<TypeId>, CycleDetected> {
    type_graph(model).topo_sort().map_err(|cyclic| {
        fr_warn!(order, types = cyclic.nodes.len(), "type dependency cycle");
        CycleDetected {
            types: cyclic.nodes,
        }
    })
}

pub(super) fn check(model: &Model, sink: &mut Diagnostics) {
    if let Err(cyclic) = type_graph(model).topo_sort() {
        for id in cyclic.nodes {
            sink.error(
                DiagnosticKind::CyclicDependency,
                NodeId::Type(id),
                Feature::Name,
                format!(
                    "type '{}' is part of a self-referential or cyclic type dependency",
                    model.type_name(id)
                ),
            );
        }
    }

    if let Err(cyclic) = interface_graph(model).topo_sort() {
        for id in cyclic.nodes {
            sink.error(
                DiagnosticKind::CyclicDependency,
                NodeId::Interface(id),
                Feature::Base,
                format!(
                    "interface '{}' is part of a cyclic inheritance chain",
                    model.interface_name(id)
                ),
            );
        }
    }
}
