//! Small directed graph used to order declarations by dependency.
//!
//! Edges point from a dependency to its dependent, so a successful
//! [`Digraph::topo_sort`] lists every base before whatever derives from it.

use std::fmt;
use std::hash::Hash;

use indexmap::{IndexMap, IndexSet};

/// Returned by [`Digraph::topo_sort`] when the graph is not acyclic.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("graph contains a cycle through {} node(s)", .nodes.len())]
pub struct CyclicGraph<N: fmt::Debug> {
    /// Every node that lies on some cycle, in insertion order.
    pub nodes: Vec<N>,
}

#[derive(Debug, Clone)]
struct Adjacency<N> {
    outgoing: IndexSet<N>,
    incoming: IndexSet<N>,
}

impl<N> Default for Adjacency<N> {
    fn default() -> Self {
        Adjacency {
            outgoing: IndexSet::new(),
            incoming: IndexSet::new(),
        }
    }
}

/// Directed graph keyed by node identity; iteration follows insertion order.
#[derive(Debug, Clone)]
pub struct Digraph<N> {
    nodes: IndexMap<N, Adjacency<N>>,
}

impl<N> Default for Digraph<N> {
    fn default() -> Self {
        Digraph {
            nodes: IndexMap::new(),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

impl<N: Copy + Eq + Hash + fmt::Debug> Digraph<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node without edges. Idempotent.
    pub fn add_node(&mut self, node: N) {
        self.nodes.entry(node).or_default();
    }

    /// Record that `to` depends on `from`. Idempotent; self-loops are kept.
    pub fn add_edge(&mut self, from: N, to: N) {
        self.nodes.entry(from).or_default().outgoing.insert(to);
        self.nodes.entry(to).or_default().incoming.insert(from);
    }

    pub fn contains(&self, node: N) -> bool {
        self.nodes.contains_key(&node)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn has_edge(&self, from: N, to: N) -> bool {
        self.nodes
            .get(&from)
            .is_some_and(|adj| adj.outgoing.contains(&to))
    }

    /// Nodes that depend on `node`.
    pub fn successors(&self, node: N) -> impl Iterator<Item = N> + '_ {
        self.nodes
            .get(&node)
            .into_iter()
            .flat_map(|adj| adj.outgoing.iter().copied())
    }

    /// All nodes ordered so that for every edge `u -> v`, `u` comes first.
    ///
    /// Among independent nodes the insertion order is kept. A graph with a
    /// cycle (including a self-loop) yields [`CyclicGraph`] naming every node
    /// on a cycle, never a partial order.
    pub fn topo_sort(&self) -> Result<Vec<N>, CyclicGraph<N>> {
        let mut marks = vec![Mark::Unvisited; self.nodes.len()];
        let mut order = Vec::with_capacity(self.nodes.len());
        for index in 0..self.nodes.len() {
            if !self.visit(index, &mut marks, &mut order) {
                return Err(CyclicGraph {
                    nodes: self.cyclic_nodes(),
                });
            }
        }
        Ok(order
            .into_iter()
            .filter_map(|i| self.nodes.get_index(i).map(|(n, _)| *n))
            .collect())
    }

    /// Depth-first over dependencies; `false` on a back edge.
    fn visit(&self, index: usize, marks: &mut [Mark], order: &mut Vec<usize>) -> bool {
        match marks[index] {
            Mark::Done => return true,
            Mark::InProgress => return false,
            Mark::Unvisited => {}
        }
        marks[index] = Mark::InProgress;
        if let Some((_, adj)) = self.nodes.get_index(index) {
            for dep in &adj.incoming {
                let Some(dep_index) = self.nodes.get_index_of(dep) else {
                    continue;
                };
                if !self.visit(dep_index, marks, order) {
                    return false;
                }
            }
        }
        marks[index] = Mark::Done;
        order.push(index);
        true
    }

    /// Every node lying on at least one cycle, in insertion order.
    ///
    /// Strongly connected components with more than one member, plus nodes
    /// with a self-loop.
    pub fn cyclic_nodes(&self) -> Vec<N> {
        let mut tarjan = Tarjan {
            graph: self,
            next: 0,
            index: vec![None; self.nodes.len()],
            lowlink: vec![0; self.nodes.len()],
            on_stack: vec![false; self.nodes.len()],
            stack: Vec::new(),
            cyclic: vec![false; self.nodes.len()],
        };
        for v in 0..self.nodes.len() {
            if tarjan.index[v].is_none() {
                tarjan.strong_connect(v);
            }
        }
        self.nodes
            .keys()
            .enumerate()
            .filter(|(i, _)| tarjan.cyclic[*i])
            .map(|(_, n)| *n)
            .collect()
    }
}

struct Tarjan<'g, N> {
    graph: &'g Digraph<N>,
    next: usize,
    index: Vec<Option<usize>>,
    lowlink: Vec<usize>,
    on_stack: Vec<bool>,
    stack: Vec<usize>,
    cyclic: Vec<bool>,
}

impl<N: Copy + Eq + Hash + fmt::Debug> Tarjan<'_, N> {
    fn strong_connect(&mut self, v: usize) {
        self.index[v] = Some(self.next);
        self.lowlink[v] = self.next;
        self.next += 1;
        self.stack.push(v);
        self.on_stack[v] = true;

        let graph = self.graph;
        let mut self_loop = false;
        if let Some((node, adj)) = graph.nodes.get_index(v) {
            self_loop = adj.outgoing.contains(node);
            for w in adj.outgoing.iter().filter_map(|s| graph.nodes.get_index_of(s)) {
                match self.index[w] {
                    None => {
                        self.strong_connect(w);
                        self.lowlink[v] = self.lowlink[v].min(self.lowlink[w]);
                    }
                    Some(w_index) if self.on_stack[w] => {
                        self.lowlink[v] = self.lowlink[v].min(w_index);
                    }
                    Some(_) => {}
                }
            }
        }

        if Some(self.lowlink[v]) == self.index[v] {
            let mut component = Vec::new();
            while let Some(w) = self.stack.pop() {
                self.on_stack[w] = false;
                component.push(w);
                if w == v {
                    break;
                }
            }
            if component.len() > 1 || self_loop {
                for w in component {
                    self.cyclic[w] = true;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dependencies_come_first() {
        let mut g = Digraph::new();
        g.add_node("segment");
        g.add_node("point");
        g.add_edge("point", "segment");
        assert_eq!(g.topo_sort().unwrap(), vec!["point", "segment"]);
    }

    #[test]
    fn independent_nodes_keep_insertion_order() {
        let mut g = Digraph::new();
        for n in ["c", "a", "b"] {
            g.add_node(n);
        }
        assert_eq!(g.topo_sort().unwrap(), vec!["c", "a", "b"]);
    }

    #[test]
    fn add_edge_is_idempotent() {
        let mut g = Digraph::new();
        g.add_edge(1, 2);
        g.add_edge(1, 2);
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.successors(1).collect::<Vec<_>>(), vec![2]);
        assert!(g.has_edge(1, 2));
        assert!(!g.has_edge(2, 1));
    }

    #[test]
    fn diamond_respects_every_edge() {
        let mut g = Digraph::new();
        g.add_edge("base", "left");
        g.add_edge("base", "right");
        g.add_edge("left", "bottom");
        g.add_edge("right", "bottom");
        let order = g.topo_sort().unwrap();
        let pos = |n| order.iter().position(|x| *x == n).unwrap();
        assert!(pos("base") < pos("left"));
        assert!(pos("base") < pos("right"));
        assert!(pos("left") < pos("bottom"));
        assert!(pos("right") < pos("bottom"));
    }

    #[test]
    fn self_loop_is_a_cycle() {
        let mut g = Digraph::new();
        g.add_node("other");
        g.add_edge("a", "a");
        let err = g.topo_sort().unwrap_err();
        assert_eq!(err.nodes, vec!["a"]);
    }

    #[test]
    fn cycle_reports_all_members_but_not_dependents() {
        let mut g = Digraph::new();
        g.add_edge("a", "b");
        g.add_edge("b", "c");
        g.add_edge("c", "a");
        g.add_edge("c", "tail");
        g.add_edge("head", "a");
        let err = g.topo_sort().unwrap_err();
        assert_eq!(err.nodes, vec!["a", "b", "c"]);
        assert_eq!(err.to_string(), "graph contains a cycle through 3 node(s)");
    }

    #[test]
    fn two_separate_cycles() {
        let mut g = Digraph::new();
        g.add_edge(1, 2);
        g.add_edge(2, 1);
        g.add_edge(3, 4);
        g.add_edge(4, 3);
        g.add_edge(5, 6);
        assert_eq!(g.cyclic_nodes(), vec![1, 2, 3, 4]);
    }
}
