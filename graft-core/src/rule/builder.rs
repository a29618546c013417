//! Programmatic construction of annotated rule graphs.

use smol_str::SmolStr;

use super::{LHS_SUBGRAPH, RHS_SUBGRAPH};
use crate::core::{EdgeIndex, NodeIndex};
use crate::graph::{Edge, Graph, Node, Subgraph};

/// Builds a graph annotated with the "L" and "R" subgraphs expected by
/// [`Rule::from_graph`](super::Rule::from_graph).
///
/// ```
/// use graft_core::{Edge, Node, Rule, RuleGraphBuilder};
///
/// let mut builder = RuleGraphBuilder::new();
/// let a = builder.deleted_node(Node::new("A"));
/// let b = builder.preserved_node(Node::new("B"));
/// let c = builder.created_node(Node::new("C"));
/// builder.lhs_edge(Edge::new(a, b));
/// builder.rhs_edge(Edge::new(b, c));
///
/// let rule = Rule::from_graph(&builder.finish()).unwrap();
/// assert_eq!(rule.common.node_count(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct RuleGraphBuilder {
    graph: Graph,
    lhs: Subgraph,
    rhs: Subgraph,
}

impl Default for RuleGraphBuilder {
    fn default() -> Self {
        Self {
            graph: Graph::new(),
            lhs: Subgraph::new(LHS_SUBGRAPH),
            rhs: Subgraph::new(RHS_SUBGRAPH),
        }
    }
}

impl RuleGraphBuilder {
    /// Creates a builder for an empty rule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node on both sides of the rule.
    pub fn preserved_node(&mut self, node: Node) -> NodeIndex {
        let n = self.graph.add_node(node);
        self.lhs.nodes.insert(n);
        self.rhs.nodes.insert(n);
        n
    }

    /// Adds a node only on the left-hand side.
    pub fn deleted_node(&mut self, node: Node) -> NodeIndex {
        let n = self.graph.add_node(node);
        self.lhs.nodes.insert(n);
        n
    }

    /// Adds a node only on the right-hand side.
    pub fn created_node(&mut self, node: Node) -> NodeIndex {
        let n = self.graph.add_node(node);
        self.rhs.nodes.insert(n);
        n
    }

    /// Adds an edge to the left-hand side.
    pub fn lhs_edge(&mut self, edge: Edge) -> EdgeIndex {
        let e = self.graph.add_edge(edge);
        self.lhs.edges.insert(e);
        e
    }

    /// Adds an edge to the right-hand side.
    pub fn rhs_edge(&mut self, edge: Edge) -> EdgeIndex {
        let e = self.graph.add_edge(edge);
        self.rhs.edges.insert(e);
        e
    }

    /// Adds an edge from `tail` to `head` that persists across the rule, as
    /// a pair of LHS and RHS edges sharing `label`.
    pub fn preserved_edge(
        &mut self,
        tail: NodeIndex,
        head: NodeIndex,
        label: impl Into<SmolStr>,
    ) -> (EdgeIndex, EdgeIndex) {
        let label = label.into();
        assert!(!label.is_empty(), "Preserved edges need a non-empty label.");
        let lhs = self.lhs_edge(Edge::new(tail, head).with_label(label.clone()));
        let rhs = self.rhs_edge(Edge::new(tail, head).with_label(label));
        (lhs, rhs)
    }

    /// Returns the annotated graph.
    pub fn finish(mut self) -> Graph {
        self.graph.add_subgraph(self.lhs);
        self.graph.add_subgraph(self.rhs);
        self.graph
    }
}
