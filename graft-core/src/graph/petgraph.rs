//! Conversion of a [`Graph`] into a petgraph graph, for use with petgraph's
//! algorithms.

use std::collections::BTreeMap;

use petgraph::algo::is_isomorphic_matching;
use petgraph::graph::{self as pg, DiGraph};

use super::Graph;
use crate::core::NodeIndex;

impl Graph {
    /// Builds a petgraph [`DiGraph`] weighted by the node and edge labels.
    ///
    /// Petgraph indices coincide with the positions of the nodes and edges in
    /// this graph. Names and subgraphs are not carried over.
    pub fn to_petgraph(&self) -> DiGraph<Option<&str>, Option<&str>> {
        let mut g = DiGraph::with_capacity(self.node_count(), self.edge_count());
        for (_, node) in self.nodes() {
            g.add_node(node.label());
        }
        for (_, edge) in self.edges() {
            g.add_edge(
                pg::NodeIndex::new(edge.tail.index()),
                pg::NodeIndex::new(edge.head.index()),
                edge.label(),
            );
        }
        g
    }

    /// Whether the two graphs are isomorphic as directed multigraphs with
    /// labelled nodes and edges.
    ///
    /// Node names are ignored.
    pub fn is_isomorphic(&self, other: &Graph) -> bool {
        is_isomorphic_matching(
            &self.bundled_petgraph(),
            &other.bundled_petgraph(),
            |a, b| a == b,
            |a, b| a == b,
        )
    }

    /// A simple digraph with one edge per connected `(tail, head)` pair,
    /// weighted by the sorted labels of the parallel edges it stands for.
    fn bundled_petgraph(&self) -> DiGraph<Option<&str>, Vec<Option<&str>>> {
        let mut bundles: BTreeMap<(NodeIndex, NodeIndex), Vec<Option<&str>>> = BTreeMap::new();
        for (_, edge) in self.edges() {
            bundles
                .entry((edge.tail, edge.head))
                .or_default()
                .push(edge.label());
        }
        let mut g = DiGraph::with_capacity(self.node_count(), bundles.len());
        for (_, node) in self.nodes() {
            g.add_node(node.label());
        }
        for ((tail, head), mut labels) in bundles {
            labels.sort_unstable();
            g.add_edge(
                pg::NodeIndex::new(tail.index()),
                pg::NodeIndex::new(head.index()),
                labels,
            );
        }
        g
    }
}
