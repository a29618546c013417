//! The directed multigraph on which rules are derived, matched and applied.

mod petgraph;

use std::collections::BTreeSet;

use smol_str::SmolStr;
use thiserror::Error;

use crate::core::{EdgeIndex, NodeIndex};

/// A node of a [`Graph`].
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Node {
    /// Name of the node. Only used for diagnostics.
    pub name: SmolStr,
    /// Label used when matching. An absent or empty label is a wildcard in
    /// a pattern.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<SmolStr>,
}

/// A directed edge of a [`Graph`], running from `tail` to `head`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Edge {
    /// The node the edge starts at.
    pub tail: NodeIndex,
    /// The node the edge ends at.
    pub head: NodeIndex,
    /// Label of the edge. Non-empty labels tie an LHS edge to an RHS edge
    /// when deriving a rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<SmolStr>,
}

/// A named selection of nodes and edges of one [`Graph`].
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Subgraph {
    /// Name of the subgraph.
    pub name: SmolStr,
    /// Nodes in the subgraph.
    #[serde(default)]
    pub nodes: BTreeSet<NodeIndex>,
    /// Edges in the subgraph.
    #[serde(default)]
    pub edges: BTreeSet<EdgeIndex>,
}

/// A directed multigraph with labelled nodes and edges.
///
/// Parallel edges and self-loops are allowed. Node and edge handles are
/// positions in the graph and are never reused or invalidated, since a graph
/// only grows. Rewriting produces a fresh graph instead.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    subgraphs: Vec<Subgraph>,
}

/// Errors that can occur when checking the handles of a [`Graph`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum GraphError {
    /// An edge refers to a node that does not exist.
    #[error("Edge {edge} refers to missing node {node}.")]
    InvalidEdgeEndpoint {
        /// The offending edge.
        edge: EdgeIndex,
        /// The missing endpoint.
        node: NodeIndex,
    },
    /// A subgraph contains a node that does not exist.
    #[error("Subgraph \"{subgraph}\" contains missing node {node}.")]
    InvalidSubgraphNode {
        /// Name of the subgraph.
        subgraph: SmolStr,
        /// The missing node.
        node: NodeIndex,
    },
    /// A subgraph contains an edge that does not exist.
    #[error("Subgraph \"{subgraph}\" contains missing edge {edge}.")]
    InvalidSubgraphEdge {
        /// Name of the subgraph.
        subgraph: SmolStr,
        /// The missing edge.
        edge: EdgeIndex,
    },
}

fn non_empty(label: Option<&SmolStr>) -> Option<&str> {
    label.map(SmolStr::as_str).filter(|l| !l.is_empty())
}

impl Node {
    /// Creates an unlabelled node.
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            label: None,
        }
    }

    /// Sets the label of the node. An empty label clears it.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<SmolStr>) -> Self {
        let label = label.into();
        self.label = (!label.is_empty()).then_some(label);
        self
    }

    /// The label of the node, if it has a non-empty one.
    #[inline]
    pub fn label(&self) -> Option<&str> {
        non_empty(self.label.as_ref())
    }
}

impl Edge {
    /// Creates an unlabelled edge from `tail` to `head`.
    pub fn new(tail: NodeIndex, head: NodeIndex) -> Self {
        Self {
            tail,
            head,
            label: None,
        }
    }

    /// Sets the label of the edge. An empty label clears it.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<SmolStr>) -> Self {
        let label = label.into();
        self.label = (!label.is_empty()).then_some(label);
        self
    }

    /// The label of the edge, if it has a non-empty one.
    #[inline]
    pub fn label(&self) -> Option<&str> {
        non_empty(self.label.as_ref())
    }

    /// Whether the edge runs from `tail` to `head`.
    #[inline]
    pub fn connects(&self, tail: NodeIndex, head: NodeIndex) -> bool {
        self.tail == tail && self.head == head
    }
}

impl Subgraph {
    /// Creates an empty subgraph.
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Whether the subgraph contains `node`.
    #[inline]
    pub fn contains_node(&self, node: NodeIndex) -> bool {
        self.nodes.contains(&node)
    }

    /// Whether the subgraph contains `edge`.
    #[inline]
    pub fn contains_edge(&self, edge: EdgeIndex) -> bool {
        self.edges.contains(&edge)
    }
}

impl Graph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node and returns its handle.
    pub fn add_node(&mut self, node: Node) -> NodeIndex {
        self.nodes.push(node);
        NodeIndex::new(self.nodes.len() - 1)
    }

    /// Adds an edge and returns its handle.
    ///
    /// # Panics
    ///
    /// If either endpoint is not a node of this graph.
    pub fn add_edge(&mut self, edge: Edge) -> EdgeIndex {
        for node in [edge.tail, edge.head] {
            assert!(
                self.contains_node(node),
                "Cannot add an edge to missing node {node}."
            );
        }
        self.edges.push(edge);
        EdgeIndex::new(self.edges.len() - 1)
    }

    /// Adds an edge whose endpoints are placeholders, for the symbolic edges
    /// of a rule interface. The endpoints are never dereferenced.
    pub(crate) fn add_symbolic_edge(&mut self, label: SmolStr) -> EdgeIndex {
        let placeholder = NodeIndex::new(0);
        self.edges.push(Edge::new(placeholder, placeholder).with_label(label));
        EdgeIndex::new(self.edges.len() - 1)
    }

    /// Adds a subgraph.
    ///
    /// # Panics
    ///
    /// If the subgraph refers to nodes or edges outside this graph.
    pub fn add_subgraph(&mut self, subgraph: Subgraph) {
        assert!(
            subgraph.nodes.iter().all(|&n| self.contains_node(n))
                && subgraph.edges.iter().all(|&e| self.contains_edge(e)),
            "Subgraph \"{}\" refers to elements outside the graph.",
            subgraph.name
        );
        self.subgraphs.push(subgraph);
    }

    /// Returns the node with the given handle.
    ///
    /// # Panics
    ///
    /// If the handle does not belong to this graph.
    #[inline]
    pub fn node(&self, node: NodeIndex) -> &Node {
        &self.nodes[node.index()]
    }

    /// Returns the edge with the given handle.
    ///
    /// # Panics
    ///
    /// If the handle does not belong to this graph.
    #[inline]
    pub fn edge(&self, edge: EdgeIndex) -> &Edge {
        &self.edges[edge.index()]
    }

    /// Returns the node with the given handle, if it exists.
    pub fn get_node(&self, node: NodeIndex) -> Option<&Node> {
        self.nodes.get(node.index())
    }

    /// Returns the edge with the given handle, if it exists.
    pub fn get_edge(&self, edge: EdgeIndex) -> Option<&Edge> {
        self.edges.get(edge.index())
    }

    /// Whether `node` is a node of this graph.
    #[inline]
    pub fn contains_node(&self, node: NodeIndex) -> bool {
        node.index() < self.nodes.len()
    }

    /// Whether `edge` is an edge of this graph.
    #[inline]
    pub fn contains_edge(&self, edge: EdgeIndex) -> bool {
        edge.index() < self.edges.len()
    }

    /// Number of nodes.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Iterates over the node handles in order.
    pub fn node_indices(&self) -> impl ExactSizeIterator<Item = NodeIndex> + Clone + use<> {
        (0..self.nodes.len()).map(NodeIndex::new)
    }

    /// Iterates over the edge handles in order.
    pub fn edge_indices(&self) -> impl ExactSizeIterator<Item = EdgeIndex> + Clone + use<> {
        (0..self.edges.len()).map(EdgeIndex::new)
    }

    /// Iterates over the nodes together with their handles.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = (NodeIndex, &Node)> + Clone {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeIndex::new(i), n))
    }

    /// Iterates over the edges together with their handles.
    pub fn edges(&self) -> impl ExactSizeIterator<Item = (EdgeIndex, &Edge)> + Clone {
        self.edges
            .iter()
            .enumerate()
            .map(|(i, e)| (EdgeIndex::new(i), e))
    }

    /// All edges running from `tail` to `head`, in increasing order.
    pub fn edges_between(
        &self,
        tail: NodeIndex,
        head: NodeIndex,
    ) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.edges()
            .filter(move |(_, e)| e.connects(tail, head))
            .map(|(i, _)| i)
    }

    /// The subgraphs of this graph.
    pub fn subgraphs(&self) -> &[Subgraph] {
        &self.subgraphs
    }

    /// The first subgraph with the given name.
    pub fn subgraph(&self, name: &str) -> Option<&Subgraph> {
        self.subgraphs.iter().find(|s| s.name == name)
    }

    /// Checks that every handle stored in the graph resolves into it.
    ///
    /// Graphs built through [`Graph::add_edge`] and [`Graph::add_subgraph`]
    /// are always valid; deserialized graphs should be checked before use.
    pub fn validate(&self) -> Result<(), GraphError> {
        for (edge, e) in self.edges() {
            if let Some(node) = [e.tail, e.head]
                .into_iter()
                .find(|&n| !self.contains_node(n))
            {
                return Err(GraphError::InvalidEdgeEndpoint { edge, node });
            }
        }
        for subgraph in &self.subgraphs {
            if let Some(&node) = subgraph.nodes.iter().find(|&&n| !self.contains_node(n)) {
                return Err(GraphError::InvalidSubgraphNode {
                    subgraph: subgraph.name.clone(),
                    node,
                });
            }
            if let Some(&edge) = subgraph.edges.iter().find(|&&e| !self.contains_edge(e)) {
                return Err(GraphError::InvalidSubgraphEdge {
                    subgraph: subgraph.name.clone(),
                    edge,
                });
            }
        }
        Ok(())
    }
}
