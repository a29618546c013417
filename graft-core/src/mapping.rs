//! Mappings from the elements of one graph to those of another.

use fxhash::FxHashSet;
use itertools::Itertools;
use thiserror::Error;

use crate::core::{EdgeIndex, NodeIndex};
use crate::graph::Graph;

/// A translation from a source graph into a target graph.
///
/// Every source node is sent to exactly one target node. Every source edge is
/// sent to a set of target edges, since a pattern edge may be realised by
/// several parallel edges of a multigraph.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct GraphMapping {
    /// Target node of each source node, indexed by source position.
    pub node_mapping: Vec<NodeIndex>,
    /// Target edges of each source edge, indexed by source position.
    pub edge_mapping: Vec<Vec<EdgeIndex>>,
}

/// An embedding of a pattern graph into a target graph.
pub type Match = GraphMapping;

/// Errors found when checking a [`GraphMapping`] against its graphs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum MappingError {
    /// The mapping does not cover every source node.
    #[error("Mapping covers {actual} nodes but the source graph has {expected}.")]
    NodeCount {
        /// Nodes in the source graph.
        expected: usize,
        /// Length of the node mapping.
        actual: usize,
    },
    /// The mapping does not cover every source edge.
    #[error("Mapping covers {actual} edges but the source graph has {expected}.")]
    EdgeCount {
        /// Edges in the source graph.
        expected: usize,
        /// Length of the edge mapping.
        actual: usize,
    },
    /// A source node is sent outside the target graph.
    #[error("Node {node} is mapped to {image}, which is not in the target graph.")]
    NodeOutOfRange {
        /// Source node.
        node: NodeIndex,
        /// Its image.
        image: NodeIndex,
    },
    /// A labelled source node is sent to a node with a different label.
    #[error("Node {node} is mapped to {image}, which has a different label.")]
    LabelMismatch {
        /// Source node.
        node: NodeIndex,
        /// Its image.
        image: NodeIndex,
    },
    /// A source edge has no target edges.
    #[error("Edge {edge} is not realised by any target edge.")]
    UnrealisedEdge {
        /// Source edge.
        edge: EdgeIndex,
    },
    /// A source edge is sent outside the target graph.
    #[error("Edge {edge} is mapped to {image}, which is not in the target graph.")]
    EdgeOutOfRange {
        /// Source edge.
        edge: EdgeIndex,
        /// The offending image.
        image: EdgeIndex,
    },
    /// A target edge does not join the images of the source edge's endpoints.
    #[error("Edge {edge} is mapped to {image}, which does not join the mapped endpoints.")]
    MisplacedEdge {
        /// Source edge.
        edge: EdgeIndex,
        /// The offending image.
        image: EdgeIndex,
    },
}

impl GraphMapping {
    /// Creates a mapping from its node and edge tables.
    pub fn new(node_mapping: Vec<NodeIndex>, edge_mapping: Vec<Vec<EdgeIndex>>) -> Self {
        Self {
            node_mapping,
            edge_mapping,
        }
    }

    /// The image of a source node.
    ///
    /// # Panics
    ///
    /// If `node` is not covered by the mapping.
    #[inline]
    pub fn node(&self, node: NodeIndex) -> NodeIndex {
        self.node_mapping[node.index()]
    }

    /// The images of a source edge.
    ///
    /// # Panics
    ///
    /// If `edge` is not covered by the mapping.
    #[inline]
    pub fn edges(&self, edge: EdgeIndex) -> &[EdgeIndex] {
        &self.edge_mapping[edge.index()]
    }

    /// All target nodes hit by the mapping.
    pub fn node_image(&self) -> FxHashSet<NodeIndex> {
        self.node_mapping.iter().copied().collect()
    }

    /// All target edges hit by the mapping.
    pub fn edge_image(&self) -> FxHashSet<EdgeIndex> {
        self.edge_mapping.iter().flatten().copied().collect()
    }

    /// Whether no two source nodes share an image.
    pub fn is_injective(&self) -> bool {
        self.node_mapping.iter().all_unique()
    }

    /// Checks that this mapping is a structure-preserving map from `source`
    /// into `target`.
    ///
    /// Labelled source nodes must map to identically labelled target nodes,
    /// and every source edge must be realised by at least one target edge
    /// joining the images of its endpoints in the same direction.
    pub fn validate(&self, source: &Graph, target: &Graph) -> Result<(), MappingError> {
        if self.node_mapping.len() != source.node_count() {
            return Err(MappingError::NodeCount {
                expected: source.node_count(),
                actual: self.node_mapping.len(),
            });
        }
        if self.edge_mapping.len() != source.edge_count() {
            return Err(MappingError::EdgeCount {
                expected: source.edge_count(),
                actual: self.edge_mapping.len(),
            });
        }
        for (node, n) in source.nodes() {
            let image = self.node(node);
            let Some(target_node) = target.get_node(image) else {
                return Err(MappingError::NodeOutOfRange { node, image });
            };
            if n.label().is_some_and(|l| target_node.label() != Some(l)) {
                return Err(MappingError::LabelMismatch { node, image });
            }
        }
        for (edge, e) in source.edges() {
            let images = self.edges(edge);
            if images.is_empty() {
                return Err(MappingError::UnrealisedEdge { edge });
            }
            let (tail, head) = (self.node(e.tail), self.node(e.head));
            for &image in images {
                let Some(target_edge) = target.get_edge(image) else {
                    return Err(MappingError::EdgeOutOfRange { edge, image });
                };
                if !target_edge.connects(tail, head) {
                    return Err(MappingError::MisplacedEdge { edge, image });
                }
            }
        }
        Ok(())
    }
}
