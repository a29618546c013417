//! Application of a [`Rule`] at a match, by double-pushout rewriting.

use fxhash::FxHashSet;
use itertools::Itertools;
use thiserror::Error;
use tracing::debug;

use super::Rule;
use crate::core::{EdgeIndex, NodeIndex};
use crate::graph::{Edge, Graph};
use crate::mapping::{Match, MappingError};

/// Errors that prevent a rule from being applied at a match.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ApplyError {
    /// The match is not an embedding of the rule's LHS into the target.
    #[error("Invalid match: {0}")]
    InvalidMatch(#[from] MappingError),
    /// Two LHS nodes are matched to the same target node.
    #[error("Target node {node} is matched by more than one LHS node.")]
    NonInjective {
        /// The shared target node.
        node: NodeIndex,
    },
    /// A target edge realises both a deleted and a preserved LHS edge.
    #[error("Target edge {edge} realises both a deleted and a preserved LHS edge.")]
    EdgeConflict {
        /// The contested target edge.
        edge: EdgeIndex,
    },
    /// Deleting a node would leave a surviving edge without an endpoint.
    #[error("Target edge {edge} would be left dangling by deleting node {node}.")]
    DanglingEdge {
        /// The surviving edge.
        edge: EdgeIndex,
        /// The deleted endpoint.
        node: NodeIndex,
    },
}

/// Applies `rule` to `target` at `lhs_match`. See [`Rule::apply`].
pub fn apply_rule(rule: &Rule, target: &Graph, lhs_match: &Match) -> Result<Graph, ApplyError> {
    rule.apply(target, lhs_match)
}

/// The target elements removed by applying a rule at a match.
struct Deletion {
    nodes: FxHashSet<NodeIndex>,
    edges: FxHashSet<EdgeIndex>,
}

impl Rule {
    /// Target edges realising the LHS edges that persist through the interface.
    fn preserved_target_edges<'a>(
        &'a self,
        lhs_match: &'a Match,
    ) -> impl Iterator<Item = EdgeIndex> + 'a {
        self.common_to_lhs
            .edge_mapping
            .iter()
            .flatten()
            .flat_map(|&lhs_edge| lhs_match.edges(lhs_edge).iter().copied())
    }

    fn deletion(&self, lhs_match: &Match) -> Deletion {
        Deletion {
            nodes: self.deleted_nodes().map(|n| lhs_match.node(n)).collect(),
            edges: self
                .deleted_edges()
                .flat_map(|e| lhs_match.edges(e).iter().copied())
                .collect(),
        }
    }

    /// Checks that the rule can be applied to `target` at `lhs_match`.
    ///
    /// The match must embed the LHS into the target injectively, no target
    /// edge may be both deleted and preserved, and no edge outside the match
    /// may be attached to a deleted node.
    pub fn verify_match(&self, target: &Graph, lhs_match: &Match) -> Result<(), ApplyError> {
        lhs_match.validate(&self.lhs, target)?;
        if let Some(&node) = lhs_match.node_mapping.iter().duplicates().next() {
            return Err(ApplyError::NonInjective { node });
        }

        let deletion = self.deletion(lhs_match);
        if let Some(edge) = self
            .preserved_target_edges(lhs_match)
            .find(|e| deletion.edges.contains(e))
        {
            return Err(ApplyError::EdgeConflict { edge });
        }
        for (edge, e) in target.edges() {
            if deletion.edges.contains(&edge) {
                continue;
            }
            if let Some(node) = [e.tail, e.head]
                .into_iter()
                .find(|n| deletion.nodes.contains(n))
            {
                return Err(ApplyError::DanglingEdge { edge, node });
            }
        }
        Ok(())
    }

    /// Whether [`Rule::apply`] would succeed.
    pub fn is_applicable(&self, target: &Graph, lhs_match: &Match) -> bool {
        self.verify_match(target, lhs_match).is_ok()
    }

    /// Rewrites `target` at `lhs_match`, returning the derived graph.
    ///
    /// The result contains, in order: the target nodes outside the match,
    /// the preserved nodes with the target's attributes, and the nodes
    /// created by the RHS. Edges follow the same order: unmatched target
    /// edges, the target edges realising preserved LHS edges, and the edges
    /// created by the RHS. The target itself is left untouched.
    ///
    /// Fails without producing a graph if [`Rule::verify_match`] fails.
    /// Construction relies on the dangling condition checked there: every
    /// copied target edge joins two nodes that survive into the result.
    pub fn apply(&self, target: &Graph, lhs_match: &Match) -> Result<Graph, ApplyError> {
        self.verify_match(target, lhs_match)?;

        let mut result = Graph::new();
        let mut target_to_result: Vec<Option<NodeIndex>> = vec![None; target.node_count()];
        let mut rhs_to_result: Vec<Option<NodeIndex>> = vec![None; self.rhs.node_count()];

        let matched_nodes = lhs_match.node_image();
        for (n, node) in target.nodes() {
            if !matched_nodes.contains(&n) {
                target_to_result[n.index()] = Some(result.add_node(node.clone()));
            }
        }
        for c in self.common.node_indices() {
            let t = lhs_match.node(self.common_to_lhs.node(c));
            let copy = result.add_node(target.node(t).clone());
            target_to_result[t.index()] = Some(copy);
            rhs_to_result[self.common_to_rhs.node(c).index()] = Some(copy);
        }
        for (r, node) in self.rhs.nodes() {
            if rhs_to_result[r.index()].is_none() {
                rhs_to_result[r.index()] = Some(result.add_node(node.clone()));
            }
        }

        // Deleted nodes have no image. `verify_match` rejected every surviving
        // edge attached to one.
        let from_target = |e: &Edge| {
            let node = |n: NodeIndex| {
                target_to_result[n.index()]
                    .expect("verified matches leave no surviving edge on a deleted node")
            };
            Edge {
                tail: node(e.tail),
                head: node(e.head),
                label: e.label.clone(),
            }
        };
        let matched_edges = lhs_match.edge_image();
        for (edge, e) in target.edges() {
            if !matched_edges.contains(&edge) {
                result.add_edge(from_target(e));
            }
        }
        let mut copied = FxHashSet::default();
        for edge in self.preserved_target_edges(lhs_match) {
            if copied.insert(edge) {
                result.add_edge(from_target(target.edge(edge)));
            }
        }
        for r in self.created_edges() {
            let e = self.rhs.edge(r);
            let node = |n: NodeIndex| {
                rhs_to_result[n.index()].expect("every RHS node is preserved or created above")
            };
            result.add_edge(Edge {
                tail: node(e.tail),
                head: node(e.head),
                label: e.label.clone(),
            });
        }

        debug!(
            "Rewrote graph of {} nodes and {} edges into {} nodes and {} edges",
            target.node_count(),
            target.edge_count(),
            result.node_count(),
            result.edge_count()
        );
        Ok(result)
    }
}
