//! Rewrite rules and their derivation from annotated graphs.
//!
//! A rule is authored as a single graph with two subgraphs, named
//! [`LHS_SUBGRAPH`] and [`RHS_SUBGRAPH`]. Elements only in the LHS are
//! deleted by the rule, elements only in the RHS are created, and nodes in
//! both are preserved. Edges cannot be shared between the two sides: an edge
//! is preserved by giving one LHS edge and one RHS edge the same label.

mod apply;
mod builder;

use derive_more::Display;
use fxhash::FxHashSet;
use indexmap::IndexMap;
use indexmap::map::Entry;
use smol_str::SmolStr;
use thiserror::Error;
use tracing::debug;

use crate::core::{EdgeIndex, NodeIndex};
use crate::graph::{Edge, Graph, GraphError, Subgraph};
use crate::mapping::GraphMapping;
use crate::matcher::Matcher;

pub use apply::{ApplyError, apply_rule};
pub use builder::RuleGraphBuilder;

/// Name of the subgraph holding the left-hand side of a rule.
pub const LHS_SUBGRAPH: &str = "L";
/// Name of the subgraph holding the right-hand side of a rule.
pub const RHS_SUBGRAPH: &str = "R";

/// A side of a rule.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Side {
    /// The left-hand side, the pattern to be replaced.
    #[display("LHS")]
    Lhs,
    /// The right-hand side, the replacement.
    #[display("RHS")]
    Rhs,
}

/// A double-pushout rewrite rule.
///
/// `common` is the interface shared by both sides. Its nodes are copies of
/// the preserved nodes. Its edges are symbolic: each one states that the LHS
/// edge it maps to persists as the RHS edge it maps to, and its own
/// endpoints are placeholders. The concrete endpoints are taken from the
/// target graph when the rule is applied.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rule {
    /// The pattern to be replaced.
    pub lhs: Graph,
    /// The replacement.
    pub rhs: Graph,
    /// The interface shared by `lhs` and `rhs`.
    pub common: Graph,
    /// Embedding of the interface into `lhs`.
    pub common_to_lhs: GraphMapping,
    /// Embedding of the interface into `rhs`.
    pub common_to_rhs: GraphMapping,
}

/// Where the elements of a derived [`Rule`] came from in the annotated graph.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleOrigin {
    /// Translation from the rule's LHS into the annotated graph.
    pub lhs_to_graph: GraphMapping,
    /// Translation from the rule's RHS into the annotated graph.
    pub rhs_to_graph: GraphMapping,
}

/// Errors in the structure of an annotated rule graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum RuleError {
    /// One of the "L" and "R" subgraphs is missing.
    #[error("Graph must contain subgraphs named \"L\" and \"R\", \"{name}\" is missing.")]
    MissingSubgraph {
        /// Name of the missing subgraph.
        name: SmolStr,
    },
    /// A node belongs to neither side.
    #[error("Node {node} (\"{name}\") is in neither the LHS nor the RHS.")]
    DanglingNode {
        /// The offending node.
        node: NodeIndex,
        /// Its name.
        name: SmolStr,
    },
    /// An edge belongs to neither side.
    #[error("Edge {edge} is in neither the LHS nor the RHS.")]
    DanglingEdge {
        /// The offending edge.
        edge: EdgeIndex,
    },
    /// An edge belongs to both sides.
    #[error(
        "Edge {edge} is in both the \"L\" and \"R\" subgraphs, use separate edges with the same label instead."
    )]
    AmbiguousEdge {
        /// The offending edge.
        edge: EdgeIndex,
    },
    /// An edge belongs to a side that does not contain one of its endpoints.
    #[error("Edge {edge} is in the {side} but one of its endpoints is not.")]
    EndpointOutsideSide {
        /// The offending edge.
        edge: EdgeIndex,
        /// The side the edge belongs to.
        side: Side,
    },
    /// A non-empty edge label is used twice on one side.
    #[error("Edge label \"{label}\" is used more than once in the {side}.")]
    DuplicateLabel {
        /// The repeated label.
        label: SmolStr,
        /// The side on which it is repeated.
        side: Side,
    },
    /// The annotated graph refers to elements it does not contain.
    #[error(transparent)]
    InvalidGraph(#[from] GraphError),
}

/// Derives a [`Rule`] from an annotated graph. See [`Rule::from_graph`].
pub fn derive_rule(graph: &Graph) -> Result<Rule, RuleError> {
    Rule::from_graph(graph)
}

/// One side of a rule under construction.
struct SideBuilder<'a> {
    side: Side,
    subgraph: &'a Subgraph,
    graph: Graph,
    /// Position of each annotated-graph node on this side.
    from_graph: Vec<Option<NodeIndex>>,
    to_graph: GraphMapping,
    labels: IndexMap<SmolStr, EdgeIndex>,
}

impl<'a> SideBuilder<'a> {
    fn new(side: Side, source: &'a Graph) -> Result<Self, RuleError> {
        let name = match side {
            Side::Lhs => LHS_SUBGRAPH,
            Side::Rhs => RHS_SUBGRAPH,
        };
        let subgraph = source
            .subgraph(name)
            .ok_or_else(|| RuleError::MissingSubgraph { name: name.into() })?;
        Ok(Self {
            side,
            subgraph,
            graph: Graph::new(),
            from_graph: vec![None; source.node_count()],
            to_graph: GraphMapping::default(),
            labels: IndexMap::new(),
        })
    }

    fn add_node(&mut self, node: NodeIndex, source: &Graph) -> NodeIndex {
        let copy = self.graph.add_node(source.node(node).clone());
        self.from_graph[node.index()] = Some(copy);
        self.to_graph.node_mapping.push(node);
        copy
    }

    /// Copies an edge, translating its endpoints, and records its label.
    fn add_edge(&mut self, edge: EdgeIndex, source: &Graph) -> Result<EdgeIndex, RuleError> {
        let e = source.edge(edge);
        let endpoint = |n: NodeIndex| {
            self.from_graph[n.index()].ok_or(RuleError::EndpointOutsideSide {
                edge,
                side: self.side,
            })
        };
        let copy = Edge {
            tail: endpoint(e.tail)?,
            head: endpoint(e.head)?,
            label: e.label.clone(),
        };
        let copy = self.graph.add_edge(copy);
        self.to_graph.edge_mapping.push(vec![edge]);
        if let Some(label) = e.label() {
            match self.labels.entry(label.into()) {
                Entry::Occupied(_) => {
                    return Err(RuleError::DuplicateLabel {
                        label: label.into(),
                        side: self.side,
                    });
                }
                Entry::Vacant(entry) => {
                    entry.insert(copy);
                }
            }
        }
        Ok(copy)
    }
}

impl Rule {
    /// Derives a rule from a graph annotated with "L" and "R" subgraphs.
    ///
    /// Nodes in only one subgraph are deleted or created, nodes in both are
    /// copied into the interface. Each edge must belong to exactly one
    /// subgraph. For every label carried by exactly one LHS edge and one RHS
    /// edge, an interface edge is synthesised, in increasing LHS edge order.
    pub fn from_graph(graph: &Graph) -> Result<Self, RuleError> {
        Self::from_graph_traced(graph).map(|(rule, _)| rule)
    }

    /// Like [`Rule::from_graph`], also returning the translations of both
    /// sides back into the annotated graph.
    pub fn from_graph_traced(graph: &Graph) -> Result<(Self, RuleOrigin), RuleError> {
        graph.validate()?;
        let mut lhs = SideBuilder::new(Side::Lhs, graph)?;
        let mut rhs = SideBuilder::new(Side::Rhs, graph)?;
        let mut common = Graph::new();
        let mut common_to_lhs = GraphMapping::default();
        let mut common_to_rhs = GraphMapping::default();

        for (n, node) in graph.nodes() {
            let in_lhs = lhs.subgraph.contains_node(n);
            let in_rhs = rhs.subgraph.contains_node(n);
            match (in_lhs, in_rhs) {
                (false, false) => {
                    return Err(RuleError::DanglingNode {
                        node: n,
                        name: node.name.clone(),
                    });
                }
                (true, false) => {
                    lhs.add_node(n, graph);
                }
                (false, true) => {
                    rhs.add_node(n, graph);
                }
                (true, true) => {
                    common_to_lhs.node_mapping.push(lhs.add_node(n, graph));
                    common_to_rhs.node_mapping.push(rhs.add_node(n, graph));
                    common.add_node(node.clone());
                }
            }
        }

        for edge in graph.edge_indices() {
            let in_lhs = lhs.subgraph.contains_edge(edge);
            let in_rhs = rhs.subgraph.contains_edge(edge);
            match (in_lhs, in_rhs) {
                (false, false) => return Err(RuleError::DanglingEdge { edge }),
                (true, true) => return Err(RuleError::AmbiguousEdge { edge }),
                (true, false) => lhs.add_edge(edge, graph)?,
                (false, true) => rhs.add_edge(edge, graph)?,
            };
        }

        for (label, &lhs_edge) in &lhs.labels {
            if let Some(&rhs_edge) = rhs.labels.get(label) {
                common.add_symbolic_edge(label.clone());
                common_to_lhs.edge_mapping.push(vec![lhs_edge]);
                common_to_rhs.edge_mapping.push(vec![rhs_edge]);
            }
        }

        let rule = Rule {
            lhs: lhs.graph,
            rhs: rhs.graph,
            common,
            common_to_lhs,
            common_to_rhs,
        };
        debug!(
            "Derived rule with {} LHS nodes, {} RHS nodes, {} interface nodes and {} interface edges",
            rule.lhs.node_count(),
            rule.rhs.node_count(),
            rule.common.node_count(),
            rule.common.edge_count()
        );
        let origin = RuleOrigin {
            lhs_to_graph: lhs.to_graph,
            rhs_to_graph: rhs.to_graph,
        };
        Ok((rule, origin))
    }

    /// LHS nodes removed by the rule.
    pub fn deleted_nodes(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        let kept: FxHashSet<_> = self.common_to_lhs.node_mapping.iter().copied().collect();
        self.lhs.node_indices().filter(move |n| !kept.contains(n))
    }

    /// RHS nodes added by the rule.
    pub fn created_nodes(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        let kept: FxHashSet<_> = self.common_to_rhs.node_mapping.iter().copied().collect();
        self.rhs.node_indices().filter(move |n| !kept.contains(n))
    }

    /// LHS edges removed by the rule.
    pub fn deleted_edges(&self) -> impl Iterator<Item = EdgeIndex> + '_ {
        let kept = self.common_to_lhs.edge_image();
        self.lhs.edge_indices().filter(move |e| !kept.contains(e))
    }

    /// RHS edges added by the rule.
    pub fn created_edges(&self) -> impl Iterator<Item = EdgeIndex> + '_ {
        let kept = self.common_to_rhs.edge_image();
        self.rhs.edge_indices().filter(move |e| !kept.contains(e))
    }

    /// A [`Matcher`] for the occurrences of this rule's LHS in `target`.
    ///
    /// Like any [`Matcher`] it allows LHS nodes to share a target node
    /// unless [`Matcher::injective`] is set. Such matches are rejected by
    /// [`Rule::apply`].
    pub fn matcher<'g>(&'g self, target: &'g Graph) -> Matcher<'g> {
        Matcher::new(&self.lhs, target)
    }
}

#[cfg(test)]
pub(crate) mod test {
    use cool_asserts::assert_matches;
    use itertools::Itertools;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::graph::Node;

    /// The rule `A -> B  =>  B -> C`, preserving `B`.
    #[fixture]
    pub(crate) fn chain_rule_graph() -> Graph {
        let mut b = RuleGraphBuilder::new();
        let a = b.deleted_node(Node::new("A"));
        let bb = b.preserved_node(Node::new("B"));
        let c = b.created_node(Node::new("C"));
        b.lhs_edge(Edge::new(a, bb));
        b.rhs_edge(Edge::new(bb, c));
        b.finish()
    }

    fn annotated(
        nodes: &[&str],
        edges: &[(usize, usize, &str)],
        lhs: (&[usize], &[usize]),
        rhs: (&[usize], &[usize]),
    ) -> Graph {
        let mut g = Graph::new();
        for name in nodes {
            g.add_node(Node::new(*name));
        }
        for &(t, h, label) in edges {
            g.add_edge(Edge::new(NodeIndex::new(t), NodeIndex::new(h)).with_label(label));
        }
        for (name, (ns, es)) in [(LHS_SUBGRAPH, lhs), (RHS_SUBGRAPH, rhs)] {
            let mut s = Subgraph::new(name);
            s.nodes = ns.iter().copied().map(NodeIndex::new).collect();
            s.edges = es.iter().copied().map(EdgeIndex::new).collect();
            g.add_subgraph(s);
        }
        g
    }

    #[rstest]
    fn derive_chain_rule(chain_rule_graph: Graph) {
        let rule = derive_rule(&chain_rule_graph).unwrap();
        let names = |g: &Graph| g.nodes().map(|(_, n)| n.name.to_string()).collect_vec();

        assert_eq!(names(&rule.lhs), ["A", "B"]);
        assert_eq!(names(&rule.rhs), ["B", "C"]);
        assert_eq!(names(&rule.common), ["B"]);
        assert_eq!(rule.common_to_lhs.node_mapping, [NodeIndex::new(1)]);
        assert_eq!(rule.common_to_rhs.node_mapping, [NodeIndex::new(0)]);

        // Edge endpoints are local to each side.
        assert!(rule.lhs.edge(EdgeIndex::new(0)).connects(NodeIndex::new(0), NodeIndex::new(1)));
        assert!(rule.rhs.edge(EdgeIndex::new(0)).connects(NodeIndex::new(0), NodeIndex::new(1)));
        assert_eq!(rule.common.edge_count(), 0);

        assert_eq!(rule.deleted_nodes().collect_vec(), [NodeIndex::new(0)]);
        assert_eq!(rule.created_nodes().collect_vec(), [NodeIndex::new(1)]);
        assert_eq!(rule.deleted_edges().count(), 1);
        assert_eq!(rule.created_edges().count(), 1);
    }

    #[test]
    fn interface_edges_pair_labels() {
        // Nodes x, y preserved. LHS edges: x->y "p", y->x "q", x->x "only_l".
        // RHS edges: y->x "q", x->y "p", y->y (unlabelled).
        let g = annotated(
            &["x", "y"],
            &[
                (0, 1, "p"),
                (1, 0, "q"),
                (0, 0, "only_l"),
                (1, 0, "q"),
                (0, 1, "p"),
                (1, 1, ""),
            ],
            (&[0, 1], &[0, 1, 2]),
            (&[0, 1], &[3, 4, 5]),
        );
        let rule = derive_rule(&g).unwrap();

        assert_eq!(rule.common.edge_count(), 2);
        let labels = rule.common.edges().map(|(_, e)| e.label()).collect_vec();
        assert_eq!(labels, [Some("p"), Some("q")]);
        // Ordered by LHS edge, paired with the RHS edge of the same label.
        assert_eq!(rule.common_to_lhs.edge_mapping, [[EdgeIndex::new(0)], [EdgeIndex::new(1)]]);
        assert_eq!(rule.common_to_rhs.edge_mapping, [[EdgeIndex::new(1)], [EdgeIndex::new(0)]]);

        assert_eq!(rule.deleted_edges().collect_vec(), [EdgeIndex::new(2)]);
        assert_eq!(rule.created_edges().collect_vec(), [EdgeIndex::new(2)]);
    }

    #[rstest]
    fn interface_sizes_agree(chain_rule_graph: Graph) {
        for g in [
            chain_rule_graph,
            annotated(
                &["x", "y", "z"],
                &[(0, 1, "e"), (1, 2, "e"), (0, 1, "")],
                (&[0, 1], &[0, 2]),
                (&[1, 2], &[1]),
            ),
        ] {
            let rule = derive_rule(&g).unwrap();
            assert_eq!(rule.common.node_count(), rule.common_to_lhs.node_mapping.len());
            assert_eq!(rule.common.node_count(), rule.common_to_rhs.node_mapping.len());
            assert_eq!(rule.common.edge_count(), rule.common_to_lhs.edge_mapping.len());
            assert_eq!(rule.common.edge_count(), rule.common_to_rhs.edge_mapping.len());
        }
    }

    #[test]
    fn decomposition_closure() {
        let g = annotated(
            &["a", "b", "c", "d"],
            &[(0, 1, "e"), (1, 2, "e"), (2, 3, ""), (0, 0, "")],
            (&[0, 1, 3], &[0, 3]),
            (&[1, 2, 3], &[1, 2]),
        );
        let (rule, origin) = Rule::from_graph_traced(&g).unwrap();

        for (side, to_graph, name) in [
            (&rule.lhs, &origin.lhs_to_graph, LHS_SUBGRAPH),
            (&rule.rhs, &origin.rhs_to_graph, RHS_SUBGRAPH),
        ] {
            let tagged = g.subgraph(name).unwrap();
            assert_eq!(to_graph.validate(side, &g), Ok(()));
            assert!(to_graph.is_injective());
            let nodes: std::collections::BTreeSet<_> =
                to_graph.node_mapping.iter().copied().collect();
            assert_eq!(nodes, tagged.nodes);
            assert!(to_graph.edge_mapping.iter().all(|es| es.len() == 1));
            let edges: std::collections::BTreeSet<_> =
                to_graph.edge_mapping.iter().flatten().copied().collect();
            assert_eq!(edges, tagged.edges);
        }
    }

    #[rstest]
    #[case::lhs(&[0, 1], &[], Side::Lhs)]
    #[case::rhs(&[], &[0, 1], Side::Rhs)]
    fn duplicate_label(
        #[case] lhs_edges: &[usize],
        #[case] rhs_edges: &[usize],
        #[case] expected_side: Side,
    ) {
        let g = annotated(
            &["a", "b"],
            &[(0, 1, "e"), (1, 0, "e")],
            (&[0, 1], lhs_edges),
            (&[0, 1], rhs_edges),
        );
        assert_matches!(
            derive_rule(&g),
            Err(RuleError::DuplicateLabel { label, side }) => {
                assert_eq!(label, "e");
                assert_eq!(side, expected_side);
            }
        );
    }

    #[test]
    fn same_label_on_both_sides_is_not_a_duplicate() {
        let g = annotated(
            &["a", "b"],
            &[(0, 1, "e"), (0, 1, "e")],
            (&[0, 1], &[0]),
            (&[0, 1], &[1]),
        );
        assert_eq!(derive_rule(&g).unwrap().common.edge_count(), 1);
    }

    #[rstest]
    #[case::no_lhs(LHS_SUBGRAPH)]
    #[case::no_rhs(RHS_SUBGRAPH)]
    fn missing_subgraph(#[case] missing: &str) {
        let mut g = Graph::new();
        g.add_node(Node::new("a"));
        for name in [LHS_SUBGRAPH, RHS_SUBGRAPH] {
            if name != missing {
                g.add_subgraph(Subgraph::new(name));
            }
        }
        assert_matches!(
            derive_rule(&g),
            Err(RuleError::MissingSubgraph { name }) => assert_eq!(name, missing)
        );
    }

    #[test]
    fn subgraph_names_match_exactly() {
        let mut g = Graph::new();
        g.add_subgraph(Subgraph::new("l"));
        g.add_subgraph(Subgraph::new("R"));
        assert_matches!(derive_rule(&g), Err(RuleError::MissingSubgraph { .. }));
    }

    #[test]
    fn dangling_node() {
        let g = annotated(&["a", "lost"], &[], (&[0], &[]), (&[0], &[]));
        assert_matches!(
            derive_rule(&g),
            Err(RuleError::DanglingNode { node, name }) => {
                assert_eq!(node, NodeIndex::new(1));
                assert_eq!(name, "lost");
            }
        );
    }

    #[test]
    fn dangling_edge() {
        let g = annotated(&["a"], &[(0, 0, "")], (&[0], &[]), (&[0], &[]));
        assert_matches!(derive_rule(&g), Err(RuleError::DanglingEdge { .. }));
    }

    #[test]
    fn ambiguous_edge() {
        let g = annotated(&["a"], &[(0, 0, "")], (&[0], &[0]), (&[0], &[0]));
        assert_matches!(derive_rule(&g), Err(RuleError::AmbiguousEdge { .. }));
    }

    #[test]
    fn endpoint_outside_side() {
        let g = annotated(&["a", "b"], &[(0, 1, "")], (&[0], &[0]), (&[1], &[]));
        assert_matches!(
            derive_rule(&g),
            Err(RuleError::EndpointOutsideSide {
                side: Side::Lhs,
                ..
            })
        );
    }

    #[test]
    fn invalid_graph() {
        let g: Graph = serde_json::from_str(
            r#"{"nodes": [], "edges": [], "subgraphs": [{"name": "L", "nodes": [2]}]}"#,
        )
        .unwrap();
        assert_matches!(derive_rule(&g), Err(RuleError::InvalidGraph(_)));
    }

    #[rstest]
    fn rule_serializes(chain_rule_graph: Graph) {
        let rule = derive_rule(&chain_rule_graph).unwrap();
        let json = serde_json::to_string(&rule).unwrap();
        let back: Rule = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rule);
    }
}
