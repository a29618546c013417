//! Graph rewriting with double-pushout rules.
//!
//! A [`Rule`] is derived from a single annotated [`Graph`] whose "L" and "R"
//! subgraphs describe its left- and right-hand sides. The occurrences of the
//! left-hand side in a target graph are enumerated by a [`Matcher`], and a
//! chosen [`Match`] is rewritten with [`Rule::apply`].
//!
//! ```
//! use graft_core::{Edge, Node, Rule, RuleGraphBuilder};
//! use graft_core::Graph;
//!
//! // Replace the edge `A -> B` by `B -> C`, deleting `A` and creating `C`.
//! let mut builder = RuleGraphBuilder::new();
//! let a = builder.deleted_node(Node::new("A"));
//! let b = builder.preserved_node(Node::new("B"));
//! let c = builder.created_node(Node::new("C"));
//! builder.lhs_edge(Edge::new(a, b));
//! builder.rhs_edge(Edge::new(b, c));
//! let rule = Rule::from_graph(&builder.finish()).unwrap();
//!
//! let mut target = Graph::new();
//! let x = target.add_node(Node::new("x"));
//! let y = target.add_node(Node::new("y"));
//! target.add_edge(Edge::new(x, y));
//!
//! let lhs_match = rule.matcher(&target).iter().next().unwrap();
//! let result = rule.apply(&target, &lhs_match).unwrap();
//! assert_eq!(result.node_count(), 2);
//! assert_eq!(result.node(result.edge(0.into()).head).name, "C");
//! ```

pub mod core;
pub mod graph;
pub mod mapping;
pub mod matcher;
pub mod rule;

pub use crate::core::{EdgeIndex, NodeIndex};
pub use crate::graph::{Edge, Graph, GraphError, Node, Subgraph};
pub use crate::mapping::{GraphMapping, MappingError, Match};
pub use crate::matcher::{Matcher, Matches, find_matches};
pub use crate::rule::{
    ApplyError, LHS_SUBGRAPH, RHS_SUBGRAPH, Rule, RuleError, RuleGraphBuilder, RuleOrigin, Side,
    apply_rule, derive_rule,
};

#[cfg(test)]
pub(crate) mod proptest;
