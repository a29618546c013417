//! Strategies for generating random graphs in property tests.

use std::ops::Range;

use ::proptest::collection::vec;
use ::proptest::prelude::*;

use crate::core::NodeIndex;
use crate::graph::{Edge, Graph, Node};

/// A node label drawn from a small alphabet, so that labelled nodes collide.
fn any_node_label() -> impl Strategy<Value = Option<&'static str>> {
    prop_oneof![Just(None), Just(Some("a")), Just(Some("b"))]
}

/// A graph with a node count in `nodes` and at most `max_edges` unlabelled
/// edges, possibly parallel or self-looping.
pub fn any_graph(nodes: Range<usize>, max_edges: usize) -> impl Strategy<Value = Graph> {
    vec(any_node_label(), nodes).prop_flat_map(move |labels| {
        let n = labels.len();
        let edges = if n == 0 {
            vec((Just(0), Just(0)), 0..1).boxed()
        } else {
            vec((0..n, 0..n), 0..=max_edges).boxed()
        };
        (Just(labels), edges).prop_map(|(labels, edges)| {
            let mut g = Graph::new();
            for (i, label) in labels.into_iter().enumerate() {
                let node = Node::new(format!("n{i}"));
                g.add_node(match label {
                    Some(l) => node.with_label(l),
                    None => node,
                });
            }
            for (tail, head) in edges {
                g.add_edge(Edge::new(NodeIndex::new(tail), NodeIndex::new(head)));
            }
            g
        })
    })
}
