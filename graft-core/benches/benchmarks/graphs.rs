//! Graphs shared by the benchmarks.

use graft_core::{Edge, Graph, Node, NodeIndex, Rule, RuleGraphBuilder};

/// A directed grid of `size * size` nodes, with edges pointing right and
/// down. Every fourth node is labelled `"x"`.
pub fn grid(size: usize) -> Graph {
    let mut g = Graph::new();
    for i in 0..size * size {
        let node = Node::new(format!("g{i}"));
        g.add_node(if i % 4 == 0 { node.with_label("x") } else { node });
    }
    let at = |row: usize, col: usize| NodeIndex::new(row * size + col);
    for row in 0..size {
        for col in 0..size {
            if col + 1 < size {
                g.add_edge(Edge::new(at(row, col), at(row, col + 1)));
            }
            if row + 1 < size {
                g.add_edge(Edge::new(at(row, col), at(row + 1, col)));
            }
        }
    }
    g
}

/// A directed path of `len` unlabelled nodes.
pub fn path(len: usize) -> Graph {
    let mut g = Graph::new();
    let nodes: Vec<_> = (0..len).map(|i| g.add_node(Node::new(format!("p{i}")))).collect();
    for w in nodes.windows(2) {
        g.add_edge(Edge::new(w[0], w[1]));
    }
    g
}

/// A rule closing a right-then-down corner `a -> b -> c` into a square by
/// creating `d` with `a -> d -> c`.
pub fn close_square() -> Rule {
    let mut b = RuleGraphBuilder::new();
    let a = b.preserved_node(Node::new("a"));
    let mid = b.preserved_node(Node::new("b"));
    let c = b.preserved_node(Node::new("c"));
    let d = b.created_node(Node::new("d"));
    b.preserved_edge(a, mid, "ab");
    b.preserved_edge(mid, c, "bc");
    b.rhs_edge(Edge::new(a, d));
    b.rhs_edge(Edge::new(d, c));
    Rule::from_graph(&b.finish()).unwrap()
}
