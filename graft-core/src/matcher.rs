//! Enumeration of the occurrences of a pattern graph in a target graph.
//!
//! The search assigns target nodes to pattern nodes in increasing pattern
//! order, depth first, trying target candidates in increasing order. A
//! candidate is accepted when its label agrees with the pattern node's label
//! (an unlabelled pattern node accepts any target node) and every pattern
//! edge between the new node and the already placed ones exists in the
//! target with the same direction. Extra target edges between matched nodes
//! are allowed. Edge labels are not compared.
//!
//! Only edge existence is enforced, so two pattern nodes may share a target
//! node, e.g. when a target self-loop realises a pattern edge. Use
//! [`Matcher::injective`] to require distinct images.
//!
//! Every complete assignment is reported, with each pattern edge mapped to
//! all the parallel target edges that realise it.

use std::ops::Range;

use fxhash::FxHashMap;
use tracing::{debug, trace};

use crate::core::{EdgeIndex, NodeIndex};
use crate::graph::Graph;
use crate::mapping::{GraphMapping, Match};

/// Finds every match of `pattern` in `target`, in depth-first order.
///
/// # Panics
///
/// If `pattern` has no nodes.
pub fn find_matches(pattern: &Graph, target: &Graph) -> Vec<Match> {
    Matcher::new(pattern, target).find_all()
}

/// A configurable search for the matches of a pattern in a target.
///
/// The search itself is performed lazily by the [`Matches`] iterator, so
/// callers can stop after any number of results.
///
/// ```
/// use graft_core::{Edge, Graph, Matcher, Node};
///
/// let mut pattern = Graph::new();
/// let p = pattern.add_node(Node::new("p"));
/// let q = pattern.add_node(Node::new("q"));
/// pattern.add_edge(Edge::new(p, q));
///
/// let mut target = Graph::new();
/// let a = target.add_node(Node::new("a"));
/// let b = target.add_node(Node::new("b"));
/// target.add_edge(Edge::new(a, b));
/// target.add_edge(Edge::new(b, a));
///
/// let first = Matcher::new(&pattern, &target).iter().next().unwrap();
/// assert_eq!(first.node_mapping, [a, b]);
/// ```
#[derive(Clone, Debug)]
pub struct Matcher<'g> {
    pattern: &'g Graph,
    target: &'g Graph,
    injective: bool,
    roots: Range<usize>,
}

impl<'g> Matcher<'g> {
    /// Creates a search for `pattern` in `target`.
    ///
    /// By default pattern nodes may share target nodes and every target node
    /// is a candidate for the first pattern node.
    ///
    /// # Panics
    ///
    /// If `pattern` has no nodes.
    pub fn new(pattern: &'g Graph, target: &'g Graph) -> Self {
        assert!(
            pattern.node_count() >= 1,
            "Cannot search for a pattern without nodes."
        );
        Self {
            pattern,
            target,
            injective: false,
            roots: 0..target.node_count(),
        }
    }

    /// Whether distinct pattern nodes must map to distinct target nodes.
    ///
    /// Off by default. Rules can only be applied at injective matches, see
    /// [`Rule::verify_match`](crate::Rule::verify_match).
    pub fn injective(mut self, injective: bool) -> Self {
        self.injective = injective;
        self
    }

    /// Restricts the candidates for the first pattern node.
    ///
    /// Searches over disjoint candidate ranges are independent, so the
    /// search can be split across threads. Concatenating the results for
    /// consecutive ranges gives the results of the full search, in order.
    pub fn root_candidates(mut self, roots: Range<NodeIndex>) -> Self {
        let end = roots.end.index().min(self.target.node_count());
        self.roots = roots.start.index()..end;
        self
    }

    /// Returns a lazy iterator over the matches.
    pub fn iter(&self) -> Matches<'g> {
        Matches::new(self.clone())
    }

    /// Collects every match.
    pub fn find_all(&self) -> Vec<Match> {
        let matches: Vec<_> = self.iter().collect();
        debug!(
            "Found {} matches of a {}-node pattern in a {}-node graph",
            matches.len(),
            self.pattern.node_count(),
            self.target.node_count()
        );
        matches
    }
}

impl<'g> IntoIterator for Matcher<'g> {
    type Item = Match;
    type IntoIter = Matches<'g>;

    fn into_iter(self) -> Self::IntoIter {
        Matches::new(self)
    }
}

/// A pattern edge, given by the positions of its endpoints.
#[derive(Clone, Copy, Debug)]
struct PatternEdge {
    tail: usize,
    head: usize,
}

/// A partial assignment and the next candidate for the following position.
#[derive(Clone, Debug)]
struct Frame {
    assigned: Vec<NodeIndex>,
    cursor: usize,
}

/// Iterator over the matches of a [`Matcher`], in depth-first order.
#[derive(Clone, Debug)]
pub struct Matches<'g> {
    pattern: &'g Graph,
    target: &'g Graph,
    injective: bool,
    root_end: usize,
    /// Pattern edges to check when each position is assigned, i.e. those
    /// whose later endpoint is that position.
    checks: Vec<Vec<PatternEdge>>,
    /// Target edges grouped by `(tail, head)`, in increasing order.
    adjacency: FxHashMap<(NodeIndex, NodeIndex), Vec<EdgeIndex>>,
    stack: Vec<Frame>,
}

impl<'g> Matches<'g> {
    fn new(matcher: Matcher<'g>) -> Self {
        let Matcher {
            pattern,
            target,
            injective,
            roots,
        } = matcher;

        let mut checks = vec![Vec::new(); pattern.node_count()];
        for (_, e) in pattern.edges() {
            let (tail, head) = (e.tail.index(), e.head.index());
            checks[tail.max(head)].push(PatternEdge { tail, head });
        }
        let mut adjacency: FxHashMap<_, Vec<_>> = FxHashMap::default();
        for (edge, e) in target.edges() {
            adjacency.entry((e.tail, e.head)).or_default().push(edge);
        }

        Self {
            pattern,
            target,
            injective,
            root_end: roots.end,
            checks,
            adjacency,
            stack: vec![Frame {
                assigned: Vec::with_capacity(pattern.node_count()),
                cursor: roots.start,
            }],
        }
    }

    fn candidate_end(&self, position: usize) -> usize {
        if position == 0 {
            self.root_end
        } else {
            self.target.node_count()
        }
    }

    /// Whether `candidate` can be assigned to the position after `assigned`.
    fn accepts(&self, assigned: &[NodeIndex], candidate: NodeIndex) -> bool {
        let position = assigned.len();
        if let Some(label) = self.pattern.node(NodeIndex::new(position)).label() {
            if self.target.node(candidate).label() != Some(label) {
                return false;
            }
        }
        if self.injective && assigned.contains(&candidate) {
            return false;
        }
        let image = |p: usize| {
            if p == position {
                candidate
            } else {
                assigned[p]
            }
        };
        self.checks[position]
            .iter()
            .all(|e| self.adjacency.contains_key(&(image(e.tail), image(e.head))))
    }

    /// Moves the top frame on to its next candidate.
    fn advance(&mut self) {
        if let Some(frame) = self.stack.last_mut() {
            frame.cursor += 1;
        }
    }

    fn complete(&self, node_mapping: Vec<NodeIndex>) -> Match {
        let edge_mapping = self
            .pattern
            .edges()
            .map(|(_, e)| {
                let key = (node_mapping[e.tail.index()], node_mapping[e.head.index()]);
                self.adjacency.get(&key).cloned().unwrap_or_default()
            })
            .collect();
        GraphMapping::new(node_mapping, edge_mapping)
    }
}

impl Iterator for Matches<'_> {
    type Item = Match;

    fn next(&mut self) -> Option<Match> {
        loop {
            let frame = self.stack.last()?;
            let position = frame.assigned.len();
            if frame.cursor >= self.candidate_end(position) {
                // Exhausted: backtrack.
                self.stack.pop();
                self.advance();
                continue;
            }
            let candidate = NodeIndex::new(frame.cursor);
            if !self.accepts(&frame.assigned, candidate) {
                self.advance();
                continue;
            }

            let mut assigned = frame.assigned.clone();
            assigned.push(candidate);
            if assigned.len() < self.pattern.node_count() {
                self.stack.push(Frame {
                    assigned,
                    cursor: 0,
                });
            } else {
                self.advance();
                trace!("Found match {:?}", assigned);
                return Some(self.complete(assigned));
            }
        }
    }
}
