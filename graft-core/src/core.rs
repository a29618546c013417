//! Definitions for the handle types used by a [`Graph`](crate::Graph).
//!
//! These types are re-exported in the root of the crate.
//!
//! A handle is the position of an element in its owning graph. Handles from
//! two different graphs are unrelated: comparing them is only meaningful
//! after translating one side through a [`GraphMapping`](crate::GraphMapping).

use derive_more::{Display, From, Into};

/// A handle to a node in a [`Graph`](crate::Graph).
#[derive(
    Clone,
    Copy,
    Debug,
    Display,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    From,
    Into,
    serde::Serialize,
    serde::Deserialize,
)]
#[display("n{_0}")]
#[serde(transparent)]
pub struct NodeIndex(usize);

/// A handle to an edge in a [`Graph`](crate::Graph).
#[derive(
    Clone,
    Copy,
    Debug,
    Display,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    From,
    Into,
    serde::Serialize,
    serde::Deserialize,
)]
#[display("e{_0}")]
#[serde(transparent)]
pub struct EdgeIndex(usize);

impl NodeIndex {
    /// Creates a handle for the node at position `index`.
    #[inline]
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the position of the node in its graph.
    #[inline(always)]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl EdgeIndex {
    /// Creates a handle for the edge at position `index`.
    #[inline]
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the position of the edge in its graph.
    #[inline(always)]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}
