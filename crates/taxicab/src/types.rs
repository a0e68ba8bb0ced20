use std::fmt;

use serde::{Deserialize, Serialize};

use crate::edge_direction::EdgeDirection;

pub type NodeId = usize;

/// Dense index of an edge inside a graph.
pub type EdgeId = usize;

/// Identifies one directed edge instance of a multigraph: `(source, target, key)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeKey {
    pub source: NodeId,
    pub target: NodeId,
    pub key: usize,
}

impl EdgeKey {
    pub fn new(source: NodeId, target: NodeId, key: usize) -> Self {
        EdgeKey {
            source,
            target,
            key,
        }
    }

    /// The same road segment traversed in the opposite direction.
    pub fn reversed(&self) -> Self {
        EdgeKey::new(self.target, self.source, self.key)
    }

    /// Canonical key shared by `(u, v, k)` and `(v, u, k)`, together with the
    /// direction of `self` relative to it.
    pub fn undirected(&self) -> (UndirectedEdgeKey, EdgeDirection) {
        if self.source <= self.target {
            (
                UndirectedEdgeKey {
                    low: self.source,
                    high: self.target,
                    key: self.key,
                },
                EdgeDirection::Forward,
            )
        } else {
            (
                UndirectedEdgeKey {
                    low: self.target,
                    high: self.source,
                    key: self.key,
                },
                EdgeDirection::Backward,
            )
        }
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.source, self.target, self.key)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UndirectedEdgeKey {
    low: NodeId,
    high: NodeId,
    key: usize,
}
