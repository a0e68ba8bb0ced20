use thiserror::Error;

use crate::types::{EdgeKey, NodeId};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TaxicabError {
    #[error("No nearest edge found for coordinates ({lat}, {lng})")]
    NoNearestEdge { lat: f64, lng: f64 },
    #[error("Edge {edge} has no attribute \"{attribute}\"")]
    MissingAttribute { edge: EdgeKey, attribute: String },
    #[error("Edge {0} has zero length, its weight cannot be split")]
    DegenerateEdge(EdgeKey),
    #[error("Unknown node {0}")]
    UnknownNode(NodeId),
    #[error("Unknown edge {0}")]
    UnknownEdge(EdgeKey),
    #[error("Edge {0} already exists")]
    DuplicateEdge(EdgeKey),
    #[error("Geometry of edge {0} needs at least two points")]
    InvalidGeometry(EdgeKey),
    #[error("No edge from node {from} to node {to}")]
    NoEdgeBetween { from: NodeId, to: NodeId },
    #[error("No path from node {from} to node {to}")]
    NoPath { from: NodeId, to: NodeId },
    #[error("Partial edges of {origin} and {destination} do not touch")]
    DisjointBoundaryEdges {
        origin: EdgeKey,
        destination: EdgeKey,
    },
}
