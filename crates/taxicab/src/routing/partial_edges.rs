use geo::LineString;
use tracing::debug;

use crate::{
    error::TaxicabError,
    geometry::{curves_intersect, great_circle_length, project, substring},
    geopoint::GeoPoint,
    graph::Graph,
    types::{EdgeKey, NodeId},
};

use super::route_length::BoundaryEdges;

/// The two pieces of a boundary edge on either side of a projected coordinate.
#[derive(Debug, Clone)]
pub(crate) struct EdgeClips {
    /// From the start of the edge to the projection.
    pub head: LineString<f64>,
    /// From the projection to the end of the edge.
    pub tail: LineString<f64>,
}

impl EdgeClips {
    pub fn new(geometry: &LineString<f64>, point: &GeoPoint) -> Self {
        let position = project(geometry, point);

        EdgeClips {
            head: substring(geometry, 0.0, position),
            tail: substring(geometry, position, 1.0),
        }
    }

    /// The clip that connects to `curve`. The head wins when only it touches,
    /// the shorter clip when both do, and the tail otherwise.
    fn select(&self, curve: &LineString<f64>) -> &LineString<f64> {
        match (
            curves_intersect(curve, &self.head),
            curves_intersect(curve, &self.tail),
        ) {
            (true, true) => {
                let head = great_circle_length(&self.head).unwrap_or(0.0);
                let tail = great_circle_length(&self.tail).unwrap_or(0.0);
                if tail < head { &self.tail } else { &self.head }
            }
            (true, false) => &self.head,
            _ => &self.tail,
        }
    }
}

/// How a route runs between its two boundary edges.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RouteTopology {
    /// Origin and destination lie on the same edge.
    SameEdge { segment: LineString<f64> },
    /// The boundary edges touch, no full edge is traversed.
    Adjacent {
        origin: LineString<f64>,
        destination: LineString<f64>,
    },
    /// Full edges are traversed between the boundary edges.
    Connected {
        nodes: Vec<NodeId>,
        origin: LineString<f64>,
        destination: LineString<f64>,
    },
}

/// A resolved route, with partial edges too short to measure removed.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RouteParts {
    pub nodes: Vec<NodeId>,
    pub origin: Option<LineString<f64>>,
    pub destination: Option<LineString<f64>>,
}

impl RouteTopology {
    pub fn into_parts(self) -> RouteParts {
        let (nodes, origin, destination) = match self {
            RouteTopology::SameEdge { segment } => (vec![], Some(segment), None),
            RouteTopology::Adjacent {
                origin,
                destination,
            } => (vec![], Some(origin), Some(destination)),
            RouteTopology::Connected {
                nodes,
                origin,
                destination,
            } => (nodes, Some(origin), Some(destination)),
        };

        RouteParts {
            nodes,
            origin: origin.filter(is_measurable),
            destination: destination.filter(is_measurable),
        }
    }
}

fn is_measurable(curve: &LineString<f64>) -> bool {
    curve.0.len() > 1
}

/// Both coordinates project onto `geometry`: the route is the stretch between them.
pub(crate) fn resolve_same_edge(
    geometry: &LineString<f64>,
    origin: &GeoPoint,
    destination: &GeoPoint,
) -> RouteTopology {
    let segment = substring(
        geometry,
        project(geometry, origin),
        project(geometry, destination),
    );

    debug!("Routing along a single edge");

    RouteTopology::SameEdge { segment }
}

/// Pairs the clips of two boundary edges that touch each other.
///
/// Pairings are tried as (tail, tail), (tail, head), (head, tail) and
/// (head, head), and the last one that intersects is kept.
pub(crate) fn resolve_adjacent(
    origin: EdgeClips,
    destination: EdgeClips,
    boundary: &BoundaryEdges,
) -> Result<RouteTopology, TaxicabError> {
    let pairings = [
        (&origin.tail, &destination.tail),
        (&origin.tail, &destination.head),
        (&origin.head, &destination.tail),
        (&origin.head, &destination.head),
    ];

    let (origin, destination) = pairings
        .into_iter()
        .rev()
        .find(|(origin, destination)| curves_intersect(origin, destination))
        .ok_or(TaxicabError::DisjointBoundaryEdges {
            origin: boundary.origin,
            destination: boundary.destination,
        })?;

    debug!("Boundary edges {} and {} touch", boundary.origin, boundary.destination);

    Ok(RouteTopology::Adjacent {
        origin: origin.clone(),
        destination: destination.clone(),
    })
}

/// Trims the ends of `nodes` that run along a boundary edge and picks the
/// clips that connect to the remaining path.
///
/// `nodes` holds at least three nodes.
pub(crate) fn resolve_connected(
    graph: &impl Graph,
    mut nodes: Vec<NodeId>,
    origin: EdgeClips,
    destination: EdgeClips,
    boundary: &BoundaryEdges,
) -> Result<RouteTopology, TaxicabError> {
    let first_edge = graph.path_edge(nodes[0], nodes[1])?;
    if is_same_segment(&first_edge, &boundary.origin) {
        debug!("Origin edge covers the first path edge, skipping node {}", nodes[0]);
        nodes.remove(0);
    }

    let first_edge = path_geometry(graph, nodes[0], nodes[1])?;
    let origin_partial = origin.select(&first_edge).clone();

    let last_edge = graph.path_edge(nodes[nodes.len() - 2], nodes[nodes.len() - 1])?;
    if is_same_segment(&last_edge, &boundary.destination) {
        debug!(
            "Destination edge covers the last path edge, skipping node {}",
            nodes[nodes.len() - 1]
        );
        nodes.pop();
    }

    let destination_partial = match nodes.as_slice() {
        [.., second_last, last] => destination
            .select(&path_geometry(graph, *second_last, *last)?)
            .clone(),
        _ => destination.select(&origin_partial).clone(),
    };

    debug!("Routing through {} nodes", nodes.len());

    Ok(RouteTopology::Connected {
        nodes,
        origin: origin_partial,
        destination: destination_partial,
    })
}

/// Whether `path_edge` is `boundary_edge` driven in either direction.
fn is_same_segment(path_edge: &EdgeKey, boundary_edge: &EdgeKey) -> bool {
    *path_edge == *boundary_edge || *path_edge == boundary_edge.reversed()
}

fn path_geometry(
    graph: &impl Graph,
    source: NodeId,
    target: NodeId,
) -> Result<LineString<f64>, TaxicabError> {
    let key = graph.path_edge(source, target)?;
    Ok(graph.edge_geometry(&key)?.into_line_string())
}
