use geo::LineString;
use serde::Serialize;
use tracing::debug;

use crate::{
    constants::LENGTH_ATTRIBUTE,
    error::TaxicabError,
    geopoint::GeoPoint,
    graph::Graph,
    location_index::LocationIndex,
    phase_timer::{PhaseTimer, RoutePhase},
    types::{EdgeKey, NodeId},
    weighting::AttributeWeighting,
};

use super::{
    partial_edges::{EdgeClips, resolve_adjacent, resolve_connected, resolve_same_edge},
    route_length::{BoundaryEdges, route_length},
    shortest_path_algorithm::ShortestPathAlgorithm,
};

/// A route between two arbitrary coordinates.
///
/// `origin_edge` and `destination_edge` pin the boundary edges instead of
/// looking up the edge nearest to each coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub origin: GeoPoint,
    pub destination: GeoPoint,
    pub origin_edge: Option<EdgeKey>,
    pub destination_edge: Option<EdgeKey>,
    pub weight: Option<String>,
}

impl RouteRequest {
    pub fn new(origin: GeoPoint, destination: GeoPoint) -> Self {
        RouteRequest {
            origin,
            destination,
            origin_edge: None,
            destination_edge: None,
            weight: None,
        }
    }

    pub fn with_origin_edge(mut self, edge: EdgeKey) -> Self {
        self.origin_edge = Some(edge);
        self
    }

    pub fn with_destination_edge(mut self, edge: EdgeKey) -> Self {
        self.destination_edge = Some(edge);
        self
    }

    pub fn with_weight(mut self, weight: impl Into<String>) -> Self {
        self.weight = Some(weight.into());
        self
    }

    /// Edge attribute the route is weighted by, `length` unless set.
    pub fn weight(&self) -> &str {
        self.weight.as_deref().unwrap_or(LENGTH_ATTRIBUTE)
    }
}

/// Result of a taxicab route.
///
/// `nodes` are the graph nodes whose edges are traversed in full. The partial
/// edges are the stretches of the boundary edges between each coordinate and
/// the rest of the route, absent when the coordinate sits on a node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxiRoute {
    distance: f64,
    nodes: Vec<NodeId>,
    origin_partial_edge: Option<LineString<f64>>,
    destination_partial_edge: Option<LineString<f64>>,
    weight: f64,
}

impl TaxiRoute {
    /// Length of the route in meters.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn origin_partial_edge(&self) -> Option<&LineString<f64>> {
        self.origin_partial_edge.as_ref()
    }

    pub fn destination_partial_edge(&self) -> Option<&LineString<f64>> {
        self.destination_partial_edge.as_ref()
    }

    /// Total of the requested weight attribute, equal to `distance` for `length`.
    pub fn weight(&self) -> f64 {
        self.weight
    }
}

fn boundary_edge(
    graph: &impl Graph,
    index: &LocationIndex,
    pinned: Option<EdgeKey>,
    coordinates: &GeoPoint,
) -> Result<EdgeKey, TaxicabError> {
    match pinned {
        Some(key) => {
            graph.edge_by_key(&key)?;
            Ok(key)
        }
        None => index.snap(graph, coordinates),
    }
}

/// Routes between two coordinates that need not be graph nodes, counting the
/// partial edges between each coordinate and the network.
pub fn shortest_path(
    graph: &impl Graph,
    index: &LocationIndex,
    search: &mut impl ShortestPathAlgorithm,
    request: &RouteRequest,
) -> Result<TaxiRoute, TaxicabError> {
    let weight = request.weight();

    let snap_timer = PhaseTimer::start(RoutePhase::Snap);
    let boundary = BoundaryEdges {
        origin: boundary_edge(graph, index, request.origin_edge, &request.origin)?,
        destination: boundary_edge(graph, index, request.destination_edge, &request.destination)?,
    };
    snap_timer.finish();

    debug!(
        "Boundary edges: origin {}, destination {}",
        boundary.origin, boundary.destination
    );

    let topology = if boundary.origin == boundary.destination {
        let geometry = graph.edge_geometry(&boundary.origin)?;
        resolve_same_edge(
            geometry.line_string(),
            &request.origin,
            &request.destination,
        )
    } else {
        let search_timer = PhaseTimer::start(RoutePhase::Search);
        let nodes = search.calc_path(
            graph,
            &AttributeWeighting::new(weight),
            boundary.origin.source,
            boundary.destination.source,
        )?;
        search_timer.finish();

        let origin = EdgeClips::new(
            graph.edge_geometry(&boundary.origin)?.line_string(),
            &request.origin,
        );
        let destination = EdgeClips::new(
            graph.edge_geometry(&boundary.destination)?.line_string(),
            &request.destination,
        );

        if nodes.len() <= 2 {
            resolve_adjacent(origin, destination, &boundary)?
        } else {
            resolve_connected(graph, nodes, origin, destination, &boundary)?
        }
    };

    let parts = topology.into_parts();

    let distance = route_length(
        graph,
        &parts.nodes,
        parts.origin.as_ref(),
        parts.destination.as_ref(),
        LENGTH_ATTRIBUTE,
        &boundary,
    )?;

    let total_weight = if weight == LENGTH_ATTRIBUTE {
        distance
    } else {
        route_length(
            graph,
            &parts.nodes,
            parts.origin.as_ref(),
            parts.destination.as_ref(),
            weight,
            &boundary,
        )?
    };

    debug!(
        "Route through {} nodes: {} meters, {} {}",
        parts.nodes.len(),
        distance,
        total_weight,
        weight
    );

    Ok(TaxiRoute {
        distance,
        nodes: parts.nodes,
        origin_partial_edge: parts.origin,
        destination_partial_edge: parts.destination,
        weight: total_weight,
    })
}
