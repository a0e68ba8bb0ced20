pub mod constants;
pub mod edge_attributes;
pub mod edge_direction;
pub mod edge_geometry;
pub mod error;
pub mod geometry;
pub mod geopoint;
pub mod graph;
pub mod graph_edge;
pub mod location_index;
pub mod phase_timer;
pub mod road_graph;
pub mod routing;
pub mod taxicab;
pub mod types;
pub mod weighting;

#[cfg(test)]
pub(crate) mod test_graph_utils;

pub use error::TaxicabError;
pub use geopoint::GeoPoint;
pub use road_graph::RoadGraph;
pub use routing::taxi_route::{RouteRequest, TaxiRoute, shortest_path};
pub use taxicab::Taxicab;
pub use types::{EdgeId, EdgeKey, NodeId};
