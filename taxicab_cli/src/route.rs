use std::path::PathBuf;

use clap::Args;
use geojson::Geometry;
use serde::Serialize;
use taxicab::{GeoPoint, RouteRequest, TaxiRoute, Taxicab};
use tracing::info;

use crate::{
    graph_loader::{LoadedGraph, NodeIds, load_graph},
    parsers::{self, ExternalEdge},
};

#[derive(Args)]
pub struct RouteArgs {
    /// GeoJSON road network, one LineString feature per directed edge
    #[arg(short, long, env = "TAXICAB_GRAPH")]
    graph: PathBuf,

    /// Origin as "lat,lng"
    #[arg(short, long, value_parser = parsers::parse_coordinates, allow_hyphen_values = true)]
    origin: GeoPoint,

    /// Destination as "lat,lng"
    #[arg(short = 't', long, value_parser = parsers::parse_coordinates, allow_hyphen_values = true)]
    destination: GeoPoint,

    /// Edge attribute to weigh the route by
    #[arg(short, long, default_value = "length")]
    weight: String,

    /// Origin edge as "u,v" or "u,v,key", instead of the nearest one
    #[arg(long, value_parser = parsers::parse_edge)]
    origin_edge: Option<ExternalEdge>,

    /// Destination edge as "u,v" or "u,v,key", instead of the nearest one
    #[arg(long, value_parser = parsers::parse_edge)]
    destination_edge: Option<ExternalEdge>,
}

/// A route with the node ids of the graph file.
#[derive(Serialize, Debug)]
pub struct RouteOutput {
    pub distance: f64,
    pub weight: f64,
    pub nodes: Vec<i64>,
    pub origin_partial_edge: Option<Geometry>,
    pub destination_partial_edge: Option<Geometry>,
}

impl RouteOutput {
    pub fn new(node_ids: &NodeIds, route: &TaxiRoute) -> Self {
        RouteOutput {
            distance: route.distance(),
            weight: route.weight(),
            nodes: route
                .nodes()
                .iter()
                .map(|node_id| node_ids.external_id(*node_id))
                .collect(),
            origin_partial_edge: route.origin_partial_edge().map(Geometry::from),
            destination_partial_edge: route.destination_partial_edge().map(Geometry::from),
        }
    }
}

pub fn run(args: RouteArgs) -> Result<(), anyhow::Error> {
    let loaded = load_graph(&args.graph)?;

    let mut request = RouteRequest::new(args.origin, args.destination).with_weight(args.weight);
    if let Some(edge) = &args.origin_edge {
        request = request.with_origin_edge(loaded.node_ids.edge_key(edge)?);
    }
    if let Some(edge) = &args.destination_edge {
        request = request.with_destination_edge(loaded.node_ids.edge_key(edge)?);
    }

    let output = route(loaded, &request)?;

    info!("Route distance: {} meters", output.distance);
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

fn route(loaded: LoadedGraph, request: &RouteRequest) -> Result<RouteOutput, anyhow::Error> {
    let LoadedGraph { graph, node_ids } = loaded;
    let taxicab = Taxicab::new(graph)?;
    let route = taxicab.shortest_path(request)?;

    Ok(RouteOutput::new(&node_ids, &route))
}

#[cfg(test)]
mod tests {
    use std::env;

    use super::*;

    fn fixture() -> LoadedGraph {
        let current_dir = env::current_dir().unwrap();
        load_graph(&current_dir.join("tests/fixtures/grid.geojson")).unwrap()
    }

    #[test]
    fn test_route_reports_external_node_ids() {
        let request = RouteRequest::new(
            GeoPoint::new(39.08702, -84.3245),
            GeoPoint::new(39.08848, -84.3220),
        );

        let output = route(fixture(), &request).unwrap();

        assert_eq!(output.nodes, vec![1002, 1005]);
        assert!(output.origin_partial_edge.is_some());
        assert!(output.destination_partial_edge.is_some());
        assert_eq!(output.weight, output.distance);
    }

    #[test]
    fn test_route_with_pinned_edge() {
        let loaded = fixture();
        let origin_edge = loaded
            .node_ids
            .edge_key(&ExternalEdge {
                u: 1001,
                v: 1002,
                key: 0,
            })
            .unwrap();
        let request = RouteRequest::new(
            GeoPoint::new(39.0870, -84.3240),
            GeoPoint::new(39.08848, -84.3220),
        )
        .with_origin_edge(origin_edge)
        .with_weight("travel_time");

        let output = route(loaded, &request).unwrap();

        assert_eq!(output.nodes, vec![1002, 1005]);
        assert!(output.origin_partial_edge.is_none());
        assert!(output.weight > 0.0);
    }

    #[test]
    fn test_output_serializes_partial_edges_as_geojson() {
        let request = RouteRequest::new(
            GeoPoint::new(39.08702, -84.3247),
            GeoPoint::new(39.08702, -84.3243),
        );

        let output = route(fixture(), &request).unwrap();
        let json = serde_json::to_value(&output).unwrap();

        assert_eq!(json["nodes"], serde_json::json!([]));
        assert_eq!(json["origin_partial_edge"]["type"], "LineString");
        assert_eq!(json["destination_partial_edge"], serde_json::Value::Null);
    }
}
