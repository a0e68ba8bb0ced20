use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use taxicab::{GeoPoint, Taxicab};

use crate::{
    graph_loader::{LoadedGraph, load_graph},
    parsers,
};

#[derive(Args)]
pub struct NearestArgs {
    /// GeoJSON road network, one LineString feature per directed edge
    #[arg(short, long, env = "TAXICAB_GRAPH")]
    graph: PathBuf,

    /// Coordinate as "lat,lng"
    #[arg(short, long, value_parser = parsers::parse_coordinates, allow_hyphen_values = true)]
    point: GeoPoint,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct NearestOutput {
    pub u: i64,
    pub v: i64,
    pub key: usize,
}

pub fn run(args: NearestArgs) -> Result<(), anyhow::Error> {
    let output = nearest(load_graph(&args.graph)?, &args.point)?;
    println!("{}", serde_json::to_string(&output)?);

    Ok(())
}

fn nearest(loaded: LoadedGraph, point: &GeoPoint) -> Result<NearestOutput, anyhow::Error> {
    let LoadedGraph { graph, node_ids } = loaded;
    let edge = Taxicab::new(graph)?.nearest_edge(point)?;

    Ok(NearestOutput {
        u: node_ids.external_id(edge.source),
        v: node_ids.external_id(edge.target),
        key: edge.key,
    })
}

#[cfg(test)]
mod tests {
    use std::env;

    use super::*;

    #[test]
    fn test_nearest() {
        let current_dir = env::current_dir().unwrap();
        let loaded = load_graph(&current_dir.join("tests/fixtures/grid.geojson")).unwrap();

        assert_eq!(
            nearest(loaded, &GeoPoint::new(39.08665, -84.3232)).unwrap(),
            NearestOutput {
                u: 1002,
                v: 1003,
                key: 0
            }
        );
    }
}
