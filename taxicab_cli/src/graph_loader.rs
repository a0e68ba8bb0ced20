use std::path::Path;

use anyhow::{Context, bail};
use fxhash::FxHashMap;
use geo::{Coord, LineString};
use geojson::{Feature, FeatureCollection, GeoJson, JsonValue};
use taxicab::{EdgeKey, GeoPoint, NodeId, RoadGraph, edge_attributes::EdgeAttributes, graph::Graph};
use tracing::info;

use crate::parsers::ExternalEdge;

const RESERVED_PROPERTIES: [&str; 4] = ["u", "v", "key", "synthetic"];

/// Mapping between the node ids of a graph file and the graph's dense ids.
#[derive(Default)]
pub struct NodeIds {
    external_ids: Vec<i64>,
    dense_ids: FxHashMap<i64, NodeId>,
}

impl NodeIds {
    pub fn count(&self) -> usize {
        self.external_ids.len()
    }

    pub fn external_id(&self, node_id: NodeId) -> i64 {
        self.external_ids[node_id]
    }

    pub fn edge_key(&self, edge: &ExternalEdge) -> anyhow::Result<EdgeKey> {
        let source = self.dense_id(edge.u)?;
        let target = self.dense_id(edge.v)?;
        Ok(EdgeKey::new(source, target, edge.key))
    }

    fn dense_id(&self, external_id: i64) -> anyhow::Result<NodeId> {
        self.dense_ids
            .get(&external_id)
            .copied()
            .with_context(|| format!("Unknown node {external_id}"))
    }
}

/// A road graph loaded from GeoJSON.
pub struct LoadedGraph {
    pub graph: RoadGraph,
    pub node_ids: NodeIds,
}

impl LoadedGraph {
    fn node(&mut self, external_id: i64, coordinates: GeoPoint) -> NodeId {
        if let Some(node_id) = self.node_ids.dense_ids.get(&external_id) {
            return *node_id;
        }

        let node_id = self.node_ids.count();
        self.node_ids.external_ids.push(external_id);
        self.node_ids.dense_ids.insert(external_id, node_id);
        self.graph.add_node(node_id, coordinates);
        node_id
    }
}

struct EdgeFeature {
    edge: ExternalEdge,
    attributes: EdgeAttributes,
    line_string: LineString<f64>,
    synthetic: bool,
}

pub fn load_graph(path: &Path) -> anyhow::Result<LoadedGraph> {
    info!("Loading graph from {:?}", path);

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let graph = parse_graph(&contents)?;

    info!(
        "Loaded {} nodes and {} edges",
        graph.node_ids.count(),
        graph.graph.edge_count()
    );

    Ok(graph)
}

/// Builds a graph from a FeatureCollection with one LineString feature per
/// directed edge.
pub fn parse_graph(contents: &str) -> anyhow::Result<LoadedGraph> {
    let geojson = contents.parse::<GeoJson>()?;
    let collection = FeatureCollection::try_from(geojson)?;

    let mut loaded = LoadedGraph {
        graph: RoadGraph::new(),
        node_ids: NodeIds::default(),
    };

    for (position, feature) in collection.features.iter().enumerate() {
        let feature = parse_feature(feature).with_context(|| format!("Feature {position}"))?;

        let (Some(first), Some(last)) = (
            feature.line_string.0.first(),
            feature.line_string.0.last(),
        ) else {
            bail!("Feature {position} has an empty geometry");
        };

        let source = loaded.node(feature.edge.u, GeoPoint::from(*first));
        let target = loaded.node(feature.edge.v, GeoPoint::from(*last));
        let geometry = (!feature.synthetic).then_some(feature.line_string);

        loaded.graph.add_edge_with_key(
            EdgeKey::new(source, target, feature.edge.key),
            feature.attributes,
            geometry,
        )?;
    }

    Ok(loaded)
}

fn parse_feature(feature: &Feature) -> anyhow::Result<EdgeFeature> {
    let Some(geometry) = &feature.geometry else {
        bail!("Missing geometry");
    };

    let geojson::Value::LineString(positions) = &geometry.value else {
        bail!("Geometry is not a LineString");
    };

    let line_string = positions
        .iter()
        .map(|position| match position.as_slice() {
            [x, y, ..] => Ok(Coord { x: *x, y: *y }),
            _ => bail!("Position needs a longitude and a latitude"),
        })
        .collect::<anyhow::Result<LineString<f64>>>()?;

    let node_property = |name: &str| -> anyhow::Result<i64> {
        feature
            .property(name)
            .and_then(JsonValue::as_i64)
            .with_context(|| format!("Missing integer property \"{name}\""))
    };

    let key = match feature.property("key") {
        Some(value) => value
            .as_u64()
            .context("Property \"key\" must be a non-negative integer")? as usize,
        None => 0,
    };

    let synthetic = feature
        .property("synthetic")
        .and_then(JsonValue::as_bool)
        .unwrap_or(false);

    let attributes = feature
        .properties_iter()
        .filter(|(name, _)| !RESERVED_PROPERTIES.contains(&name.as_str()))
        .filter_map(|(name, value)| value.as_f64().map(|value| (name.clone(), value)))
        .collect::<EdgeAttributes>();

    Ok(EdgeFeature {
        edge: ExternalEdge {
            u: node_property("u")?,
            v: node_property("v")?,
            key,
        },
        attributes,
        line_string,
        synthetic,
    })
}
