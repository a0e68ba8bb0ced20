use fxhash::FxHashMap;
use geo::LineString;

use crate::{
    constants::LENGTH_ATTRIBUTE,
    edge_attributes::EdgeAttributes,
    edge_direction::EdgeDirection,
    error::TaxicabError,
    geometry::great_circle_length,
    geopoint::GeoPoint,
    graph::Graph,
    graph_edge::RoadEdge,
    types::{EdgeId, EdgeKey, NodeId, UndirectedEdgeKey},
};

#[derive(Default, Debug)]
struct StoredGeometries {
    forward: Option<LineString<f64>>,
    backward: Option<LineString<f64>>,
}

impl StoredGeometries {
    fn get(&self, direction: EdgeDirection) -> Option<&LineString<f64>> {
        match direction {
            EdgeDirection::Forward => self.forward.as_ref(),
            EdgeDirection::Backward => self.backward.as_ref(),
        }
    }

    fn set(&mut self, direction: EdgeDirection, geometry: LineString<f64>) {
        match direction {
            EdgeDirection::Forward => self.forward = Some(geometry),
            EdgeDirection::Backward => self.backward = Some(geometry),
        }
    }
}

/// In-memory directed road multigraph with dense node ids.
#[derive(Default, Debug)]
pub struct RoadGraph {
    nodes: Vec<Option<GeoPoint>>,
    edges: Vec<RoadEdge>,
    edge_ids: FxHashMap<EdgeKey, EdgeId>,
    geometries: FxHashMap<UndirectedEdgeKey, StoredGeometries>,
    adjacency_list: Vec<Vec<EdgeId>>,
}

impl RoadGraph {
    pub fn new() -> Self {
        RoadGraph::default()
    }

    pub fn add_node(&mut self, node_id: NodeId, coordinates: GeoPoint) {
        if node_id >= self.nodes.len() {
            self.nodes.resize(node_id + 1, None);
            self.adjacency_list.resize_with(node_id + 1, Vec::new);
        }

        self.nodes[node_id] = Some(coordinates);
    }

    /// Adds an edge from `source` to `target` under the next free parallel key.
    pub fn add_edge(
        &mut self,
        source: NodeId,
        target: NodeId,
        attributes: EdgeAttributes,
        geometry: Option<LineString<f64>>,
    ) -> Result<EdgeKey, TaxicabError> {
        let next_key = self
            .node_edges_iter(source)
            .filter(|edge_id| self.edges[*edge_id].end_node() == target)
            .map(|edge_id| self.edges[edge_id].key().key + 1)
            .max()
            .unwrap_or(0);

        let key = EdgeKey::new(source, target, next_key);
        self.add_edge_with_key(key, attributes, geometry)?;
        Ok(key)
    }

    /// Adds the edge `key`. Without a `length` attribute, the length is
    /// computed from the edge's resolved geometry.
    pub fn add_edge_with_key(
        &mut self,
        key: EdgeKey,
        mut attributes: EdgeAttributes,
        geometry: Option<LineString<f64>>,
    ) -> Result<EdgeId, TaxicabError> {
        if self.edge_ids.contains_key(&key) {
            return Err(TaxicabError::DuplicateEdge(key));
        }

        for node_id in [key.source, key.target] {
            if self.node_geometry(node_id).is_none() {
                return Err(TaxicabError::UnknownNode(node_id));
            }
        }

        if let Some(geometry) = geometry {
            if geometry.0.len() < 2 {
                return Err(TaxicabError::InvalidGeometry(key));
            }

            let (undirected_key, direction) = key.undirected();
            self.geometries
                .entry(undirected_key)
                .or_default()
                .set(direction, geometry);
        }

        if !attributes.contains(LENGTH_ATTRIBUTE) {
            let geometry = self.edge_geometry(&key)?;
            let length = great_circle_length(geometry.line_string())
                .ok_or(TaxicabError::InvalidGeometry(key))?;
            attributes.insert(LENGTH_ATTRIBUTE, length);
        }

        let edge_id = self.edges.len();
        self.edges.push(RoadEdge::new(key, attributes));
        self.edge_ids.insert(key, edge_id);
        self.adjacency_list[key.source].push(edge_id);

        Ok(edge_id)
    }
}

impl Graph for RoadGraph {
    type EdgeIterator<'a> = std::iter::Copied<std::slice::Iter<'a, EdgeId>>;

    fn node_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_some()).count()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn node_geometry(&self, node_id: NodeId) -> Option<&GeoPoint> {
        self.nodes.get(node_id).and_then(|node| node.as_ref())
    }

    fn edge(&self, edge_id: EdgeId) -> &RoadEdge {
        &self.edges[edge_id]
    }

    fn edge_id(&self, key: &EdgeKey) -> Option<EdgeId> {
        self.edge_ids.get(key).copied()
    }

    fn node_edges_iter(&self, node_id: NodeId) -> Self::EdgeIterator<'_> {
        self.adjacency_list
            .get(node_id)
            .map(|edges| edges.as_slice())
            .unwrap_or_default()
            .iter()
            .copied()
    }

    fn stored_geometry(
        &self,
        key: &UndirectedEdgeKey,
        direction: EdgeDirection,
    ) -> Option<&LineString<f64>> {
        self.geometries
            .get(key)
            .and_then(|geometries| geometries.get(direction))
    }
}

#[cfg(test)]
mod tests {
    use geo::line_string;

    use super::*;
    use crate::edge_geometry::EdgeGeometry;

    fn graph() -> RoadGraph {
        let mut graph = RoadGraph::new();
        graph.add_node(0, GeoPoint::new(39.0870, -84.3250));
        graph.add_node(1, GeoPoint::new(39.0870, -84.3240));
        graph.add_node(2, GeoPoint::new(39.0880, -84.3240));
        graph
    }

    #[test]
    fn test_parallel_edges_get_increasing_keys() {
        let mut graph = graph();
        let first = graph
            .add_edge(0, 1, EdgeAttributes::new(), None)
            .unwrap();
        let second = graph
            .add_edge(0, 1, EdgeAttributes::new().with(LENGTH_ATTRIBUTE, 500.0), None)
            .unwrap();
        let reverse = graph
            .add_edge(1, 0, EdgeAttributes::new(), None)
            .unwrap();

        assert_eq!(first, EdgeKey::new(0, 1, 0));
        assert_eq!(second, EdgeKey::new(0, 1, 1));
        assert_eq!(reverse, EdgeKey::new(1, 0, 0));
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.node_edges_iter(0).count(), 2);
    }

    #[test]
    fn test_length_is_computed_from_geometry() {
        let mut graph = graph();
        let key = graph
            .add_edge(0, 1, EdgeAttributes::new(), None)
            .unwrap();

        let expected = graph
            .node_geometry(0)
            .unwrap()
            .great_circle_distance(graph.node_geometry(1).unwrap());

        assert_eq!(graph.edge_attribute(&key, LENGTH_ATTRIBUTE), Ok(expected));
    }

    #[test]
    fn test_explicit_length_is_kept() {
        let mut graph = graph();
        let key = graph
            .add_edge(0, 1, EdgeAttributes::new().with(LENGTH_ATTRIBUTE, 42.0), None)
            .unwrap();

        assert_eq!(graph.edge_attribute(&key, LENGTH_ATTRIBUTE), Ok(42.0));
    }

    #[test]
    fn test_edge_geometry_falls_back_to_reverse_then_straight_line() {
        let mut graph = graph();
        let shape = line_string![
            (x: -84.3250, y: 39.0870),
            (x: -84.3245, y: 39.0868),
            (x: -84.3240, y: 39.0870)
        ];
        let forward = graph
            .add_edge(0, 1, EdgeAttributes::new(), Some(shape.clone()))
            .unwrap();
        let backward = graph
            .add_edge(1, 0, EdgeAttributes::new(), None)
            .unwrap();
        let plain = graph
            .add_edge(1, 2, EdgeAttributes::new(), None)
            .unwrap();

        assert_eq!(
            graph.edge_geometry(&forward),
            Ok(EdgeGeometry::Stored(shape.clone()))
        );

        let mut reversed = shape;
        reversed.0.reverse();
        assert_eq!(
            graph.edge_geometry(&backward),
            Ok(EdgeGeometry::Stored(reversed))
        );

        let synthetic = graph.edge_geometry(&plain).unwrap();
        assert!(synthetic.is_synthetic());
        assert_eq!(
            synthetic.into_line_string(),
            line_string![(x: -84.3240, y: 39.0870), (x: -84.3240, y: 39.0880)]
        );
    }

    #[test]
    fn test_stored_geometry_length_matches_reverse_edge() {
        let mut graph = graph();
        let shape = line_string![
            (x: -84.3250, y: 39.0870),
            (x: -84.3245, y: 39.0868),
            (x: -84.3240, y: 39.0870)
        ];
        let forward = graph
            .add_edge(0, 1, EdgeAttributes::new(), Some(shape))
            .unwrap();
        let backward = graph
            .add_edge(1, 0, EdgeAttributes::new(), None)
            .unwrap();

        let forward_length = graph.edge_attribute(&forward, LENGTH_ATTRIBUTE).unwrap();
        let backward_length = graph.edge_attribute(&backward, LENGTH_ATTRIBUTE).unwrap();
        assert!((forward_length - backward_length).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_invalid_edges() {
        let mut graph = graph();
        graph
            .add_edge_with_key(EdgeKey::new(0, 1, 0), EdgeAttributes::new(), None)
            .unwrap();

        assert_eq!(
            graph.add_edge_with_key(EdgeKey::new(0, 1, 0), EdgeAttributes::new(), None),
            Err(TaxicabError::DuplicateEdge(EdgeKey::new(0, 1, 0)))
        );
        assert_eq!(
            graph.add_edge(0, 9, EdgeAttributes::new(), None),
            Err(TaxicabError::UnknownNode(9))
        );
        assert_eq!(
            graph.add_edge(
                1,
                2,
                EdgeAttributes::new(),
                Some(line_string![(x: -84.3240, y: 39.0870)])
            ),
            Err(TaxicabError::InvalidGeometry(EdgeKey::new(1, 2, 0)))
        );
    }

    #[test]
    fn test_path_edge_picks_shortest_parallel_edge() {
        let mut graph = graph();
        graph
            .add_edge(0, 1, EdgeAttributes::new().with(LENGTH_ATTRIBUTE, 90.0), None)
            .unwrap();
        let short = graph
            .add_edge(0, 1, EdgeAttributes::new().with(LENGTH_ATTRIBUTE, 80.0), None)
            .unwrap();
        graph
            .add_edge(0, 1, EdgeAttributes::new().with(LENGTH_ATTRIBUTE, 80.0), None)
            .unwrap();

        assert_eq!(graph.path_edge(0, 1), Ok(short));
        assert_eq!(
            graph.path_edge(1, 0),
            Err(TaxicabError::NoEdgeBetween { from: 1, to: 0 })
        );
    }

    #[test]
    fn test_route_edge_attributes() {
        let mut graph = graph();
        graph
            .add_edge(
                0,
                1,
                EdgeAttributes::new()
                    .with(LENGTH_ATTRIBUTE, 90.0)
                    .with("travel_time", 9.0),
                None,
            )
            .unwrap();
        graph
            .add_edge(1, 2, EdgeAttributes::new().with(LENGTH_ATTRIBUTE, 110.0), None)
            .unwrap();

        assert_eq!(
            graph.route_edge_attributes(&[0, 1, 2], LENGTH_ATTRIBUTE),
            Ok(vec![90.0, 110.0])
        );
        assert_eq!(graph.route_length(&[0, 1, 2]), Ok(200.0));
        assert_eq!(graph.route_edge_attributes(&[0], LENGTH_ATTRIBUTE), Ok(vec![]));
        assert_eq!(
            graph.route_edge_attributes(&[0, 1, 2], "travel_time"),
            Err(TaxicabError::MissingAttribute {
                edge: EdgeKey::new(1, 2, 0),
                attribute: "travel_time".to_string(),
            })
        );
    }
}
