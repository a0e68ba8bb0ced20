use geo::LineString;

use crate::{
    constants::LENGTH_ATTRIBUTE,
    edge_direction::EdgeDirection,
    edge_geometry::EdgeGeometry,
    error::TaxicabError,
    geometry::straight_line,
    geopoint::GeoPoint,
    graph_edge::RoadEdge,
    types::{EdgeId, EdgeKey, NodeId, UndirectedEdgeKey},
};

/// Read-only view of a directed road multigraph.
pub trait Graph {
    type EdgeIterator<'a>: Iterator<Item = EdgeId>
    where
        Self: 'a;

    fn node_count(&self) -> usize;

    fn edge_count(&self) -> usize;

    fn node_geometry(&self, node_id: NodeId) -> Option<&GeoPoint>;

    fn edge(&self, edge_id: EdgeId) -> &RoadEdge;

    fn edge_id(&self, key: &EdgeKey) -> Option<EdgeId>;

    /// Edges leaving `node_id`.
    fn node_edges_iter(&self, node_id: NodeId) -> Self::EdgeIterator<'_>;

    /// Geometry stored for the road segment `key`, in the given orientation.
    fn stored_geometry(
        &self,
        key: &UndirectedEdgeKey,
        direction: EdgeDirection,
    ) -> Option<&LineString<f64>>;

    fn edge_by_key(&self, key: &EdgeKey) -> Result<&RoadEdge, TaxicabError> {
        self.edge_id(key)
            .map(|edge_id| self.edge(edge_id))
            .ok_or(TaxicabError::UnknownEdge(*key))
    }

    fn edge_attribute(&self, key: &EdgeKey, attribute: &str) -> Result<f64, TaxicabError> {
        self.edge_by_key(key)?.attribute(attribute)
    }

    /// Resolves the shape of `key`, oriented from its source to its target.
    ///
    /// The geometry stored for the edge itself wins, then the one stored for
    /// the reverse edge (reversed), then a straight line between both nodes.
    fn edge_geometry(&self, key: &EdgeKey) -> Result<EdgeGeometry, TaxicabError> {
        let (undirected_key, direction) = key.undirected();

        if let Some(geometry) = self.stored_geometry(&undirected_key, direction) {
            return Ok(EdgeGeometry::Stored(geometry.clone()));
        }

        if let Some(geometry) = self.stored_geometry(&undirected_key, direction.opposite()) {
            let mut geometry = geometry.clone();
            geometry.0.reverse();
            return Ok(EdgeGeometry::Stored(geometry));
        }

        let start = self
            .node_geometry(key.source)
            .ok_or(TaxicabError::UnknownNode(key.source))?;
        let end = self
            .node_geometry(key.target)
            .ok_or(TaxicabError::UnknownNode(key.target))?;

        Ok(EdgeGeometry::Synthetic(straight_line(start, end)))
    }

    /// The edge a route takes from `source` to `target`: among parallel edges,
    /// the first one with the smallest length.
    fn path_edge(&self, source: NodeId, target: NodeId) -> Result<EdgeKey, TaxicabError> {
        let mut shortest: Option<(EdgeKey, f64)> = None;

        for edge_id in self.node_edges_iter(source) {
            let edge = self.edge(edge_id);
            if edge.end_node() != target {
                continue;
            }

            let length = edge.length()?;
            if shortest.is_none_or(|(_, shortest_length)| length < shortest_length) {
                shortest = Some((edge.key(), length));
            }
        }

        shortest
            .map(|(key, _)| key)
            .ok_or(TaxicabError::NoEdgeBetween {
                from: source,
                to: target,
            })
    }

    /// Value of `attribute` for every edge along `path`.
    fn route_edge_attributes(
        &self,
        path: &[NodeId],
        attribute: &str,
    ) -> Result<Vec<f64>, TaxicabError> {
        path.windows(2)
            .map(|pair| {
                let key = self.path_edge(pair[0], pair[1])?;
                self.edge_attribute(&key, attribute)
            })
            .collect()
    }

    fn route_length(&self, path: &[NodeId]) -> Result<f64, TaxicabError> {
        Ok(self
            .route_edge_attributes(path, LENGTH_ATTRIBUTE)?
            .into_iter()
            .sum())
    }
}
