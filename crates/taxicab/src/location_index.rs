use geo::{Distance, Euclidean, Line, Point};
use rstar::primitives::GeomWithData;
use rstar::{AABB, PointDistance, RStarInsertionStrategy, RTree, RTreeObject, RTreeParams};
use tracing::info;

use crate::error::TaxicabError;
use crate::geopoint::GeoPoint;
use crate::graph::Graph;
use crate::types::{EdgeId, EdgeKey};

struct IndexedLine(Line<f64>);

impl IndexedLine {
    /// Stores the segment with its endpoints in lexicographic order, so an
    /// edge and its reverse yield bit-identical distances.
    fn new(line: Line<f64>) -> Self {
        let start = (line.start.x, line.start.y);
        let end = (line.end.x, line.end.y);
        if end < start {
            IndexedLine(Line::new(line.end, line.start))
        } else {
            IndexedLine(line)
        }
    }

    fn line(&self) -> &Line<f64> {
        &self.0
    }
}

impl RTreeObject for IndexedLine {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        let line = self.line();
        AABB::from_corners([line.start.x, line.start.y], [line.end.x, line.end.y])
    }
}

impl PointDistance for IndexedLine {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let distance = Euclidean.distance(self.line(), &Point::new(point[0], point[1]));
        distance * distance
    }
}

struct IndexedData {
    edge_id: EdgeId,
}

type LocationIndexObject = GeomWithData<IndexedLine, IndexedData>;

struct LocationIndexTreeParams;

impl RTreeParams for LocationIndexTreeParams {
    type DefaultInsertionStrategy = RStarInsertionStrategy;

    const MAX_SIZE: usize = 64;
    const MIN_SIZE: usize = 28;
    const REINSERTION_COUNT: usize = 5;
}

/// Spatial index over every segment of every edge, answering nearest-edge queries.
pub struct LocationIndex {
    tree: RTree<LocationIndexObject, LocationIndexTreeParams>,
}

impl LocationIndex {
    pub fn build_from_graph(graph: &impl Graph) -> Result<LocationIndex, TaxicabError> {
        info!("Building location index for {} edges", graph.edge_count());

        let mut segments = Vec::with_capacity(graph.edge_count());
        for edge_id in 0..graph.edge_count() {
            let geometry = graph.edge_geometry(&graph.edge(edge_id).key())?;

            segments.extend(geometry.line_string().lines().map(|line| {
                LocationIndexObject::new(IndexedLine::new(line), IndexedData { edge_id })
            }));
        }

        let tree = RTree::bulk_load_with_params(segments);

        info!("Finished building location index ({} segments)", tree.size());

        Ok(LocationIndex { tree })
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// The edge closest to `coordinates`, measured in lon/lat space.
    ///
    /// When several edges are equally close (an edge and its reverse share the
    /// same segments), the one inserted first in the graph wins.
    pub fn nearest_edge(&self, graph: &impl Graph, coordinates: &GeoPoint) -> Option<EdgeKey> {
        let mut neighbors = self
            .tree
            .nearest_neighbor_iter_with_distance_2(&[coordinates.lng(), coordinates.lat()]);

        let (nearest, nearest_distance) = neighbors.next()?;

        let edge_id = neighbors
            .take_while(|(_, distance)| *distance == nearest_distance)
            .map(|(neighbor, _)| neighbor.data.edge_id)
            .fold(nearest.data.edge_id, EdgeId::min);

        Some(graph.edge(edge_id).key())
    }

    pub fn snap(&self, graph: &impl Graph, coordinates: &GeoPoint) -> Result<EdgeKey, TaxicabError> {
        self.nearest_edge(graph, coordinates)
            .ok_or(TaxicabError::NoNearestEdge {
                lat: coordinates.lat(),
                lng: coordinates.lng(),
            })
    }
}
