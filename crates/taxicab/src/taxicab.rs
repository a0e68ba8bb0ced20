use crate::error::TaxicabError;
use crate::geopoint::GeoPoint;
use crate::graph::Graph;
use crate::location_index::LocationIndex;
use crate::routing::dijkstra::Dijkstra;
use crate::routing::taxi_route::{RouteRequest, TaxiRoute, shortest_path};
use crate::types::EdgeKey;

/// A road network ready for taxicab routing: the graph and its location index.
pub struct Taxicab<G: Graph> {
    graph: G,
    index: LocationIndex,
}

impl<G: Graph> Taxicab<G> {
    pub fn new(graph: G) -> Result<Self, TaxicabError> {
        let index = LocationIndex::build_from_graph(&graph)?;

        Ok(Taxicab { graph, index })
    }

    pub fn nearest_edge(&self, coordinates: &GeoPoint) -> Result<EdgeKey, TaxicabError> {
        self.index.snap(&self.graph, coordinates)
    }

    pub fn shortest_path(&self, request: &RouteRequest) -> Result<TaxiRoute, TaxicabError> {
        let mut dijkstra = Dijkstra::new();
        shortest_path(&self.graph, &self.index, &mut dijkstra, request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_graph_utils::test_graph::{TestNode, create_test_graph};

    #[test]
    fn test_nearest_edge() {
        let taxicab = Taxicab::new(create_test_graph()).unwrap();

        assert_eq!(
            taxicab.nearest_edge(&GeoPoint::new(39.08848, -84.3220)),
            Ok(EdgeKey::new(TestNode::E.into(), TestNode::F.into(), 0))
        );
    }

    #[test]
    fn test_shortest_path() {
        let taxicab = Taxicab::new(create_test_graph()).unwrap();
        let request = RouteRequest::new(
            GeoPoint::new(39.08702, -84.3245),
            GeoPoint::new(39.08848, -84.3220),
        );

        let route = taxicab.shortest_path(&request).unwrap();

        assert_eq!(route.nodes(), &[TestNode::B.into(), TestNode::E.into()]);
        assert!(route.distance() > 0.0);
        assert_eq!(route.weight(), route.distance());
    }
}
