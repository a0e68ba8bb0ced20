#[cfg(test)]
pub mod test_graph {
    use geo::{LineString, line_string};

    use crate::{
        edge_attributes::EdgeAttributes,
        geometry::{great_circle_length, straight_line},
        geopoint::GeoPoint,
        road_graph::RoadGraph,
    };

    /// A small street grid:
    ///
    /// ```text
    ///           E ---------------- F
    ///           |                  |
    ///     A --- B ~~~~~~ C ------- D
    /// ```
    ///
    /// Every street is two-way. B-C has a stored shape bending south of the
    /// straight chord, the other streets are straight lines.
    #[derive(Debug, Clone, Copy)]
    pub enum TestNode {
        A = 0,
        B = 1,
        C = 2,
        D = 3,
        E = 4,
        F = 5,
    }

    impl From<TestNode> for usize {
        fn from(value: TestNode) -> Self {
            value as usize
        }
    }

    impl TestNode {
        pub fn coordinates(self) -> GeoPoint {
            match self {
                TestNode::A => GeoPoint::new(39.0870, -84.3250),
                TestNode::B => GeoPoint::new(39.0870, -84.3240),
                TestNode::C => GeoPoint::new(39.0870, -84.3225),
                TestNode::D => GeoPoint::new(39.0870, -84.3205),
                TestNode::E => GeoPoint::new(39.0885, -84.3240),
                TestNode::F => GeoPoint::new(39.0885, -84.3205),
            }
        }
    }

    fn bend_b_c() -> LineString<f64> {
        line_string![
            (x: -84.3240, y: 39.0870),
            (x: -84.3232, y: 39.0866),
            (x: -84.3225, y: 39.0870)
        ]
    }

    fn test_attributes(geometry: &LineString<f64>) -> EdgeAttributes {
        let length = great_circle_length(geometry).unwrap();

        EdgeAttributes::new()
            .with("length", length)
            .with("meters", length)
            .with("travel_time", length / 10.0)
    }

    fn add_street(
        graph: &mut RoadGraph,
        from: TestNode,
        to: TestNode,
        geometry: Option<LineString<f64>>,
    ) {
        let forward = geometry
            .clone()
            .unwrap_or_else(|| straight_line(&from.coordinates(), &to.coordinates()));
        let attributes = test_attributes(&forward);

        graph
            .add_edge(from.into(), to.into(), attributes.clone(), geometry)
            .unwrap();
        graph
            .add_edge(to.into(), from.into(), attributes, None)
            .unwrap();
    }

    /// Edge ids follow insertion order: A-B is 0, B-A is 1, B-C is 2 and so on.
    pub fn create_test_graph() -> RoadGraph {
        let mut graph = RoadGraph::new();

        for node in [
            TestNode::A,
            TestNode::B,
            TestNode::C,
            TestNode::D,
            TestNode::E,
            TestNode::F,
        ] {
            graph.add_node(node.into(), node.coordinates());
        }

        add_street(&mut graph, TestNode::A, TestNode::B, None);
        add_street(&mut graph, TestNode::B, TestNode::C, Some(bend_b_c()));
        add_street(&mut graph, TestNode::C, TestNode::D, None);
        add_street(&mut graph, TestNode::B, TestNode::E, None);
        add_street(&mut graph, TestNode::E, TestNode::F, None);
        add_street(&mut graph, TestNode::D, TestNode::F, None);

        graph
    }

    /// Length of the straight street between two nodes.
    pub fn street_length(from: TestNode, to: TestNode) -> f64 {
        from.coordinates().great_circle_distance(&to.coordinates())
    }
}
