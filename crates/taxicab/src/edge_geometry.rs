use geo::LineString;

/// Shape of a directed edge, oriented from its source to its target node.
#[derive(Clone, Debug, PartialEq)]
pub enum EdgeGeometry {
    /// Geometry stored in the graph for this edge or its reverse.
    Stored(LineString<f64>),
    /// Straight line between the edge's end nodes, for edges without a stored shape.
    Synthetic(LineString<f64>),
}

impl EdgeGeometry {
    pub fn line_string(&self) -> &LineString<f64> {
        match self {
            EdgeGeometry::Stored(line) | EdgeGeometry::Synthetic(line) => line,
        }
    }

    pub fn into_line_string(self) -> LineString<f64> {
        match self {
            EdgeGeometry::Stored(line) | EdgeGeometry::Synthetic(line) => line,
        }
    }

    pub fn is_synthetic(&self) -> bool {
        matches!(self, EdgeGeometry::Synthetic(_))
    }
}
