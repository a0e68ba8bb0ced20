use crate::graph_edge::RoadEdge;

pub type Weight = f64;

pub trait Weighting {
    /// Cost of traversing `edge`, `None` when the edge cannot be used.
    fn calc_edge_weight(&self, edge: &RoadEdge) -> Option<Weight>;
}

/// Weighs edges by one of their numeric attributes. Edges without the
/// attribute are not traversable.
pub struct AttributeWeighting<'a> {
    attribute: &'a str,
}

impl<'a> AttributeWeighting<'a> {
    pub fn new(attribute: &'a str) -> Self {
        AttributeWeighting { attribute }
    }
}

impl Weighting for AttributeWeighting<'_> {
    fn calc_edge_weight(&self, edge: &RoadEdge) -> Option<Weight> {
        edge.attributes()
            .get(self.attribute)
            .filter(|weight| weight.is_finite() && *weight >= 0.0)
    }
}
