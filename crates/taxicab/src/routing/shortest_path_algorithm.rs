use crate::{error::TaxicabError, graph::Graph, types::NodeId, weighting::Weighting};

pub trait ShortestPathAlgorithm {
    /// Nodes of the cheapest path from `start` to `end`, both included.
    /// A path from a node to itself is that single node.
    fn calc_path(
        &mut self,
        graph: &impl Graph,
        weighting: &impl Weighting,
        start: NodeId,
        end: NodeId,
    ) -> Result<Vec<NodeId>, TaxicabError>;
}
