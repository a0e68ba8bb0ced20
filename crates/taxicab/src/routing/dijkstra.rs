use std::cmp::Ordering;
use std::collections::BinaryHeap;

use fxhash::FxHashMap;
use tracing::debug;

use crate::error::TaxicabError;
use crate::graph::Graph;
use crate::types::{EdgeId, NodeId};
use crate::weighting::{Weight, Weighting};

use super::shortest_path_algorithm::ShortestPathAlgorithm;

#[derive(Copy, Clone, Debug)]
struct HeapItem {
    node_id: NodeId,
    weight: Weight,
}

impl PartialEq for HeapItem {
    fn eq(&self, other: &HeapItem) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapItem {}

impl PartialOrd for HeapItem {
    fn partial_cmp(&self, other: &HeapItem) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapItem {
    fn cmp(&self, other: &Self) -> Ordering {
        // Flip weight to make this a min-heap
        other
            .weight
            .total_cmp(&self.weight)
            .then_with(|| other.node_id.cmp(&self.node_id))
    }
}

struct NodeData {
    settled: bool,
    weight: Weight,
    parent: Option<(NodeId, EdgeId)>,
}

impl NodeData {
    fn new() -> Self {
        NodeData {
            settled: false,
            weight: Weight::INFINITY,
            parent: None,
        }
    }
}

pub struct Dijkstra {
    heap: BinaryHeap<HeapItem>,
    data: FxHashMap<NodeId, NodeData>,
}

impl Default for Dijkstra {
    fn default() -> Self {
        Self::new()
    }
}

impl Dijkstra {
    pub fn new() -> Self {
        Dijkstra {
            heap: BinaryHeap::with_capacity(1024),
            data: FxHashMap::default(),
        }
    }

    fn init(&mut self, start: NodeId) {
        self.heap.clear();
        self.data.clear();

        self.heap.push(HeapItem {
            node_id: start,
            weight: 0.0,
        });
        self.update_node_data(start, 0.0, None);
    }

    fn update_node_data(&mut self, node: NodeId, weight: Weight, parent: Option<(NodeId, EdgeId)>) {
        let data = self.data.entry(node).or_insert_with(NodeData::new);
        data.weight = weight;
        data.settled = false;
        data.parent = parent;
    }

    fn node_data(&mut self, node: NodeId) -> &NodeData {
        self.data.entry(node).or_insert_with(NodeData::new)
    }

    fn set_settled(&mut self, node: NodeId) {
        if let Some(data) = self.data.get_mut(&node) {
            data.settled = true;
        }
    }

    #[inline(always)]
    fn is_settled(&mut self, node: NodeId) -> bool {
        self.node_data(node).settled
    }

    #[inline(always)]
    fn current_shortest_weight(&mut self, node: NodeId) -> Weight {
        self.node_data(node).weight
    }

    fn build_path(&mut self, end: NodeId) -> Vec<NodeId> {
        let mut path = Vec::with_capacity(32);
        path.push(end);

        let mut node = end;
        while let Some((parent, _)) = self.node_data(node).parent {
            path.push(parent);
            node = parent;
        }

        path.reverse();
        path
    }
}

impl ShortestPathAlgorithm for Dijkstra {
    fn calc_path(
        &mut self,
        graph: &impl Graph,
        weighting: &impl Weighting,
        start: NodeId,
        end: NodeId,
    ) -> Result<Vec<NodeId>, TaxicabError> {
        for node in [start, end] {
            if graph.node_geometry(node).is_none() {
                return Err(TaxicabError::UnknownNode(node));
            }
        }

        self.init(start);

        let mut iterations = 0;

        while let Some(HeapItem { node_id, weight }) = self.heap.pop() {
            // Node is already settled, skip
            if self.is_settled(node_id) {
                continue;
            }

            // The weight is bigger than the current shortest weight, skip
            if weight > self.current_shortest_weight(node_id) {
                continue;
            }

            if node_id == end {
                self.set_settled(node_id);
                break;
            }

            for edge_id in graph.node_edges_iter(node_id) {
                let edge = graph.edge(edge_id);
                let adj_node = edge.end_node();

                if self.is_settled(adj_node) {
                    continue;
                }

                let Some(edge_weight) = weighting.calc_edge_weight(edge) else {
                    continue;
                };

                let next_weight = weight + edge_weight;

                if next_weight < self.current_shortest_weight(adj_node) {
                    self.update_node_data(adj_node, next_weight, Some((node_id, edge_id)));
                    self.heap.push(HeapItem {
                        weight: next_weight,
                        node_id: adj_node,
                    });
                }
            }

            self.set_settled(node_id);
            iterations += 1;
        }

        debug!("Dijkstra iterations: {}", iterations);

        if !self.is_settled(end) {
            return Err(TaxicabError::NoPath {
                from: start,
                to: end,
            });
        }

        Ok(self.build_path(end))
    }
}
