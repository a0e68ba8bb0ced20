use geo::LineString;

use crate::{
    constants::LENGTH_ATTRIBUTE,
    error::TaxicabError,
    geometry::great_circle_length,
    graph::Graph,
    types::{EdgeKey, NodeId},
};

/// The edges the origin and destination coordinates were matched to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryEdges {
    pub origin: EdgeKey,
    pub destination: EdgeKey,
}

/// Share of `key`'s `attribute` covered by a stretch of `partial_length`
/// meters, assuming the attribute is spread evenly along the edge.
pub fn weighted_edge_length(
    graph: &impl Graph,
    partial_length: f64,
    key: &EdgeKey,
    attribute: &str,
) -> Result<f64, TaxicabError> {
    let weight = graph.edge_attribute(key, attribute)?;
    let edge_length = graph.edge_attribute(key, LENGTH_ATTRIBUTE)?;

    if edge_length == 0.0 {
        return Err(TaxicabError::DegenerateEdge(*key));
    }

    Ok((weight / edge_length) * partial_length)
}

/// Total `attribute` of a route: every full edge between consecutive `nodes`
/// plus the share of each partial boundary edge.
///
/// Partial edges are weighted against the first and last edge of `nodes`
/// when there is one, else against their own boundary edge.
pub fn route_length(
    graph: &impl Graph,
    nodes: &[NodeId],
    origin_partial: Option<&LineString<f64>>,
    destination_partial: Option<&LineString<f64>>,
    attribute: &str,
    boundary: &BoundaryEdges,
) -> Result<f64, TaxicabError> {
    let mut total = 0.0;

    if nodes.len() > 1 {
        total += graph
            .route_edge_attributes(nodes, attribute)?
            .into_iter()
            .sum::<f64>();
    }

    if let Some(partial) = origin_partial {
        let reference = match nodes {
            [first, second, ..] => graph.path_edge(*first, *second)?,
            _ => boundary.origin,
        };
        total += partial_weight(graph, partial, &reference, attribute)?;
    }

    if let Some(partial) = destination_partial {
        let reference = match nodes {
            [.., second_last, last] => graph.path_edge(*second_last, *last)?,
            _ => boundary.destination,
        };
        total += partial_weight(graph, partial, &reference, attribute)?;
    }

    Ok(total)
}

fn partial_weight(
    graph: &impl Graph,
    partial: &LineString<f64>,
    reference: &EdgeKey,
    attribute: &str,
) -> Result<f64, TaxicabError> {
    let length = great_circle_length(partial).unwrap_or(0.0);

    if attribute == LENGTH_ATTRIBUTE {
        return Ok(length);
    }

    weighted_edge_length(graph, length, reference, attribute)
}
