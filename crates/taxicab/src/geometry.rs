use geo::{Coord, Intersects, Line, LineLocatePoint, LineString, Point};

use crate::geopoint::{GeoPoint, great_circle_distance};

/// Sum of the great-circle distances between consecutive points of `curve`.
///
/// Returns `None` when the curve has fewer than two points: such a curve has
/// no length at all, which is different from a length of zero.
pub fn great_circle_length(curve: &LineString<f64>) -> Option<f64> {
    if curve.0.len() < 2 {
        return None;
    }

    let mut distance = 0.0;
    for segment in curve.lines() {
        distance += great_circle_distance(
            segment.start.y,
            segment.start.x,
            segment.end.y,
            segment.end.x,
        );
    }

    Some(distance)
}

pub fn straight_line(start: &GeoPoint, end: &GeoPoint) -> LineString<f64> {
    LineString::new(vec![start.into(), end.into()])
}

/// Normalized position in `[0, 1]` of the point of `curve` closest to `point`,
/// measured in the planar lon/lat space.
pub fn project(curve: &LineString<f64>, point: &GeoPoint) -> f64 {
    curve
        .line_locate_point(&Point::from(point))
        .unwrap_or(0.0)
}

/// Extracts the part of `curve` between two normalized positions.
///
/// Positions are clamped to `[0, 1]`. Equal positions produce a single-point
/// curve, and a start after the end produces the reversed sub-curve.
pub fn substring(curve: &LineString<f64>, start: f64, end: f64) -> LineString<f64> {
    if curve.0.is_empty() {
        return LineString::new(vec![]);
    }

    let start = start.clamp(0.0, 1.0);
    let end = end.clamp(0.0, 1.0);
    let length = planar_length(curve);

    if start == end {
        return LineString::new(vec![interpolate(curve, start * length)]);
    }

    let mut start_distance = start * length;
    let mut end_distance = end * length;

    let start_point = interpolate(curve, start_distance);
    let end_point = interpolate(curve, end_distance);

    let reverse = start_distance > end_distance;
    if reverse {
        std::mem::swap(&mut start_distance, &mut end_distance);
    }

    let mut vertices = Vec::with_capacity(curve.0.len() + 2);
    vertices.push(if reverse { end_point } else { start_point });

    let mut current_distance = 0.0;
    for segment in curve.lines() {
        if start_distance < current_distance && current_distance < end_distance {
            vertices.push(segment.start);
        } else if current_distance >= end_distance {
            break;
        }

        current_distance += segment_length(&segment);
    }

    vertices.push(if reverse { start_point } else { end_point });

    if reverse {
        vertices.reverse();
    }

    LineString::new(vertices)
}

/// Whether two curves share at least one point. Single-point curves are
/// tested as points.
pub fn curves_intersect(a: &LineString<f64>, b: &LineString<f64>) -> bool {
    match (a.0.as_slice(), b.0.as_slice()) {
        ([], _) | (_, []) => false,
        ([p], [q]) => p == q,
        ([p], _) => b.intersects(&Point::from(*p)),
        (_, [q]) => a.intersects(&Point::from(*q)),
        _ => a.intersects(b),
    }
}

fn segment_length(segment: &Line<f64>) -> f64 {
    let dx = segment.end.x - segment.start.x;
    let dy = segment.end.y - segment.start.y;
    (dx * dx + dy * dy).sqrt()
}

fn planar_length(curve: &LineString<f64>) -> f64 {
    curve.lines().map(|segment| segment_length(&segment)).sum()
}

/// Point at `distance` along `curve`, walking its segments from the start.
/// Assumes `curve` is not empty.
fn interpolate(curve: &LineString<f64>, distance: f64) -> Coord<f64> {
    let mut walked = 0.0;
    for segment in curve.lines() {
        let length = segment_length(&segment);
        if walked + length > distance {
            let fraction = (distance - walked) / length;
            return Coord {
                x: segment.start.x + fraction * (segment.end.x - segment.start.x),
                y: segment.start.y + fraction * (segment.end.y - segment.start.y),
            };
        }
        walked += length;
    }

    curve.0[curve.0.len() - 1]
}
