/// Mean earth radius used by the great-circle formula, in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_009.0;

/// Edge attribute holding the metric length of an edge.
pub const LENGTH_ATTRIBUTE: &str = "length";
