use geo::{Coord, Point};
use serde::{Deserialize, Serialize};

use crate::constants::EARTH_RADIUS_METERS;

/// A WGS84 coordinate as supplied by callers, latitude first.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        GeoPoint { lat, lng }
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }

    pub fn great_circle_distance(&self, other: &GeoPoint) -> f64 {
        great_circle_distance(self.lat, self.lng, other.lat, other.lng)
    }
}

impl From<&GeoPoint> for Coord<f64> {
    fn from(value: &GeoPoint) -> Self {
        Coord {
            x: value.lng,
            y: value.lat,
        }
    }
}

impl From<&GeoPoint> for Point<f64> {
    fn from(value: &GeoPoint) -> Self {
        Point::new(value.lng, value.lat)
    }
}

impl From<Coord<f64>> for GeoPoint {
    fn from(value: Coord<f64>) -> Self {
        GeoPoint::new(value.y, value.x)
    }
}

/// Haversine distance in meters between two latitude/longitude pairs.
pub fn great_circle_distance(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let y1 = lat1.to_radians();
    let y2 = lat2.to_radians();
    let dy = y2 - y1;

    let x1 = lng1.to_radians();
    let x2 = lng2.to_radians();
    let dx = x2 - x1;

    let h = (dy / 2.0).sin().powi(2) + y1.cos() * y2.cos() * (dx / 2.0).sin().powi(2);
    // Rounding can push h slightly above 1 for antipodal points
    let h = h.min(1.0);

    let arc = 2.0 * h.sqrt().asin();
    arc * EARTH_RADIUS_METERS
}
