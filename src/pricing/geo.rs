//! Great-circle distance between airports.

use super::models::Coordinate;

/// Mean Earth radius in statute miles
pub const EARTH_RADIUS_MILES: f64 = 3958.7613;

/// Haversine distance in statute miles on a spherical Earth.
///
/// Coordinates are not range-checked.
pub fn haversine_miles(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_MILES * c
}
