//! Ellipsoidal geodesy on WGS84.
//!
//! Both directions of the geodesic problem go through Karney's algorithm,
//! which stays accurate to nanometers over the leg lengths a drone flies.

use std::sync::OnceLock;

use geographiclib_rs::{DirectGeodesic, Geodesic, InverseGeodesic};

use crate::error::GeodesicError;

fn wgs84() -> &'static Geodesic {
    static WGS84: OnceLock<Geodesic> = OnceLock::new();
    WGS84.get_or_init(Geodesic::wgs84)
}

/// Normalize a bearing into [0, 360).
pub fn normalize_bearing(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360; adding 0.0 folds -0.0
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped + 0.0
    }
}

/// Solve the direct problem: travel `distance_m` from (`lat`, `lon`) along
/// `bearing_deg` (clockwise from north).
///
/// # Returns
/// (lat, lon) of the destination in degrees. A zero distance returns the
/// starting coordinate unchanged.
pub fn destination(
    lat: f64,
    lon: f64,
    bearing_deg: f64,
    distance_m: f64,
) -> Result<(f64, f64), GeodesicError> {
    if distance_m == 0.0 {
        return Ok((lat, lon));
    }

    let (lat2, lon2): (f64, f64) = wgs84().direct(lat, lon, bearing_deg, distance_m);
    if lat2.is_finite() && lon2.is_finite() {
        Ok((lat2, lon2))
    } else {
        Err(GeodesicError {
            lat,
            lon,
            bearing_deg,
            distance_m,
        })
    }
}

/// Geodesic distance between two points in meters (inverse problem).
pub fn distance_m(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    wgs84().inverse(lat1, lon1, lat2, lon2)
}
