//! Litchi mission CSV encoding.

use std::io::Write;

use serde::Serialize;

use crate::error::{OutputError, ValidationError, ValidationReason};
use crate::models::{AbsoluteWaypoint, ExportConfig, InitialPose};

/// Column names in the order Litchi's mission hub expects them.
pub const LITCHI_HEADERS: [&str; 18] = [
    "latitude",
    "longitude",
    "altitude(m)",
    "heading(deg)",
    "curvesize(m)",
    "rotationdir",
    "gimbalmode",
    "gimbalpitchangle",
    "actiontype1",
    "actionparam1",
    "altitudemode",
    "speed(m/s)",
    "poi_latitude",
    "poi_longitude",
    "poi_altitude(m)",
    "poi_altitudemode",
    "photo_timeinterval",
    "photo_distinterval",
];

/// One mission row. Field order matches [`LITCHI_HEADERS`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LitchiRow {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "altitude(m)")]
    pub altitude: f64,
    #[serde(rename = "heading(deg)")]
    pub heading: f64,
    #[serde(rename = "curvesize(m)")]
    pub curve_size: f64,
    #[serde(rename = "rotationdir")]
    pub rotation_dir: u8,
    #[serde(rename = "gimbalmode")]
    pub gimbal_mode: u8,
    #[serde(rename = "gimbalpitchangle")]
    pub gimbal_pitch_angle: f64,
    #[serde(rename = "actiontype1")]
    pub action_type1: i32,
    /// Hold time in whole milliseconds
    #[serde(rename = "actionparam1")]
    pub action_param1: i64,
    #[serde(rename = "altitudemode")]
    pub altitude_mode: u8,
    #[serde(rename = "speed(m/s)")]
    pub speed: f64,
    pub poi_latitude: f64,
    pub poi_longitude: f64,
    #[serde(rename = "poi_altitude(m)")]
    pub poi_altitude: f64,
    pub poi_altitudemode: u8,
    pub photo_timeinterval: f64,
    pub photo_distinterval: u8,
}

impl LitchiRow {
    fn from_waypoint(waypoint: &AbsoluteWaypoint, initial: &InitialPose, config: &ExportConfig) -> Self {
        Self {
            latitude: waypoint.latitude,
            longitude: waypoint.longitude,
            altitude: waypoint.altitude,
            heading: waypoint.true_bearing,
            curve_size: config.curve_size,
            rotation_dir: 0,
            gimbal_mode: 0,
            gimbal_pitch_angle: config.gimbal_pitch,
            action_type1: 0,
            action_param1: hold_millis(waypoint.hold_time),
            altitude_mode: 0,
            speed: config.speed_start,
            poi_latitude: initial.latitude,
            poi_longitude: initial.longitude,
            poi_altitude: config.poi_altitude,
            poi_altitudemode: 0,
            photo_timeinterval: config.photo_interval,
            photo_distinterval: 0,
        }
    }
}

/// Seconds to whole milliseconds, truncated toward zero.
///
/// Callers must have checked the hold against [`fits_in_millis`].
fn hold_millis(hold_time_s: f64) -> i64 {
    (hold_time_s * 1000.0).trunc() as i64
}

/// `i64::MAX as f64` rounds up to 2^63, so anything at or above it overflows.
fn fits_in_millis(hold_time_s: f64) -> bool {
    hold_time_s * 1000.0 < i64::MAX as f64
}

/// Map projected waypoints to mission rows, one per waypoint, in order.
///
/// The POI on every row is the flight's initial coordinate.
pub fn export(
    initial: &InitialPose,
    waypoints: &[AbsoluteWaypoint],
    config: &ExportConfig,
) -> Result<Vec<LitchiRow>, ValidationError> {
    initial.validate_position()?;
    config.validate()?;
    for waypoint in waypoints {
        let at = Some(waypoint.index);
        let hold = ValidationError::check_finite("hold_time", at, waypoint.hold_time)?;
        if hold < 0.0 {
            return Err(ValidationError::new("hold_time", at, ValidationReason::Negative));
        }
        if !fits_in_millis(hold) {
            return Err(ValidationError::new("hold_time", at, ValidationReason::OutOfRange));
        }
    }

    Ok(waypoints
        .iter()
        .map(|waypoint| LitchiRow::from_waypoint(waypoint, initial, config))
        .collect())
}

/// Write the header line and every row to `writer`.
///
/// The header is written even when `rows` is empty.
pub fn write_csv<W: Write>(rows: &[LitchiRow], writer: W) -> Result<(), OutputError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv_writer.write_record(LITCHI_HEADERS)?;
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Render rows as CSV text.
pub fn to_csv_string(rows: &[LitchiRow]) -> Result<String, OutputError> {
    let mut buffer = Vec::new();
    write_csv(rows, &mut buffer)?;
    String::from_utf8(buffer)
        .map_err(|err| OutputError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, err)))
}
