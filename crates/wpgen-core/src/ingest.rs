//! Loose JSON request ingestion.
//!
//! Front-ends send waypoints either keyed by canonical names, keyed by the
//! table labels shown to the user, or as bare `[h, v, b, t]` arrays. All of
//! that is folded into the typed records here so the projector only ever
//! sees [`RelativeWaypoint`].

use serde_json::{Map, Value};

use crate::error::{ValidationError, ValidationReason};
use crate::models::{ExportConfig, InitialPose, RelativeWaypoint};

/// (canonical key, display label) for each waypoint field, in tuple order.
const WAYPOINT_FIELDS: [(&str, &str); 4] = [
    ("horizontal", "Horizontal (m)"),
    ("vertical", "Vertical (m)"),
    ("bearing", "Bearing (°)"),
    ("hold_time", "Hold (s)"),
];

/// A fully typed generate request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    pub initial: InitialPose,
    pub waypoints: Vec<RelativeWaypoint>,
    pub config: ExportConfig,
    /// Positions in the submitted list that were neither objects nor
    /// arrays of at least four values
    pub skipped: Vec<usize>,
}

/// Parse a generate request body.
///
/// `init_lat`, `init_lon` and `init_bearing` are required. Export settings
/// fall back to [`ExportConfig::default`]. Missing waypoint fields read as 0.
pub fn parse_generate_request(body: &Value) -> Result<GenerateRequest, ValidationError> {
    let object = body
        .as_object()
        .ok_or_else(|| ValidationError::new("body", None, ValidationReason::WrongShape))?;

    let initial = InitialPose {
        latitude: required_number(object, "init_lat")?,
        longitude: required_number(object, "init_lon")?,
        bearing: required_number(object, "init_bearing")?,
    };

    let defaults = ExportConfig::default();
    let config = ExportConfig {
        poi_altitude: optional_number(object, "poi_altitude")?.unwrap_or(defaults.poi_altitude),
        speed_start: optional_number(object, "speed_start")?.unwrap_or(defaults.speed_start),
        curve_size: optional_number(object, "curve_size")?.unwrap_or(defaults.curve_size),
        gimbal_pitch: optional_number(object, "gimbal_pitch")?.unwrap_or(defaults.gimbal_pitch),
        photo_interval: optional_number(object, "photo_interval")?
            .unwrap_or(defaults.photo_interval),
    };

    let entries = match object.get("waypoints") {
        None | Some(Value::Null) => &[][..],
        Some(Value::Array(entries)) => entries.as_slice(),
        Some(_) => {
            return Err(ValidationError::new(
                "waypoints",
                None,
                ValidationReason::WrongShape,
            ))
        }
    };

    let mut waypoints = Vec::with_capacity(entries.len());
    let mut skipped = Vec::new();
    for (index, entry) in entries.iter().enumerate() {
        match entry {
            Value::Object(fields) => waypoints.push(waypoint_from_object(fields, index)?),
            Value::Array(values) if values.len() >= WAYPOINT_FIELDS.len() => {
                waypoints.push(waypoint_from_array(values, index)?)
            }
            _ => skipped.push(index),
        }
    }

    Ok(GenerateRequest {
        initial,
        waypoints,
        config,
        skipped,
    })
}

fn waypoint_from_object(
    fields: &Map<String, Value>,
    index: usize,
) -> Result<RelativeWaypoint, ValidationError> {
    let mut values = [0.0; 4];
    for (slot, (key, label)) in values.iter_mut().zip(WAYPOINT_FIELDS) {
        // A present canonical value wins, zero included; only null or blank
        // falls through to the display label.
        let raw = [key, label]
            .into_iter()
            .filter_map(|name| fields.get(name))
            .find(|value| !is_blank(value));
        if let Some(raw) = raw {
            *slot = coerce_number(raw)
                .ok_or_else(|| ValidationError::new(key, Some(index), ValidationReason::NotNumeric))?;
        }
    }
    let [horizontal, vertical, bearing, hold_time] = values;
    Ok(RelativeWaypoint::new(horizontal, vertical, bearing, hold_time))
}

fn waypoint_from_array(values: &[Value], index: usize) -> Result<RelativeWaypoint, ValidationError> {
    let mut parsed = [0.0; 4];
    for ((slot, raw), (key, _)) in parsed.iter_mut().zip(values).zip(WAYPOINT_FIELDS) {
        *slot = coerce_number(raw)
            .ok_or_else(|| ValidationError::new(key, Some(index), ValidationReason::NotNumeric))?;
    }
    let [horizontal, vertical, bearing, hold_time] = parsed;
    Ok(RelativeWaypoint::new(horizontal, vertical, bearing, hold_time))
}

fn required_number(object: &Map<String, Value>, key: &str) -> Result<f64, ValidationError> {
    optional_number(object, key)?
        .ok_or_else(|| ValidationError::new(key, None, ValidationReason::Missing))
}

fn optional_number(object: &Map<String, Value>, key: &str) -> Result<Option<f64>, ValidationError> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => coerce_number(value)
            .map(Some)
            .ok_or_else(|| ValidationError::new(key, None, ValidationReason::NotNumeric)),
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.trim().is_empty(),
        _ => false,
    }
}

/// JSON numbers, or strings that parse as one.
fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_canonical_request_with_defaults() {
        let body = json!({
            "init_lat": 33.6846,
            "init_lon": -117.8265,
            "init_bearing": 45,
            "waypoints": [
                {"horizontal": 100, "vertical": 30, "bearing": 0, "hold_time": 2.5}
            ]
        });
        let request = parse_generate_request(&body).unwrap();
        assert_eq!(request.initial, InitialPose::new(33.6846, -117.8265, 45.0));
        assert_eq!(request.config, ExportConfig::default());
        assert_eq!(
            request.waypoints,
            vec![RelativeWaypoint::new(100.0, 30.0, 0.0, 2.5)]
        );
        assert!(request.skipped.is_empty());
    }

    #[test]
    fn accepts_display_labels_arrays_and_numeric_strings() {
        let body = json!({
            "init_lat": "10.5",
            "init_lon": 20,
            "init_bearing": 0,
            "speed_start": "3",
            "photo_interval": 4,
            "waypoints": [
                {"Horizontal (m)": 50, "Vertical (m)": "12", "Bearing (°)": -30, "Hold (s)": 1},
                [25, 8, 90, 0.5],
                {"horizontal": 10, "Horizontal (m)": 99},
                {"horizontal": "", "Horizontal (m)": 7}
            ]
        });
        let request = parse_generate_request(&body).unwrap();
        assert_eq!(request.initial.latitude, 10.5);
        assert_eq!(request.config.speed_start, 3.0);
        assert_eq!(request.config.photo_interval, 4.0);
        assert_eq!(request.config.poi_altitude, 1.0);
        assert_eq!(
            request.waypoints,
            vec![
                RelativeWaypoint::new(50.0, 12.0, -30.0, 1.0),
                RelativeWaypoint::new(25.0, 8.0, 90.0, 0.5),
                RelativeWaypoint::new(10.0, 0.0, 0.0, 0.0),
                RelativeWaypoint::new(7.0, 0.0, 0.0, 0.0),
            ]
        );
    }

    #[test]
    fn canonical_zero_is_not_replaced_by_label() {
        let body = json!({
            "init_lat": 0, "init_lon": 0, "init_bearing": 0,
            "waypoints": [
                {"horizontal": 0, "Horizontal (m)": 5, "vertical": null, "Vertical (m)": 9}
            ]
        });
        let request = parse_generate_request(&body).unwrap();
        assert_eq!(
            request.waypoints,
            vec![RelativeWaypoint::new(0.0, 9.0, 0.0, 0.0)]
        );
    }

    #[test]
    fn short_arrays_and_scalars_are_skipped() {
        let body = json!({
            "init_lat": 0, "init_lon": 0, "init_bearing": 0,
            "waypoints": [[1, 2, 3], 42, [1, 2, 3, 4, 5]]
        });
        let request = parse_generate_request(&body).unwrap();
        assert_eq!(request.skipped, vec![0, 1]);
        assert_eq!(
            request.waypoints,
            vec![RelativeWaypoint::new(1.0, 2.0, 3.0, 4.0)]
        );
    }

    #[test]
    fn missing_initial_field_is_reported() {
        let body = json!({"init_lat": 1, "init_bearing": 0});
        let err = parse_generate_request(&body).unwrap_err();
        assert_eq!(err.field, "init_lon");
        assert_eq!(err.reason, ValidationReason::Missing);
    }

    #[test]
    fn non_numeric_waypoint_field_names_position() {
        let body = json!({
            "init_lat": 0, "init_lon": 0, "init_bearing": 0,
            "waypoints": [
                {"horizontal": 1},
                {"vertical": "high"}
            ]
        });
        let err = parse_generate_request(&body).unwrap_err();
        assert_eq!(err.field, "vertical");
        assert_eq!(err.waypoint_index, Some(1));
        assert_eq!(err.reason, ValidationReason::NotNumeric);
    }

    #[test]
    fn nan_strings_pass_through_for_projector_to_reject() {
        let body = json!({
            "init_lat": 0, "init_lon": 0, "init_bearing": "NaN"
        });
        let request = parse_generate_request(&body).unwrap();
        assert!(request.initial.bearing.is_nan());
    }

    #[test]
    fn waypoints_must_be_a_list() {
        let body = json!({
            "init_lat": 0, "init_lon": 0, "init_bearing": 0,
            "waypoints": {"horizontal": 1}
        });
        let err = parse_generate_request(&body).unwrap_err();
        assert_eq!(err.field, "waypoints");
        assert_eq!(err.reason, ValidationReason::WrongShape);
    }
}
