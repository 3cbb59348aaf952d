//! Core data models for waypoint generation.

use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, ValidationReason};

/// One leg of the flight, expressed relative to the previous point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RelativeWaypoint {
    /// Distance from the previous point in meters
    pub horizontal: f64,
    /// Target altitude in meters (absolute, not a climb)
    pub vertical: f64,
    /// Degrees offset from the flight's initial bearing
    pub bearing: f64,
    /// Seconds to hold at the waypoint
    #[serde(default)]
    pub hold_time: f64,
}

impl RelativeWaypoint {
    pub fn new(horizontal: f64, vertical: f64, bearing: f64, hold_time: f64) -> Self {
        Self {
            horizontal,
            vertical,
            bearing,
            hold_time,
        }
    }

    pub(crate) fn validate(&self, index: usize) -> Result<(), ValidationError> {
        let at = Some(index);
        ValidationError::check_finite("horizontal", at, self.horizontal)?;
        ValidationError::check_finite("vertical", at, self.vertical)?;
        ValidationError::check_finite("bearing", at, self.bearing)?;
        let hold_time = ValidationError::check_finite("hold_time", at, self.hold_time)?;
        if hold_time < 0.0 {
            return Err(ValidationError::new(
                "hold_time",
                at,
                ValidationReason::Negative,
            ));
        }
        Ok(())
    }
}

/// Where the flight starts and which way it is facing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InitialPose {
    pub latitude: f64,
    pub longitude: f64,
    /// Degrees clockwise from true north
    pub bearing: f64,
}

impl InitialPose {
    pub fn new(latitude: f64, longitude: f64, bearing: f64) -> Self {
        Self {
            latitude,
            longitude,
            bearing,
        }
    }

    pub(crate) fn validate_position(&self) -> Result<(), ValidationError> {
        let latitude = ValidationError::check_finite("init_lat", None, self.latitude)?;
        ValidationError::check_finite("init_lon", None, self.longitude)?;
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(ValidationError::new(
                "init_lat",
                None,
                ValidationReason::OutOfRange,
            ));
        }
        Ok(())
    }

    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        self.validate_position()?;
        ValidationError::check_finite("init_bearing", None, self.bearing)?;
        Ok(())
    }
}

/// A projected waypoint. Index 0 is the synthesized home point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AbsoluteWaypoint {
    pub index: usize,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    /// Compass heading in [0, 360)
    pub true_bearing: f64,
    pub hold_time: f64,
}

/// Flight-wide settings copied onto every exported row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_poi_altitude")]
    pub poi_altitude: f64,
    #[serde(default)]
    pub speed_start: f64,
    #[serde(default)]
    pub curve_size: f64,
    #[serde(default)]
    pub gimbal_pitch: f64,
    #[serde(default = "default_photo_interval")]
    pub photo_interval: f64,
}

fn default_poi_altitude() -> f64 {
    1.0
}

fn default_photo_interval() -> f64 {
    1.0
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            poi_altitude: default_poi_altitude(),
            speed_start: 0.0,
            curve_size: 0.0,
            gimbal_pitch: 0.0,
            photo_interval: default_photo_interval(),
        }
    }
}

impl ExportConfig {
    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        ValidationError::check_finite("poi_altitude", None, self.poi_altitude)?;
        ValidationError::check_finite("speed_start", None, self.speed_start)?;
        ValidationError::check_finite("curve_size", None, self.curve_size)?;
        ValidationError::check_finite("gimbal_pitch", None, self.gimbal_pitch)?;
        ValidationError::check_finite("photo_interval", None, self.photo_interval)?;
        Ok(())
    }
}
