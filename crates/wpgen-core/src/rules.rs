//! Altitude rules applied while projecting a flight.

use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, ValidationReason};

/// Altitude policy for generated waypoints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlightRules {
    /// Altitude assigned to the synthesized home waypoint in meters
    pub home_altitude_m: f64,
    /// Hard floor for every projected waypoint in meters
    pub min_waypoint_altitude_m: f64,
}

impl Default for FlightRules {
    fn default() -> Self {
        Self {
            home_altitude_m: 5.0,
            min_waypoint_altitude_m: 2.0,
        }
    }
}

impl FlightRules {
    /// Altitude for a projected waypoint given the requested value.
    pub fn clamp_altitude(&self, requested_m: f64) -> f64 {
        requested_m.max(self.min_waypoint_altitude_m)
    }

    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        ValidationError::check_finite("home_altitude_m", None, self.home_altitude_m)?;
        let floor =
            ValidationError::check_finite("min_waypoint_altitude_m", None, self.min_waypoint_altitude_m)?;
        if floor < 0.0 {
            return Err(ValidationError::new(
                "min_waypoint_altitude_m",
                None,
                ValidationReason::Negative,
            ));
        }
        Ok(())
    }
}
