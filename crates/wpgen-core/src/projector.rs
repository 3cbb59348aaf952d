//! Projects relative flight offsets into absolute GPS waypoints.
//!
//! Position accumulates leg by leg, but every heading is measured from the
//! flight's initial bearing, never from the previous leg.

use crate::error::Error;
use crate::geodesy::{destination, normalize_bearing};
use crate::models::{AbsoluteWaypoint, InitialPose, RelativeWaypoint};
use crate::rules::FlightRules;

/// Project `waypoints` from `initial` using the default [`FlightRules`].
///
/// The result always holds `waypoints.len() + 1` entries; entry 0 is the
/// synthesized home point at the initial coordinate.
pub fn project(
    initial: &InitialPose,
    waypoints: &[RelativeWaypoint],
) -> Result<Vec<AbsoluteWaypoint>, Error> {
    project_with_rules(initial, waypoints, &FlightRules::default())
}

/// Project `waypoints` from `initial` under explicit altitude rules.
///
/// Every input is validated before the first geodesic is solved, so a
/// failure never yields a partial flight.
pub fn project_with_rules(
    initial: &InitialPose,
    waypoints: &[RelativeWaypoint],
    rules: &FlightRules,
) -> Result<Vec<AbsoluteWaypoint>, Error> {
    rules.validate()?;
    initial.validate()?;
    for (index, waypoint) in waypoints.iter().enumerate() {
        waypoint.validate(index)?;
    }

    let mut projected = Vec::with_capacity(waypoints.len() + 1);
    projected.push(AbsoluteWaypoint {
        index: 0,
        latitude: initial.latitude,
        longitude: initial.longitude,
        altitude: rules.home_altitude_m,
        true_bearing: normalize_bearing(initial.bearing),
        hold_time: 0.0,
    });

    waypoints.iter().enumerate().try_fold(
        (initial.latitude, initial.longitude),
        |(lat, lon), (index, waypoint)| {
            let true_bearing = normalize_bearing(initial.bearing + waypoint.bearing);
            let (next_lat, next_lon) = destination(lat, lon, true_bearing, waypoint.horizontal)
                .map_err(|source| Error::Geodesic {
                    waypoint_index: index,
                    source,
                })?;

            projected.push(AbsoluteWaypoint {
                index: index + 1,
                latitude: next_lat,
                longitude: next_lon,
                altitude: rules.clamp_altitude(waypoint.vertical),
                true_bearing,
                hold_time: waypoint.hold_time,
            });
            Ok::<_, Error>((next_lat, next_lon))
        },
    )?;

    Ok(projected)
}
