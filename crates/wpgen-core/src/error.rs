//! Error taxonomy for projection, export and output.

use std::path::PathBuf;

/// Why a field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationReason {
    #[error("is missing")]
    Missing,
    #[error("is not a number")]
    NotNumeric,
    #[error("must be finite")]
    NonFinite,
    #[error("is out of range")]
    OutOfRange,
    #[error("must not be negative")]
    Negative,
    #[error("has the wrong shape")]
    WrongShape,
}

/// An input field failed validation before any geodesic work started.
///
/// `waypoint_index` is the 0-based position in the relative waypoint list
/// (or, for exported rows, the absolute waypoint index). Flight-wide fields
/// carry `None`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{field} {reason}{}", location(.waypoint_index))]
pub struct ValidationError {
    pub field: String,
    pub waypoint_index: Option<usize>,
    pub reason: ValidationReason,
}

fn location(index: &Option<usize>) -> String {
    match index {
        Some(index) => format!(" (waypoint {index})"),
        None => String::new(),
    }
}

impl ValidationError {
    pub fn new(field: impl Into<String>, waypoint_index: Option<usize>, reason: ValidationReason) -> Self {
        Self {
            field: field.into(),
            waypoint_index,
            reason,
        }
    }

    /// Pass `value` through if finite.
    pub fn check_finite(field: &str, waypoint_index: Option<usize>, value: f64) -> Result<f64, Self> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(Self::new(field, waypoint_index, ValidationReason::NonFinite))
        }
    }
}

/// The direct geodesic solver produced a non-finite coordinate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error(
    "geodesic from ({lat}, {lon}) along {bearing_deg} deg for {distance_m} m did not resolve"
)]
pub struct GeodesicError {
    pub lat: f64,
    pub lon: f64,
    pub bearing_deg: f64,
    pub distance_m: f64,
}

/// Failure while naming or writing an output file.
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("run counter {path:?} holds {contents:?}, expected an integer")]
    CorruptCounter { path: PathBuf, contents: String },
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("waypoint {waypoint_index}: {source}")]
    Geodesic {
        waypoint_index: usize,
        #[source]
        source: GeodesicError,
    },
    #[error(transparent)]
    Output(#[from] OutputError),
}
