use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::provider::PositionPayload;

/// Convenience alias for UTC DT
pub type UtcDT = DateTime<Utc>;

/// Readings less accurate than this many meters get a weak signal advisory
pub const ACCURACY_WARNING_METERS: f64 = 100.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, specta::Type)]
/// A single point-in-time fix from the platform's geolocation API
pub struct LocationReading {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Radius of uncertainty in meters, `None` if the provider couldn't tell us
    pub accuracy_meters: Option<f64>,
    /// When the provider captured this fix, milliseconds since the UNIX epoch
    #[specta(type = f64)]
    pub captured_at_epoch_millis: i64,
    /// Altitude above the WGS84 ellipsoid
    pub altitude_meters: Option<f64>,
    /// Accuracy of the altitude, same rules as `accuracy_meters`
    pub altitude_accuracy_meters: Option<f64>,
    /// Direction of travel, degrees clockwise from true north
    pub heading_degrees: Option<f64>,
    /// Ground speed
    pub speed_meters_per_second: Option<f64>,
}

/// Negative or NaN accuracies mean the provider doesn't know, don't report them as zero
fn sanitize_accuracy(raw: Option<f64>) -> Option<f64> {
    raw.filter(|acc| *acc >= 0.0)
}

impl LocationReading {
    /// Whether the view should warn the user about a weak signal
    pub fn has_weak_accuracy(&self) -> bool {
        self.accuracy_meters
            .is_some_and(|acc| acc > ACCURACY_WARNING_METERS)
    }

    pub fn captured_at(&self) -> Option<UtcDT> {
        DateTime::from_timestamp_millis(self.captured_at_epoch_millis)
    }
}

impl From<PositionPayload> for LocationReading {
    fn from(payload: PositionPayload) -> Self {
        Self {
            latitude: payload.latitude,
            longitude: payload.longitude,
            accuracy_meters: sanitize_accuracy(payload.accuracy),
            captured_at_epoch_millis: payload.timestamp,
            altitude_meters: payload.altitude,
            altitude_accuracy_meters: sanitize_accuracy(payload.altitude_accuracy),
            heading_degrees: payload.heading,
            speed_meters_per_second: payload.speed,
        }
    }
}
