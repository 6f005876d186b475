use serde::{Deserialize, Serialize};

use crate::reading::LocationReading;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, specta::Type)]
/// A [LocationReading] rendered to the strings the location card shows
pub struct FormattedReading {
    pub latitude: String,
    pub longitude: String,
    pub accuracy: String,
    pub captured_at: String,
    pub altitude: Option<String>,
    pub heading: Option<String>,
    pub speed: Option<String>,
    /// Show the weak signal advisory
    pub accuracy_warning: bool,
}

impl From<&LocationReading> for FormattedReading {
    fn from(reading: &LocationReading) -> Self {
        Self {
            latitude: format!("{:.6}", reading.latitude),
            longitude: format!("{:.6}", reading.longitude),
            accuracy: reading
                .accuracy_meters
                .map(|acc| format!("±{acc:.0} m"))
                .unwrap_or_else(|| "unknown".to_string()),
            captured_at: reading
                .captured_at()
                .map(|dt| dt.to_rfc3339())
                .unwrap_or_else(|| reading.captured_at_epoch_millis.to_string()),
            altitude: reading.altitude_meters.map(|alt| format!("{alt:.1} m")),
            heading: reading.heading_degrees.map(|h| format!("{h:.0}°")),
            speed: reading
                .speed_meters_per_second
                .map(|s| format!("{s:.1} m/s")),
            accuracy_warning: reading.has_weak_accuracy(),
        }
    }
}
