use serde::{Deserialize, Serialize};

use crate::reading::LocationReading;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, specta::Type)]
#[serde(tag = "status", content = "data")]
/// Where the location request currently is, exactly one of these holds at a time
pub enum AcquisitionStatus {
    /// Nothing requested yet
    #[default]
    Idle,
    /// Waiting on the platform to come back with a fix
    InFlight,
    /// The most recent request produced this reading
    Succeeded(LocationReading),
    /// The most recent request failed, contains the message to show
    Failed(String),
}

impl AcquisitionStatus {
    /// True iff a request is in flight, used by the view to disable duplicate triggers
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::InFlight)
    }

    pub fn reading(&self) -> Option<&LocationReading> {
        if let Self::Succeeded(reading) = self {
            Some(reading)
        } else {
            None
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        if let Self::Failed(msg) = self {
            Some(msg)
        } else {
            None
        }
    }

    /// Advisory (not an error) that the current fix is imprecise
    pub fn shows_accuracy_warning(&self) -> bool {
        self.reading().is_some_and(LocationReading::has_weak_accuracy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(accuracy: f64) -> LocationReading {
        LocationReading {
            latitude: 1.0,
            longitude: 2.0,
            accuracy_meters: Some(accuracy),
            captured_at_epoch_millis: 0,
            altitude_meters: None,
            altitude_accuracy_meters: None,
            heading_degrees: None,
            speed_meters_per_second: None,
        }
    }

    #[test]
    fn test_only_in_flight_is_busy() {
        assert!(!AcquisitionStatus::Idle.is_busy());
        assert!(AcquisitionStatus::InFlight.is_busy());
        assert!(!AcquisitionStatus::Succeeded(reading(1.0)).is_busy());
        assert!(!AcquisitionStatus::Failed("nope".into()).is_busy());
    }

    #[test]
    fn test_success_never_carries_error_text() {
        let status = AcquisitionStatus::Succeeded(reading(150.0));
        assert!(status.error_message().is_none());
        assert!(status.shows_accuracy_warning());

        let status = AcquisitionStatus::Failed("nope".into());
        assert!(status.reading().is_none());
        assert!(!status.shows_accuracy_warning());
        assert_eq!(status.error_message(), Some("nope"));
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(AcquisitionStatus::Failed("nope".into()))
            .expect("Failed to serialize");
        assert_eq!(json, serde_json::json!({"status": "Failed", "data": "nope"}));

        let json = serde_json::to_value(AcquisitionStatus::Idle).expect("Failed to serialize");
        assert_eq!(json, serde_json::json!({"status": "Idle"}));
    }
}
