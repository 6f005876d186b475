use std::fmt;

use crate::provider::{ProviderError, ProviderErrorCode};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Why a location request failed, each variant maps to one message shown to the user
pub enum AcquisitionError {
    /// User declined or revoked access
    PermissionDenied,
    /// The provider couldn't resolve a fix
    PositionUnavailable,
    /// No fix within the time budget
    Timeout,
    /// Anything else, carries the provider's detail
    Unknown(String),
    /// The host has no geolocation capability, no request was made
    Unsupported,
}

impl AcquisitionError {
    /// The human readable message the view shows for this error
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

impl From<ProviderError> for AcquisitionError {
    fn from(err: ProviderError) -> Self {
        match err.code {
            ProviderErrorCode::PermissionDenied => Self::PermissionDenied,
            ProviderErrorCode::PositionUnavailable => Self::PositionUnavailable,
            ProviderErrorCode::Timeout => Self::Timeout,
            ProviderErrorCode::Unknown => Self::Unknown(err.message),
        }
    }
}

impl fmt::Display for AcquisitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PermissionDenied => write!(
                f,
                "Location access was denied. Please enable location permissions in your device settings."
            ),
            Self::PositionUnavailable => write!(
                f,
                "Location information is unavailable. Please make sure location services are turned on."
            ),
            Self::Timeout => write!(
                f,
                "The request to get your location timed out. Please try again."
            ),
            Self::Unknown(detail) => write!(
                f,
                "An unknown error occurred while getting your location: {detail}"
            ),
            Self::Unsupported => write!(f, "Geolocation is not supported on this device."),
        }
    }
}

impl std::error::Error for AcquisitionError {}
