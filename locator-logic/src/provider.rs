use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Options handed to the platform for a single position request
pub struct PositionOptions {
    pub enable_high_accuracy: bool,
    /// How long the platform has to come back with a fix
    pub timeout: Duration,
    /// Oldest cached fix the platform may return instead of a fresh one
    pub maximum_age: Duration,
}

/// Every acquisition asks for a fresh, high accuracy fix within 15 seconds
pub const ACQUISITION_OPTIONS: PositionOptions = PositionOptions {
    enable_high_accuracy: true,
    timeout: Duration::from_secs(15),
    maximum_age: Duration::ZERO,
};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
/// Raw coordinate payload as handed back by a position provider
pub struct PositionPayload {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: Option<f64>,
    /// Milliseconds since the UNIX epoch
    pub timestamp: i64,
    #[serde(default)]
    pub altitude: Option<f64>,
    #[serde(default)]
    pub altitude_accuracy: Option<f64>,
    #[serde(default)]
    pub heading: Option<f64>,
    #[serde(default)]
    pub speed: Option<f64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
/// Standardized causes a position provider can report
pub enum ProviderErrorCode {
    PermissionDenied,
    PositionUnavailable,
    Timeout,
    Unknown,
}

impl ProviderErrorCode {
    /// Best-effort classification for platform shims that only hand back error text
    pub fn classify(detail: &str) -> Self {
        let detail = detail.to_ascii_lowercase();
        if detail.contains("permission") || detail.contains("denied") {
            Self::PermissionDenied
        } else if detail.contains("timeout") || detail.contains("timed out") {
            Self::Timeout
        } else if detail.contains("unavailable") || detail.contains("disabled") {
            Self::PositionUnavailable
        } else {
            Self::Unknown
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
/// Error handed back by a position provider
pub struct ProviderError {
    pub code: ProviderErrorCode,
    /// Platform supplied detail, shown to the user only for unknown errors
    pub message: String,
}

impl ProviderError {
    pub fn new(code: ProviderErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Build an error from platform text, guessing the code with [ProviderErrorCode::classify]
    pub fn from_detail(detail: impl Into<String>) -> Self {
        let message = detail.into();
        Self {
            code: ProviderErrorCode::classify(&message),
            message,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, specta::Type)]
#[serde(rename_all = "snake_case")]
/// Answer of a permission query for the geolocation capability
pub enum PermissionState {
    Granted,
    Denied,
    Prompt,
}

/// Something that can produce the device's current position
pub trait LocationService: Send + Sync {
    /// Whether the host has a geolocation capability at all, when this is false
    /// [LocationService::get_position] is never called
    fn is_supported(&self) -> bool {
        true
    }

    /// Request a single position fix. Must resolve exactly once.
    fn get_position(
        &self,
        options: PositionOptions,
    ) -> impl Future<Output = Result<PositionPayload, ProviderError>> + Send;
}

/// Something that can tell us whether geolocation access was already granted
pub trait PermissionService: Send + Sync {
    /// Query the permission state, `Ok(None)` means the host can't answer permission queries
    fn query_permission(&self) -> impl Future<Output = Result<Option<PermissionState>>> + Send;
}
