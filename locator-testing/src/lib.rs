use std::{
    collections::VecDeque,
    path::Path,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use locator_logic::{
    AcquisitionStatus, LocationService, Locator, PermissionService, PermissionState,
    PositionOptions, PositionPayload, ProviderError, ProviderErrorCode, StatusUpdateSender,
};
use log::debug;
use serde::{Deserialize, Serialize};

pub mod prelude {
    pub use anyhow::{Context, anyhow, bail};
    pub type Result<T = (), E = anyhow::Error> = std::result::Result<T, E>;
}

pub use prelude::*;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
/// What the permission query answers when the locator comes up
pub enum PermissionAnswer {
    Granted,
    Denied,
    Prompt,
    /// The host can't answer permission queries
    #[default]
    Unsupported,
    /// The query itself fails
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// How the scripted provider answers one position request
pub enum ScriptedResponse {
    Fix(PositionPayload),
    Error(ProviderError),
    /// Never answer, the locator's own timeout has to kick in
    Hang,
}

fn yes() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// A scripted run of the locator: mount it, then press the location button a few times
pub struct Scenario {
    #[serde(default)]
    pub permission: PermissionAnswer,
    #[serde(default = "yes")]
    pub geolocation_supported: bool,
    /// Answers for each position request, in order
    #[serde(default)]
    pub responses: Vec<ScriptedResponse>,
    /// Times the user presses the enable/refresh button after mounting
    #[serde(default)]
    pub user_requests: u32,
}

impl Scenario {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse scenario")
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
        Self::from_json(&json)
    }
}

pub struct ScriptedLocation {
    supported: bool,
    responses: Mutex<VecDeque<ScriptedResponse>>,
    calls: AtomicUsize,
}

impl ScriptedLocation {
    pub fn new(supported: bool, responses: Vec<ScriptedResponse>) -> Self {
        Self {
            supported,
            responses: Mutex::new(responses.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl LocationService for ScriptedLocation {
    fn is_supported(&self) -> bool {
        self.supported
    }

    async fn get_position(&self, options: PositionOptions) -> Result<PositionPayload, ProviderError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("Scripted provider call {call} with {options:?}");
        let next = self
            .responses
            .lock()
            .map_err(|_| ProviderError::new(ProviderErrorCode::Unknown, "Script poisoned"))?
            .pop_front();
        match next {
            Some(ScriptedResponse::Fix(payload)) => Ok(payload),
            Some(ScriptedResponse::Error(err)) => Err(err),
            Some(ScriptedResponse::Hang) => std::future::pending().await,
            None => Err(ProviderError::new(
                ProviderErrorCode::Unknown,
                format!("No scripted response for call {call}"),
            )),
        }
    }
}

pub struct ScriptedPermissions(PermissionAnswer);

impl PermissionService for ScriptedPermissions {
    async fn query_permission(&self) -> Result<Option<PermissionState>> {
        match self.0 {
            PermissionAnswer::Granted => Ok(Some(PermissionState::Granted)),
            PermissionAnswer::Denied => Ok(Some(PermissionState::Denied)),
            PermissionAnswer::Prompt => Ok(Some(PermissionState::Prompt)),
            PermissionAnswer::Unsupported => Ok(None),
            PermissionAnswer::Error => bail!("Scripted permission query failure"),
        }
    }
}

/// Records every status the locator pushes out
#[derive(Default)]
pub struct TraceSender(Mutex<Vec<AcquisitionStatus>>);

impl TraceSender {
    fn take(&self) -> Vec<AcquisitionStatus> {
        self.0
            .lock()
            .map(|mut trace| std::mem::take(&mut *trace))
            .unwrap_or_default()
    }
}

impl StatusUpdateSender for TraceSender {
    fn send_update(&self, status: &AcquisitionStatus) {
        if let Ok(mut trace) = self.0.lock() {
            trace.push(status.clone());
        }
    }
}

pub type ScenarioLocator = Locator<ScriptedLocation, ScriptedPermissions, TraceSender>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioReport {
    /// Every status the locator went through, in order
    pub trace: Vec<AcquisitionStatus>,
    pub final_status: AcquisitionStatus,
    pub accuracy_warning: bool,
    /// How many times the position provider was asked for a fix
    pub provider_calls: usize,
}

/// Mount a locator with the scenario's providers, then make the scenario's user requests
pub async fn run_scenario(scenario: Scenario) -> ScenarioReport {
    let locator = ScenarioLocator::new(
        ScriptedLocation::new(scenario.geolocation_supported, scenario.responses),
        ScriptedPermissions(scenario.permission),
        TraceSender::default(),
    );

    locator.check_pre_granted_permission().await;

    for _ in 0..scenario.user_requests {
        locator.request_location().await;
    }

    ScenarioReport {
        final_status: locator.status().await,
        accuracy_warning: locator.shows_accuracy_warning().await,
        trace: locator.status_updates().take(),
        provider_calls: locator.location().calls(),
    }
}

#[cfg(test)]
mod tests {
    use locator_logic::{AcquisitionError, LocationReading};
    use tokio::test;

    use super::*;

    async fn run(json: &str) -> ScenarioReport {
        tokio::time::pause();
        run_scenario(Scenario::from_json(json).expect("Bad scenario")).await
    }

    fn manila() -> LocationReading {
        LocationReading {
            latitude: 14.5995,
            longitude: 120.9842,
            accuracy_meters: Some(12.0),
            captured_at_epoch_millis: 1_700_000_000_000,
            altitude_meters: None,
            altitude_accuracy_meters: None,
            heading_degrees: None,
            speed_meters_per_second: None,
        }
    }

    #[test]
    async fn test_pre_granted_without_user_action() {
        let report = run(include_str!("../scenarios/pre_granted.json")).await;

        assert_eq!(
            report.trace,
            vec![
                AcquisitionStatus::InFlight,
                AcquisitionStatus::Succeeded(manila())
            ]
        );
        assert_eq!(report.provider_calls, 1);
    }

    #[test]
    async fn test_enable_location_button() {
        let report = run(include_str!("../scenarios/enable_location.json")).await;

        assert_eq!(report.final_status, AcquisitionStatus::Succeeded(manila()));
        assert!(!report.accuracy_warning);
        assert_eq!(report.trace.len(), 2);
    }

    #[test]
    async fn test_weak_signal_advisory() {
        let report = run(include_str!("../scenarios/weak_signal.json")).await;

        let reading = report.final_status.reading().expect("Should succeed");
        assert_eq!(reading.accuracy_meters, Some(150.0));
        assert!(report.accuracy_warning);
        assert!(report.final_status.error_message().is_none());
    }

    #[test]
    async fn test_denied_then_retry() {
        let report = run(include_str!("../scenarios/denied_then_retry.json")).await;

        assert_eq!(
            report.trace[1],
            AcquisitionStatus::Failed(AcquisitionError::PermissionDenied.user_message())
        );
        assert_eq!(report.trace[2], AcquisitionStatus::InFlight);
        assert!(matches!(
            report.final_status,
            AcquisitionStatus::Succeeded(_)
        ));
        assert_eq!(report.provider_calls, 2);
    }

    #[test]
    async fn test_unsupported_host() {
        let report = run(include_str!("../scenarios/unsupported.json")).await;

        assert_eq!(
            report.trace,
            vec![AcquisitionStatus::Failed(
                AcquisitionError::Unsupported.user_message()
            )]
        );
        assert_eq!(report.provider_calls, 0);
    }

    #[test]
    async fn test_hanging_provider_times_out() {
        let report = run(include_str!("../scenarios/timeout.json")).await;

        assert_eq!(
            report.final_status,
            AcquisitionStatus::Failed(AcquisitionError::Timeout.user_message())
        );
    }

    #[test]
    async fn test_exhausted_script_is_unknown_error() {
        let report = run(r#"{"user_requests": 1}"#).await;

        let msg = report.final_status.error_message().expect("Should fail");
        assert!(msg.ends_with("No scripted response for call 1"));
    }

    #[test]
    async fn test_bad_scenario_rejected() {
        assert!(Scenario::from_json(r#"{"permission": "maybe"}"#).is_err());
    }
}
