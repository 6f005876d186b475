use std::time::Duration;

use log::{debug, info, warn};
use tokio::sync::RwLock;

use crate::{
    error::AcquisitionError,
    provider::{ACQUISITION_OPTIONS, LocationService, PermissionService, PermissionState},
    reading::LocationReading,
    status::AcquisitionStatus,
};

/// Extra time the provider gets on top of its own timeout before we give up on it
const PROVIDER_GRACE: Duration = Duration::from_secs(1);

pub trait StatusUpdateSender: Send + Sync {
    fn send_update(&self, status: &AcquisitionStatus);
}

#[derive(Debug, Clone, PartialEq)]
/// What became of a single call to [Locator::request_location]
pub enum RequestOutcome {
    /// The request resolved and produced this status
    Applied(AcquisitionStatus),
    /// A newer request was issued before this one resolved, its result was dropped
    Superseded,
}

#[derive(Default)]
struct LocatorState {
    status: AcquisitionStatus,
    /// Id of the newest request issued, only its result may be applied
    latest_request: u64,
}

/// Owns the acquisition status and is the only thing allowed to change it.
/// Gets fixes from a [LocationService], checks for pre-granted access with a
/// [PermissionService] and pushes every transition to a [StatusUpdateSender].
pub struct Locator<L: LocationService, P: PermissionService, S: StatusUpdateSender> {
    state: RwLock<LocatorState>,
    location: L,
    permissions: P,
    status_updates: S,
}

impl<L: LocationService, P: PermissionService, S: StatusUpdateSender> Locator<L, P, S> {
    pub fn new(location: L, permissions: P, status_updates: S) -> Self {
        Self {
            state: RwLock::new(LocatorState::default()),
            location,
            permissions,
            status_updates,
        }
    }

    pub fn location(&self) -> &L {
        &self.location
    }

    pub fn status_updates(&self) -> &S {
        &self.status_updates
    }

    pub async fn status(&self) -> AcquisitionStatus {
        self.state.read().await.status.clone()
    }

    pub async fn is_busy(&self) -> bool {
        self.state.read().await.status.is_busy()
    }

    pub async fn shows_accuracy_warning(&self) -> bool {
        self.state.read().await.status.shows_accuracy_warning()
    }

    fn set_status(&self, state: &mut LocatorState, status: AcquisitionStatus) {
        state.status = status;
        self.status_updates.send_update(&state.status);
    }

    /// Move to `InFlight` and hand out the id of the new request
    async fn begin_request(&self) -> u64 {
        let mut state = self.state.write().await;
        state.latest_request += 1;
        let id = state.latest_request;
        self.set_status(&mut state, AcquisitionStatus::InFlight);
        id
    }

    async fn acquire(&self) -> Result<LocationReading, AcquisitionError> {
        let budget = ACQUISITION_OPTIONS.timeout + PROVIDER_GRACE;
        let res = tokio::time::timeout(budget, self.location.get_position(ACQUISITION_OPTIONS))
            .await
            .map_err(|_| AcquisitionError::Timeout)?;
        Ok(LocationReading::from(res?))
    }

    /// Request a fresh fix from the platform. Any earlier request still in flight is
    /// superseded, its result will be dropped when it arrives.
    pub async fn request_location(&self) -> RequestOutcome {
        if !self.location.is_supported() {
            warn!("Geolocation is not supported on this host, not requesting location");
            let mut state = self.state.write().await;
            state.latest_request += 1;
            let status = AcquisitionStatus::Failed(AcquisitionError::Unsupported.user_message());
            self.set_status(&mut state, status.clone());
            return RequestOutcome::Applied(status);
        }

        let id = self.begin_request().await;
        info!("Requesting location (request {id})");

        let res = self.acquire().await;

        let mut state = self.state.write().await;
        if state.latest_request != id {
            debug!(
                "Dropping result of request {id}, request {} is newer",
                state.latest_request
            );
            return RequestOutcome::Superseded;
        }

        let status = match res {
            Ok(reading) => {
                info!(
                    "Got location for request {id} (accuracy: {:?}m)",
                    reading.accuracy_meters
                );
                AcquisitionStatus::Succeeded(reading)
            }
            Err(why) => {
                warn!("Failed to get location for request {id}: {why:?}");
                AcquisitionStatus::Failed(why.user_message())
            }
        };

        self.set_status(&mut state, status.clone());
        RequestOutcome::Applied(status)
    }

    /// Run once when the component comes up. If the user already granted location
    /// access we don't need to wait for them to ask, request a fix right away.
    pub async fn check_pre_granted_permission(&self) -> Option<RequestOutcome> {
        match self.permissions.query_permission().await {
            Ok(Some(PermissionState::Granted)) => {
                info!("Location permission already granted, requesting location");
                Some(self.request_location().await)
            }
            Ok(Some(state)) => {
                debug!("Location permission is {state:?}, waiting for user");
                None
            }
            Ok(None) => {
                debug!("Permission queries aren't supported, waiting for user");
                None
            }
            Err(why) => {
                warn!("Failed to query location permission: {why:?}");
                None
            }
        }
    }
}
