use std::sync::Arc;

use locator_logic::{AcquisitionStatus, Locator, StatusUpdateSender};
use log::error;
use serde::{Deserialize, Serialize};
use tauri::AppHandle;
use tauri_specta::Event;

use crate::location::{TauriLocation, TauriPermissions};

/// The location status has changed, contains the new status
#[derive(Serialize, Deserialize, Clone, Debug, specta::Type, tauri_specta::Event)]
pub struct LocationStatusUpdate(AcquisitionStatus);

pub struct TauriStatusUpdateSender(AppHandle);

impl TauriStatusUpdateSender {
    fn new(app: &AppHandle) -> Self {
        Self(app.clone())
    }
}

impl StatusUpdateSender for TauriStatusUpdateSender {
    fn send_update(&self, status: &AcquisitionStatus) {
        if let Err(why) = LocationStatusUpdate(status.clone()).emit(&self.0) {
            error!("Error sending location status update to UI: {why:?}");
        }
    }
}

pub type AppLocator = Locator<TauriLocation, TauriPermissions, TauriStatusUpdateSender>;

pub type AppLocatorHandle = Arc<AppLocator>;

pub fn mk_locator(app: &AppHandle) -> AppLocatorHandle {
    Arc::new(Locator::new(
        TauriLocation::new(app.clone()),
        TauriPermissions::new(app.clone()),
        TauriStatusUpdateSender::new(app),
    ))
}
