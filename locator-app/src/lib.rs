mod location;
mod state;

use locator_logic::{AcquisitionStatus, FormattedReading};
use log::LevelFilter;
use tauri::{Manager, State};
use tauri_specta::{ErrorHandlingMode, collect_commands, collect_events};

use std::result::Result as StdResult;

use crate::state::{AppLocatorHandle, LocationStatusUpdate, mk_locator};

type Result<T = (), E = String> = StdResult<T, E>;

#[tauri::command]
#[specta::specta]
/// Get the current location status, call after receiving a [LocationStatusUpdate]
async fn get_location_status(state: State<'_, AppLocatorHandle>) -> Result<AcquisitionStatus> {
    Ok(state.status().await)
}

#[tauri::command]
#[specta::specta]
/// Whether a location request is in flight, disable the enable/refresh buttons while true
async fn is_location_busy(state: State<'_, AppLocatorHandle>) -> Result<bool> {
    Ok(state.is_busy().await)
}

#[tauri::command]
#[specta::specta]
/// Request a fresh location fix, used for both the initial "Enable Location" button and
/// refreshing. Returns the status once the request resolves.
async fn request_location(state: State<'_, AppLocatorHandle>) -> Result<AcquisitionStatus> {
    let locator = state.inner().clone();
    locator.request_location().await;
    Ok(locator.status().await)
}

#[tauri::command]
#[specta::specta]
/// The current reading formatted for display, `null` if there isn't one
async fn get_formatted_reading(
    state: State<'_, AppLocatorHandle>,
) -> Result<Option<FormattedReading>> {
    Ok(state.status().await.reading().map(FormattedReading::from))
}

pub fn mk_specta() -> tauri_specta::Builder {
    tauri_specta::Builder::<tauri::Wry>::new()
        .error_handling(ErrorHandlingMode::Throw)
        .commands(collect_commands![
            get_location_status,
            is_location_busy,
            request_location,
            get_formatted_reading,
        ])
        .events(collect_events![LocationStatusUpdate])
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let builder = mk_specta();

    tauri::Builder::default()
        .plugin(
            tauri_plugin_log::Builder::new()
                .level(LevelFilter::Debug)
                .build(),
        )
        .plugin(tauri_plugin_geolocation::init())
        .invoke_handler(builder.invoke_handler())
        .setup(move |app| {
            builder.mount_events(app);

            let locator = mk_locator(app.handle());
            app.manage(locator.clone());
            tauri::async_runtime::spawn(async move {
                locator.check_pre_granted_permission().await;
            });
            Ok(())
        })
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
