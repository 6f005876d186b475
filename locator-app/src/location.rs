use locator_logic::{
    LocationService, PermissionService, PermissionState, PositionOptions, PositionPayload,
    ProviderError, ProviderErrorCode, prelude::*,
};
use tauri::{AppHandle, plugin::PermissionState as PluginPermissionState};
use tauri_plugin_geolocation::{
    GeolocationExt, PermissionType, Position, PositionOptions as PluginPositionOptions,
};

fn plugin_options(options: PositionOptions) -> PluginPositionOptions {
    PluginPositionOptions {
        enable_high_accuracy: options.enable_high_accuracy,
        timeout: u32::try_from(options.timeout.as_millis()).unwrap_or(u32::MAX),
        maximum_age: u32::try_from(options.maximum_age.as_millis()).unwrap_or(u32::MAX),
    }
}

fn permission_state(state: PluginPermissionState) -> PermissionState {
    match state {
        PluginPermissionState::Granted => PermissionState::Granted,
        PluginPermissionState::Denied => PermissionState::Denied,
        _ => PermissionState::Prompt,
    }
}

/// Only a granted permission may go on to ask for a position, Android won't prompt on its own
fn require_granted(state: PermissionState) -> Result<(), ProviderError> {
    if state == PermissionState::Granted {
        Ok(())
    } else {
        Err(ProviderError::new(
            ProviderErrorCode::PermissionDenied,
            format!("Location permission is {state:?}"),
        ))
    }
}

fn plugin_error(why: impl ToString) -> ProviderError {
    ProviderError::from_detail(why.to_string())
}

/// Ask the user for access if we haven't yet, then get a fix. Blocks until the platform answers.
fn blocking_position(app: &AppHandle, opts: PluginPositionOptions) -> Result<Position, ProviderError> {
    let geo = app.geolocation();

    let mut state = permission_state(geo.check_permissions().map_err(plugin_error)?.location);
    if state == PermissionState::Prompt {
        let status = geo
            .request_permissions(Some(vec![PermissionType::Location]))
            .map_err(plugin_error)?;
        state = permission_state(status.location);
    }
    require_granted(state)?;

    geo.get_current_position(Some(opts)).map_err(plugin_error)
}

/// Gets positions from the geolocation plugin. The desktop side of the plugin only hands
/// back placeholder positions so we only report support on mobile.
pub struct TauriLocation(AppHandle);

impl TauriLocation {
    pub fn new(app: AppHandle) -> Self {
        Self(app)
    }
}

impl LocationService for TauriLocation {
    fn is_supported(&self) -> bool {
        cfg!(mobile)
    }

    async fn get_position(&self, options: PositionOptions) -> Result<PositionPayload, ProviderError> {
        let app = self.0.clone();
        let opts = plugin_options(options);

        let pos = tauri::async_runtime::spawn_blocking(move || blocking_position(&app, opts))
            .await
            .map_err(|why| ProviderError::new(ProviderErrorCode::Unknown, why.to_string()))??;

        let timestamp = i64::try_from(pos.timestamp).map_err(|_| {
            ProviderError::new(
                ProviderErrorCode::Unknown,
                format!("Position timestamp {} out of range", pos.timestamp),
            )
        })?;

        let coords = pos.coords;
        Ok(PositionPayload {
            latitude: coords.latitude,
            longitude: coords.longitude,
            accuracy: Some(coords.accuracy),
            timestamp,
            altitude: coords.altitude,
            altitude_accuracy: coords.altitude_accuracy,
            heading: coords.heading,
            speed: coords.speed,
        })
    }
}

pub struct TauriPermissions(AppHandle);

impl TauriPermissions {
    pub fn new(app: AppHandle) -> Self {
        Self(app)
    }
}

impl PermissionService for TauriPermissions {
    async fn query_permission(&self) -> Result<Option<PermissionState>> {
        if !cfg!(mobile) {
            return Ok(None);
        }

        let app = self.0.clone();
        let status = tauri::async_runtime::spawn_blocking(move || {
            app.geolocation().check_permissions()
        })
        .await
        .context("Permission check task failed")?
        .context("Failed to check geolocation permissions")?;

        Ok(Some(permission_state(status.location)))
    }
}
