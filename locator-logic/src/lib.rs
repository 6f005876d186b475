mod display;
mod error;
mod locator;
mod provider;
mod reading;
mod status;

pub use display::FormattedReading;
pub use error::AcquisitionError;
pub use locator::{Locator, RequestOutcome, StatusUpdateSender};
pub use provider::{
    ACQUISITION_OPTIONS, LocationService, PermissionService, PermissionState, PositionOptions,
    PositionPayload, ProviderError, ProviderErrorCode,
};
pub use reading::{ACCURACY_WARNING_METERS, LocationReading, UtcDT};
pub use status::AcquisitionStatus;

pub mod prelude {
    use anyhow::Error as AnyhowError;
    use std::result::Result as StdResult;
    pub type Result<T = (), E = AnyhowError> = StdResult<T, E>;
    pub use anyhow::Context;
}
