//! Application lifecycle events shared by every command.

use tracing::{error, info, warn};

use crate::errors::FracscaleError;

pub fn log_app_startup() {
    info!(
        event = "core.app.startup_completed",
        version = env!("CARGO_PKG_VERSION")
    );
}

pub fn log_app_shutdown() {
    info!(event = "core.app.shutdown_started");
}

/// User errors (bad input, unsupported hardware) are warnings, the rest errors.
pub fn log_app_error<E: FracscaleError>(error: &E) {
    if error.is_user_error() {
        warn!(
            event = "core.app.error_occurred",
            error_code = error.error_code(),
            error = %error
        );
    } else {
        error!(
            event = "core.app.error_occurred",
            error_code = error.error_code(),
            error = %error
        );
    }
}
