use tracing::{debug, info};
use zbus::blocking::Connection;

use super::errors::ServiceError;
use super::proxy::{DisplayConfigProxyBlocking, Properties, decode_state, encode_layout};
use super::types::{ApplyMethod, DisplayState, LogicalMonitorConfig};

/// Operations the reconciler needs from the compositor.
pub trait DisplayService {
    /// Fetch a fresh snapshot. Every call is a new round trip.
    fn fetch_state(&self) -> Result<DisplayState, ServiceError>;

    /// Apply `layout` against the configuration generation `serial`.
    ///
    /// Uses [`ApplyMethod::Temporary`]: the compositor reverts on its own if
    /// the new configuration fails.
    fn apply(&self, serial: u32, layout: &[LogicalMonitorConfig]) -> Result<(), ServiceError>;
}

/// Blocking client for `org.gnome.Mutter.DisplayConfig` on the session bus.
///
/// The bus connection lives as long as the client and is released on drop.
pub struct DisplayConfigClient {
    proxy: DisplayConfigProxyBlocking<'static>,
    _connection: Connection,
}

impl std::fmt::Debug for DisplayConfigClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisplayConfigClient").finish_non_exhaustive()
    }
}

impl DisplayConfigClient {
    /// Connect to the session bus and bind the display configuration proxy.
    pub fn connect() -> Result<Self, ServiceError> {
        info!(event = "core.display.connect_started");

        let connection = Connection::session().map_err(|e| ServiceError::ConnectionFailed {
            message: e.to_string(),
        })?;
        let proxy = DisplayConfigProxyBlocking::new(&connection).map_err(|e| {
            ServiceError::ConnectionFailed {
                message: e.to_string(),
            }
        })?;

        info!(event = "core.display.connect_completed");
        Ok(Self {
            proxy,
            _connection: connection,
        })
    }
}

impl DisplayService for DisplayConfigClient {
    fn fetch_state(&self) -> Result<DisplayState, ServiceError> {
        debug!(event = "core.display.fetch_started");

        let raw = self
            .proxy
            .get_current_state()
            .map_err(|e| ServiceError::from_call("GetCurrentState", e))?;
        let state = decode_state(raw)?;

        debug!(
            event = "core.display.fetch_completed",
            serial = state.serial,
            monitors = state.monitors.len(),
            logical_monitors = state.logical_monitors.len()
        );
        Ok(state)
    }

    fn apply(&self, serial: u32, layout: &[LogicalMonitorConfig]) -> Result<(), ServiceError> {
        let method = ApplyMethod::Temporary;
        info!(
            event = "core.display.apply_started",
            serial = serial,
            method = method.code(),
            layout = ?layout
        );

        self.proxy
            .apply_monitors_config(
                serial,
                method.code(),
                &encode_layout(layout),
                &Properties::new(),
            )
            .map_err(|e| ServiceError::from_call("ApplyMonitorsConfig", e))?;

        info!(event = "core.display.apply_completed", serial = serial);
        Ok(())
    }
}

impl Drop for DisplayConfigClient {
    fn drop(&mut self) {
        debug!(event = "core.display.connection_released");
    }
}

/// Run `f` with a connected client, releasing the bus connection on every
/// exit path.
pub fn with_display_service<T, E, F>(f: F) -> Result<T, E>
where
    E: From<ServiceError>,
    F: FnOnce(&DisplayConfigClient) -> Result<T, E>,
{
    let client = DisplayConfigClient::connect()?;
    let result = f(&client);
    drop(client);
    result
}
