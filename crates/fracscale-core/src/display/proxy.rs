//! Client proxy for `org.gnome.Mutter.DisplayConfig`.
//!
//! The service speaks in positional tuples. They are converted to the named
//! types in [`super::types`] right here so nothing else indexes into them.

use std::collections::HashMap;

use zbus::proxy;
use zbus::zvariant::{OwnedValue, Value};

use super::errors::ServiceError;
use super::types::{
    ConnectedMonitor, DisplayMode, DisplayState, LogicalMonitor, LogicalMonitorConfig,
    MonitorSpec, Transform,
};

pub(crate) type Properties = HashMap<String, OwnedValue>;

/// `(ssss)`: connector, vendor, product, serial.
pub(crate) type RawMonitorSpec = (String, String, String, String);

/// `(siiddada{sv})`: id, width, height, refresh rate, preferred scale,
/// supported scales, properties.
pub(crate) type RawMode = (String, i32, i32, f64, f64, Vec<f64>, Properties);

/// `((ssss)a(siiddada{sv})a{sv})`
pub(crate) type RawMonitor = (RawMonitorSpec, Vec<RawMode>, Properties);

/// `(iiduba(ssss)a{sv})`: x, y, scale, transform, primary, monitors, properties.
pub(crate) type RawLogicalMonitor = (i32, i32, f64, u32, bool, Vec<RawMonitorSpec>, Properties);

pub(crate) type RawState = (u32, Vec<RawMonitor>, Vec<RawLogicalMonitor>, Properties);

/// `(ssa{sv})`: connector, mode id, properties.
pub(crate) type RawMonitorAssignment = (String, String, Properties);

/// `(iiduba(ssa{sv}))`
pub(crate) type RawLogicalMonitorConfig = (i32, i32, f64, u32, bool, Vec<RawMonitorAssignment>);

/// D-Bus proxy for Mutter's display configuration service.
#[proxy(
    interface = "org.gnome.Mutter.DisplayConfig",
    default_service = "org.gnome.Mutter.DisplayConfig",
    default_path = "/org/gnome/Mutter/DisplayConfig"
)]
pub(crate) trait DisplayConfig {
    /// Returns the serial, connected monitors, logical monitors and global
    /// properties.
    fn get_current_state(&self) -> zbus::Result<RawState>;

    /// Method codes: 0 verify, 1 temporary, 2 persistent.
    fn apply_monitors_config(
        &self,
        serial: u32,
        method: u32,
        logical_monitors: &[RawLogicalMonitorConfig],
        properties: &Properties,
    ) -> zbus::Result<()>;
}

fn flag(properties: &Properties, name: &str) -> bool {
    matches!(properties.get(name).map(|v| &**v), Some(Value::Bool(true)))
}

fn string_property(properties: &Properties, name: &str) -> Option<String> {
    match properties.get(name).map(|v| &**v) {
        Some(Value::Str(s)) => Some(s.as_str().to_string()),
        _ => None,
    }
}

fn decode_spec((connector, vendor, product, serial): RawMonitorSpec) -> MonitorSpec {
    MonitorSpec {
        connector,
        vendor,
        product,
        serial,
    }
}

fn decode_mode(
    (id, width, height, refresh_rate, preferred_scale, supported_scales, properties): RawMode,
) -> DisplayMode {
    DisplayMode {
        id,
        width,
        height,
        refresh_rate,
        preferred_scale,
        supported_scales,
        is_current: flag(&properties, "is-current"),
        is_preferred: flag(&properties, "is-preferred"),
    }
}

fn decode_monitor((spec, modes, properties): RawMonitor) -> ConnectedMonitor {
    ConnectedMonitor {
        spec: decode_spec(spec),
        modes: modes.into_iter().map(decode_mode).collect(),
        display_name: string_property(&properties, "display-name"),
    }
}

fn decode_logical_monitor(
    (x, y, scale, transform, primary, monitors, _properties): RawLogicalMonitor,
) -> Result<LogicalMonitor, ServiceError> {
    if monitors.is_empty() {
        return Err(ServiceError::MalformedState {
            message: format!("logical monitor at {},{} has no monitors", x, y),
        });
    }
    Ok(LogicalMonitor {
        x,
        y,
        scale,
        transform: Transform(transform),
        primary,
        monitors: monitors.into_iter().map(decode_spec).collect(),
    })
}

/// Convert a `GetCurrentState` reply into a [`DisplayState`].
pub(crate) fn decode_state(
    (serial, monitors, logical_monitors, _properties): RawState,
) -> Result<DisplayState, ServiceError> {
    Ok(DisplayState {
        serial,
        monitors: monitors.into_iter().map(decode_monitor).collect(),
        logical_monitors: logical_monitors
            .into_iter()
            .map(decode_logical_monitor)
            .collect::<Result<_, _>>()?,
    })
}

/// Convert layout entries into `ApplyMonitorsConfig` arguments.
pub(crate) fn encode_layout(layout: &[LogicalMonitorConfig]) -> Vec<RawLogicalMonitorConfig> {
    layout
        .iter()
        .map(|config| {
            (
                config.x,
                config.y,
                config.scale,
                config.transform.0,
                config.primary,
                config
                    .monitors
                    .iter()
                    .map(|m| (m.connector.clone(), m.mode_id.clone(), Properties::new()))
                    .collect(),
            )
        })
        .collect()
}
