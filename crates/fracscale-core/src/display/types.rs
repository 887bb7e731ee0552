use serde::Serialize;

/// Snapshot of the compositor's monitor configuration.
///
/// `serial` identifies the configuration generation; applying a layout with
/// an outdated serial is rejected by the compositor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayState {
    pub serial: u32,
    pub monitors: Vec<ConnectedMonitor>,
    pub logical_monitors: Vec<LogicalMonitor>,
}

impl DisplayState {
    /// The logical monitor flagged as primary.
    pub fn primary_logical_monitor(&self) -> Option<&LogicalMonitor> {
        self.logical_monitors.iter().find(|m| m.primary)
    }

    /// The connected monitor plugged into `connector`.
    pub fn find_monitor(&self, connector: &str) -> Option<&ConnectedMonitor> {
        self.monitors
            .iter()
            .find(|m| m.spec.connector == connector)
    }
}

/// Hardware identity of a monitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonitorSpec {
    /// Port name, e.g. `DP-1`.
    pub connector: String,
    pub vendor: String,
    pub product: String,
    pub serial: String,
}

/// A physical output and the modes it supports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectedMonitor {
    pub spec: MonitorSpec,
    pub modes: Vec<DisplayMode>,
    /// Human readable name, when the compositor provides one.
    pub display_name: Option<String>,
}

impl ConnectedMonitor {
    pub fn connector(&self) -> &str {
        &self.spec.connector
    }

    /// The mode the monitor is currently driven at.
    pub fn current_mode(&self) -> Option<&DisplayMode> {
        self.modes.iter().find(|m| m.is_current)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayMode {
    /// Mode identifier, e.g. `1920x1080@119.982`.
    pub id: String,
    pub width: i32,
    pub height: i32,
    pub refresh_rate: f64,
    pub preferred_scale: f64,
    pub supported_scales: Vec<f64>,
    pub is_current: bool,
    pub is_preferred: bool,
}

/// Rotation/reflection code, passed through untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Transform(pub u32);

impl Transform {
    pub const NORMAL: Transform = Transform(0);
}

/// A positioned, scaled region made up of one or more monitors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogicalMonitor {
    pub x: i32,
    pub y: i32,
    pub scale: f64,
    pub transform: Transform,
    pub primary: bool,
    pub monitors: Vec<MonitorSpec>,
}

impl LogicalMonitor {
    /// Connector of the first monitor assigned to this logical monitor.
    pub fn connector(&self) -> Option<&str> {
        self.monitors.first().map(|m| m.connector.as_str())
    }
}

/// Layout entry sent to `ApplyMonitorsConfig`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogicalMonitorConfig {
    pub x: i32,
    pub y: i32,
    pub scale: f64,
    pub transform: Transform,
    pub primary: bool,
    pub monitors: Vec<MonitorAssignment>,
}

/// Drive `connector` at the mode identified by `mode_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonitorAssignment {
    pub connector: String,
    pub mode_id: String,
}

/// How the compositor should treat an applied configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplyMethod {
    /// Validate only.
    Verify,
    /// Apply, reverting automatically unless confirmed.
    Temporary,
    /// Apply and store.
    Persistent,
}

impl ApplyMethod {
    pub fn code(&self) -> u32 {
        match self {
            ApplyMethod::Verify => 0,
            ApplyMethod::Temporary => 1,
            ApplyMethod::Persistent => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mode(id: &str, current: bool) -> DisplayMode {
        DisplayMode {
            id: id.to_string(),
            width: 1920,
            height: 1080,
            refresh_rate: 60.0,
            preferred_scale: 1.0,
            supported_scales: vec![1.0, 2.0],
            is_current: current,
            is_preferred: false,
        }
    }

    fn spec(connector: &str) -> MonitorSpec {
        MonitorSpec {
            connector: connector.to_string(),
            vendor: "DEL".to_string(),
            product: "U2720Q".to_string(),
            serial: "0x01".to_string(),
        }
    }

    #[test]
    fn test_current_mode() {
        let monitor = ConnectedMonitor {
            spec: spec("DP-1"),
            modes: vec![mode("a", false), mode("b", true)],
            display_name: None,
        };
        assert_eq!(monitor.current_mode().map(|m| m.id.as_str()), Some("b"));
        assert_eq!(monitor.connector(), "DP-1");
    }

    #[test]
    fn test_primary_and_find_monitor() {
        let state = DisplayState {
            serial: 7,
            monitors: vec![ConnectedMonitor {
                spec: spec("HDMI-1"),
                modes: vec![],
                display_name: None,
            }],
            logical_monitors: vec![
                LogicalMonitor {
                    x: 0,
                    y: 0,
                    scale: 1.0,
                    transform: Transform::NORMAL,
                    primary: false,
                    monitors: vec![spec("DP-1")],
                },
                LogicalMonitor {
                    x: 1920,
                    y: 0,
                    scale: 1.0,
                    transform: Transform(1),
                    primary: true,
                    monitors: vec![spec("HDMI-1")],
                },
            ],
        };
        let primary = state.primary_logical_monitor().unwrap();
        assert_eq!(primary.connector(), Some("HDMI-1"));
        assert!(state.find_monitor("HDMI-1").is_some());
        assert!(state.find_monitor("DP-1").is_none());
    }

    #[test]
    fn test_apply_method_codes() {
        assert_eq!(ApplyMethod::Verify.code(), 0);
        assert_eq!(ApplyMethod::Temporary.code(), 1);
        assert_eq!(ApplyMethod::Persistent.code(), 2);
    }
}
