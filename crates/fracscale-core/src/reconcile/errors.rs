use crate::display::ServiceError;
use crate::errors::FracscaleError;
use crate::settings::SettingsError;

/// A structural precondition on the display state does not hold.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("Could not determine primary monitor")]
    NoPrimaryMonitor,

    #[error("Connector '{connector}' is not connected")]
    ConnectorNotConnected { connector: String },

    #[error("Monitor on '{connector}' has no current mode")]
    NoCurrentMode { connector: String },

    #[error("Unsupported mode {width}x{height}@{refresh} on '{connector}'")]
    UnsupportedMode {
        connector: String,
        width: i32,
        height: i32,
        refresh: f64,
    },
}

impl FracscaleError for StateError {
    fn error_code(&self) -> &'static str {
        match self {
            StateError::NoPrimaryMonitor => "STATE_NO_PRIMARY_MONITOR",
            StateError::ConnectorNotConnected { .. } => "STATE_CONNECTOR_NOT_CONNECTED",
            StateError::NoCurrentMode { .. } => "STATE_NO_CURRENT_MODE",
            StateError::UnsupportedMode { .. } => "STATE_UNSUPPORTED_MODE",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, StateError::UnsupportedMode { .. })
    }
}

/// Any failure during a toggle or status pass.
#[derive(Debug, thiserror::Error)]
pub enum ToggleError {
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    State(#[from] StateError),

    /// The feature flag was written but the new layout never reached the
    /// compositor. Nothing is rolled back.
    #[error("Feature '{feature}' was {} but the layout was not applied: {source}", toggled_verb(.enabled))]
    FlagLeftToggled {
        feature: String,
        enabled: bool,
        #[source]
        source: ServiceError,
    },
}

fn toggled_verb(enabled: &bool) -> &'static str {
    if *enabled { "enabled" } else { "disabled" }
}

impl ToggleError {
    /// Feature name and its new state when the flag stayed flipped.
    pub fn flag_left_toggled(&self) -> Option<(&str, bool)> {
        match self {
            ToggleError::FlagLeftToggled {
                feature, enabled, ..
            } => Some((feature.as_str(), *enabled)),
            _ => None,
        }
    }
}

impl FracscaleError for ToggleError {
    fn error_code(&self) -> &'static str {
        match self {
            ToggleError::Service(e) => e.error_code(),
            ToggleError::Settings(e) => e.error_code(),
            ToggleError::State(e) => e.error_code(),
            ToggleError::FlagLeftToggled { source, .. } => source.error_code(),
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            ToggleError::Service(e) => e.is_user_error(),
            ToggleError::Settings(e) => e.is_user_error(),
            ToggleError::State(e) => e.is_user_error(),
            ToggleError::FlagLeftToggled { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_primary_monitor_display() {
        let error = StateError::NoPrimaryMonitor;
        assert_eq!(error.to_string(), "Could not determine primary monitor");
        assert_eq!(error.error_code(), "STATE_NO_PRIMARY_MONITOR");
        assert!(!error.is_user_error());
    }

    #[test]
    fn test_unsupported_mode_display() {
        let error = StateError::UnsupportedMode {
            connector: "DP-1".to_string(),
            width: 3840,
            height: 2160,
            refresh: 60.0,
        };
        assert_eq!(error.to_string(), "Unsupported mode 3840x2160@60 on 'DP-1'");
        assert!(error.is_user_error());
    }

    #[test]
    fn test_toggle_error_delegates_error_code() {
        let err = ToggleError::from(StateError::ConnectorNotConnected {
            connector: "HDMI-1".to_string(),
        });
        assert_eq!(err.error_code(), "STATE_CONNECTOR_NOT_CONNECTED");
        assert_eq!(err.to_string(), "Connector 'HDMI-1' is not connected");

        let err = ToggleError::from(SettingsError::ToolNotFound {
            tool: "gsettings".to_string(),
        });
        assert_eq!(err.error_code(), "SETTINGS_TOOL_NOT_FOUND");
        assert!(err.is_user_error());
    }

    #[test]
    fn test_toggle_error_service_is_not_user_error() {
        let err = ToggleError::from(ServiceError::ConnectionFailed {
            message: "no session bus".to_string(),
        });
        assert_eq!(err.error_code(), "SERVICE_CONNECTION_FAILED");
        assert!(!err.is_user_error());
    }

    #[test]
    fn test_flag_left_toggled_reports_feature_state() {
        let err = ToggleError::FlagLeftToggled {
            feature: "x11-randr-fractional-scaling".to_string(),
            enabled: true,
            source: ServiceError::CallFailed {
                method: "ApplyMonitorsConfig".to_string(),
                message: "timed out".to_string(),
            },
        };
        assert_eq!(
            err.to_string(),
            "Feature 'x11-randr-fractional-scaling' was enabled but the layout was not applied: ApplyMonitorsConfig failed: timed out"
        );
        assert_eq!(err.error_code(), "SERVICE_CALL_FAILED");
        assert_eq!(
            err.flag_left_toggled(),
            Some(("x11-randr-fractional-scaling", true))
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_flag_left_toggled_absent_for_other_errors() {
        let err = ToggleError::from(StateError::NoPrimaryMonitor);
        assert_eq!(err.flag_left_toggled(), None);
    }
}
