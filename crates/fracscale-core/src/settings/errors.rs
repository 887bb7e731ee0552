//! Settings store error types.

use crate::errors::FracscaleError;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Settings tool not found: {tool}")]
    ToolNotFound { tool: String },

    #[error("Settings command failed for {schema} {key}: {message}")]
    CommandFailed {
        schema: String,
        key: String,
        message: String,
    },

    #[error("Failed to parse settings value '{value}': {message}")]
    ParseFailed { value: String, message: String },
}

impl FracscaleError for SettingsError {
    fn error_code(&self) -> &'static str {
        match self {
            SettingsError::ToolNotFound { .. } => "SETTINGS_TOOL_NOT_FOUND",
            SettingsError::CommandFailed { .. } => "SETTINGS_COMMAND_FAILED",
            SettingsError::ParseFailed { .. } => "SETTINGS_PARSE_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, SettingsError::ToolNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_failed_display() {
        let error = SettingsError::CommandFailed {
            schema: "org.gnome.mutter".to_string(),
            key: "experimental-features".to_string(),
            message: "No such key".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Settings command failed for org.gnome.mutter experimental-features: No such key"
        );
        assert_eq!(error.error_code(), "SETTINGS_COMMAND_FAILED");
        assert!(!error.is_user_error());
    }

    #[test]
    fn test_parse_failed_display() {
        let error = SettingsError::ParseFailed {
            value: "['a'".to_string(),
            message: "EOF while parsing a list".to_string(),
        };
        assert!(error.to_string().starts_with("Failed to parse settings value '['a''"));
        assert_eq!(error.error_code(), "SETTINGS_PARSE_FAILED");
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SettingsError>();
    }
}
