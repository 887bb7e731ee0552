//! Process execution error types.

use crate::errors::FracscaleError;

#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("Command not found: {program}")]
    NotFound { program: String },

    #[error("Failed to spawn '{program}': {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program}' exited with {status}{}", message_suffix(.message))]
    NonZeroExit {
        program: String,
        status: String,
        message: Option<String>,
    },
}

fn message_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {}", m))
        .unwrap_or_default()
}

impl FracscaleError for ProcessError {
    fn error_code(&self) -> &'static str {
        match self {
            ProcessError::NotFound { .. } => "PROCESS_NOT_FOUND",
            ProcessError::SpawnFailed { .. } => "PROCESS_SPAWN_FAILED",
            ProcessError::NonZeroExit { .. } => "PROCESS_NON_ZERO_EXIT",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, ProcessError::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_zero_exit_with_message() {
        let error = ProcessError::NonZeroExit {
            program: "gsettings".to_string(),
            status: "exit status: 1".to_string(),
            message: Some("No such schema \u{201c}org.gnome.mutter\u{201d}".to_string()),
        };
        assert_eq!(
            error.to_string(),
            "'gsettings' exited with exit status: 1: No such schema \u{201c}org.gnome.mutter\u{201d}"
        );
        assert_eq!(error.error_code(), "PROCESS_NON_ZERO_EXIT");
        assert!(!error.is_user_error());
    }

    #[test]
    fn test_non_zero_exit_without_message() {
        let error = ProcessError::NonZeroExit {
            program: "false".to_string(),
            status: "exit status: 1".to_string(),
            message: None,
        };
        assert_eq!(error.to_string(), "'false' exited with exit status: 1");
    }

    #[test]
    fn test_not_found_is_user_error() {
        let error = ProcessError::NotFound {
            program: "gsettings".to_string(),
        };
        assert_eq!(error.to_string(), "Command not found: gsettings");
        assert!(error.is_user_error());
    }
}
