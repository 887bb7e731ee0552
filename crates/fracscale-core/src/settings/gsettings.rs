use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::process::{CommandRunner, ProcessError, RunOptions, SystemRunner};

use super::codec::normalize_empty_sentinel;
use super::errors::SettingsError;
use super::store::SettingsStore;

const GSETTINGS: &str = "gsettings";

/// [`SettingsStore`] backed by the `gsettings` command line tool.
#[derive(Debug, Clone)]
pub struct GSettings<R: CommandRunner = SystemRunner> {
    schema: String,
    runner: R,
}

impl GSettings<SystemRunner> {
    pub fn new(schema: impl Into<String>) -> Self {
        Self::with_runner(schema, SystemRunner)
    }

    /// Like [`GSettings::new`], but fails up front when `gsettings` is not
    /// on `PATH` instead of on the first read.
    pub fn detect(schema: impl Into<String>) -> Result<Self, SettingsError> {
        let path = require_tool(GSETTINGS)?;
        debug!(
            event = "core.settings.tool_detected",
            tool = GSETTINGS,
            path = %path.display()
        );
        Ok(Self::new(schema))
    }
}

/// Resolve `tool` on `PATH`.
pub(crate) fn require_tool(tool: &str) -> Result<PathBuf, SettingsError> {
    match which::which(tool) {
        Ok(path) => Ok(path),
        Err(which::Error::CannotFindBinaryPath) => Err(SettingsError::ToolNotFound {
            tool: tool.to_string(),
        }),
        Err(e) => {
            warn!(
                event = "core.settings.tool_lookup_failed",
                tool = tool,
                error = %e
            );
            Err(SettingsError::ToolNotFound {
                tool: tool.to_string(),
            })
        }
    }
}

impl<R: CommandRunner> GSettings<R> {
    pub fn with_runner(schema: impl Into<String>, runner: R) -> Self {
        Self {
            schema: schema.into(),
            runner,
        }
    }

    fn map_error(&self, key: &str, error: ProcessError) -> SettingsError {
        match error {
            ProcessError::NotFound { program } => SettingsError::ToolNotFound { tool: program },
            ProcessError::NonZeroExit {
                message, status, ..
            } => SettingsError::CommandFailed {
                schema: self.schema.clone(),
                key: key.to_string(),
                message: message.unwrap_or(status),
            },
            other => SettingsError::CommandFailed {
                schema: self.schema.clone(),
                key: key.to_string(),
                message: other.to_string(),
            },
        }
    }
}

impl<R: CommandRunner> SettingsStore for GSettings<R> {
    fn schema(&self) -> &str {
        &self.schema
    }

    fn get_raw(&self, key: &str) -> Result<String, SettingsError> {
        debug!(
            event = "core.settings.get_started",
            schema = %self.schema,
            key = key
        );

        let output = self
            .runner
            .run_or_fail(
                GSETTINGS,
                &["get", self.schema.as_str(), key],
                RunOptions::trimmed(),
            )
            .map_err(|e| self.map_error(key, e))?;

        let value = normalize_empty_sentinel(&output.stdout).to_string();
        debug!(
            event = "core.settings.get_completed",
            schema = %self.schema,
            key = key,
            value = %value
        );
        Ok(value)
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        info!(
            event = "core.settings.set_started",
            schema = %self.schema,
            key = key,
            value = value
        );

        self.runner
            .run_or_fail(
                GSETTINGS,
                &["set", self.schema.as_str(), key, value],
                RunOptions::trimmed(),
            )
            .map_err(|e| self.map_error(key, e))?;

        info!(
            event = "core.settings.set_completed",
            schema = %self.schema,
            key = key
        );
        Ok(())
    }
}
