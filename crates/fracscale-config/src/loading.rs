use std::path::{Path, PathBuf};

use crate::errors::ConfigError;
use crate::types::{FracscaleConfig, ModeSet, ToggleStrategy};

/// Load configuration from `$FRACSCALE_CONFIG` or `~/.config/fracscale/config.toml`.
///
/// A missing file is not an error: defaults are returned.
pub fn load_config() -> Result<FracscaleConfig, ConfigError> {
    load_config_from(&config_file_path())
}

/// Load and validate configuration from an explicit path.
pub fn load_config_from(path: &Path) -> Result<FracscaleConfig, ConfigError> {
    if !path.exists() {
        tracing::debug!(
            event = "config.load_skipped",
            path = %path.display(),
            reason = "file not found"
        );
        return Ok(FracscaleConfig::default());
    }

    let content = std::fs::read_to_string(path)?;
    let config: FracscaleConfig =
        toml::from_str(&content).map_err(|e| ConfigError::ConfigParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

    validate_config(&config)?;

    tracing::info!(
        event = "config.load_completed",
        path = %path.display(),
        strategy = %config.scaling.strategy
    );

    Ok(config)
}

/// Check values the toggle relies on.
pub fn validate_config(config: &FracscaleConfig) -> Result<(), ConfigError> {
    let settings = &config.settings;
    for (name, value) in [
        ("settings.schema", &settings.schema),
        ("settings.key", &settings.key),
        ("settings.feature", &settings.feature),
    ] {
        if value.trim().is_empty() {
            return Err(ConfigError::InvalidConfiguration {
                message: format!("{} must not be empty", name),
            });
        }
    }

    validate_scale("scaling.fractional_scale", config.scaling.fractional_scale)?;

    if config.scaling.strategy == ToggleStrategy::TargetMode {
        let fractional = require_mode("scaling.fractional_mode", config.scaling.fractional_mode)?;
        let integer = require_mode("scaling.integer_mode", config.scaling.integer_mode)?;
        validate_mode("scaling.fractional_mode", &fractional)?;
        validate_mode("scaling.integer_mode", &integer)?;
    }

    Ok(())
}

fn require_mode(name: &str, mode: Option<ModeSet>) -> Result<ModeSet, ConfigError> {
    mode.ok_or_else(|| ConfigError::InvalidConfiguration {
        message: format!("{} is required when strategy is target-mode", name),
    })
}

fn validate_mode(name: &str, mode: &ModeSet) -> Result<(), ConfigError> {
    if mode.width <= 0 || mode.height <= 0 {
        return Err(ConfigError::InvalidConfiguration {
            message: format!(
                "{} has invalid resolution {}x{}",
                name, mode.width, mode.height
            ),
        });
    }
    if !mode.refresh.is_finite() || mode.refresh <= 0.0 {
        return Err(ConfigError::InvalidConfiguration {
            message: format!("{} has invalid refresh rate {}", name, mode.refresh),
        });
    }
    validate_scale(&format!("{}.scale", name), mode.scale)
}

fn validate_scale(name: &str, scale: f64) -> Result<(), ConfigError> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(ConfigError::InvalidConfiguration {
            message: format!("{} must be a positive number, got {}", name, scale),
        });
    }
    Ok(())
}

/// Resolve the config file location.
pub fn config_file_path() -> PathBuf {
    // Allow override via env var for testing.
    if let Ok(path_str) = std::env::var("FRACSCALE_CONFIG")
        && !path_str.is_empty()
    {
        return PathBuf::from(path_str);
    }

    match dirs::config_dir() {
        Some(dir) => dir.join("fracscale").join("config.toml"),
        None => {
            tracing::warn!(
                event = "config.config_dir_not_found",
                fallback = ".",
                "Could not determine config directory - using current directory as fallback"
            );
            PathBuf::from(".").join("fracscale.toml")
        }
    }
}
