use std::time::Duration;

use fracscale_config::{FracscaleConfig, ModeSet, ToggleStrategy};
use serde::Serialize;

/// Inputs to a toggle pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ToggleOptions {
    /// Settings key holding the feature list.
    pub key: String,
    /// Feature flag to flip.
    pub feature: String,
    pub strategy: ToggleStrategy,
    /// Scale applied when enabling under [`ToggleStrategy::PreserveMode`].
    pub fractional_scale: f64,
    /// Targets used under [`ToggleStrategy::TargetMode`].
    pub fractional_mode: ModeSet,
    pub integer_mode: ModeSet,
    /// Pause between writing the flag and re-fetching the display state.
    pub settle_delay: Duration,
}

impl ToggleOptions {
    pub fn from_config(config: &FracscaleConfig) -> Self {
        Self {
            key: config.settings.key.clone(),
            feature: config.settings.feature.clone(),
            strategy: config.scaling.strategy,
            fractional_scale: config.scaling.fractional_scale,
            fractional_mode: config
                .scaling
                .fractional_mode
                .unwrap_or(ModeSet::DEFAULT_FRACTIONAL),
            integer_mode: config
                .scaling
                .integer_mode
                .unwrap_or(ModeSet::DEFAULT_INTEGER),
            settle_delay: Duration::from_millis(config.scaling.settle_delay_ms),
        }
    }

    pub fn with_strategy(mut self, strategy: ToggleStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_fractional_scale(mut self, scale: f64) -> Self {
        self.fractional_scale = scale;
        self
    }
}

impl Default for ToggleOptions {
    fn default() -> Self {
        Self::from_config(&FracscaleConfig::default())
    }
}

/// What a completed toggle changed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToggleOutcome {
    /// Whether the feature flag is set after the toggle.
    pub fractional_enabled: bool,
    pub strategy: ToggleStrategy,
    pub connector: String,
    pub mode_id: String,
    pub previous_scale: f64,
    pub scale: f64,
    /// Serial the layout was applied against.
    pub serial: u32,
}

/// Read-only report of the primary monitor and the feature flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayStatus {
    pub fractional_enabled: bool,
    pub feature: String,
    pub features: Vec<String>,
    pub serial: u32,
    pub connector: String,
    pub display_name: Option<String>,
    pub mode_id: String,
    pub width: i32,
    pub height: i32,
    pub refresh_rate: f64,
    pub scale: f64,
    pub x: i32,
    pub y: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_follow_config_defaults() {
        let options = ToggleOptions::default();
        assert_eq!(options.key, "experimental-features");
        assert_eq!(options.feature, "x11-randr-fractional-scaling");
        assert_eq!(options.strategy, ToggleStrategy::PreserveMode);
        assert_eq!(options.fractional_scale, 1.25);
        assert!(options.settle_delay.is_zero());
    }

    #[test]
    fn test_missing_modes_fall_back_to_defaults() {
        let mut config = FracscaleConfig::default();
        config.scaling.fractional_mode = None;
        config.scaling.settle_delay_ms = 1500;
        let options = ToggleOptions::from_config(&config);
        assert_eq!(options.fractional_mode, ModeSet::DEFAULT_FRACTIONAL);
        assert_eq!(options.settle_delay, Duration::from_millis(1500));
    }

    #[test]
    fn test_builder_overrides() {
        let options = ToggleOptions::default()
            .with_strategy(ToggleStrategy::TargetMode)
            .with_fractional_scale(1.5);
        assert_eq!(options.strategy, ToggleStrategy::TargetMode);
        assert_eq!(options.fractional_scale, 1.5);
    }
}
