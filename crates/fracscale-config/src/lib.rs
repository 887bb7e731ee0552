//! Configuration for fracscale.
//!
//! Describes which settings key holds the fractional scaling flag and how
//! the display layout is rebuilt after it flips.

pub mod errors;
pub mod loading;
pub mod types;

pub use errors::ConfigError;
pub use loading::{config_file_path, load_config, load_config_from, validate_config};
pub use types::{
    DEFAULT_FEATURE, DEFAULT_FRACTIONAL_SCALE, FracscaleConfig, ModeSet, ScalingConfig,
    SettingsConfig, ToggleStrategy,
};
