//! Core library for fracscale.
//!
//! Flips Mutter's `x11-randr-fractional-scaling` experimental feature and
//! re-applies the primary monitor's layout through
//! `org.gnome.Mutter.DisplayConfig` so the new scaling mode takes effect.

pub mod display;
pub mod errors;
pub mod events;
pub mod logging;
pub mod modes;
pub mod process;
pub mod reconcile;
pub mod settings;

pub use display::{DisplayConfigClient, DisplayService, DisplayState, with_display_service};
pub use errors::FracscaleError;
pub use logging::init_logging;
pub use modes::select_mode;
pub use reconcile::{
    DisplayStatus, Reconciler, StateError, ToggleError, ToggleOptions, ToggleOutcome,
    locate_primary,
};
pub use settings::{FeatureSet, GSettings, SettingsStore};

pub use fracscale_config::{FracscaleConfig, ToggleStrategy, load_config};
