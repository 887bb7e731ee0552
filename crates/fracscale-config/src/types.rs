use serde::{Deserialize, Serialize};

/// Feature flag that enables fractional scaling under X11 in Mutter.
pub const DEFAULT_FEATURE: &str = "x11-randr-fractional-scaling";

/// Scale used when the feature flag is switched on and no override is given.
pub const DEFAULT_FRACTIONAL_SCALE: f64 = 1.25;

/// Top-level configuration, loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FracscaleConfig {
    pub settings: SettingsConfig,
    pub scaling: ScalingConfig,
}

/// Where the feature flag lives in the settings store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsConfig {
    /// GSettings schema holding the experimental features list.
    pub schema: String,
    /// Key within the schema.
    pub key: String,
    /// Flag name whose membership decides fractional scaling.
    pub feature: String,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            schema: "org.gnome.mutter".to_string(),
            key: "experimental-features".to_string(),
            feature: DEFAULT_FEATURE.to_string(),
        }
    }
}

/// How the layout is recomputed after the flag flips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScalingConfig {
    pub strategy: ToggleStrategy,
    /// Scale applied when enabling under `preserve-mode`.
    pub fractional_scale: f64,
    /// Pause between writing the flag and re-reading the display state.
    ///
    /// Defaults to 0, so the layout is re-applied as soon as the new serial
    /// can be read. If Mutter is still reconfiguring its outputs at that
    /// point, the refetch can return the old serial and the apply is
    /// rejected. Raise this (a few seconds is plenty) on setups where that
    /// happens.
    pub settle_delay_ms: u64,
    /// Target mode once fractional scaling is on (`target-mode` only).
    pub fractional_mode: Option<ModeSet>,
    /// Target mode once fractional scaling is off (`target-mode` only).
    pub integer_mode: Option<ModeSet>,
}

impl Default for ScalingConfig {
    fn default() -> Self {
        Self {
            strategy: ToggleStrategy::default(),
            fractional_scale: DEFAULT_FRACTIONAL_SCALE,
            settle_delay_ms: 0,
            fractional_mode: Some(ModeSet::DEFAULT_FRACTIONAL),
            integer_mode: Some(ModeSet::DEFAULT_INTEGER),
        }
    }
}

/// A desired resolution, minimum refresh rate and scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModeSet {
    pub width: i32,
    pub height: i32,
    pub refresh: f64,
    pub scale: f64,
}

impl ModeSet {
    pub const DEFAULT_FRACTIONAL: ModeSet = ModeSet {
        width: 3840,
        height: 2160,
        refresh: 60.0,
        scale: 1.5,
    };

    pub const DEFAULT_INTEGER: ModeSet = ModeSet {
        width: 1920,
        height: 1080,
        refresh: 120.0,
        scale: 1.0,
    };
}

impl std::fmt::Display for ModeSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}x{}@{} (scale {})",
            self.width, self.height, self.refresh, self.scale
        )
    }
}

/// Policy for picking the mode re-applied after a toggle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToggleStrategy {
    /// Keep the monitor's current mode and only change the scale.
    #[default]
    PreserveMode,
    /// Switch to the configured resolution for the new state.
    TargetMode,
}

impl ToggleStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToggleStrategy::PreserveMode => "preserve-mode",
            ToggleStrategy::TargetMode => "target-mode",
        }
    }
}

impl std::fmt::Display for ToggleStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ToggleStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "preserve-mode" | "preserve" => Ok(ToggleStrategy::PreserveMode),
            "target-mode" | "target" => Ok(ToggleStrategy::TargetMode),
            _ => Err(format!(
                "Unknown strategy '{}'. Known strategies: preserve-mode, target-mode",
                s
            )),
        }
    }
}
