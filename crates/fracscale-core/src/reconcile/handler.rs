use tracing::{error, info, warn};

use fracscale_config::ToggleStrategy;

use crate::display::{
    ConnectedMonitor, DisplayMode, DisplayService, DisplayState, LogicalMonitor,
    LogicalMonitorConfig, MonitorAssignment, ServiceError,
};
use crate::modes::select_mode;
use crate::settings::SettingsStore;

use super::errors::{StateError, ToggleError};
use super::types::{DisplayStatus, ToggleOptions, ToggleOutcome};

/// The primary logical monitor, the output behind it and its current mode.
#[derive(Debug, Clone, Copy)]
pub struct PrimaryOutput<'s> {
    pub logical: &'s LogicalMonitor,
    pub monitor: &'s ConnectedMonitor,
    pub mode: &'s DisplayMode,
}

impl PrimaryOutput<'_> {
    pub fn connector(&self) -> &str {
        self.monitor.connector()
    }
}

/// Resolve the primary logical monitor down to a connected output and mode.
pub fn locate_primary(state: &DisplayState) -> Result<PrimaryOutput<'_>, StateError> {
    let logical = state
        .primary_logical_monitor()
        .ok_or(StateError::NoPrimaryMonitor)?;

    let primaries = state.logical_monitors.iter().filter(|m| m.primary).count();
    if primaries > 1 {
        warn!(
            event = "core.reconcile.multiple_primaries",
            count = primaries,
            x = logical.x,
            y = logical.y,
            "More than one logical monitor is primary, using the first"
        );
    }

    // Decoding guarantees every logical monitor has at least one entry.
    let connector = logical.connector().ok_or(StateError::NoPrimaryMonitor)?;

    let monitor =
        state
            .find_monitor(connector)
            .ok_or_else(|| StateError::ConnectorNotConnected {
                connector: connector.to_string(),
            })?;

    let mode = monitor
        .current_mode()
        .ok_or_else(|| StateError::NoCurrentMode {
            connector: connector.to_string(),
        })?;

    Ok(PrimaryOutput {
        logical,
        monitor,
        mode,
    })
}

/// Flips the fractional scaling flag and re-applies the primary monitor's
/// layout so it is valid for the new state.
pub struct Reconciler<'a, D: DisplayService, S: SettingsStore> {
    display: &'a D,
    settings: &'a S,
    options: ToggleOptions,
}

impl<'a, D: DisplayService, S: SettingsStore> Reconciler<'a, D, S> {
    pub fn new(display: &'a D, settings: &'a S, options: ToggleOptions) -> Self {
        Self {
            display,
            settings,
            options,
        }
    }

    pub fn options(&self) -> &ToggleOptions {
        &self.options
    }

    /// Toggle the feature flag and apply the adjusted layout.
    ///
    /// All display-state checks run before the settings store is touched.
    /// Once the flag has been written there is no rollback: if re-fetching
    /// or applying fails the flag stays flipped and
    /// [`ToggleError::FlagLeftToggled`] is returned.
    pub fn toggle(&self) -> Result<ToggleOutcome, ToggleError> {
        let options = &self.options;
        info!(
            event = "core.reconcile.toggle_started",
            strategy = %options.strategy,
            feature = %options.feature
        );

        let initial = self.display.fetch_state()?;
        let primary = locate_primary(&initial)?;
        info!(
            event = "core.reconcile.primary_located",
            serial = initial.serial,
            connector = primary.connector(),
            mode_id = %primary.mode.id,
            scale = primary.logical.scale
        );

        let mut features = self.settings.get_feature_set(&options.key)?;
        let enabling = !features.contains(&options.feature);
        let (mode_id, scale) = self.plan(&primary, enabling)?;

        if enabling {
            features.insert(options.feature.as_str());
        } else {
            features.remove(&options.feature);
        }
        self.settings.set_feature_set(&options.key, &features)?;
        info!(
            event = "core.reconcile.feature_toggled",
            feature = %options.feature,
            enabled = enabling
        );

        if !options.settle_delay.is_zero() {
            info!(
                event = "core.reconcile.settle_wait_started",
                delay_ms = options.settle_delay.as_millis() as u64
            );
            std::thread::sleep(options.settle_delay);
        }

        // The flag change invalidates the first serial.
        let fresh = match self.display.fetch_state() {
            Ok(state) => state,
            Err(e) => {
                error!(event = "core.reconcile.refetch_failed", error = %e);
                return Err(self.flag_left_toggled(enabling, e));
            }
        };

        let layout = vec![LogicalMonitorConfig {
            x: primary.logical.x,
            y: primary.logical.y,
            scale,
            transform: primary.logical.transform,
            primary: primary.logical.primary,
            monitors: vec![MonitorAssignment {
                connector: primary.connector().to_string(),
                mode_id: mode_id.clone(),
            }],
        }];

        if let Err(e) = self.display.apply(fresh.serial, &layout) {
            error!(
                event = "core.reconcile.apply_failed",
                serial = fresh.serial,
                error = %e
            );
            return Err(self.flag_left_toggled(enabling, e));
        }

        let outcome = ToggleOutcome {
            fractional_enabled: enabling,
            strategy: options.strategy,
            connector: primary.connector().to_string(),
            mode_id,
            previous_scale: primary.logical.scale,
            scale,
            serial: fresh.serial,
        };
        info!(
            event = "core.reconcile.toggle_completed",
            enabled = outcome.fractional_enabled,
            connector = %outcome.connector,
            mode_id = %outcome.mode_id,
            scale = outcome.scale,
            serial = outcome.serial
        );
        Ok(outcome)
    }

    /// Report the current flag and primary monitor without changing anything.
    pub fn inspect(&self) -> Result<DisplayStatus, ToggleError> {
        info!(event = "core.reconcile.inspect_started");

        let state = self.display.fetch_state()?;
        let primary = locate_primary(&state)?;
        let features = self.settings.get_feature_set(&self.options.key)?;

        let status = DisplayStatus {
            fractional_enabled: features.contains(&self.options.feature),
            feature: self.options.feature.clone(),
            features: features.iter().map(str::to_string).collect(),
            serial: state.serial,
            connector: primary.connector().to_string(),
            display_name: primary.monitor.display_name.clone(),
            mode_id: primary.mode.id.clone(),
            width: primary.mode.width,
            height: primary.mode.height,
            refresh_rate: primary.mode.refresh_rate,
            scale: primary.logical.scale,
            x: primary.logical.x,
            y: primary.logical.y,
        };

        info!(
            event = "core.reconcile.inspect_completed",
            enabled = status.fractional_enabled,
            connector = %status.connector
        );
        Ok(status)
    }

    fn flag_left_toggled(&self, enabled: bool, source: ServiceError) -> ToggleError {
        warn!(
            event = "core.reconcile.feature_left_toggled",
            feature = %self.options.feature,
            enabled = enabled,
            "Feature flag was changed but the layout could not be applied"
        );
        ToggleError::FlagLeftToggled {
            feature: self.options.feature.clone(),
            enabled,
            source,
        }
    }

    /// Mode and scale to apply once the flag is in its new state.
    fn plan(&self, primary: &PrimaryOutput<'_>, enabling: bool) -> Result<(String, f64), StateError> {
        match self.options.strategy {
            ToggleStrategy::PreserveMode => {
                let scale = if enabling {
                    self.options.fractional_scale
                } else {
                    1.0
                };
                Ok((primary.mode.id.clone(), scale))
            }
            ToggleStrategy::TargetMode => {
                let target = if enabling {
                    &self.options.fractional_mode
                } else {
                    &self.options.integer_mode
                };
                let mode = select_mode(primary.monitor, target)?;
                Ok((mode.id.clone(), target.scale))
            }
        }
    }
}
