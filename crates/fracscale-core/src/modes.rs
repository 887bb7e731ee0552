//! Mode selection by target resolution.

use tracing::debug;

pub use fracscale_config::ModeSet;

use crate::display::{ConnectedMonitor, DisplayMode};
use crate::reconcile::StateError;

/// Refresh rates are reported as measured values (e.g. 119.982), so a mode
/// matches when it is at most this far below the requested rate.
pub const REFRESH_TOLERANCE: f64 = 1.0;

/// Pick the mode on `monitor` matching `target`'s resolution with a refresh
/// rate in `[target.refresh - 1, target.refresh]`, preferring the highest rate.
pub fn select_mode<'a>(
    monitor: &'a ConnectedMonitor,
    target: &ModeSet,
) -> Result<&'a DisplayMode, StateError> {
    let low = target.refresh - REFRESH_TOLERANCE;
    let selected = monitor
        .modes
        .iter()
        .filter(|m| m.width == target.width && m.height == target.height)
        .filter(|m| m.refresh_rate >= low && m.refresh_rate <= target.refresh)
        .max_by(|a, b| a.refresh_rate.total_cmp(&b.refresh_rate));

    match selected {
        Some(mode) => {
            debug!(
                event = "core.modes.select_completed",
                connector = monitor.connector(),
                target = %target,
                mode_id = %mode.id
            );
            Ok(mode)
        }
        None => Err(StateError::UnsupportedMode {
            connector: monitor.connector().to_string(),
            width: target.width,
            height: target.height,
            refresh: target.refresh,
        }),
    }
}
