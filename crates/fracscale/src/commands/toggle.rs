use clap::ArgMatches;
use tracing::{error, info};

use fracscale_core::events;
use fracscale_core::{
    Reconciler, ToggleError, ToggleOptions, ToggleOutcome, ToggleStrategy, with_display_service,
};

use super::{load_config_or_fail, settings_store_or_fail};
use crate::color;

pub(crate) fn handle_toggle_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config_or_fail()?;
    let mut options = ToggleOptions::from_config(&config);

    if let Some(scale) = matches.get_one::<f64>("scale").copied() {
        if !scale.is_finite() || scale <= 0.0 {
            eprintln!(
                "{} scale must be a positive number, got {}",
                color::error("Invalid --scale:"),
                scale
            );
            error!(event = "cli.toggle_invalid_scale", scale = scale);
            return Err("Invalid scale".into());
        }
        options = options.with_fractional_scale(scale);
    }

    if let Some(strategy) = matches.get_one::<String>("strategy") {
        let strategy: ToggleStrategy = strategy.parse()?;
        options = options.with_strategy(strategy);
    }

    info!(
        event = "cli.toggle_started",
        schema = %config.settings.schema,
        strategy = %options.strategy,
        fractional_scale = options.fractional_scale
    );

    let settings = settings_store_or_fail(&config.settings.schema)?;
    let result =
        with_display_service(|client| Reconciler::new(client, &settings, options).toggle());

    match result {
        Ok(outcome) => {
            print_outcome(&outcome);
            info!(
                event = "cli.toggle_completed",
                enabled = outcome.fractional_enabled,
                connector = %outcome.connector,
                scale = outcome.scale
            );
            Ok(())
        }
        Err(e) => {
            eprintln!(
                "{} {}",
                color::error("Failed to toggle fractional scaling:"),
                e
            );
            if let Some(notice) = left_toggled_notice(&e) {
                eprintln!("{}", color::warning(&notice));
            }
            error!(event = "cli.toggle_failed", error = %e);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}

fn print_outcome(outcome: &ToggleOutcome) {
    println!(
        "Fractional scaling {}",
        color::enabled_state(outcome.fractional_enabled)
    );
    println!(
        "  {} {} ({}), scale {} -> {}",
        color::muted("Primary:"),
        color::accent(&outcome.connector),
        color::accent(&outcome.mode_id),
        outcome.previous_scale,
        color::bold(&outcome.scale.to_string())
    );
}

/// Warning for a toggle that wrote the flag but could not apply the layout.
fn left_toggled_notice(error: &ToggleError) -> Option<String> {
    let (feature, enabled) = error.flag_left_toggled()?;
    let state = if enabled { "enabled" } else { "disabled" };
    Some(format!(
        "Feature flag '{}' was left {}. The display layout was not updated; \
         run the toggle again to restore the previous state.",
        feature, state
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fracscale_core::StateError;
    use fracscale_core::display::ServiceError;

    #[test]
    fn test_notice_for_flag_left_toggled() {
        let err = ToggleError::FlagLeftToggled {
            feature: "x11-randr-fractional-scaling".to_string(),
            enabled: false,
            source: ServiceError::Rejected {
                method: "ApplyMonitorsConfig".to_string(),
                name: "org.freedesktop.DBus.Error.AccessDenied".to_string(),
                message: "stale serial".to_string(),
            },
        };
        let notice = left_toggled_notice(&err).unwrap();
        assert!(notice.contains("'x11-randr-fractional-scaling' was left disabled"));
    }

    #[test]
    fn test_no_notice_before_flag_written() {
        let err = ToggleError::from(StateError::NoPrimaryMonitor);
        assert_eq!(left_toggled_notice(&err), None);
    }
}
