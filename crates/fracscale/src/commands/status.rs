use clap::ArgMatches;
use tracing::{error, info};

use fracscale_core::events;
use fracscale_core::{DisplayStatus, Reconciler, ToggleOptions, with_display_service};

use super::{load_config_or_fail, settings_store_or_fail};
use crate::color;

pub(crate) fn handle_status_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");
    info!(event = "cli.status_started", json_output = json_output);

    let config = load_config_or_fail()?;
    let options = ToggleOptions::from_config(&config);
    let settings = settings_store_or_fail(&config.settings.schema)?;

    let result =
        with_display_service(|client| Reconciler::new(client, &settings, options).inspect());

    match result {
        Ok(status) => {
            if json_output {
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                print_status(&status);
            }
            info!(
                event = "cli.status_completed",
                enabled = status.fractional_enabled,
                connector = %status.connector
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("{} {}", color::error("Failed to read display status:"), e);
            error!(event = "cli.status_failed", error = %e);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}

fn print_status(status: &DisplayStatus) {
    println!(
        "Fractional scaling {} ({})",
        color::enabled_state(status.fractional_enabled),
        color::muted(&status.feature)
    );

    let name = match &status.display_name {
        Some(name) => format!("{} ({})", color::accent(&status.connector), name),
        None => color::accent(&status.connector),
    };
    println!("  {} {}", color::muted("Primary:"), name);
    println!(
        "  {} {}x{} @ {:.2} Hz ({})",
        color::muted("Mode:   "),
        status.width,
        status.height,
        status.refresh_rate,
        color::accent(&status.mode_id)
    );
    println!(
        "  {} {} at {},{}",
        color::muted("Scale:  "),
        color::bold(&status.scale.to_string()),
        status.x,
        status.y
    );
    println!(
        "  {} {}",
        color::muted("Serial: "),
        color::muted(&status.serial.to_string())
    );
}
