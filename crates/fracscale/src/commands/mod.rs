use clap::ArgMatches;
use tracing::error;

use fracscale_config::FracscaleConfig;
use fracscale_core::GSettings;
use fracscale_core::events;

mod status;
mod toggle;

pub fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    events::log_app_startup();

    let result = match matches.subcommand() {
        Some(("toggle", sub_matches)) => toggle::handle_toggle_command(sub_matches),
        Some(("status", sub_matches)) => status::handle_status_command(sub_matches),
        _ => {
            error!(event = "cli.command_unknown");
            Err("Unknown command".into())
        }
    };

    events::log_app_shutdown();
    result
}

/// Load configuration, reporting failures the same way for every command.
fn load_config_or_fail() -> Result<FracscaleConfig, Box<dyn std::error::Error>> {
    match fracscale_config::load_config() {
        Ok(config) => Ok(config),
        Err(e) => {
            eprintln!("{} {}", crate::color::error("Failed to load config:"), e);
            error!(event = "cli.config_load_failed", error = %e);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}

/// Build the settings store, failing early when `gsettings` is missing.
fn settings_store_or_fail(schema: &str) -> Result<GSettings, Box<dyn std::error::Error>> {
    match GSettings::detect(schema) {
        Ok(settings) => Ok(settings),
        Err(e) => {
            eprintln!("{} {}", crate::color::error("Failed to access settings:"), e);
            error!(event = "cli.settings_unavailable", schema = schema, error = %e);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}
