use clap::{Arg, ArgAction, Command};

pub fn build_cli() -> Command {
    Command::new("fracscale")
        .about("Toggle GNOME Mutter fractional scaling and re-apply the monitor layout")
        .version(env!("CARGO_PKG_VERSION"))
        .arg_required_else_help(true)
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("no-color")
                .long("no-color")
                .help("Disable colored output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("toggle")
                .about("Flip the fractional scaling flag and re-apply the primary monitor")
                .arg(
                    Arg::new("scale")
                        .long("scale")
                        .help("Scale to apply when enabling fractional scaling (default from config, 1.25)")
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(
                    Arg::new("strategy")
                        .long("strategy")
                        .help("How to pick the mode after toggling")
                        .value_parser(["preserve-mode", "target-mode"]),
                ),
        )
        .subcommand(
            Command::new("status")
                .about("Show whether fractional scaling is enabled and the primary monitor layout")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output in JSON format")
                        .action(ArgAction::SetTrue),
                ),
        )
}
