use tracing_subscriber::EnvFilter;

/// Default directives when `-v/--verbose` is given and `RUST_LOG` is unset.
const VERBOSE_DIRECTIVES: &str = "fracscale=info,fracscale_core=info,fracscale_config=info";

/// Install the global JSON subscriber writing to stderr.
///
/// Quiet mode only surfaces errors so stdout stays clean for command output.
/// `RUST_LOG` always wins over both defaults. Calling this twice is a no-op.
pub fn init_logging(quiet: bool) {
    let fallback = if quiet { "error" } else { VERBOSE_DIRECTIVES };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let _ = tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_current_span(false)
        .try_init();
}
