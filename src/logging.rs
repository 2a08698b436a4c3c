use tracing_subscriber::{fmt, EnvFilter};

/// Route `tracing` output to stderr so stdout stays clean for JSON and tables
///
/// The level comes from PARTDESK_LOG (e.g. `debug`, `partdesk=trace`);
/// `--verbose` forces debug.
pub fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("partdesk=debug")
    } else {
        EnvFilter::try_from_env("PARTDESK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .try_init();
}
