use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the verbosity flags, e.g.
/// `MUSTER_LOG=muster_ics=debug`.
const LOG_ENV: &str = "MUSTER_LOG";

fn filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Log to stderr so stdout stays clean for `--stdout` documents.
pub fn init(verbose: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(filter_from_verbosity(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
