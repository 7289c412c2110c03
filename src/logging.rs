//! Logging setup for the `domtool` binary.

use tracing_subscriber::{EnvFilter, fmt};

/// Maps a `-d` debug level to a tracing filter directive.
pub fn level_for(debuglevel: u8) -> &'static str {
    match debuglevel {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs a stderr subscriber. `RUST_LOG` overrides the debug level.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init(debuglevel: u8) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_for(debuglevel)));
    let _ = fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}
