//! Tracing subscriber setup.

use std::io;

use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter directive.
pub const LOG_ENV: &str = "RFIND_LOG";

/// Returns the default filter directive for a `-v` count.
fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "warn,rfind=debug,rfind_engine=debug,rfind_pattern=debug,rfind_tree=debug,rfind_config=debug",
        _ => "warn,rfind=trace,rfind_engine=trace,rfind_pattern=trace,rfind_tree=trace,rfind_config=trace",
    }
}

/// Installs a stderr subscriber. `RFIND_LOG` takes precedence over the verbosity flags.
pub fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}
