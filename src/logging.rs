//! Structured logging setup.
//!
//! Logs go to stderr so `--report json` output on stdout stays parseable.
//! `RUST_LOG` takes precedence over the verbosity flags.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directive for the given CLI verbosity.
pub fn default_directive(verbose: bool, quiet: bool) -> &'static str {
    if quiet {
        "error"
    } else if verbose {
        "project_profiler=debug,info"
    } else {
        "warn"
    }
}

/// Install the global subscriber. Subsequent calls are no-ops.
pub fn init(verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(verbose))
        .try_init();
}
