//! Diagnostic output
//!
//! Library crates only emit `tracing` events; the binary decides where they
//! go. Warnings (such as failed imports) are user-facing, so they are written
//! to stdout next to regular command output.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise `warn`, or `debug` for our crates when
/// `verbose` is on.
pub fn init(verbose: bool) {
    let default_filter = if verbose {
        "warn,kitchen_tests=debug,kitchen_config=debug,kitchen_testkit=debug"
    } else {
        "warn"
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let fmt_layer = fmt::layer()
        .with_target(false)
        .without_time()
        .with_writer(std::io::stdout);

    // Keep whichever subscriber was installed first
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init();
}
