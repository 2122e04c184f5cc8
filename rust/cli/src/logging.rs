//! Diagnostic logging.
//!
//! Events go to stderr so they never interleave with the board on stdout.
//! The filter comes from `RUST_LOG` and defaults to `warn`; for example
//! `RUST_LOG=saa_engine=debug` traces every deal and move.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let subscriber = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .finish();

    // A second initialisation keeps the first subscriber.
    let _ = tracing::subscriber::set_global_default(subscriber);
}
