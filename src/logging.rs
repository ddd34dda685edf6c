// SPDX-License-Identifier: MPL-2.0
//! Diagnostic logging setup.
//!
//! Log lines go to stderr so command output on stdout stays scriptable.
//! `RUST_LOG` takes precedence over the verbosity flag.

use tracing_subscriber::EnvFilter;

/// Default filter directive for the given verbosity.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "mockup_gallery=debug"
    } else {
        "mockup_gallery=warn"
    }
}

/// Installs the global subscriber.
///
/// Calling this more than once keeps the first subscriber.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}
