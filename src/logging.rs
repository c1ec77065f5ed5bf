//! Tracing subscriber setup for binaries. The library itself only emits events.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "warn,juicewrld=info";

/// Installs a stderr `fmt` subscriber filtered by `RUST_LOG`.
///
/// `verbose` raises the crate's own level to `debug`, which logs every request.
/// Calling this twice is harmless; the second install is ignored.
pub fn init_logging(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("warn,juicewrld=debug")
        } else {
            EnvFilter::new(DEFAULT_FILTER)
        }
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
