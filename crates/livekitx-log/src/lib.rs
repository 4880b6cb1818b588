// ABOUTME: Shared logging setup for livekitx task binaries
// ABOUTME: Logs to stderr so generator and test output keeps stdout to itself

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Standard logging to stderr. Default: INFO level, RUST_LOG replaces it.
pub fn init() {
    init_at(Level::INFO);
}

/// Logging to stderr at DEBUG when `verbose` is set, INFO otherwise.
/// A non-empty RUST_LOG replaces either default, lowering as well as raising it.
pub fn init_verbose(verbose: bool) {
    init_at(default_level(verbose));
}

fn default_level(verbose: bool) -> Level {
    if verbose {
        Level::DEBUG
    } else {
        Level::INFO
    }
}

/// RUST_LOG directives when present and valid, otherwise just `level`.
fn filter_for(directives: Option<&str>, level: Level) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::default().add_directive(level.into()))
}

fn init_at(level: Level) {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter_for(directives.as_deref(), level))
        .with_target(false)
        .init();
}
