//! Logging setup utilities for the Podium binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// Both the library crates of the workspace and the binary itself log at
/// `default_log_level`. The filter can be overridden with `RUST_LOG`.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "podium_server")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use podium_shared::logger::setup_logger;
///
/// setup_logger("podium_server", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter(binary_name, default_log_level).into());
    let directives = filter.to_string();

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::debug!("Logger initialized with filter '{}'", directives);
}

/// Build the default filter directive string.
///
/// Binary names use `-` while tracing targets use `_`, so the name is normalized.
fn default_filter(binary_name: &str, default_log_level: &str) -> String {
    let binary_target = binary_name.replace('-', "_");
    format!(
        "podium_server={level},podium_client={level},podium_shared={level},{binary}={level},tower_http={level}",
        level = default_log_level,
        binary = binary_target,
    )
}
