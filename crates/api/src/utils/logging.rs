//! Structured command logging and subscriber setup

use std::time::Duration;

use mspdash_domain::MspDashError;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Environment variable selecting the log output format (`json` or `pretty`).
pub const LOG_FORMAT_ENV: &str = "MSPDASH_LOG_FORMAT";

/// Log the outcome of a command execution with structured fields.
///
/// `command` is a stable identifier such as `"billing::compute_invoice"`;
/// callers must not forward account data through it.
#[inline]
pub fn log_command_execution(command: &str, elapsed: Duration, error: Option<&MspDashError>) {
    let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

    match error {
        None => info!(command, duration_ms, "command_execution_success"),
        Some(err) => warn!(
            command,
            duration_ms,
            error = error_label(err),
            detail = %err,
            "command_execution_failure"
        ),
    }
}

/// Convert an `MspDashError` into a stable label suitable for logging.
#[inline]
pub fn error_label(error: &MspDashError) -> &'static str {
    match error {
        MspDashError::Database(_) => "database",
        MspDashError::Config(_) => "config",
        MspDashError::Security(_) => "security",
        MspDashError::NotFound(_) => "not_found",
        MspDashError::InvalidInput(_) => "invalid_input",
        MspDashError::Internal(_) => "internal",
        MspDashError::ClientNotFound(_) => "client_not_found",
        MspDashError::PlanNotConfigured { .. } => "plan_not_configured",
    }
}

/// Install the global tracing subscriber.
///
/// The filter comes from `RUST_LOG`, falling back to `default_level`. Output
/// is JSON when `MSPDASH_LOG_FORMAT=json`. Logs go to stderr so command
/// output on stdout stays machine-readable. Calling this twice is a no-op.
pub fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let json = std::env::var(LOG_FORMAT_ENV)
        .map(|value| value.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    let result = if json {
        let layer = tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr);
        registry.with(layer).try_init()
    } else {
        let layer =
            tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr);
        registry.with(layer).try_init()
    };

    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
