use awaydesk_domain::{AwayDeskError, Result};
use tokio::task::JoinError;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::transport::console::ServeStats;

/// Output format for log events written to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    /// Read `AWAYDESK_LOG_FORMAT`; anything but `json` means text.
    pub fn from_env() -> Self {
        match std::env::var("AWAYDESK_LOG_FORMAT") {
            Ok(value) if value.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Install the global tracing subscriber.
///
/// Filtering follows `RUST_LOG`, defaulting to `info`. Logs go to stderr so
/// stdout stays reserved for replies.
pub fn init_logging(format: LogFormat) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr);

    let installed = match format {
        LogFormat::Json => builder.json().with_current_span(false).try_init(),
        LogFormat::Text => builder.with_target(false).try_init(),
    };
    installed.map_err(|e| AwayDeskError::Internal(format!("failed to install logger: {e}")))
}

/// Log a handler task that died instead of returning.
#[inline]
pub fn log_handler_fault(err: &JoinError) {
    if err.is_panic() {
        error!(error = %err, fault = "unhandled_handler_fault", "message handler panicked");
    } else {
        warn!(error = %err, "message handler cancelled");
    }
}

/// Log a handler that returned an error.
#[inline]
pub fn log_handler_error(err: &AwayDeskError) {
    warn!(error = %err, error_type = err.label(), "message handler failed");
}

#[inline]
pub fn log_serve_summary(stats: &ServeStats) {
    info!(
        received = stats.received,
        malformed = stats.malformed,
        handled = stats.handled,
        replied = stats.replied,
        failed = stats.failed,
        "console transport finished"
    );
}
