use std::error::Error;

use tracing::{error, warn};

pub use retrodesk_config::ConfigError;

/// Base trait for all application errors
pub trait DesktopError: Error + Send + Sync + 'static {
    /// Error code for programmatic handling
    fn error_code(&self) -> &'static str;

    /// Whether this error should be logged as an error or warning
    fn is_user_error(&self) -> bool {
        false
    }
}

/// Log a failure under `event` with its error code. User errors are logged
/// at `warn`, everything else at `error`.
pub fn log_desktop_error(event: &str, e: &dyn DesktopError, message: &str) {
    if e.is_user_error() {
        warn!(
            event = event,
            error = %e,
            error_code = e.error_code(),
            "{}",
            message
        );
    } else {
        error!(
            event = event,
            error = %e,
            error_code = e.error_code(),
            "{}",
            message
        );
    }
}

impl DesktopError for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            ConfigError::ConfigNotFound { .. } => "CONFIG_NOT_FOUND",
            ConfigError::ConfigParseError { .. } => "CONFIG_PARSE_ERROR",
            ConfigError::ViewportTooSmall { .. } => "CONFIG_VIEWPORT_TOO_SMALL",
            ConfigError::EmptyStateDir => "CONFIG_EMPTY_STATE_DIR",
            ConfigError::IoError { .. } => "CONFIG_IO_ERROR",
        }
    }

    fn is_user_error(&self) -> bool {
        !matches!(self, ConfigError::IoError { .. })
    }
}
