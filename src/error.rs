use std::io;
use thiserror::Error;
use tracing::{error, warn};

/// Error severity for display decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    /// Requires user action; startup cannot proceed.
    Critical,
}

/// Domain-specific errors for scriptpad.
#[derive(Error, Debug)]
pub enum ScriptpadError {
    /// The configured interpreter/compiler could not be launched at all.
    #[error("failed to launch '{executable}': {source}")]
    Launch {
        executable: String,
        #[source]
        source: io::Error,
    },

    /// Any other failure while running the script.
    #[error("script run failed: {message}")]
    Run { message: String },

    #[error("configuration load failed for '{path}': {reason}")]
    ConfigLoad { path: String, reason: String },

    #[error("keyword dictionary load failed for '{path}': {reason}")]
    KeywordLoad { path: String, reason: String },

    #[error("unknown theme '{name}'")]
    UnknownTheme { name: String },
}

impl ScriptpadError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Launch { .. } => ErrorSeverity::Error,
            Self::Run { .. } => ErrorSeverity::Error,
            Self::ConfigLoad { .. } => ErrorSeverity::Critical,
            Self::KeywordLoad { .. } => ErrorSeverity::Critical,
            Self::UnknownTheme { .. } => ErrorSeverity::Critical,
        }
    }

    /// True for failures that must abort startup (the session cannot exist
    /// without valid configuration).
    pub fn is_fatal(&self) -> bool {
        self.severity() == ErrorSeverity::Critical
    }
}

pub type Result<T> = std::result::Result<T, ScriptpadError>;

/// Extension trait for silent error logging with caller location tracking.
/// Use when the operation is recoverable and the user doesn't need to know.
pub trait ResultExt<T> {
    /// Log error with caller location and return None. Use for recoverable failures.
    fn log_err(self) -> Option<T>;
    /// Log as warning with caller location and return None. Use for expected failures.
    fn warn_on_err(self) -> Option<T>;
}

impl<T, E: std::fmt::Debug> ResultExt<T> for std::result::Result<T, E> {
    #[track_caller]
    fn log_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                let caller = std::panic::Location::caller();
                error!(
                    error = ?error,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation failed"
                );
                None
            }
        }
    }

    #[track_caller]
    fn warn_on_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                let caller = std::panic::Location::caller();
                warn!(
                    error = ?error,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation had warning"
                );
                None
            }
        }
    }
}
