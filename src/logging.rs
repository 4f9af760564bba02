//! Structured JSONL logging to a file plus human-readable stderr output.
//!
//! Dual-output logging:
//! - **JSONL to file** (~/.scriptpad/logs/scriptpad.jsonl) - structured, greppable
//! - **Pretty to stderr** - human-readable for developers
//!
//! ```rust,ignore
//! // Initialize logging - keep the guard alive for the duration of the program
//! let _guard = scriptpad::logging::init();
//! tracing::info!(script_path = %path.display(), "run started");
//! ```

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Guard that must be kept alive for the duration of the program.
/// Dropping it flushes and closes the log file.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
}

/// Initialize the dual-output logging system.
pub fn init() -> LoggingGuard {
    let log_dir = log_dir();
    if let Err(e) = fs::create_dir_all(&log_dir) {
        eprintln!("[logging] failed to create log directory: {e}");
    }
    let log_path = log_dir.join("scriptpad.jsonl");

    let file: Box<dyn Write + Send> = match OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => Box::new(file),
        Err(e) => {
            eprintln!("[logging] failed to open {}: {e}", log_path.display());
            Box::new(std::io::sink())
        }
    };

    // Non-blocking writer so logging never stalls a run
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // JSONL layer for file output
    let json_layer = fmt::layer()
        .json()
        .with_writer(non_blocking_file)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_target(true)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .with_span_events(FmtSpan::NONE);

    // Pretty layer for stderr
    let pretty_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(false)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(pretty_layer)
        .init();

    tracing::info!(log_path = %log_path.display(), "logging initialized");

    LoggingGuard {
        _file_guard: file_guard,
    }
}

/// Log directory (~/.scriptpad/logs/)
fn log_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".scriptpad").join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("scriptpad-logs"))
}
