//! Structured JSONL logging to file and human-readable stderr output.
//!
//! This module provides dual-output logging:
//! - **JSONL to file** (`<data-local-dir>/shortcut-helper/logs/shortcut-helper.jsonl`)
//! - **Pretty to stderr** - human-readable for developers
//!
//! stdout is left alone: it carries the popup renderer protocol.
//!
//! # Usage
//!
//! ```rust,ignore
//! use shortcut_helper::logging;
//!
//! // Initialize logging - MUST keep guard alive for duration of program
//! let _guard = logging::init();
//!
//! tracing::info!(event_type = "app_start", "Application started");
//! ```
//!
//! # JSONL Output Format
//!
//! ```json
//! {"timestamp":"2026-10-19T10:30:45.123Z","level":"INFO","target":"shortcut_helper::app","fields":{"message":"Shortcut table rebuilt","event_type":"table_event","total":42}}
//! ```

use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::shortcuts::Modifiers;

const LOG_FILE_NAME: &str = "shortcut-helper.jsonl";

/// Guard that must be kept alive for the duration of the program.
/// Dropping this guard will flush and close the log file.
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Initialize the dual-output logging system.
///
/// If the log file can't be opened, logging continues on stderr only.
pub fn init() -> LoggingGuard {
    let log_dir = get_log_dir();
    if let Err(e) = fs::create_dir_all(&log_dir) {
        eprintln!("[LOGGING] Failed to create log directory: {}", e);
    }
    let log_path = log_path();

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .map_err(|e| eprintln!("[LOGGING] Failed to open log file: {}", e))
        .ok();

    // Non-blocking writer so a slow disk never delays key events
    let (json_layer, file_guard) = match file {
        Some(file) => {
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file);
            let layer = fmt::layer()
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
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    // Environment filter - default to info, allow override via RUST_LOG
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

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

    tracing::info!(
        event_type = "app_lifecycle",
        action = "started",
        log_path = %log_path.display(),
        "Application logging initialized"
    );

    LoggingGuard {
        _file_guard: file_guard,
    }
}

/// Get the log directory path (`<data-local-dir>/shortcut-helper/logs`)
fn get_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("shortcut-helper").join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("shortcut-helper-logs"))
}

/// Get the path to the JSONL log file
pub fn log_path() -> PathBuf {
    get_log_dir().join(LOG_FILE_NAME)
}

// =============================================================================
// STRUCTURED LOGGING HELPERS
// =============================================================================

/// Log a modifier state change and how many shortcuts it surfaced
pub fn log_modifier_event(pressed: Modifiers, shown: usize, request_id: Option<&str>) {
    let held = pressed.names().join("+");
    tracing::debug!(
        event_type = "modifier_event",
        pressed = %held,
        shown = shown,
        request_id = request_id,
        "Modifiers {} -> {} shortcuts",
        if held.is_empty() { "none" } else { held.as_str() },
        shown
    );
}

/// Log a (re)built shortcut table
pub fn log_table_event(action: &str, total: usize, user: usize) {
    tracing::info!(
        event_type = "table_event",
        action = action,
        total = total,
        user = user,
        imported = total - user,
        "Shortcut table {}: {} entries ({} user)",
        action,
        total,
        user
    );
}
