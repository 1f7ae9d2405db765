use std::path::PathBuf;

use thiserror::Error;
use tracing::{error, warn};

/// Errors loading, validating or saving the configuration file.
///
/// Any of these aborts a (re)load: the previously loaded table stays active.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to access config file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ConfigError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Extension trait for silent error logging with caller location tracking.
/// Use when the operation is recoverable and the user doesn't need to know.
///
/// # Examples
///
/// ```ignore
/// use shortcut_helper::error::ResultExt;
///
/// // Log and keep going if the renderer pipe is gone
/// renderer.flush().log_err();
/// ```
pub trait ResultExt<T> {
    /// Log error with caller location and return None. Use for recoverable failures.
    fn log_err(self) -> Option<T>;
    /// Log as warning with caller location and return None. Use for expected failures.
    fn warn_on_err(self) -> Option<T>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for std::result::Result<T, E> {
    #[track_caller]
    fn log_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(err) => {
                let caller = std::panic::Location::caller();
                error!(
                    error = %err,
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
            Err(err) => {
                let caller = std::panic::Location::caller();
                warn!(
                    error = %err,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation had warning"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_ext_passes_ok_through() {
        let ok: Result<u32, ConfigError> = Ok(7);
        assert_eq!(ok.log_err(), Some(7));
    }

    #[test]
    fn result_ext_swallows_errors() {
        let err: Result<u32, ConfigError> = Err(ConfigError::Invalid("bad".into()));
        assert_eq!(err.warn_on_err(), None);
    }

    #[test]
    fn not_found_message_includes_path() {
        let err = ConfigError::NotFound(PathBuf::from("/tmp/missing.json"));
        assert!(err.is_not_found());
        assert!(err.to_string().contains("/tmp/missing.json"));
    }
}
