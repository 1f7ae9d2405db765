//! Key events and control commands via stdin.
//!
//! Global key capture runs in a separate process, which reports the full set
//! of held modifiers each time it changes.
//!
//! # Protocol
//!
//! Commands are sent as JSON objects, one per line (JSONL format):
//!
//! ```json
//! {"type": "modifiersChanged", "pressed": ["ctrl", "alt"]}
//! {"type": "modifiersChanged", "pressed": []}
//! {"type": "reload"}
//! {"type": "quit"}
//! ```
//!
//! # Example Usage
//!
//! ```bash
//! echo '{"type": "modifiersChanged", "pressed": ["super"]}' | ./shortcut-helper
//! ```

use std::io::BufRead;

use tracing::{debug, info, warn};

use crate::shortcuts::Modifiers;

/// Commands the key-capture process can send
///
/// All commands support an optional `requestId` field for correlation in logs.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ExternalCommand {
    /// The set of held modifier keys changed
    /// pressed: every modifier currently down, e.g. ["ctrl", "shift"]
    ModifiersChanged {
        #[serde(default)]
        pressed: Vec<String>,
        #[serde(default, rename = "requestId")]
        request_id: Option<String>,
    },
    /// Reload the config file now
    Reload {
        #[serde(default, rename = "requestId")]
        request_id: Option<String>,
    },
    /// Stop the event loop
    Quit,
}

/// Turn reported modifier names into a modifier set. Unknown names are logged
/// and ignored.
pub fn parse_pressed(names: &[String]) -> Modifiers {
    names.iter().fold(Modifiers::empty(), |acc, name| {
        match Modifiers::from_token(name.trim()) {
            Some(flag) => acc | flag,
            None => {
                warn!(modifier = %name, "Ignoring unknown modifier name");
                acc
            }
        }
    })
}

/// Parse one stdin line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<ExternalCommand>, serde_json::Error> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(line).map(Some)
}

/// Start a thread that listens on stdin for JSONL commands and forwards them
/// through `tx`, wrapped by `wrap`.
///
/// Uses a bounded channel supplied by the caller. When stdin closes the
/// key-capture process is gone, so a final `Quit` is sent.
pub fn start_stdin_listener<T, F>(tx: async_channel::Sender<T>, wrap: F)
where
    T: Send + 'static,
    F: Fn(ExternalCommand) -> T + Send + 'static,
{
    std::thread::spawn(move || {
        info!("Stdin command listener started");
        let stdin = std::io::stdin();
        forward_commands(stdin.lock(), &tx, wrap);
        info!("Stdin command listener exiting");
    });
}

/// Forward every command read from `reader` until it ends or the receiver
/// is dropped. End of input (or a read error) is forwarded as `Quit`.
fn forward_commands<R, T, F>(reader: R, tx: &async_channel::Sender<T>, wrap: F)
where
    R: BufRead,
    F: Fn(ExternalCommand) -> T,
{
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!(error = %e, "Error reading stdin");
                break;
            }
        };
        match parse_command(&line) {
            Ok(Some(cmd)) => {
                debug!(command = ?cmd, "Received command");
                // send_blocking is used since we're in a sync thread
                if tx.send_blocking(wrap(cmd)).is_err() {
                    info!("Command channel closed, exiting");
                    return;
                }
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, line = %line, "Failed to parse command"),
        }
    }

    info!("Stdin closed, requesting quit");
    let _ = tx.send_blocking(wrap(ExternalCommand::Quit));
}
