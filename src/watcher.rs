//! Config file watcher.
//!
//! Watches the directory containing the config file (editors often replace
//! files rather than writing in place) and emits a debounced reload event
//! when the file is created or modified.

use notify::{recommended_watcher, RecursiveMode, Result as NotifyResult, Watcher};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};

/// Quiet period after the first change before a reload is emitted.
const DEBOUNCE: Duration = Duration::from_millis(500);

/// How often the watch loop checks whether it should stop.
const STOP_POLL: Duration = Duration::from_millis(250);

/// Event emitted when config needs to be reloaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigReloadEvent {
    Reload,
}

/// Watches a config file for changes and emits reload events
pub struct ConfigWatcher {
    path: PathBuf,
    tx: Option<Sender<ConfigReloadEvent>>,
    stop: Arc<AtomicBool>,
}

impl ConfigWatcher {
    /// Create a new ConfigWatcher for `path`
    ///
    /// Returns a tuple of (watcher, receiver) where receiver will emit ConfigReloadEvent
    /// when the config file changes.
    pub fn new(path: impl Into<PathBuf>) -> (Self, Receiver<ConfigReloadEvent>) {
        let (tx, rx) = channel();
        let watcher = ConfigWatcher {
            path: path.into(),
            tx: Some(tx),
            stop: Arc::new(AtomicBool::new(false)),
        };
        (watcher, rx)
    }

    /// Start watching the config file for changes
    ///
    /// This spawns a background thread that sends reload events through the
    /// receiver. The thread stops when the watcher is dropped.
    pub fn start(&mut self) -> NotifyResult<()> {
        let tx = self
            .tx
            .take()
            .ok_or_else(|| std::io::Error::other("watcher already started"))?;
        let path = self.path.clone();
        let stop = self.stop.clone();

        thread::spawn(move || {
            if let Err(e) = Self::watch_loop(&path, tx, stop) {
                warn!(error = %e, watcher = "config", "Config watcher error");
            }
        });
        Ok(())
    }

    /// Internal watch loop running in background thread
    fn watch_loop(
        config_path: &Path,
        tx: Sender<ConfigReloadEvent>,
        stop: Arc<AtomicBool>,
    ) -> NotifyResult<()> {
        let watch_path = config_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let Some(file_name) = config_path.file_name().map(|n| n.to_os_string()) else {
            warn!(path = %config_path.display(), "Config path has no file name, not watching");
            return Ok(());
        };

        let debounce_active = Arc::new(Mutex::new(false));

        // Channel for the file watcher thread
        let (watch_tx, watch_rx) = channel();
        let mut watcher = recommended_watcher(move |res: notify::Result<notify::Event>| {
            let _ = watch_tx.send(res);
        })?;
        watcher.watch(watch_path, RecursiveMode::NonRecursive)?;

        info!(
            path = %watch_path.display(),
            target = ?file_name,
            "Config watcher started"
        );

        while !stop.load(Ordering::Relaxed) {
            match watch_rx.recv_timeout(STOP_POLL) {
                Ok(Ok(event)) => {
                    if !is_config_event(&event, &file_name) {
                        continue;
                    }
                    let mut debounce = debounce_active.lock();
                    if *debounce {
                        continue;
                    }
                    *debounce = true;
                    drop(debounce); // Release lock before spawning thread

                    let tx = tx.clone();
                    let debounce_flag = debounce_active.clone();
                    let stop = stop.clone();
                    thread::spawn(move || {
                        thread::sleep(DEBOUNCE);
                        *debounce_flag.lock() = false;
                        if tx.send(ConfigReloadEvent::Reload).is_err() {
                            stop.store(true, Ordering::Relaxed);
                            return;
                        }
                        info!("Config file changed, emitting reload event");
                    });
                }
                Ok(Err(e)) => {
                    warn!(error = %e, watcher = "config", "File watcher error");
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        debug!(watcher = "config", "Config watcher shutting down");
        Ok(())
    }
}

impl Drop for ConfigWatcher {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

/// True for create/modify events touching a file named `file_name`.
pub fn is_config_event(event: &notify::Event, file_name: &std::ffi::OsStr) -> bool {
    let is_relevant_kind = matches!(
        event.kind,
        notify::EventKind::Create(_) | notify::EventKind::Modify(_)
    );
    is_relevant_kind
        && event
            .paths
            .iter()
            .any(|path| path.file_name() == Some(file_name))
}
