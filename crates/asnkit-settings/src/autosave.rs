//! Debounced settings autosave
//!
//! "On settings change, schedule a coalesced persist after a fixed
//! delay": rapid edits replace the pending snapshot and restart the
//! timer, so a burst of changes produces a single write. A worker
//! thread owns the timer via `recv_timeout`; dropping the handle
//! flushes whatever is still pending, so batch callers never lose the
//! last scheduled write.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::JoinHandle;
use std::time::Duration;
use tracing::warn;

use crate::config::Settings;
use crate::persistence::SettingsStore;

/// Delay between the last edit and the persist.
pub const AUTOSAVE_DELAY: Duration = Duration::from_millis(500);

/// Handle to the autosave worker.
pub struct Autosaver {
    tx: Option<Sender<Settings>>,
    worker: Option<JoinHandle<()>>,
}

impl Autosaver {
    /// Spawn an autosave worker writing through `store` after the
    /// default delay.
    pub fn new(store: SettingsStore) -> Self {
        Self::with_delay(store, AUTOSAVE_DELAY)
    }

    /// Spawn with an explicit debounce delay.
    pub fn with_delay(store: SettingsStore, delay: Duration) -> Self {
        let (tx, rx) = mpsc::channel::<Settings>();
        let worker = std::thread::spawn(move || {
            while let Ok(first) = rx.recv() {
                let mut pending = first;
                loop {
                    match rx.recv_timeout(delay) {
                        // A newer snapshot replaces the pending one
                        // and restarts the timer.
                        Ok(newer) => pending = newer,
                        Err(RecvTimeoutError::Timeout) => {
                            persist(&store, &pending);
                            break;
                        }
                        Err(RecvTimeoutError::Disconnected) => {
                            persist(&store, &pending);
                            return;
                        }
                    }
                }
            }
        });
        Self {
            tx: Some(tx),
            worker: Some(worker),
        }
    }

    /// Schedule a snapshot for persisting, replacing any pending one.
    pub fn schedule(&self, settings: Settings) {
        if let Some(tx) = &self.tx {
            // Send only fails when the worker is gone; nothing useful
            // to do then beyond noting it.
            if tx.send(settings).is_err() {
                warn!("autosave worker is no longer running");
            }
        }
    }
}

impl Drop for Autosaver {
    fn drop(&mut self) {
        // Disconnect the channel so the worker flushes and exits.
        drop(self.tx.take());
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

fn persist(store: &SettingsStore, settings: &Settings) {
    if let Err(e) = store.save(settings) {
        warn!(error = %e, "autosave failed");
    }
}
