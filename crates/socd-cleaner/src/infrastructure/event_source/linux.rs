//! Linux evdev capture implementation.
//!
//! Opens the physical keyboard's event node and runs a blocking
//! `fetch_events` loop on a dedicated thread.  The kernel queue read blocks
//! until input arrives, which is what keeps the daemon idle-cheap; the
//! consumer side stays cancellable because it waits on the channel with a
//! timeout rather than on the device itself.
//!
//! The device is deliberately *not* grabbed: other keys must keep reaching
//! the system through the physical keyboard unchanged.  The cleaner only
//! ever out-shouts the four tracked keys through its own virtual device.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread;

use evdev::{Device, EventType};
use tracing::{debug, info, warn};

use socd_core::{KeyAction, KeyTransition, TrackedKey};

use super::{CaptureError, InputSource, SourceEvent};

/// Physical keyboard capture over a raw evdev node.
pub struct EvdevInputSource {
    /// Taken by `start()`; `None` afterwards.
    device: Mutex<Option<Device>>,
    stopped: Arc<AtomicBool>,
}

impl EvdevInputSource {
    /// Opens the device node and logs the keyboard's reported identity.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::OpenFailed`] if the node cannot be opened
    /// (missing device, insufficient privilege).
    pub fn open(path: &Path) -> Result<Self, CaptureError> {
        let device = Device::open(path).map_err(|source| CaptureError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;

        match device.name() {
            Some(name) => info!(device = %path.display(), "reading inputs from: {name}"),
            None => info!(device = %path.display(), "reading inputs from unnamed device"),
        }

        Ok(Self {
            device: Mutex::new(Some(device)),
            stopped: Arc::new(AtomicBool::new(false)),
        })
    }
}

impl InputSource for EvdevInputSource {
    fn start(&self) -> Result<mpsc::Receiver<SourceEvent>, CaptureError> {
        let device = self
            .device
            .lock()
            .expect("device lock poisoned")
            .take()
            .ok_or(CaptureError::AlreadyStarted)?;

        let (tx, rx) = mpsc::channel::<SourceEvent>();
        let stopped = Arc::clone(&self.stopped);

        thread::Builder::new()
            .name("socd-read-loop".to_string())
            .spawn(move || run_read_loop(device, tx, stopped))
            .map_err(CaptureError::ThreadSpawnFailed)?;

        Ok(rx)
    }

    fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }
}

/// Entry point for the dedicated reader thread.
///
/// Exits when the device read fails, when `stop()` has been observed, or
/// when the consumer has dropped the receiving end of the channel.
fn run_read_loop(mut device: Device, tx: Sender<SourceEvent>, stopped: Arc<AtomicBool>) {
    loop {
        if stopped.load(Ordering::SeqCst) {
            debug!("reader thread stopping on request");
            return;
        }

        let events = match device.fetch_events() {
            Ok(events) => events,
            Err(e) => {
                warn!("physical device read failed: {e}");
                let _ = tx.send(SourceEvent::Closed {
                    reason: e.to_string(),
                });
                return;
            }
        };

        for event in events {
            if event.event_type() != EventType::KEY {
                continue;
            }
            // Untracked key codes and key repeats (value 2) are filtered
            // here; the channel carries tracked transitions only.
            let Some(key) = TrackedKey::from_code(event.code()) else {
                continue;
            };
            let Some(action) = KeyAction::from_event_value(event.value()) else {
                continue;
            };

            if tx
                .send(SourceEvent::Transition(KeyTransition { key, action }))
                .is_err()
            {
                // Consumer gone – shutdown already in progress.
                return;
            }
        }
    }
}
