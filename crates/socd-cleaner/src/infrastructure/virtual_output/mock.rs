//! Recording sink for tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use super::{KeySink, OutputError};

/// A [`KeySink`] that records every write instead of touching uinput.
///
/// Cloning shares the underlying recording, so a test can hand one clone to
/// the code under test and keep another for assertions (mirroring how the
/// production sink is owned by the control loop).
#[derive(Clone, Default)]
pub struct RecordingKeySink {
    writes: Arc<Mutex<Vec<(u16, bool)>>>,
    fail_writes: Arc<AtomicBool>,
}

impl RecordingKeySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All `(code, pressed)` writes so far, in order.  Each recorded write
    /// corresponds to a key record plus its sync marker on the real wire.
    pub fn writes(&self) -> Vec<(u16, bool)> {
        self.writes.lock().expect("lock poisoned").clone()
    }

    /// Discards the recording.
    pub fn clear(&self) {
        self.writes.lock().expect("lock poisoned").clear();
    }

    /// Makes subsequent writes fail, for error-path tests.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl KeySink for RecordingKeySink {
    fn write_key(&mut self, code: u16, pressed: bool) -> Result<(), OutputError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(OutputError::WriteFailed(std::io::Error::other(
                "injected failure",
            )));
        }
        self.writes
            .lock()
            .expect("lock poisoned")
            .push((code, pressed));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_the_recording() {
        // Arrange
        let sink = RecordingKeySink::new();
        let mut handle = sink.clone();

        // Act
        handle.write_key(17, true).unwrap();

        // Assert
        assert_eq!(sink.writes(), vec![(17, true)]);
    }

    #[test]
    fn test_injected_failure_surfaces_as_write_error() {
        let sink = RecordingKeySink::new();
        let mut handle = sink.clone();
        sink.fail_writes(true);

        let result = handle.write_key(17, true);

        assert!(matches!(result, Err(OutputError::WriteFailed(_))));
        assert!(sink.writes().is_empty());
    }
}
