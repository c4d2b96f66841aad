//! Mock input source for unit and integration testing.
//!
//! Allows tests to inject synthetic [`SourceEvent`]s without a device node.

use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};

use socd_core::{KeyAction, KeyTransition, TrackedKey};

use super::{CaptureError, InputSource, SourceEvent};

/// A mock implementation of [`InputSource`] driven by the test.
#[derive(Default)]
pub struct MockInputSource {
    sender: Arc<Mutex<Option<Sender<SourceEvent>>>>,
}

impl MockInputSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Injects a synthetic event, as if read from hardware.
    ///
    /// Panics if `start()` has not been called.
    pub fn inject(&self, event: SourceEvent) {
        let guard = self.sender.lock().expect("lock poisoned");
        let sender = guard
            .as_ref()
            .expect("MockInputSource::inject called before start()");
        sender.send(event).expect("receiver dropped");
    }

    /// Convenience: injects a press for `key`.
    pub fn press(&self, key: TrackedKey) {
        self.inject(SourceEvent::Transition(KeyTransition {
            key,
            action: KeyAction::Press,
        }));
    }

    /// Convenience: injects a release for `key`.
    pub fn release(&self, key: TrackedKey) {
        self.inject(SourceEvent::Transition(KeyTransition {
            key,
            action: KeyAction::Release,
        }));
    }

    /// Simulates the physical stream ending.
    pub fn close(&self, reason: &str) {
        self.inject(SourceEvent::Closed {
            reason: reason.to_string(),
        });
    }
}

impl InputSource for MockInputSource {
    fn start(&self) -> Result<mpsc::Receiver<SourceEvent>, CaptureError> {
        let (tx, rx) = mpsc::channel();
        let mut guard = self.sender.lock().expect("lock poisoned");
        if guard.is_some() {
            return Err(CaptureError::AlreadyStarted);
        }
        *guard = Some(tx);
        Ok(rx)
    }

    fn stop(&self) {
        // Drop the sender to close the channel.
        *self.sender.lock().expect("lock poisoned") = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_injected_events_arrive_in_order() {
        // Arrange
        let source = MockInputSource::new();
        let rx = source.start().expect("start");

        // Act
        source.press(TrackedKey::Up);
        source.release(TrackedKey::Up);

        // Assert
        assert_eq!(
            rx.recv().unwrap(),
            SourceEvent::Transition(KeyTransition {
                key: TrackedKey::Up,
                action: KeyAction::Press,
            })
        );
        assert_eq!(
            rx.recv().unwrap(),
            SourceEvent::Transition(KeyTransition {
                key: TrackedKey::Up,
                action: KeyAction::Release,
            })
        );
    }

    #[test]
    fn test_second_start_is_rejected() {
        let source = MockInputSource::new();
        let _rx = source.start().expect("first start");

        assert!(matches!(
            source.start(),
            Err(CaptureError::AlreadyStarted)
        ));
    }

    #[test]
    fn test_stop_closes_the_channel() {
        let source = MockInputSource::new();
        let rx = source.start().expect("start");

        source.stop();

        assert!(rx.recv().is_err());
    }
}
