//! Virtual output device infrastructure.
//!
//! The emitter writes the cleaned keystate through the [`KeySink`] trait;
//! production uses the uinput-backed [`uinput::UinputKeyboard`], tests use
//! [`mock::RecordingKeySink`].

pub mod mock;
pub mod uinput;

/// Error type for virtual device operations.
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("failed to create virtual device: {0}")]
    CreateFailed(#[source] std::io::Error),
    #[error("failed to write event to virtual device: {0}")]
    WriteFailed(#[source] std::io::Error),
    #[error("virtual device has been destroyed")]
    Destroyed,
}

/// A destination for cleaned key events.
///
/// Contract: every `write_key` call produces one key event record on the
/// wire followed by one synchronization marker record, so callers can reason
/// about the exact emitted record count.
pub trait KeySink: Send {
    /// Writes one key event (`pressed` maps to event value 1/0).
    fn write_key(&mut self, code: u16, pressed: bool) -> Result<(), OutputError>;
}
