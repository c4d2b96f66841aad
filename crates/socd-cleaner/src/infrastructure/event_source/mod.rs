//! Physical keyboard capture infrastructure.
//!
//! The production implementation ([`linux::EvdevInputSource`]) owns a
//! dedicated reader thread that blocks on the kernel's event queue and
//! delivers translated transitions over a channel.  Untracked key codes and
//! key-repeat events never leave this boundary – the channel carries only
//! the four tracked keys' press/release transitions, in arrival order.
//!
//! # Testability
//!
//! The [`InputSource`] trait allows unit tests to inject synthetic
//! transitions without a real device node (see [`mock::MockInputSource`]).

use std::path::PathBuf;
use std::sync::mpsc;

use socd_core::KeyTransition;

pub mod linux;
pub mod mock;

/// An event delivered by an input source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceEvent {
    /// One tracked-key transition, already filtered and translated.
    Transition(KeyTransition),
    /// The physical stream ended.  A short or failed read typically means
    /// the device was removed; the source does not retry.
    Closed {
        /// OS error text for the operator.
        reason: String,
    },
}

/// Error type for capture setup.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("failed to open input device {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to spawn reader thread: {0}")]
    ThreadSpawnFailed(#[source] std::io::Error),
    #[error("capture service has already been started")]
    AlreadyStarted,
}

/// Trait abstracting physical transition production.
pub trait InputSource: Send {
    /// Starts the source and returns the receiving end of its event stream.
    ///
    /// May be called at most once per source.
    fn start(&self) -> Result<mpsc::Receiver<SourceEvent>, CaptureError>;

    /// Asks the source to stop producing events.
    ///
    /// Best effort: a reader blocked in a device read only observes the
    /// request once the next event arrives or the read errors.
    fn stop(&self);
}
