//! The pump control loop.
//!
//! A single blocking loop that consumes translated transitions from the
//! capture channel, drives the [`CleanInputUseCase`], and publishes the
//! resulting keystate for the monitor.  All keystate mutation happens on
//! this one thread; no locking is involved.
//!
//! The wait is a channel receive with a timeout rather than a device read,
//! so the shutdown flag is observed within one poll tick regardless of
//! whether the keyboard produces further input.  FIFO delivery to this
//! single consumer keeps transitions strictly in arrival order, and the
//! broadcast for transition N completes before transition N+1 is dequeued.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::infrastructure::event_source::SourceEvent;
use crate::infrastructure::monitor::SharedKeystates;
use crate::infrastructure::virtual_output::{KeySink, OutputError};

use super::clean_input::CleanInputUseCase;

/// How long one channel wait may last before the shutdown flag is
/// re-checked.  Bounds cancellation latency.
pub const SHUTDOWN_POLL: Duration = Duration::from_millis(250);

/// Why the pump loop ended.
#[derive(Debug, PartialEq, Eq)]
pub enum PumpOutcome {
    /// The shutdown flag was cleared (signal received).
    Cancelled,
    /// The physical stream ended after at least one processed transition.
    /// Treated as a graceful stop: the device was probably unplugged.
    SourceClosed { transitions: u64 },
}

/// Error type for the pump loop.
#[derive(Debug, thiserror::Error)]
pub enum PumpError {
    /// The physical read failed before any event was consumed – the setup
    /// was never demonstrably working, so this is fatal.
    #[error("physical device read failed before any event was processed: {0}")]
    ReadFailedAtStartup(String),
    /// A virtual device write failed mid-run.
    #[error(transparent)]
    Output(#[from] OutputError),
}

/// Runs the pump until cancellation, stream end, or failure.
///
/// # Errors
///
/// Returns [`PumpError::ReadFailedAtStartup`] if the stream ends before the
/// first transition, and [`PumpError::Output`] if broadcasting fails.
pub fn run_pump(
    events: &Receiver<SourceEvent>,
    use_case: &mut CleanInputUseCase,
    sink: &mut dyn KeySink,
    shared: &SharedKeystates,
    running: &AtomicBool,
) -> Result<PumpOutcome, PumpError> {
    let mut transitions: u64 = 0;

    while running.load(Ordering::Relaxed) {
        match events.recv_timeout(SHUTDOWN_POLL) {
            Ok(SourceEvent::Transition(transition)) => {
                debug!(?transition, "processing transition");
                use_case.handle_transition(transition, sink)?;
                shared.publish(use_case.states());
                transitions += 1;
            }
            Ok(SourceEvent::Closed { reason }) => {
                return end_of_stream(transitions, reason);
            }
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => {
                // Reader thread gone without reporting – same as a closed
                // stream from the pump's perspective.
                return end_of_stream(transitions, "event channel closed".to_string());
            }
        }
    }

    info!(transitions, "pump cancelled");
    Ok(PumpOutcome::Cancelled)
}

fn end_of_stream(transitions: u64, reason: String) -> Result<PumpOutcome, PumpError> {
    if transitions == 0 {
        return Err(PumpError::ReadFailedAtStartup(reason));
    }
    warn!(transitions, "physical stream ended: {reason}");
    Ok(PumpOutcome::SourceClosed { transitions })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
