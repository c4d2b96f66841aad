//! CleanInputUseCase: applies SOCD resolution and re-broadcasts the result.
//!
//! This use case is the heart of the daemon.  Each physical transition is
//! applied to the resolver, then the *entire* virtual keystate is re-emitted
//! to the sink – not just the key that changed.  Re-broadcasting everything
//! guarantees the downstream device's observable state exactly matches the
//! model after every call and cannot drift from a missed or reordered
//! write; at human input rates the extra no-op writes cost nothing.
//!
//! Wire shape per broadcast: for each tracked key, a release record and a
//! current-state record, each followed by the sink's sync marker – sixteen
//! records per processed transition.

use socd_core::{KeyStates, KeyTransition, SocdResolver, TrackedKey};

use crate::infrastructure::virtual_output::{KeySink, OutputError};

/// The Clean Input use case.
///
/// Owns the resolver state; the sink is borrowed per call so that its
/// lifecycle (creation, destroy-on-shutdown) stays with the caller.
#[derive(Debug, Default)]
pub struct CleanInputUseCase {
    resolver: SocdResolver,
}

impl CleanInputUseCase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read access to the keystate model, for publishing and display.
    pub fn states(&self) -> &KeyStates {
        self.resolver.states()
    }

    /// Applies one transition and re-broadcasts the full virtual keystate.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError`] if a virtual device write fails.  The
    /// resolver state is updated regardless, so a subsequent successful
    /// broadcast re-synchronizes the device.
    pub fn handle_transition(
        &mut self,
        transition: KeyTransition,
        sink: &mut dyn KeySink,
    ) -> Result<(), OutputError> {
        self.resolver.apply(transition);
        self.emit_all(sink)
    }

    /// Unconditionally re-emits every tracked key's virtual state.
    pub fn emit_all(&self, sink: &mut dyn KeySink) -> Result<(), OutputError> {
        for key in TrackedKey::ALL {
            let code = key.code();
            sink.write_key(code, false)?;
            sink.write_key(code, self.resolver.states().virtual_pressed(key))?;
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
