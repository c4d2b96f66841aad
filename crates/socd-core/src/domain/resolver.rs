//! Last-input-priority SOCD resolution.
//!
//! The resolver is a small state machine over [`KeyStates`].  It consumes
//! physical transitions one at a time, in arrival order, and leaves the
//! virtual state such that at most one member of each axis pair is reported
//! as pressed:
//!
//! - **key-down for K** – a newly pressed key always wins.  If K's opposite
//!   is physically held, its virtual output is forced off; K itself becomes
//!   both really and virtually pressed.
//! - **key-up for K** – releasing a key always clears its own virtual
//!   output.  If K's opposite is still physically held, its virtual output
//!   is restored, since the suppression was conditioned on K being the most
//!   recent press.
//!
//! No press-history queue is needed: one level of "who was pressed last" is
//! fully encoded in which member of the pair is currently virtually active,
//! and the two rules above are self-consistent under repeated presses and
//! releases in any order.

use tracing::trace;

use super::keys::{KeyAction, KeyTransition, TrackedKey};
use super::state::KeyStates;

/// The SOCD cleaning state machine.
///
/// Owns the keystate model; all mutation goes through [`SocdResolver::apply`]
/// (or the explicit `key_down` / `key_up` paths) on a single thread.
#[derive(Debug, Default)]
pub struct SocdResolver {
    states: KeyStates,
}

impl SocdResolver {
    /// Creates a resolver with all keys released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read access to the current keystate model.
    pub fn states(&self) -> &KeyStates {
        &self.states
    }

    /// Applies one physical transition.
    pub fn apply(&mut self, transition: KeyTransition) {
        match transition.action {
            KeyAction::Press => self.key_down(transition.key),
            KeyAction::Release => self.key_up(transition.key),
        }
    }

    /// Press path: the new press wins over a still-held opposite.
    ///
    /// Re-applying a press for a key that is already down is idempotent; the
    /// suppression step only reads the partner's real state.
    pub fn key_down(&mut self, key: TrackedKey) {
        let partner = key.partner();
        if self.states.real_pressed(partner) {
            trace!(?key, ?partner, "suppressing opposite of new press");
            self.states.set_virtual(partner, false);
        }
        self.states.set_real(key, true);
        self.states.set_virtual(key, true);
    }

    /// Release path: clear the key, restore a still-held opposite.
    pub fn key_up(&mut self, key: TrackedKey) {
        let partner = key.partner();
        if self.states.real_pressed(partner) {
            trace!(?key, ?partner, "restoring still-held opposite on release");
            self.states.set_virtual(partner, true);
        }
        self.states.set_real(key, false);
        self.states.set_virtual(key, false);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
