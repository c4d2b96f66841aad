//! The real/virtual keystate model.
//!
//! Two boolean facts are kept per tracked key:
//!
//! - **real** – whether the physical key is currently held, as last observed
//!   from the input stream.  Ground truth.
//! - **virtual** – whether the synthetic output device currently reports the
//!   key as pressed.  This is all a downstream consumer ever sees.
//!
//! Invariants (enforced by [`super::resolver::SocdResolver`], the only
//! mutator):
//!
//! - at most one member of an axis pair is virtually pressed once a
//!   transition has been resolved;
//! - a key is never virtually pressed unless it is really pressed, except
//!   for the transient window in which a still-held key is suppressed by its
//!   freshly pressed opposite.

use super::keys::TrackedKey;

/// Real and virtual pressed-state for the four tracked keys.
///
/// Both arrays start all-released and are discarded at shutdown; nothing is
/// persisted across runs.
#[derive(Debug, Clone, Default)]
pub struct KeyStates {
    real: [bool; TrackedKey::COUNT],
    virt: [bool; TrackedKey::COUNT],
}

impl KeyStates {
    /// Creates the all-released initial state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the physical key is currently held.
    pub fn real_pressed(&self, key: TrackedKey) -> bool {
        self.real[key.index()]
    }

    /// Whether the virtual device currently reports the key as pressed.
    pub fn virtual_pressed(&self, key: TrackedKey) -> bool {
        self.virt[key.index()]
    }

    pub(crate) fn set_real(&mut self, key: TrackedKey, pressed: bool) {
        self.real[key.index()] = pressed;
    }

    pub(crate) fn set_virtual(&mut self, key: TrackedKey, pressed: bool) {
        self.virt[key.index()] = pressed;
    }

    /// Copies the current state into a plain value for display or transfer
    /// to another thread.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            real: self.real,
            virt: self.virt,
        }
    }
}

/// A point-in-time copy of [`KeyStates`], detached from the live model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Snapshot {
    pub real: [bool; TrackedKey::COUNT],
    pub virt: [bool; TrackedKey::COUNT],
}

impl Snapshot {
    pub fn real_pressed(&self, key: TrackedKey) -> bool {
        self.real[key.index()]
    }

    pub fn virtual_pressed(&self, key: TrackedKey) -> bool {
        self.virt[key.index()]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_all_released() {
        let states = KeyStates::new();
        for key in TrackedKey::ALL {
            assert!(!states.real_pressed(key));
            assert!(!states.virtual_pressed(key));
        }
    }

    #[test]
    fn test_mutators_touch_only_the_addressed_key() {
        let mut states = KeyStates::new();
        states.set_real(TrackedKey::Up, true);
        states.set_virtual(TrackedKey::Up, true);

        assert!(states.real_pressed(TrackedKey::Up));
        assert!(states.virtual_pressed(TrackedKey::Up));
        for key in [TrackedKey::Down, TrackedKey::Left, TrackedKey::Right] {
            assert!(!states.real_pressed(key));
            assert!(!states.virtual_pressed(key));
        }
    }

    #[test]
    fn test_snapshot_is_detached_from_the_live_model() {
        let mut states = KeyStates::new();
        states.set_virtual(TrackedKey::Left, true);
        let snap = states.snapshot();

        states.set_virtual(TrackedKey::Left, false);

        assert!(snap.virtual_pressed(TrackedKey::Left));
        assert!(!states.virtual_pressed(TrackedKey::Left));
    }
}
