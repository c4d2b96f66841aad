//! The four tracked directional keys and their axis pairing.
//!
//! The cleaner handles exactly two opposing pairs: {Up, Down} and
//! {Left, Right}, bound to the conventional WASD movement cluster.  The
//! numeric values are Linux `input-event-codes` key codes, which are what
//! both the physical event stream and the virtual output device speak.

/// One of the two independent opposing-pair groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Up/Down (W/S).
    Vertical,
    /// Left/Right (A/D).
    Horizontal,
}

/// A directional key handled by the cleaner.
///
/// Every other key code passes through the daemon untouched (it is never
/// read into the model and never re-emitted).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackedKey {
    /// W.
    Up,
    /// S.
    Down,
    /// A.
    Left,
    /// D.
    Right,
}

// Linux input-event-codes values for the bound keys.
const KEY_W: u16 = 17;
const KEY_A: u16 = 30;
const KEY_S: u16 = 31;
const KEY_D: u16 = 32;

impl TrackedKey {
    /// All tracked keys, in the fixed order used for emission.
    pub const ALL: [TrackedKey; 4] = [
        TrackedKey::Up,
        TrackedKey::Down,
        TrackedKey::Left,
        TrackedKey::Right,
    ];

    /// Number of tracked keys.
    pub const COUNT: usize = 4;

    /// The opposing member of this key's axis pair.
    pub const fn partner(self) -> TrackedKey {
        match self {
            TrackedKey::Up => TrackedKey::Down,
            TrackedKey::Down => TrackedKey::Up,
            TrackedKey::Left => TrackedKey::Right,
            TrackedKey::Right => TrackedKey::Left,
        }
    }

    /// The axis group this key belongs to.
    pub const fn axis(self) -> Axis {
        match self {
            TrackedKey::Up | TrackedKey::Down => Axis::Vertical,
            TrackedKey::Left | TrackedKey::Right => Axis::Horizontal,
        }
    }

    /// The Linux key code this key is bound to, used both to recognise the
    /// key in the physical stream and to emit it on the virtual device.
    pub const fn code(self) -> u16 {
        match self {
            TrackedKey::Up => KEY_W,
            TrackedKey::Down => KEY_S,
            TrackedKey::Left => KEY_A,
            TrackedKey::Right => KEY_D,
        }
    }

    /// Maps a raw key code back to a tracked key.
    ///
    /// Returns `None` for every untracked code; the caller discards those
    /// events (a filter, not an error).
    pub fn from_code(code: u16) -> Option<TrackedKey> {
        match code {
            KEY_W => Some(TrackedKey::Up),
            KEY_S => Some(TrackedKey::Down),
            KEY_A => Some(TrackedKey::Left),
            KEY_D => Some(TrackedKey::Right),
            _ => None,
        }
    }

    /// Stable array index for the keystate arrays.
    pub(crate) const fn index(self) -> usize {
        match self {
            TrackedKey::Up => 0,
            TrackedKey::Down => 1,
            TrackedKey::Left => 2,
            TrackedKey::Right => 3,
        }
    }
}

/// The direction of a physical key transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Press,
    Release,
}

impl KeyAction {
    /// Maps an input-event `value` field to an action.
    ///
    /// `1` is a press and `0` a release.  Any other value (`2` = key repeat)
    /// returns `None`: repeats carry no new transition information.
    pub fn from_event_value(value: i32) -> Option<KeyAction> {
        match value {
            1 => Some(KeyAction::Press),
            0 => Some(KeyAction::Release),
            _ => None,
        }
    }
}

/// A single tracked-key transition observed on the physical device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyTransition {
    pub key: TrackedKey,
    pub action: KeyAction,
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partner_is_symmetric() {
        for key in TrackedKey::ALL {
            assert_eq!(key.partner().partner(), key);
            assert_ne!(key.partner(), key);
        }
    }

    #[test]
    fn test_partners_share_an_axis() {
        for key in TrackedKey::ALL {
            assert_eq!(key.axis(), key.partner().axis());
        }
    }

    #[test]
    fn test_code_round_trips_through_from_code() {
        for key in TrackedKey::ALL {
            assert_eq!(TrackedKey::from_code(key.code()), Some(key));
        }
    }

    #[test]
    fn test_untracked_codes_are_rejected() {
        // KEY_E (18) sits between two tracked codes on the keyboard
        assert_eq!(TrackedKey::from_code(18), None);
        assert_eq!(TrackedKey::from_code(0), None);
    }

    #[test]
    fn test_event_values_map_to_actions() {
        assert_eq!(KeyAction::from_event_value(1), Some(KeyAction::Press));
        assert_eq!(KeyAction::from_event_value(0), Some(KeyAction::Release));
        // Key repeat is deliberately dropped
        assert_eq!(KeyAction::from_event_value(2), None);
    }

    #[test]
    fn test_indices_are_distinct() {
        let mut seen = [false; TrackedKey::COUNT];
        for key in TrackedKey::ALL {
            assert!(!seen[key.index()]);
            seen[key.index()] = true;
        }
    }
}
