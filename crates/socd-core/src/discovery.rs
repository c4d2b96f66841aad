//! Name-matching rules for keyboard device discovery.
//!
//! Linux exposes stable-named symlinks to input device nodes under
//! `/dev/input/by-id` and `/dev/input/by-path`.  Keyboard event nodes end in
//! `-event-kbd`, but composite USB devices also publish per-interface
//! sub-nodes (`...-if01-event-kbd` in by-id naming) that match the suffix
//! without carrying the physical key stream; those must be excluded.
//!
//! The two directories use different naming conventions, so their filtering
//! rules are specified independently: by-path encodes the interface inside
//! the USB path segment (`...-usb-0:2:1.0-event-kbd`) rather than with an
//! `-if` infix, and gets the suffix rule only.
//!
//! This module is pure string logic; the daemon's locator feeds it directory
//! listings and turns the surviving names back into paths.

use tracing::warn;

/// Suffix identifying keyboard event nodes in both directories.
pub const KEYBOARD_SUFFIX: &str = "-event-kbd";

/// Infix marking a per-interface sub-node in by-id naming (`-ifNN`).
pub const INTERFACE_INFIX: &str = "-if";

/// Upper bound on the candidate list.  Scanning past this many matching
/// entries drops the extras with a warning instead of growing without bound.
pub const MAX_CANDIDATES: usize = 32;

/// Filtering rules for one device-symlink directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectoryProfile {
    /// Required name suffix.
    pub suffix: &'static str,
    /// Whether names with an `-ifNN` interface infix are excluded.
    pub excludes_interface_nodes: bool,
}

impl DirectoryProfile {
    /// Rules for `/dev/input/by-id`.
    pub const BY_ID: DirectoryProfile = DirectoryProfile {
        suffix: KEYBOARD_SUFFIX,
        excludes_interface_nodes: true,
    };

    /// Rules for `/dev/input/by-path`.
    pub const BY_PATH: DirectoryProfile = DirectoryProfile {
        suffix: KEYBOARD_SUFFIX,
        excludes_interface_nodes: false,
    };

    /// Whether a directory entry name is a keyboard candidate under these
    /// rules.
    pub fn matches(&self, name: &str) -> bool {
        if !name.ends_with(self.suffix) {
            return false;
        }
        if self.excludes_interface_nodes && has_interface_infix(name, self.suffix) {
            return false;
        }
        true
    }
}

/// Checks for the `-ifNN` marker directly before the suffix, e.g.
/// `usb-Vendor_Keyboard-if01-event-kbd`.
fn has_interface_infix(name: &str, suffix: &str) -> bool {
    let stem = &name.as_bytes()[..name.len() - suffix.len()];
    // The marker occupies the last five bytes of the stem: b"-if" + 2 digits.
    stem.len() >= 5 && &stem[stem.len() - 5..stem.len() - 2] == INTERFACE_INFIX.as_bytes()
}

/// Filters a directory listing down to keyboard candidates, sorted for a
/// deterministic presentation order, capped at [`MAX_CANDIDATES`].
pub fn collect_candidates<I>(names: I, profile: &DirectoryProfile) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut candidates: Vec<String> = Vec::new();
    let mut dropped = 0usize;
    for name in names {
        if !profile.matches(&name) {
            continue;
        }
        if candidates.len() == MAX_CANDIDATES {
            dropped += 1;
            continue;
        }
        candidates.push(name);
    }
    if dropped > 0 {
        warn!(dropped, cap = MAX_CANDIDATES, "too many keyboard candidates; extras ignored");
    }
    candidates.sort();
    candidates
}

// ── Tests ─────────────────────────────────────────────────────────────────────
