//! # socd-core
//!
//! Shared library for the SOCD cleaner containing the keystate model, the
//! last-input-priority resolution policy, and the device-name filtering rules
//! used during keyboard discovery.
//!
//! This crate is pure logic: it has zero dependencies on OS APIs, device
//! files, or threads, which keeps the resolution algorithm fully unit-testable
//! without real hardware.
//!
//! # What is SOCD? (for beginners)
//!
//! SOCD stands for *Simultaneous Opposing Cardinal Directions*: both keys of
//! an opposing pair (say, left and right) held down at the same time.  Many
//! games resolve that state in unpredictable or exploitable ways, so
//! tournament-style input hardware "cleans" it before the game ever sees it.
//! The policy implemented here is **last-input priority**: whichever key of a
//! pair was pressed most recently is the only one reported as held; releasing
//! it falls back to the still-held opposite.
//!
//! This crate defines:
//!
//! - **`domain`** – the four tracked keys and their axis pairing, the
//!   real/virtual keystate model, and the [`SocdResolver`] state machine.
//! - **`discovery`** – the pure name-matching rules that pick keyboard
//!   device entries out of `/dev/input/by-id`-style directory listings.

pub mod discovery;
pub mod domain;

// Re-export the most-used types at the crate root so callers can write
// `socd_core::TrackedKey` instead of `socd_core::domain::keys::TrackedKey`.
pub use domain::keys::{Axis, KeyAction, KeyTransition, TrackedKey};
pub use domain::resolver::SocdResolver;
pub use domain::state::{KeyStates, Snapshot};
