//! Pure domain logic for SOCD cleaning.
//!
//! No OS dependencies live here; the daemon crate translates raw input
//! records into [`keys::KeyTransition`] values at its capture boundary and
//! feeds them to the [`resolver::SocdResolver`].

pub mod keys;
pub mod resolver;
pub mod state;
