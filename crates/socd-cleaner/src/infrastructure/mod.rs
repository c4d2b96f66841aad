//! OS-facing infrastructure for the SOCD cleaner.
//!
//! Everything that touches device files, stdin, or threads lives here,
//! behind traits the application layer depends on:
//!
//! - `event_source` – the physical keyboard read loop ([`event_source::InputSource`]).
//! - `virtual_output` – the uinput virtual keyboard ([`virtual_output::KeySink`]).
//! - `locator` – `/dev/input` directory scanning and operator device selection.
//! - `monitor` – the optional periodic keystate dump thread.

pub mod event_source;
pub mod locator;
pub mod monitor;
pub mod virtual_output;
