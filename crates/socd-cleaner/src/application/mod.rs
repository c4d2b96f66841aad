//! Application layer: the event-processing pipeline.
//!
//! Depends only on the domain crate and the infrastructure traits
//! ([`crate::infrastructure::virtual_output::KeySink`],
//! [`crate::infrastructure::event_source::InputSource`]); all concrete
//! OS backends are injected at wiring time, keeping the pipeline fully
//! unit-testable.

pub mod clean_input;
pub mod run_loop;
