//! Abstract interface for reporters.

use super::super::{err, event::Event};

/// Trait of things that can receive reporter events.
///
/// Unlike the teacher's one-shot `Outputter` (which consumes itself to
/// write a single final report), a reporter here is handed a stream of
/// events over the lifetime of a generative run, matching the reporter
/// protocol's event list (trial-start through summary).
pub trait Outputter: Send {
    /// Handles a single event, flushing and returning any I/O errors.
    fn handle(&mut self, event: &Event) -> err::Result<()>;
}
