//! The terse reporter: one line per trial.

use crate::report::{err, event::Event};
use std::io::Write;

use super::abs::Outputter;

/// An outputter that prints one line per trial and a final summary line.
pub struct Terse<W> {
    w: W,
    repetitions_run: usize,
}

impl<W: Write> Terse<W> {
    /// Constructs a new terse reporter writing to `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            w: writer,
            repetitions_run: 0,
        }
    }
}

impl<W: Write + Send> Outputter for Terse<W> {
    fn handle(&mut self, event: &Event) -> err::Result<()> {
        match event {
            Event::TrialStart { op_count, concurrency, repetitions } => {
                writeln!(
                    self.w,
                    "trial: {op_count} ops, concurrency {concurrency}, {repetitions} repetitions"
                )?;
                self.repetitions_run = 0;
            }
            Event::TestPass { .. } => self.repetitions_run += 1,
            Event::TrialPass => {
                writeln!(self.w, "  pass ({} repetitions)", self.repetitions_run)?;
            }
            Event::TrialFail { repetition } => {
                writeln!(self.w, "  FAIL on repetition {repetition}")?;
            }
            Event::Summary { num_tests, result } => {
                writeln!(self.w, "summary: {num_tests} tests, result: {result}")?;
            }
            Event::Shrunk { depth, result, .. } => {
                writeln!(self.w, "shrunk in {depth} steps, result: {result}")?;
            }
            _ => return Ok(()),
        }
        self.w.flush()?;
        Ok(())
    }
}
