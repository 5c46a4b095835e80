//! The dots reporter: one character per repetition, a summary line at the
//! end. This is the default style.

use crate::report::{err, event::Event};
use std::io::Write;

use super::abs::Outputter;

/// An outputter that prints `.` for each pass, `F` for each fail, and a
/// one-line summary at the end of the run.
pub struct Dots<W> {
    w: W,
    printed: usize,
}

impl<W: Write> Dots<W> {
    /// Constructs a new dots reporter writing to `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            w: writer,
            printed: 0,
        }
    }

    fn dot(&mut self, c: char) -> err::Result<()> {
        write!(self.w, "{c}")?;
        self.printed += 1;
        if self.printed % 80 == 0 {
            writeln!(self.w)?;
        }
        self.w.flush()?;
        Ok(())
    }
}

impl<W: Write + Send> Outputter for Dots<W> {
    fn handle(&mut self, event: &Event) -> err::Result<()> {
        match event {
            Event::TestPass { .. } => self.dot('.'),
            Event::TestFail { .. } => self.dot('F'),
            Event::Summary { num_tests, result } => {
                if self.printed % 80 != 0 {
                    writeln!(self.w)?;
                }
                writeln!(self.w, "{num_tests} tests, result: {result}")?;
                self.w.flush()?;
                Ok(())
            }
            Event::Shrunk { depth, result, .. } => {
                writeln!(self.w, "shrunk in {depth} steps, result: {result}")?;
                self.w.flush()?;
                Ok(())
            }
            _ => Ok(()),
        }
    }
}
