//! The verbose reporter: full detail for every event, in Litmus-style
//! tabulated, colour-coded lines.

use crate::report::{err, event::Event, Assertion, Outcome};
use colored::{ColoredString, Colorize};
use std::io::Write;

use super::abs::Outputter;

/// An outputter that prints one tabulated line per event, with full detail:
/// futures, worlds visited, elapsed time, and every assertion observed.
pub struct Verbose<W> {
    w: tabwriter::TabWriter<W>,
    color: bool,
}

impl<W: Write> Verbose<W> {
    /// Constructs a new verbose reporter writing to `writer`. `color`
    /// controls whether sigils and outcomes are ANSI-coloured.
    pub fn new(writer: W, color: bool) -> Self {
        Self {
            w: tabwriter::TabWriter::new(writer).padding(1),
            color,
        }
    }

    fn sigil(&self, passed: bool) -> ColoredString {
        let (s, c) = if passed { ("*", "green") } else { (":", "red") };
        if self.color {
            match c {
                "green" => s.green(),
                _ => s.red(),
            }
        } else {
            s.normal()
        }
    }

    fn outcome_sigil(&self, outcome: Outcome) -> ColoredString {
        let s = match outcome {
            Outcome::Pass => "*",
            Outcome::Fail => ":",
            Outcome::Unknown => "?",
        };
        if !self.color {
            return s.normal();
        }
        match outcome {
            Outcome::Pass => s.green(),
            Outcome::Fail => s.red(),
            Outcome::Unknown => s.yellow(),
        }
    }

    fn dump_assertion(&mut self, a: &Assertion) -> err::Result<()> {
        writeln!(
            self.w,
            "    {sigil}\tthread {tid}\t{op}",
            sigil = self.sigil(a.passed),
            tid = a.thread_id,
            op = a.op,
        )?;
        Ok(())
    }
}

impl<W: Write + Send> Outputter for Verbose<W> {
    fn handle(&mut self, event: &Event) -> err::Result<()> {
        match event {
            Event::TrialStart { op_count, concurrency, repetitions } => {
                writeln!(
                    self.w,
                    "trial\t{op_count} ops\tconcurrency {concurrency}\t{repetitions} repetitions"
                )?;
            }
            Event::TestStart { repetition } => {
                writeln!(self.w, "  repetition {repetition}\tstarting")?;
            }
            Event::RunOps { op_count, concurrency, elapsed } => {
                writeln!(
                    self.w,
                    "  ran\t{op_count} ops\tconcurrency {concurrency}\t{elapsed:?}"
                )?;
            }
            Event::TestPass { futures, visited, elapsed, assertions } => {
                writeln!(
                    self.w,
                    "  {sigil}\tpass\tfutures {futures}\tvisited {visited}\t{elapsed:?}",
                    sigil = self.sigil(true),
                )?;
                for a in assertions {
                    self.dump_assertion(a)?;
                }
            }
            Event::TestFail { futures, visited, elapsed, assertions } => {
                writeln!(
                    self.w,
                    "  {sigil}\tfail\tfutures {futures}\tvisited {visited}\t{elapsed:?}",
                    sigil = self.sigil(false),
                )?;
                for a in assertions {
                    self.dump_assertion(a)?;
                }
            }
            Event::TrialPass => {
                writeln!(self.w, "{sigil}\ttrial pass", sigil = self.sigil(true))?;
            }
            Event::TrialFail { repetition } => {
                writeln!(
                    self.w,
                    "{sigil}\ttrial fail\trepetition {repetition}",
                    sigil = self.sigil(false),
                )?;
            }
            Event::Summary { num_tests, result } => {
                writeln!(
                    self.w,
                    "{sigil}\tsummary\t{num_tests} tests\tresult {result}",
                    sigil = self.outcome_sigil(*result),
                )?;
            }
            Event::Shrunk { depth, total_nodes_visited, result } => {
                writeln!(
                    self.w,
                    "{sigil}\tshrunk\t{depth} steps\t{total_nodes_visited} nodes visited\tresult {result}",
                    sigil = self.outcome_sigil(*result),
                )?;
            }
        }
        // `TabWriter` only aligns columns across the rows buffered since the
        // last flush, so flushing per-event would align each row against
        // itself alone. Flush once, at the end of a run, like the teacher's
        // own `Histogram::output` does.
        if matches!(event, Event::Summary { .. }) {
            self.w.flush()?;
        }
        Ok(())
    }
}
