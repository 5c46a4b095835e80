//! The silent reporter: discards every event.

use crate::report::{err, event::Event};

use super::abs::Outputter;

/// An outputter that prints nothing. Selected by `TEST_CARLY_STYLE=silent`.
pub struct Silent;

impl Outputter for Silent {
    fn handle(&mut self, _event: &Event) -> err::Result<()> {
        Ok(())
    }
}
