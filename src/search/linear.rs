//! The linear search fast path: taken whenever at most one thread has
//! pending ops at the initial world, so there is exactly one possible
//! linearization and no branching to explore.

use crate::world::World;
use std::hash::Hash;
use std::time::Instant;

use super::SearchOutcome;

/// Runs [World::run_linear] to completion and wraps the result as a
/// [SearchOutcome] with `threads = 1`.
pub fn run<Sys, Model>(origin: World<Sys, Model>) -> crate::err::Result<SearchOutcome<Sys, Model>>
where
    Model: Clone + Eq + Hash,
{
    let start = Instant::now();
    let origin_futures = origin.futures().value();
    let (world, visited, reports) = origin.run_linear()?;
    Ok(SearchOutcome {
        world,
        threads: 1,
        origin_futures,
        visited,
        reports,
        elapsed: start.elapsed(),
    })
}
