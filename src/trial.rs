//! The trial driver (§4.5): runs one generated input (a context plus
//! per-thread op sequences) through the concurrent runner and search engine,
//! `repetitions` times, to guard against flaky schedules.

use crate::history::ThreadPlan;
use crate::op::Operation;
use crate::report::{out::Outputter, Assertion, Event, Outcome};
use crate::runner;
use crate::search;
use crate::world::World;
use std::hash::Hash;
use std::sync::Arc;

/// Per-call configuration the trial driver needs to build a fresh system
/// and model for each repetition. Distinct from the harness-wide `config`
/// module (§11): this is generative-test tuning passed at the `check_system`
/// call site, per §6.1.
pub struct TrialConfig<Ctx, Sys, Model> {
    /// Builds a fresh system under test from the trial's context.
    pub init_system: Arc<dyn Fn(&Ctx) -> Sys + Send + Sync>,
    /// Builds the initial model from the trial's context.
    pub init_model: Arc<dyn Fn(&Ctx) -> Model + Send + Sync>,
    /// Optional teardown hook, invoked on every exit path of a repetition.
    pub finalize: Option<Arc<dyn Fn(&Sys) + Send + Sync>>,
    /// Re-runs per generated input (default 5, per §6.1).
    pub repetitions: usize,
    /// Search worker pool size (default: CPU count, per §6.1).
    pub search_threads: usize,
}

/// The outcome of one trial: every repetition passed, or the first one that
/// didn't.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialOutcome {
    /// `Pass` iff every repetition found a valid linearization.
    pub outcome: Outcome,
    /// The zero-indexed repetition that failed, if any.
    pub failed_repetition: Option<usize>,
    /// Sum of `SearchOutcome::visited` across every repetition this trial
    /// actually ran (stops accumulating at the first failure, since later
    /// repetitions never run).
    pub total_visited: usize,
}

/// Runs a trial: `plan` is cloned per repetition (cheap — it clones `Arc`
/// handles to the same operation instances, not the operations themselves).
pub fn run<Ctx, Sys, Model>(
    ctx: &Ctx,
    plan: ThreadPlan<Sys, Model>,
    config: &TrialConfig<Ctx, Sys, Model>,
    reporter: &mut dyn Outputter,
) -> crate::err::Result<TrialOutcome>
where
    Sys: Sync,
    Model: Clone + Eq + Hash + Send + Sync,
{
    let op_count: usize = plan.iter().map(|(_, ops)| ops.len()).sum();
    let concurrency = plan.len();

    reporter.handle(&Event::TrialStart {
        op_count,
        concurrency,
        repetitions: config.repetitions,
    })?;

    let mut total_visited = 0usize;

    for repetition in 0..config.repetitions {
        reporter.handle(&Event::TestStart { repetition })?;

        let system = (config.init_system)(ctx);
        let model = (config.init_model)(ctx);
        let rep_plan = clone_plan(&plan);

        let run_outcome = runner::run(&system, rep_plan)?;
        reporter.handle(&Event::RunOps {
            op_count: run_outcome.op_count,
            concurrency: run_outcome.thread_count,
            elapsed: run_outcome.elapsed,
        })?;

        if let Some(finalize) = &config.finalize {
            finalize(&system);
        }

        let search_outcome = search::run(config.search_threads, model, run_outcome.history)?;
        total_visited += search_outcome.visited;

        match search_outcome.world {
            Some(world) => {
                reporter.handle(&Event::TestPass {
                    futures: search_outcome.origin_futures,
                    visited: search_outcome.visited,
                    elapsed: search_outcome.elapsed,
                    assertions: winning_path_assertions(&world),
                })?;
            }
            None => {
                reporter.handle(&Event::TestFail {
                    futures: search_outcome.origin_futures,
                    visited: search_outcome.visited,
                    elapsed: search_outcome.elapsed,
                    assertions: search_outcome.reports,
                })?;
                reporter.handle(&Event::TrialFail { repetition })?;
                return Ok(TrialOutcome {
                    outcome: Outcome::Fail,
                    failed_repetition: Some(repetition),
                    total_visited,
                });
            }
        }
    }

    reporter.handle(&Event::TrialPass)?;
    Ok(TrialOutcome {
        outcome: Outcome::Pass,
        failed_repetition: None,
        total_visited,
    })
}

fn clone_plan<Sys, Model>(plan: &ThreadPlan<Sys, Model>) -> ThreadPlan<Sys, Model> {
    plan.iter().map(|(tid, ops)| (*tid, ops.clone())).collect()
}

/// Reconstructs the assertion events for a winning linearization by walking
/// its history: every op on the winning path passed `check`, by definition
/// of having been stepped, so each is republished as a pass (per §6.3).
fn winning_path_assertions<Sys, Model>(world: &World<Sys, Model>) -> Vec<Assertion> {
    world
        .history()
        .iter()
        .map(|(thread_id, annotated)| Assertion {
            thread_id: *thread_id,
            op: op_debug_name(&annotated.op),
            passed: true,
        })
        .collect()
}

fn op_debug_name<Sys, Model>(op: &Arc<dyn Operation<Sys, Model>>) -> String {
    format!("{op:?}")
}
