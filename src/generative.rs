//! The generative driver (§4.6): drives randomized trials and shrinking via
//! `proptest`, rather than reimplementing either.
//!
//! Grounded in `SmnTin-lincheck`'s `Lincheck::verify()`: run the strategy
//! through a `TestRunner`, and on `TestError::Fail`, re-run the trial
//! function on the shrunk value to recover the failing execution for the
//! reporter, instead of threading that state out of `proptest`'s shrink loop.

use crate::history::ThreadId;
use crate::op::{Operation, OpGenerator, Wait};
use crate::report::{out::Outputter, Event, Outcome};
use crate::trial::{self, TrialConfig};
use proptest::prelude::*;
use proptest::strategy::{BoxedStrategy, Strategy, Union};
use proptest::test_runner::{Config, TestError, TestRunner};
use std::cell::Cell;
use std::fmt::Debug;
use std::hash::Hash;
use std::num::NonZeroUsize;
use std::panic::UnwindSafe;
use std::sync::{Arc, Mutex};

/// The outcome of the shrinking phase, present only when the initial run
/// failed.
pub struct ShrunkOutcome {
    /// Number of shrink steps `proptest` took to reach the smallest failure.
    pub depth: usize,
    /// The smallest failing input's search outcome.
    pub result: Outcome,
}

/// The generative driver's final summary (§4.6).
pub struct GenerativeOutcome {
    /// Whether every generated trial passed.
    pub result: Outcome,
    /// Best-effort description of the RNG state `proptest` started from,
    /// for replaying a failure.
    pub seed: String,
    /// How many generated inputs were tried before the first failure (or
    /// all of them, on success).
    pub num_tests: usize,
    /// Present iff a failure occurred and was shrunk.
    pub shrunk: Option<ShrunkOutcome>,
}

/// Generator-facing configuration: how to build the per-trial input
/// (context plus per-thread op sequences).
pub struct InputConfig<Ctx, Sys, Model> {
    /// Strategy producing the shared test context for a trial.
    pub context_strategy: BoxedStrategy<Ctx>,
    /// Per-operation-kind generators, combined into one op strategy.
    pub op_generators: Vec<Arc<dyn OpGenerator<Ctx, Sys, Model>>>,
    /// Maximum operation threads; `Wait` is folded into the op strategy
    /// whenever this exceeds one, per §4.1.
    pub concurrency: usize,
    /// Inclusive range of op counts generated per thread.
    pub ops_per_thread: std::ops::RangeInclusive<usize>,
}

fn combined_op_strategy<Ctx, Sys, Model>(
    ctx: &Ctx,
    op_generators: &[Arc<dyn OpGenerator<Ctx, Sys, Model>>],
    concurrency: usize,
) -> BoxedStrategy<Arc<dyn Operation<Sys, Model>>>
where
    Sys: 'static,
    Model: 'static,
{
    let mut strategies: Vec<BoxedStrategy<Arc<dyn Operation<Sys, Model>>>> =
        op_generators.iter().map(|g| g.strategy(ctx)).collect();
    if concurrency > 1 {
        strategies.push(
            Wait::strategy()
                .prop_map(|op| Arc::new(op) as Arc<dyn Operation<Sys, Model>>)
                .boxed(),
        );
    }
    Union::new(strategies).boxed()
}

/// Builds the combined `(context, thread_plan)` strategy for one generated
/// trial input.
fn plan_strategy<Ctx, Sys, Model>(
    config: Arc<InputConfig<Ctx, Sys, Model>>,
) -> BoxedStrategy<(Ctx, Vec<(ThreadId, Vec<Arc<dyn Operation<Sys, Model>>>)>)>
where
    Ctx: Clone + Debug + Send + Sync + 'static,
    Sys: 'static,
    Model: 'static,
{
    let concurrency = config.concurrency.max(1);
    config
        .context_strategy
        .clone()
        .prop_flat_map(move |ctx| {
            let config = config.clone();
            let op_strategy = combined_op_strategy(&ctx, &config.op_generators, config.concurrency);
            let per_thread =
                proptest::collection::vec(op_strategy, config.ops_per_thread.clone());
            let threads = proptest::collection::vec(per_thread, concurrency);
            (Just(ctx), threads)
        })
        .prop_map(|(ctx, per_thread_ops)| {
            let plan = per_thread_ops
                .into_iter()
                .enumerate()
                .filter(|(_, ops)| !ops.is_empty())
                .map(|(tid, ops)| (tid as ThreadId, ops))
                .collect();
            (ctx, plan)
        })
        .boxed()
}

/// Runs the full generative loop: `num_tests` randomized trials, shrinking
/// on the first failure.
pub fn run<Ctx, Sys, Model>(
    num_tests: NonZeroUsize,
    input: InputConfig<Ctx, Sys, Model>,
    trial_config: TrialConfig<Ctx, Sys, Model>,
    reporter: Arc<Mutex<Box<dyn Outputter>>>,
) -> crate::err::Result<GenerativeOutcome>
where
    Ctx: Clone + Debug + Send + Sync + UnwindSafe + 'static,
    Sys: Sync + UnwindSafe,
    Model: Clone + Eq + Hash + Send + Sync,
{
    let strategy = plan_strategy(Arc::new(input));
    let mut runner = TestRunner::new(Config {
        cases: num_tests.get() as u32,
        ..Config::default()
    });
    let seed = format!("{:?}", runner.rng());

    // `runner.run` calls `run_one` once per candidate it tries, including
    // every shrink attempt once a failure is found — there is no other way
    // to observe proptest's realized shrink count, since `TestError::Fail`
    // itself carries only the smallest failing value, not how many steps it
    // took to get there. Counting invocations here (and total worlds
    // visited across them) recovers both for the `Shrunk` event.
    let call_count = Cell::new(0usize);
    let first_failure_call = Cell::new(None::<usize>);
    let total_visited = Cell::new(0usize);

    let run_one = |(ctx, plan): (Ctx, _)| {
        call_count.set(call_count.get() + 1);
        let mut reporter = reporter.lock().map_err(|_| {
            proptest::test_runner::TestCaseError::fail("reporter lock poisoned")
        })?;
        let outcome = trial::run(&ctx, plan, &trial_config, &mut **reporter)
            .map_err(|e| proptest::test_runner::TestCaseError::fail(e.to_string()))?;
        total_visited.set(total_visited.get() + outcome.total_visited);
        if outcome.outcome == Outcome::Pass {
            Ok(())
        } else {
            if first_failure_call.get().is_none() {
                first_failure_call.set(Some(call_count.get()));
            }
            Err(proptest::test_runner::TestCaseError::fail(
                "no valid linearization found",
            ))
        }
    };

    let result = runner.run(&strategy, run_one);

    match result {
        Ok(()) => {
            let num_tests = runner.config().cases as usize;
            reporter
                .lock()
                .map_err(|_| crate::err::Error::LockPoisoned)?
                .handle(&Event::Summary {
                    num_tests,
                    result: Outcome::Pass,
                })?;
            Ok(GenerativeOutcome {
                result: Outcome::Pass,
                seed,
                num_tests,
                shrunk: None,
            })
        }
        Err(TestError::Fail(_, (ctx, plan))) => {
            // Re-run the shrunk input to recover its search telemetry for
            // the `shrunk` event, mirroring `Lincheck::verify`'s re-run.
            let mut reporter_guard = reporter.lock().map_err(|_| crate::err::Error::LockPoisoned)?;
            let outcome = trial::run(&ctx, plan, &trial_config, &mut **reporter_guard)?;
            drop(reporter_guard);
            total_visited.set(total_visited.get() + outcome.total_visited);

            // Every `run_one` call after the first failure is one shrink
            // step `proptest` actually took (complicate-or-simplify), so
            // this is the realized count, not `Config::max_shrink_iters`.
            let depth = call_count
                .get()
                .saturating_sub(first_failure_call.get().unwrap_or(call_count.get()));
            reporter
                .lock()
                .map_err(|_| crate::err::Error::LockPoisoned)?
                .handle(&Event::Shrunk {
                    depth,
                    total_nodes_visited: total_visited.get(),
                    result: outcome.outcome,
                })?;
            reporter
                .lock()
                .map_err(|_| crate::err::Error::LockPoisoned)?
                .handle(&Event::Summary {
                    num_tests: runner.config().cases as usize,
                    result: Outcome::Fail,
                })?;
            Ok(GenerativeOutcome {
                result: Outcome::Fail,
                seed,
                num_tests: runner.config().cases as usize,
                shrunk: Some(ShrunkOutcome {
                    depth,
                    result: outcome.outcome,
                }),
            })
        }
        Err(other) => Err(crate::err::Error::Generative(other.to_string())),
    }
}
