//! The public API surface (§6.1): `check_system` and its options.

use crate::config;
use crate::generative::{self, GenerativeOutcome, InputConfig};
use crate::op::OpGenerator;
use crate::report::out::Outputter;
use crate::trial::TrialConfig;
use proptest::strategy::{BoxedStrategy, Just, Strategy};
use std::fmt::Debug;
use std::hash::Hash;
use std::num::NonZeroUsize;
use std::panic::UnwindSafe;
use std::sync::{Arc, Mutex};

/// Default maximum parallel op threads per trial, per §6.1.
pub const DEFAULT_CONCURRENCY: usize = 4;
/// Default re-runs per generated input, per §6.1.
pub const DEFAULT_REPETITIONS: usize = 5;
/// Inclusive range of op counts generated per thread.
pub const DEFAULT_OPS_PER_THREAD: std::ops::RangeInclusive<usize> = 1..=8;

/// Per-call options for [check_system], distinct from the harness-wide
/// `config` surface: these tune one generative run, the way the teacher's
/// checker call sites pass one-off overrides rather than global state.
pub struct Options<Ctx, Sys, Model> {
    /// Strategy producing the shared test context for a trial. Build with
    /// [Options::new] for the `Ctx::default()` default named in §6.1.
    pub context_gen: BoxedStrategy<Ctx>,
    /// Builds the initial model from the trial's context.
    pub init_model: Arc<dyn Fn(&Ctx) -> Model + Send + Sync>,
    /// Optional teardown hook, invoked on every exit path of a repetition.
    pub finalize: Option<Arc<dyn Fn(&Sys) + Send + Sync>>,
    /// Maximum parallel op threads (default [DEFAULT_CONCURRENCY]).
    pub concurrency: usize,
    /// Re-runs per generated input (default [DEFAULT_REPETITIONS]).
    pub repetitions: usize,
    /// Search-pool size (default: host CPU count).
    pub search_threads: usize,
    /// Reporter style override (default: read from env, §6.2).
    pub report: config::report::Strategy,
    /// Whether to color reporter output (default: read from env, §6.2).
    pub print_color: Option<bool>,
}

impl<Ctx, Sys, Model> Options<Ctx, Sys, Model>
where
    Ctx: Default + Clone + Debug + Send + Sync + 'static,
    Model: Default,
{
    /// Builds the default options: an empty context, an empty model, no
    /// finalizer, and the §6.1/§11 defaults for everything else.
    pub fn new() -> Self {
        Self {
            context_gen: Just(Ctx::default()).boxed(),
            init_model: Arc::new(|_ctx| Model::default()),
            finalize: None,
            concurrency: DEFAULT_CONCURRENCY,
            repetitions: DEFAULT_REPETITIONS,
            search_threads: config::search::Config::default()
                .resolve()
                .map(NonZeroUsize::get)
                .unwrap_or(1),
            report: config::report::Strategy::from_env(),
            print_color: None,
        }
    }
}

impl<Ctx, Sys, Model> Default for Options<Ctx, Sys, Model>
where
    Ctx: Default + Clone + Debug + Send + Sync + 'static,
    Model: Default,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Runs `message` as a generative linearizability check: generates
/// randomized per-thread op sequences from `op_generators`, runs them
/// against fresh systems built by `init_system`, and searches for a valid
/// linearization, repeating and shrinking on failure per §§4.5–4.6.
///
/// `options.concurrency == 1` is the linear-mode convenience entry point
/// named in §6.1; any larger value runs the full concurrent pipeline.
pub fn check_system<Ctx, Sys, Model>(
    message: &str,
    iter_opts: config::iteration::Config,
    init_system: Arc<dyn Fn(&Ctx) -> Sys + Send + Sync>,
    op_generators: Vec<Arc<dyn OpGenerator<Ctx, Sys, Model>>>,
    options: Options<Ctx, Sys, Model>,
) -> crate::err::Result<GenerativeOutcome>
where
    Ctx: Clone + Debug + Send + Sync + UnwindSafe + 'static,
    Sys: Sync + UnwindSafe,
    Model: Clone + Eq + Hash + Send + Sync,
{
    log::debug!("check_system: {message}");

    let num_tests = NonZeroUsize::new(iter_opts.resolve(options.concurrency))
        .expect("iteration::Config::resolve never returns zero");

    let reporter: Arc<Mutex<Box<dyn Outputter>>> = Arc::new(Mutex::new(options.report.to_outputter(
        std::io::stdout(),
        config::color::resolve(options.print_color),
    )));

    let input = InputConfig {
        context_strategy: options.context_gen,
        op_generators,
        concurrency: options.concurrency,
        ops_per_thread: DEFAULT_OPS_PER_THREAD,
    };

    let trial_config = TrialConfig {
        init_system,
        init_model: options.init_model,
        finalize: options.finalize,
        repetitions: options.repetitions,
        search_threads: options.search_threads.max(1),
    };

    generative::run(num_tests, input, trial_config, reporter)
}
