//! Scenario 2 (§13): the same key-value store, but generated across several
//! concurrent threads. Since the store is correctly synchronized and the
//! model mirrors it exactly, the actual execution order is always itself a
//! valid linearization, so every trial should pass regardless of how the
//! scheduler interleaves the threads.

mod support;

use proptest::strategy::Strategy;
use std::sync::Arc;
use support::{Get, KvCtx, KvModel, KvStore, Put};
use test_carly::report::Outcome;
use test_carly::{check_system, config, Options};

#[test]
fn concurrent_put_get_always_passes() {
    let init_system = Arc::new(|_ctx: &KvCtx| KvStore::new());

    let mut options: Options<KvCtx, KvStore, KvModel> = Options::new();
    options.context_gen = proptest::strategy::Just(KvCtx {
        keys: vec!["a", "b", "c", "d"],
    })
    .boxed();
    options.concurrency = 3;
    options.repetitions = 2;
    options.search_threads = 2;

    let outcome = check_system(
        "several concurrent threads of puts and gets always linearize",
        config::iteration::Config {
            num_tests: std::num::NonZeroUsize::new(8),
        },
        init_system,
        vec![Arc::new(Put::generator()), Arc::new(Get::generator())],
        options,
    )
    .expect("harness runs without error");

    assert_eq!(outcome.result, Outcome::Pass);
}
