//! Scenario 1 (§13): a single-threaded, correct key-value store always
//! finds a linearization — there is only ever one possible ordering to
//! begin with, but the full pipeline (generation, running, searching) is
//! exercised end to end.

mod support;

use proptest::strategy::Strategy;
use std::sync::Arc;
use support::{Get, KvCtx, KvModel, KvStore, Put};
use test_carly::report::Outcome;
use test_carly::{check_system, config, Options};

#[test]
fn linear_put_get_always_passes() {
    let init_system = Arc::new(|_ctx: &KvCtx| KvStore::new());

    let mut options: Options<KvCtx, KvStore, KvModel> = Options::new();
    options.context_gen = proptest::strategy::Just(KvCtx {
        keys: vec!["a", "b", "c"],
    })
    .boxed();
    options.concurrency = 1;
    options.repetitions = 3;

    let outcome = check_system(
        "a single thread of puts and gets always linearizes",
        config::iteration::Config {
            num_tests: std::num::NonZeroUsize::new(10),
        },
        init_system,
        vec![Arc::new(Put::generator()), Arc::new(Get::generator())],
        options,
    )
    .expect("harness runs without error");

    assert_eq!(outcome.result, Outcome::Pass);
}
