//! Scenario 5 (§13): an operation whose `apply_to` panics on an absent key.
//! The panic is caught at the op boundary and becomes a [Thrown] result
//! (§4.2); the model and the store are always kept in sync by `Put`, so the
//! harness should never report a failure even though every generated
//! sequence is likely to panic at least once.

mod support;

use proptest::strategy::Strategy;
use std::sync::Arc;
use support::{GetOrThrow, KvCtx, KvModel, KvStore, Put};
use test_carly::report::Outcome;
use test_carly::{check_system, config, Options};

#[test]
fn panics_are_observed_not_propagated() {
    let init_system = Arc::new(|_ctx: &KvCtx| KvStore::new());

    let mut options: Options<KvCtx, KvStore, KvModel> = Options::new();
    options.context_gen = proptest::strategy::Just(KvCtx { keys: vec!["only"] }).boxed();
    options.concurrency = 1;
    options.repetitions = 3;

    let outcome = check_system(
        "reading an absent key panics, and the panic is reconciled against the model",
        config::iteration::Config {
            num_tests: std::num::NonZeroUsize::new(10),
        },
        init_system,
        vec![Arc::new(Put::generator()), Arc::new(GetOrThrow::generator())],
        options,
    )
    .expect("the harness itself must not propagate the operation's panic");

    assert_eq!(outcome.result, Outcome::Pass);
}
