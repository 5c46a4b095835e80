//! Scenario 4 (§13): a deliberately non-atomic counter, incremented
//! concurrently from several threads. A lost update is not guaranteed on
//! any single run, but with enough threads, increments, and repetitions a
//! race is all but certain, and the harness should report it.

mod support;

use support::{Counter, CounterModel, Increment};
use test_carly::{runner, search};

#[test]
fn concurrent_increments_eventually_race() {
    let mut saw_failure = false;

    for _ in 0..20 {
        let counter = Counter::new();
        let plan: Vec<_> = (0..4)
            .map(|tid| {
                let ops: Vec<std::sync::Arc<dyn test_carly::op::Operation<Counter, CounterModel>>> =
                    (0..5)
                        .map(|_| {
                            std::sync::Arc::new(Increment {})
                                as std::sync::Arc<dyn test_carly::op::Operation<Counter, CounterModel>>
                        })
                        .collect();
                (tid, ops)
            })
            .collect();

        let run_outcome = runner::run(&counter, plan).expect("running the plan does not error");
        let search_outcome = search::run(2, CounterModel::default(), run_outcome.history)
            .expect("searching does not error");

        if search_outcome.world.is_none() {
            saw_failure = true;
            break;
        }
    }

    assert!(
        saw_failure,
        "expected at least one of 20 runs of 4x5 racing increments to lose an update"
    );
}
