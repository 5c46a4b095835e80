//! Scenario 6 (§13): when at most one thread has pending operations, the
//! search engine takes the linear fast path rather than spawning the
//! parallel worker pool, and `futures` is exactly one throughout.

mod support;

use std::sync::Arc;
use support::{KvModel, KvStore, Put};
use test_carly::op::Operation;
use test_carly::{runner, search};

#[test]
fn single_thread_history_uses_linear_path() {
    let store = KvStore::new();
    let ops: Vec<Arc<dyn Operation<KvStore, KvModel>>> = vec![
        Arc::new(Put {
            key: "a",
            value: 1,
        }),
        Arc::new(Put {
            key: "b",
            value: 2,
        }),
        Arc::new(Put {
            key: "a",
            value: 3,
        }),
    ];
    let plan = vec![(0, ops)];

    let run_outcome = runner::run(&store, plan).expect("running a single-thread plan never errors");
    assert_eq!(run_outcome.thread_count, 1);

    let search_outcome = search::run(1, KvModel::default(), run_outcome.history)
        .expect("searching a single-thread history never errors");

    assert_eq!(search_outcome.threads, 1);
    assert_eq!(search_outcome.origin_futures, 1);
    assert!(search_outcome.world.is_some());
}
