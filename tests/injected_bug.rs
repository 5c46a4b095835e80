//! Scenario 3 (§13): a store with an injected off-by-one bug (`put` always
//! writes one more than requested) is run directly against a model that
//! records the requested value, bypassing the generative layer so the
//! failing op sequence is exact rather than probabilistic.

use proptest::prelude::*;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use test_carly::define_op;
use test_carly::history::Unit;
use test_carly::{runner, search};

pub struct BuggyStore {
    data: Mutex<BTreeMap<&'static str, i32>>,
}

impl BuggyStore {
    fn new() -> Self {
        Self {
            data: Mutex::new(BTreeMap::new()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BuggyModel(BTreeMap<&'static str, i32>);

define_op! {
    pub struct BuggyPut<Sys = BuggyStore, Model = BuggyModel> {
        key: &'static str,
        value: i32,
    }
    apply_op(self, sys) {
        // Injected bug: always stores one more than requested.
        sys.data.lock().unwrap().insert(self.key, self.value + 1);
        Box::new(Unit)
    }
    update_model(self, model) {
        let mut next = model.clone();
        next.0.insert(self.key, self.value);
        next
    }
    gen_args(_ctx: &()) {
        Just(BuggyPut { key: "k", value: 1 })
    }
}

define_op! {
    pub struct BuggyGet<Sys = BuggyStore, Model = BuggyModel> {
        key: &'static str,
    }
    apply_op(self, sys) {
        Box::new(sys.data.lock().unwrap().get(self.key).copied())
    }
    check(self, model, result) {
        let expected = model.0.get(self.key).copied();
        result
            .as_any()
            .downcast_ref::<Option<i32>>()
            .is_some_and(|observed| *observed == expected)
    }
    gen_args(_ctx: &()) {
        Just(BuggyGet { key: "k" })
    }
}

#[test]
fn off_by_one_put_is_caught() {
    let store = BuggyStore::new();
    let ops: Vec<Arc<dyn test_carly::op::Operation<BuggyStore, BuggyModel>>> = vec![
        Arc::new(BuggyPut { key: "k", value: 1 }),
        Arc::new(BuggyGet { key: "k" }),
    ];
    let plan = vec![(0, ops)];

    let run_outcome = runner::run(&store, plan).expect("running the plan does not error");
    let search_outcome = search::run(1, BuggyModel::default(), run_outcome.history)
        .expect("searching does not error");

    assert!(
        search_outcome.world.is_none(),
        "no linearization should explain the observed +1"
    );
}
