//! Shared fixtures for the end-to-end scenarios: a small in-process
//! key-value store and a deliberately non-atomic counter, per §13.

use proptest::prelude::*;
use std::collections::BTreeMap;
use std::sync::Mutex;
use test_carly::define_op;
use test_carly::history::{Thrown, Unit};

pub type Key = &'static str;

/// A thread-safe key-value store: the correct system under test for the
/// trivial-pass and absent-key scenarios.
pub struct KvStore {
    pub data: Mutex<BTreeMap<Key, i32>>,
}

impl KvStore {
    pub fn new() -> Self {
        Self {
            data: Mutex::new(BTreeMap::new()),
        }
    }
}

/// The model mirrors the store's contents as an ordered map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct KvModel(pub BTreeMap<Key, i32>);

/// Shared test context: the set of keys operations may draw from.
#[derive(Debug, Clone, Default)]
pub struct KvCtx {
    pub keys: Vec<Key>,
}

define_op! {
    /// Writes `value` under `key`.
    pub struct Put<Sys = KvStore, Model = KvModel> {
        pub key: Key,
        pub value: i32,
    }
    apply_op(self, sys) {
        sys.data.lock().unwrap().insert(self.key, self.value);
        Box::new(Unit)
    }
    update_model(self, model) {
        let mut next = model.clone();
        next.0.insert(self.key, self.value);
        next
    }
    gen_args(ctx: &KvCtx) {
        (proptest::sample::select(ctx.keys.clone()), any::<i32>())
            .prop_map(|(key, value)| Put { key, value })
    }
}

define_op! {
    /// Reads the value under `key`, or `None` if absent.
    pub struct Get<Sys = KvStore, Model = KvModel> {
        key: Key,
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
    gen_args(ctx: &KvCtx) {
        proptest::sample::select(ctx.keys.clone()).prop_map(|key| Get { key })
    }
}

define_op! {
    /// Reads the value under `key`, panicking if it is absent — exercises
    /// panic-as-observation (§4.2): the panic becomes this op's [Thrown]
    /// result rather than propagating.
    pub struct GetOrThrow<Sys = KvStore, Model = KvModel> {
        key: Key,
    }
    apply_op(self, sys) {
        match sys.data.lock().unwrap().get(self.key).copied() {
            Some(value) => Box::new(value),
            None => panic!("key {} not found", self.key),
        }
    }
    check(self, model, result) {
        match model.0.get(self.key).copied() {
            Some(expected) => result
                .as_any()
                .downcast_ref::<i32>()
                .is_some_and(|v| *v == expected),
            None => result.as_any().downcast_ref::<Thrown>().is_some(),
        }
    }
    gen_args(ctx: &KvCtx) {
        proptest::sample::select(ctx.keys.clone()).prop_map(|key| GetOrThrow { key })
    }
}

/// A deliberately non-atomic counter: `increment` is a read, a yield, then
/// a write, not a single atomic RMW, so two concurrent increments can race
/// and lose an update. `Sync` is asserted by hand since nothing here
/// actually synchronizes access — the point of the fixture is to let the
/// harness catch that.
pub struct Counter {
    value: std::cell::UnsafeCell<i32>,
}

unsafe impl Sync for Counter {}

impl Counter {
    pub fn new() -> Self {
        Self {
            value: std::cell::UnsafeCell::new(0),
        }
    }

    pub fn increment(&self) -> i32 {
        let current = unsafe { *self.value.get() };
        std::thread::yield_now();
        let next = current + 1;
        unsafe {
            *self.value.get() = next;
        }
        next
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CounterModel(pub i32);

define_op! {
    /// Increments the counter by one.
    pub struct Increment<Sys = Counter, Model = CounterModel> {}
    apply_op(self, sys) {
        Box::new(sys.increment())
    }
    update_model(self, model) {
        CounterModel(model.0 + 1)
    }
    check(self, model, result) {
        result.as_any().downcast_ref::<i32>().is_some_and(|v| *v == model.0 + 1)
    }
    gen_args(_ctx: &()) {
        Just(Increment {})
    }
}
