//! Operations: the user-defined unit of interaction with the system under
//! test.
//!
//! An [Operation] is polymorphic over three capabilities (apply to the
//! system, update the model, check an observed result) plus a constructor
//! that takes a trial-scoped context and returns a random-argument
//! generator. Distinct operation types (`Put`, `Get`, `Increment`, ...) are
//! ordinarily heterogeneous Rust types; they are unified behind the
//! `Operation<Sys, Model>` trait object so that a single per-thread op
//! sequence can mix operation kinds freely, the way `op_generators` in
//! `check_system` does.

use crate::history::OpValue;
use proptest::strategy::BoxedStrategy;
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;

/// A single atomic interaction with the system under test, with model
/// predictions.
///
/// Implementors should derive `Debug`; the harness uses the debug
/// representation for reporting and for the pretty-printed history dumps
/// produced on a failing trial.
pub trait Operation<Sys, Model>: Debug + Send + Sync {
    /// Runs this operation against the system under test, returning the
    /// observed value (which may itself represent a thrown error — the
    /// harness never distinguishes "returned" from "thrown" once the value
    /// reaches the model).
    ///
    /// The default implementation performs no interaction and returns the
    /// unit result, matching the "apply_to returns a unit/null value"
    /// default semantics for operations that omit this method.
    fn apply_to(&self, _system: &Sys) -> Box<dyn OpValue> {
        Box::new(crate::history::Unit)
    }

    /// Computes the next model state given the current one.
    ///
    /// Defaults to leaving the model unchanged.
    fn update_model(&self, model: &Model) -> Model
    where
        Model: Clone,
    {
        model.clone()
    }

    /// Validates an observed result against the model state that preceded
    /// it. May register assertions via the ambient assertion-capture
    /// machinery (see [crate::report]); those are not evaluated here.
    ///
    /// Defaults to always succeeding.
    fn check(&self, _model: &Model, _result: &dyn OpValue) -> bool {
        true
    }
}

/// Produces a strategy for generating a random instance of some operation
/// type, given the trial's shared context.
///
/// This is the generator half of the `define_op!` contract: a constructor
/// that takes a context and returns a [proptest] strategy yielding fresh,
/// randomly-parameterised operation instances.
pub trait OpGenerator<Ctx, Sys, Model>: Send + Sync {
    /// Builds the strategy for this operation kind under the given context.
    fn strategy(&self, ctx: &Ctx) -> BoxedStrategy<Arc<dyn Operation<Sys, Model>>>;
}

/// Defines a new [Operation] type, with a name, a set of fields carrying its
/// generated arguments, and the (optional) four hook methods plus an
/// argument generator.
///
/// Any hook left out falls back to the default behaviour documented on
/// [Operation]. Operation instances are compared structurally (derived
/// `PartialEq`/`Eq` over the declared fields plus the type itself acting as
/// the tag), matching the "structural over arguments plus a type tag"
/// equality the harness requires.
///
/// ```ignore
/// define_op! {
///     /// Writes `value` under `key`.
///     pub struct Put<Sys = KvStore, Model = KvModel> {
///         key: Key,
///         value: i32,
///     }
///     apply_op(self, sys) { sys.put(self.key, self.value); Unit }
///     update_model(self, model) { model.put(self.key, self.value) }
///     gen_args(ctx: &KvCtx) {
///         (proptest::sample::select(ctx.keys.clone()), any::<i32>())
///             .prop_map(|(key, value)| Put { key, value })
///     }
/// }
/// ```
#[macro_export]
macro_rules! define_op {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident<Sys = $sys:ty, Model = $model:ty> {
            $($field_vis:vis $field:ident : $ftype:ty),* $(,)?
        }
        $(apply_op($aself:ident, $asys:ident) $apply_body:block)?
        $(check($cself:ident, $cmodel:ident, $cresult:ident) $check_body:block)?
        $(update_model($uself:ident, $umodel:ident) $update_body:block)?
        $(gen_args($gctx:ident : &$gctxty:ty) $gen_body:block)?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis struct $name {
            $($field_vis $field: $ftype),*
        }

        impl $crate::op::Operation<$sys, $model> for $name {
            $(fn apply_to(&$aself, $asys: &$sys) -> Box<dyn $crate::history::OpValue> $apply_body)?

            $(fn check(&$cself, $cmodel: &$model, $cresult: &dyn $crate::history::OpValue) -> bool $check_body)?

            $(fn update_model(&$uself, $umodel: &$model) -> $model $update_body)?
        }

        $(
            impl $name {
                /// Returns a zero-sized generator handle implementing
                /// [`OpGenerator`](crate::op::OpGenerator) for this operation.
                $vis fn generator() -> impl $crate::op::OpGenerator<$gctxty, $sys, $model> {
                    struct Gen;
                    impl $crate::op::OpGenerator<$gctxty, $sys, $model> for Gen {
                        fn strategy(
                            &self,
                            _ctx: &$gctxty,
                        ) -> ::proptest::strategy::BoxedStrategy<::std::sync::Arc<dyn $crate::op::Operation<$sys, $model>>>
                        {
                            use ::proptest::strategy::Strategy;
                            let $gctx = _ctx;
                            let strat = $gen_body;
                            strat
                                .prop_map(|op: $name| {
                                    ::std::sync::Arc::new(op) as ::std::sync::Arc<dyn $crate::op::Operation<$sys, $model>>
                                })
                                .boxed()
                        }
                    }
                    Gen
                }
            }
        )?
    };
}

/// The built-in `Wait(duration_ms)` operation: sleeps the calling thread for
/// a generated duration and is a no-op on the model.
///
/// Its only purpose is to increase interleaving diversity; the concurrent
/// trial driver prepends it to the user's generator list whenever
/// concurrency is greater than one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wait {
    /// Duration to sleep, in milliseconds. Generated in `[1, 100]`.
    pub duration_ms: u64,
}

impl<Sys, Model> Operation<Sys, Model> for Wait {
    fn apply_to(&self, _system: &Sys) -> Box<dyn OpValue> {
        std::thread::sleep(Duration::from_millis(self.duration_ms));
        Box::new(crate::history::Unit)
    }

    fn update_model(&self, model: &Model) -> Model
    where
        Model: Clone,
    {
        model.clone()
    }

    fn check(&self, _model: &Model, _result: &dyn OpValue) -> bool {
        true
    }
}

impl Wait {
    /// Builds a strategy generating `Wait` ops with durations in `[1, 100]`ms.
    pub fn strategy() -> impl proptest::strategy::Strategy<Value = Wait> {
        use proptest::prelude::*;
        (1u64..=100).prop_map(|duration_ms| Wait { duration_ms })
    }
}
