//! Per-thread histories: the sequence of executed operations with their
//! observed results in program order per thread.

use crate::op::Operation;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Identifier for a single thread of operations in a trial.
///
/// Small non-negative integer, assigned by the concurrent runner in the
/// order its per-thread op-sequences were given.
pub type ThreadId = usize;

/// A type-erased observed result of applying an [Operation] to the system
/// under test.
///
/// Results are heterogeneous across operation types (a `Put` may return unit
/// while a `Get` returns `Option<i32>`), so they flow through the World and
/// search engine behind this object-safe, dyn-clonable, dyn-comparable
/// wrapper rather than a single concrete type. This mirrors the way the
/// harness already dispatches operations themselves through a trait object
/// (see [crate::op::Operation]); it does not use identity hashing anywhere,
/// only structural equality, per the per-op structural annotation this
/// harness requires.
pub trait OpValue: fmt::Debug + Send + Sync {
    /// Returns `self` as `&dyn Any` so the blanket impl below can downcast.
    fn as_any(&self) -> &dyn Any;

    /// Structural equality against another type-erased value.
    fn value_eq(&self, other: &dyn OpValue) -> bool;

    /// Clones this value behind a fresh box.
    fn clone_box(&self) -> Box<dyn OpValue>;
}

impl<T> OpValue for T
where
    T: fmt::Debug + Clone + PartialEq + Send + Sync + 'static,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn value_eq(&self, other: &dyn OpValue) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .map_or(false, |o| self == o)
    }

    fn clone_box(&self) -> Box<dyn OpValue> {
        Box::new(self.clone())
    }
}

impl Clone for Box<dyn OpValue> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

impl PartialEq for Box<dyn OpValue> {
    fn eq(&self, other: &Self) -> bool {
        self.value_eq(other.as_ref())
    }
}

impl Eq for Box<dyn OpValue> {}

/// The unit result returned by operations (such as [crate::op::Wait]) that
/// have no meaningful observed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Unit;

/// The result recorded for an operation whose `apply_to` panicked.
///
/// A panic from the system under test is not a harness bug: it is an
/// observation, exactly as if the operation had thrown and been caught.
/// The message is best-effort, recovered from the panic payload when it is
/// a `&str` or `String` and falling back to a generic message otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thrown(pub String);

impl Thrown {
    /// Recovers a human-readable message from a caught panic payload.
    pub fn from_panic_payload(payload: Box<dyn Any + Send>) -> Self {
        if let Some(s) = payload.downcast_ref::<&str>() {
            Thrown((*s).to_owned())
        } else if let Some(s) = payload.downcast_ref::<String>() {
            Thrown(s.clone())
        } else {
            Thrown("operation panicked with a non-string payload".to_owned())
        }
    }
}

/// An operation that has been executed against the system under test and
/// annotated with the thread that ran it and the result it observed.
///
/// Annotated ops are immutable and, once produced by the concurrent runner,
/// are shared by reference (never cloned structurally) among every `World`
/// that descends from the same trial: cloning the `Arc` is the cheap
/// operation, not cloning the underlying operation or result.
pub struct AnnotatedOp<Sys, Model> {
    /// The thread that produced this annotated op.
    pub thread_id: ThreadId,
    /// The operation itself.
    pub op: Arc<dyn Operation<Sys, Model>>,
    /// The observed result, or `None` if the op has not yet been executed.
    pub result: Option<Box<dyn OpValue>>,
}

impl<Sys, Model> fmt::Debug for AnnotatedOp<Sys, Model> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnnotatedOp")
            .field("thread_id", &self.thread_id)
            .field("op", &self.op)
            .field("result", &self.result)
            .finish()
    }
}

impl<Sys, Model> AnnotatedOp<Sys, Model> {
    /// Constructs an annotated op with no result yet (pre-execution).
    pub fn unexecuted(thread_id: ThreadId, op: Arc<dyn Operation<Sys, Model>>) -> Self {
        Self {
            thread_id,
            op,
            result: None,
        }
    }

    /// Returns the observed result, if this op has been executed.
    pub fn result(&self) -> crate::err::Result<&dyn OpValue> {
        self.result
            .as_deref()
            .ok_or(crate::err::Error::MissingResultAnnotation(self.thread_id))
    }
}

/// A mapping from thread id to the ordered sequence of operations that
/// thread is to run, in program order.
pub type ThreadPlan<Sys, Model> = Vec<(ThreadId, Vec<Arc<dyn Operation<Sys, Model>>>)>;

/// A mapping from thread id to the ordered sequence of operations that
/// thread actually ran, each already annotated with its observed result.
pub type ThreadHistory<Sys, Model> = Vec<(ThreadId, Vec<Arc<AnnotatedOp<Sys, Model>>>)>;
