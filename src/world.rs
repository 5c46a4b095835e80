//! Worlds: immutable search nodes over which the search engine explores
//! candidate linearizations.

use crate::history::{AnnotatedOp, ThreadId, ThreadHistory};
use crate::report::Assertion;
use std::collections::{BTreeMap, VecDeque};
use std::hash::Hash;
use std::sync::Arc;

/// The number of distinct remaining linearizations from a world, used as the
/// search priority.
///
/// The exact value is the multinomial coefficient of the remaining
/// per-thread pending-op counts. Big-integer arithmetic is not used: per the
/// harness's own design allowance, the value saturates at `u128::MAX` when
/// the true coefficient would overflow. Saturation only affects ordering
/// among already-enormous worlds; the separate `is_one` flag preserves the
/// semantically important "exactly one future remains" fact regardless of
/// saturation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Futures {
    value: u128,
    is_one: bool,
}

impl Futures {
    /// True iff at most one thread has pending operations, i.e. there is
    /// exactly one possible remaining linearization.
    pub fn is_one(&self) -> bool {
        self.is_one
    }

    /// The (possibly saturated) multinomial coefficient itself.
    pub fn value(&self) -> u128 {
        self.value
    }

    /// Computes `futures` for a set of per-thread pending-op counts.
    pub fn compute(counts: impl IntoIterator<Item = usize>) -> Self {
        let counts: Vec<usize> = counts.into_iter().filter(|&c| c > 0).collect();
        if counts.len() <= 1 {
            return Self {
                value: 1,
                is_one: true,
            };
        }
        let mut remaining: u128 = counts.iter().map(|&c| c as u128).sum();
        let mut value: u128 = 1;
        for &c in &counts {
            value = value.saturating_mul(binomial_saturating(remaining, c as u128));
            remaining = remaining.saturating_sub(c as u128);
        }
        Self {
            value,
            is_one: false,
        }
    }
}

/// Computes `C(n, k)` exactly while it fits in a `u128`, saturating to
/// `u128::MAX` on overflow.
fn binomial_saturating(n: u128, k: u128) -> u128 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut result: u128 = 1;
    for i in 0..k {
        result = match result.checked_mul(n - i) {
            Some(v) => v / (i + 1),
            None => return u128::MAX,
        };
    }
    result
}

/// `(model, pending)`: uniquely identifies a search node up to equivalence.
///
/// Two worlds with the same model and the same *remaining* per-thread op
/// sequences must have pointwise-equivalent successor subtrees. Because
/// pending sequences are always suffixes of the original per-thread op
/// plans produced by the concurrent runner, comparing the `Arc` addresses of
/// the remaining ops is sufficient to detect that equivalence cheaply,
/// without comparing operation contents structurally on every dedup check.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct VisitKey<Model> {
    model: Model,
    pending_shape: Vec<(ThreadId, Vec<usize>)>,
}

fn pending_shape<Sys, Model>(
    pending: &BTreeMap<ThreadId, VecDeque<Arc<AnnotatedOp<Sys, Model>>>>,
) -> Vec<(ThreadId, Vec<usize>)> {
    pending
        .iter()
        .map(|(&tid, ops)| {
            let addrs = ops.iter().map(|op| Arc::as_ptr(op) as usize).collect();
            (tid, addrs)
        })
        .collect()
}

/// An immutable search node: a model snapshot, the history consumed to
/// reach it, the per-thread operations still pending, and the remaining
/// branching factor.
pub struct World<Sys, Model> {
    model: Model,
    history: Vec<(ThreadId, Arc<AnnotatedOp<Sys, Model>>)>,
    pending: BTreeMap<ThreadId, VecDeque<Arc<AnnotatedOp<Sys, Model>>>>,
    futures: Futures,
}

impl<Sys, Model: Clone> Clone for World<Sys, Model> {
    fn clone(&self) -> Self {
        Self {
            model: self.model.clone(),
            history: self.history.clone(),
            pending: self.pending.clone(),
            futures: self.futures,
        }
    }
}

impl<Sys, Model> World<Sys, Model>
where
    Model: Clone + Eq + Hash,
{
    /// Constructs the initial world for a trial: the given model, empty
    /// history, and the full thread history as the pending plan.
    pub fn initialize(model: Model, thread_results: ThreadHistory<Sys, Model>) -> Self {
        let pending: BTreeMap<_, _> = thread_results
            .into_iter()
            .filter(|(_, ops)| !ops.is_empty())
            .map(|(tid, ops)| (tid, ops.into_iter().collect::<VecDeque<_>>()))
            .collect();
        let futures = Futures::compute(pending.values().map(VecDeque::len));
        Self {
            model,
            history: Vec::new(),
            pending,
            futures,
        }
    }

    /// The model at this world.
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// The history consumed to reach this world.
    pub fn history(&self) -> &[(ThreadId, Arc<AnnotatedOp<Sys, Model>>)] {
        &self.history
    }

    /// The remaining branching factor.
    pub fn futures(&self) -> Futures {
        self.futures
    }

    /// True iff no thread has pending operations: this world is terminal.
    pub fn end_of_line(&self) -> bool {
        self.pending.is_empty()
    }

    /// Number of threads that still have at least one pending operation.
    ///
    /// Used by the search engine's entry point to decide between the linear
    /// fast path (at most one active thread) and full parallel search.
    pub fn active_thread_count(&self) -> usize {
        self.pending.len()
    }

    /// The `(model, pending)` dedup key for this world.
    pub fn visit_key(&self) -> VisitKey<Model> {
        VisitKey {
            model: self.model.clone(),
            pending_shape: pending_shape(&self.pending),
        }
    }

    /// Attempts to step `thread_id`'s next pending op. Returns `None` when
    /// the thread has no pending op, or when the op's `check` rejects the
    /// observed result against the current model (that path is pruned).
    pub fn step(&self, thread_id: ThreadId) -> crate::err::Result<Option<Self>> {
        Ok(self.step_checked(thread_id)?.0)
    }

    /// As [World::step], but also returns the assertion event produced by
    /// the `check` call, per §6.3: every evaluated `check` — whether it
    /// passes and the step proceeds, or fails and the step is pruned —
    /// is itself an assertion event. `None` only when `thread_id` had no
    /// pending op at all, so no `check` was evaluated.
    fn step_checked(&self, thread_id: ThreadId) -> crate::err::Result<(Option<Self>, Option<Assertion>)> {
        let Some(ops) = self.pending.get(&thread_id) else {
            return Ok((None, None));
        };
        let annotated = ops.front().expect("pending thread entries are never empty");
        let result = annotated.result()?;
        let passed = annotated.op.check(&self.model, result);
        let assertion = Assertion {
            thread_id,
            op: format!("{:?}", annotated.op),
            passed,
        };
        if !passed {
            return Ok((None, Some(assertion)));
        }

        let mut pending = self.pending.clone();
        let mut ops = pending.remove(&thread_id).expect("checked above");
        let op = ops.pop_front().expect("checked above");
        if !ops.is_empty() {
            pending.insert(thread_id, ops);
        }

        let mut history = self.history.clone();
        history.push((thread_id, op.clone()));

        let model = op.op.update_model(&self.model);
        let futures = Futures::compute(pending.values().map(VecDeque::len));

        Ok((
            Some(Self {
                model,
                history,
                pending,
                futures,
            }),
            Some(assertion),
        ))
    }

    /// All successor worlds reachable by stepping any thread with a pending
    /// op; order among thread ids is not significant.
    pub fn next_steps(&self) -> crate::err::Result<Vec<Self>> {
        let tids: Vec<ThreadId> = self.pending.keys().copied().collect();
        let mut out = Vec::with_capacity(tids.len());
        for tid in tids {
            if let Some(w) = self.step(tid)? {
                out.push(w);
            }
        }
        Ok(out)
    }

    /// Iterative fast path for when at most one possible linearization
    /// remains: repeatedly steps the sole remaining thread (or, when there
    /// happen to be multiple threads but `futures == 1`, any thread with
    /// pending ops) until the world is terminal or a check fails.
    ///
    /// Returns the terminal world, plus the number of steps taken (for the
    /// visited counter) and the assertion events produced by every `check`
    /// evaluated along the way, or `None` world if a `check` failed.
    pub fn run_linear(mut self) -> crate::err::Result<(Option<Self>, usize, Vec<Assertion>)> {
        let mut visited = 0usize;
        let mut assertions = Vec::new();
        while !self.end_of_line() {
            let tid = *self
                .pending
                .keys()
                .next()
                .expect("end_of_line is false, so pending is non-empty");
            visited += 1;
            let (next, assertion) = self.step_checked(tid)?;
            assertions.extend(assertion);
            match next {
                Some(world) => self = world,
                None => return Ok((None, visited, assertions)),
            }
        }
        Ok((Some(self), visited, assertions))
    }
}
