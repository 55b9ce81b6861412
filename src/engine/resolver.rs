use std::fmt;

use crate::engine::frame::ProgressFrame;

/// Interactive state that survives segment transitions (region toggles, selected tiles).
///
/// It is written only through [`Carry::update`], which bumps a revision used to invalidate
/// memoized visual state. Nothing here is ever re-derived from progress.
#[derive(Clone, Debug, Default)]
pub struct Carry<C> {
    value: C,
    revision: u64,
}

impl<C> Carry<C> {
    /// Wrap an initial value.
    pub fn new(value: C) -> Self {
        Self { value, revision: 0 }
    }

    /// Current value.
    pub fn get(&self) -> &C {
        &self.value
    }

    /// Mutate the value and bump the revision.
    pub fn update<R>(&mut self, f: impl FnOnce(&mut C) -> R) -> R {
        self.revision = self.revision.wrapping_add(1);
        f(&mut self.value)
    }

    /// Monotonic write counter.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct MemoKey {
    progress_bits: u64,
    active: usize,
    reduced: bool,
    revision: u64,
}

type DeriveFn<S, C, V> = Box<dyn Fn(&ProgressFrame<'_, S>, &C) -> V>;

/// Derives an act's visual state from a [`ProgressFrame`] and its carry-over state.
///
/// The derivation closure must be pure; the resolver memoizes its last output so repeated
/// frames at the same progress (and carry revision) return the identical value.
pub struct Resolver<S, C, V> {
    derive: DeriveFn<S, C, V>,
    memo: Option<(MemoKey, V)>,
    evaluations: u64,
}

impl<S, C, V> Resolver<S, C, V>
where
    S: Clone + PartialEq + fmt::Debug,
{
    /// Wrap a derivation closure.
    pub fn new(derive: impl Fn(&ProgressFrame<'_, S>, &C) -> V + 'static) -> Self {
        Self {
            derive: Box::new(derive),
            memo: None,
            evaluations: 0,
        }
    }

    /// Evaluate without touching the memo.
    pub fn evaluate(&self, frame: &ProgressFrame<'_, S>, carry: &C) -> V {
        (self.derive)(frame, carry)
    }

    /// Memoized evaluation.
    pub fn resolve(&mut self, frame: &ProgressFrame<'_, S>, carry: &Carry<C>) -> &V {
        let key = MemoKey {
            progress_bits: frame.progress().to_bits(),
            active: frame.active().index,
            reduced: frame.reduced_motion().is_reduced(),
            revision: carry.revision(),
        };

        if self.memo.as_ref().is_some_and(|(k, _)| *k != key) {
            self.memo = None;
        }
        let derive = &self.derive;
        let evaluations = &mut self.evaluations;
        &self
            .memo
            .get_or_insert_with(|| {
                tracing::trace!(progress = frame.progress().get(), "recomputing visual state");
                *evaluations += 1;
                (key, derive(frame, carry.get()))
            })
            .1
    }

    /// How many times the closure ran through [`Self::resolve`].
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }
}

impl<S, C, V> fmt::Debug for Resolver<S, C, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("memoized", &self.memo.is_some())
            .field("evaluations", &self.evaluations)
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/resolver.rs"]
mod tests;
