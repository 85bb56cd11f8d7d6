//! Single-threaded memo table.

use std::cell::RefCell;
use std::marker::PhantomData;

use super::backend::Backend;
use super::problem::Recurrence;

/// Lazily evaluated, memoized recurrence.
///
/// Each index is computed at most once; dependencies are resolved on demand.
/// Interior mutability lets owners expose `get` through `&self`.
///
/// # Warning: No Cycle Detection
///
/// Dependencies must form a DAG. A cycle recurses until the stack overflows.
pub struct MemoTable<I, K, B, P>
where
    B: Backend<I, K>,
    P: Recurrence<I, K>,
{
    backend: RefCell<B>,
    problem: P,
    _phantom: PhantomData<(I, K)>,
}

impl<I, K, B, P> MemoTable<I, K, B, P>
where
    I: Clone,
    K: Clone,
    B: Backend<I, K>,
    P: Recurrence<I, K>,
{
    /// Creates a table over `problem` storing values in `backend`.
    pub fn new(backend: B, problem: P) -> Self {
        Self {
            backend: RefCell::new(backend),
            problem,
            _phantom: PhantomData,
        }
    }

    /// Returns the value for `index`, computing it and its dependencies if needed.
    pub fn get(&self, index: &I) -> K {
        if let Some(value) = self.backend.borrow().get(index) {
            return value.clone();
        }

        // No borrow is held while dependencies recurse.
        let dep_values: Vec<K> = self
            .problem
            .deps(index)
            .into_iter()
            .map(|dep| self.get(&dep))
            .collect();

        let value = self.problem.compute(index, &dep_values);
        self.backend.borrow_mut().insert(index.clone(), value.clone());
        value
    }

    /// Number of memoized entries.
    pub fn len(&self) -> usize {
        self.backend.borrow().len()
    }

    /// Whether nothing has been computed yet.
    pub fn is_empty(&self) -> bool {
        self.backend.borrow().is_empty()
    }
}
