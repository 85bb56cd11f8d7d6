//! Recurrence definition for the memo table.

/// A recurrence whose values depend on other values of the same recurrence.
///
/// # Type Parameters
///
/// - `I`: Index type
/// - `K`: Value type
///
/// # Example
///
/// ```rust
/// use sleigh_puzzles::utils::memo::{HashMapBackend, MemoTable, Recurrence};
///
/// struct Fibonacci;
///
/// impl Recurrence<u64, u64> for Fibonacci {
///     fn deps(&self, n: &u64) -> Vec<u64> {
///         if *n <= 1 { vec![] } else { vec![n - 1, n - 2] }
///     }
///
///     fn compute(&self, n: &u64, deps: &[u64]) -> u64 {
///         if *n <= 1 { *n } else { deps[0] + deps[1] }
///     }
/// }
///
/// let table = MemoTable::new(HashMapBackend::new(), Fibonacci);
/// assert_eq!(table.get(&10), 55);
/// ```
pub trait Recurrence<I, K> {
    /// Returns the indices that this index depends on.
    ///
    /// Base cases return an empty vector.
    fn deps(&self, index: &I) -> Vec<I>;

    /// Computes the value for `index` from the resolved dependency values,
    /// given in the order `deps()` returned them.
    fn compute(&self, index: &I, deps: &[K]) -> K;
}
