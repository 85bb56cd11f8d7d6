//! Memoized recurrences
//!
//! [`MemoTable`] evaluates a [`Recurrence`] lazily: asking for one index
//! resolves exactly the indices it depends on, each computed once and kept in
//! a [`Backend`].
//!
//! # Warning: Cycle Behavior
//!
//! There is no cycle detection. Dependencies must form a DAG.
//!
//! # Example
//!
//! ```rust
//! use sleigh_puzzles::utils::memo::{HashMapBackend, MemoTable, Recurrence};
//!
//! struct GridPaths;
//!
//! impl Recurrence<(u32, u32), u64> for GridPaths {
//!     fn deps(&self, &(r, c): &(u32, u32)) -> Vec<(u32, u32)> {
//!         match (r, c) {
//!             (0, 0) => vec![],
//!             (0, c) => vec![(0, c - 1)],
//!             (r, 0) => vec![(r - 1, 0)],
//!             (r, c) => vec![(r - 1, c), (r, c - 1)],
//!         }
//!     }
//!     fn compute(&self, _pos: &(u32, u32), deps: &[u64]) -> u64 {
//!         if deps.is_empty() { 1 } else { deps.iter().sum() }
//!     }
//! }
//!
//! let table = MemoTable::new(HashMapBackend::new(), GridPaths);
//! assert_eq!(table.get(&(4, 4)), 70);
//! ```

mod backend;
mod cache;
mod problem;

pub use backend::{Backend, HashMapBackend};
pub use cache::MemoTable;
pub use problem::Recurrence;

#[cfg(test)]
mod tests;
