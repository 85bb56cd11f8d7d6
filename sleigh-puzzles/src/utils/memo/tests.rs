//! Tests for the memo table.

use std::cell::Cell;
use std::rc::Rc;

use proptest::prelude::*;

use super::*;

struct Fibonacci;

impl Recurrence<u64, u64> for Fibonacci {
    fn deps(&self, n: &u64) -> Vec<u64> {
        if *n <= 1 { vec![] } else { vec![n - 1, n - 2] }
    }

    fn compute(&self, n: &u64, deps: &[u64]) -> u64 {
        if *n <= 1 { *n } else { deps[0] + deps[1] }
    }
}

/// Diamond: 0 depends on 1 and 2, both depend on 3
struct Diamond {
    count: Rc<Cell<i32>>,
}

impl Recurrence<usize, i32> for Diamond {
    fn deps(&self, n: &usize) -> Vec<usize> {
        match *n {
            0 => vec![1, 2],
            1 | 2 => vec![3],
            _ => vec![],
        }
    }

    fn compute(&self, n: &usize, deps: &[i32]) -> i32 {
        self.count.set(self.count.get() + 1);
        match *n {
            0 => deps[0] + deps[1],
            1 => deps[0] * 2,
            2 => deps[0] * 3,
            _ => 10,
        }
    }
}

#[test]
fn test_fibonacci_dependency_chain() {
    let table = MemoTable::new(HashMapBackend::new(), Fibonacci);

    assert_eq!(table.get(&0), 0);
    assert_eq!(table.get(&1), 1);
    assert_eq!(table.get(&10), 55);
    assert_eq!(table.get(&50), 12_586_269_025);
    assert_eq!(table.len(), 51);
}

#[test]
fn test_diamond_dependency_memoization() {
    let count = Rc::new(Cell::new(0));
    let table = MemoTable::new(
        HashMapBackend::new(),
        Diamond {
            count: Rc::clone(&count),
        },
    );

    assert!(table.is_empty());
    assert_eq!(table.get(&0), 50);
    assert_eq!(count.get(), 4);

    // Everything is cached now
    assert_eq!(table.get(&0), 50);
    assert_eq!(table.get(&3), 10);
    assert_eq!(count.get(), 4);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(10))]

    /// **Feature: memo-table, Property 1: Order independence**
    /// *For any* query order, every value equals the iteratively computed one.
    #[test]
    fn prop_query_order_independent(queries in prop::collection::vec(0u64..60, 1..20)) {
        let table = MemoTable::new(HashMapBackend::new(), Fibonacci);

        for q in queries {
            let (mut a, mut b) = (0u64, 1u64);
            for _ in 0..q {
                (a, b) = (b, a + b);
            }
            prop_assert_eq!(table.get(&q), a);
        }
    }
}
