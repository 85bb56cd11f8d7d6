//! Dijkstra over implicitly defined state spaces.

use std::cmp::Reverse;
use std::collections::hash_map::Entry;
use std::collections::{BinaryHeap, HashMap};
use std::hash::Hash;

use tracing::debug;

/// A weighted graph whose edges are generated on demand.
pub trait StateSpace {
    /// Ordering is only used to break ties between equal-cost queue entries.
    type State: Clone + Eq + Hash + Ord;

    /// Push every neighbour of `state` with the cost of reaching it.
    fn successors(&self, state: &Self::State, out: &mut Vec<(Self::State, u64)>);

    fn is_goal(&self, state: &Self::State) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Found<S> {
    pub state: S,
    pub cost: u64,
    /// States popped and expanded before the goal.
    pub expanded: usize,
}

/// Cheapest cost from `start` to any goal state.
///
/// Stale queue entries are skipped lazily instead of decreasing keys.
/// Returns `None` when the queue runs dry without reaching a goal.
pub fn shortest_path<G: StateSpace>(space: &G, start: G::State) -> Option<Found<G::State>> {
    let mut best: HashMap<G::State, u64> = HashMap::new();
    let mut queue = BinaryHeap::new();
    let mut successors = Vec::new();
    let mut expanded = 0;

    best.insert(start.clone(), 0);
    queue.push(Reverse((0u64, start)));

    while let Some(Reverse((cost, state))) = queue.pop() {
        if best.get(&state).is_some_and(|&known| known < cost) {
            continue;
        }
        if space.is_goal(&state) {
            debug!(cost, expanded, "goal reached");
            return Some(Found {
                state,
                cost,
                expanded,
            });
        }
        expanded += 1;

        successors.clear();
        space.successors(&state, &mut successors);
        for (next, step) in successors.drain(..) {
            let next_cost = cost + step;
            match best.entry(next.clone()) {
                Entry::Occupied(mut known) if *known.get() > next_cost => {
                    known.insert(next_cost);
                }
                Entry::Occupied(_) => continue,
                Entry::Vacant(slot) => {
                    slot.insert(next_cost);
                }
            }
            queue.push(Reverse((next_cost, next)));
        }
    }

    debug!(expanded, "search space exhausted");
    None
}
