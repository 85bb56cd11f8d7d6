//! Generation stepping with history-based cycle detection.
//!
//! [`CycleDetector`] keeps every snapshot of an [`Automaton`] and indexes them
//! by [`Automaton::Key`]. `history[g]` is the state after `g` generations,
//! `history[0]` the initial one. The first generation whose key was seen
//! before closes the cycle; any later generation maps back into the history.

use std::collections::HashMap;
use std::hash::Hash;

use thiserror::Error;
use tracing::{debug, info};

/// A deterministic state transition.
pub trait Automaton {
    type State;
    /// Identity used to spot repeats. Usually the state itself; drifting
    /// patterns use a translation-free view.
    type Key: Eq + Hash;

    fn step(&self, state: &Self::State) -> Self::State;

    fn key(&self, state: &Self::State) -> Self::Key;
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AutomatonError {
    #[error("no repeated state within {limit} generations")]
    NoCycle { limit: usize },
}

/// First repeat: generation `start` recurs every `period` generations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cycle {
    pub start: usize,
    pub period: usize,
}

impl Cycle {
    /// History index holding the state of `generation`, and how many whole
    /// periods were folded away to get there.
    pub fn project(&self, generation: u64) -> (usize, u64) {
        let start = self.start as u64;
        if generation < start {
            return (generation as usize, 0);
        }
        let since = generation - start;
        let period = self.period as u64;
        (self.start + (since % period) as usize, since / period)
    }
}

/// Snapshot answering a [`CycleDetector::state_at`] query.
#[derive(Debug)]
pub struct Projection<'a, S> {
    pub state: &'a S,
    /// History index the state was read from.
    pub index: usize,
    /// Whole periods skipped between `index` and the requested generation.
    pub skipped_periods: u64,
}

pub struct CycleDetector<A: Automaton> {
    automaton: A,
    history: Vec<A::State>,
    seen: HashMap<A::Key, usize>,
    cycle: Option<Cycle>,
    limit: usize,
}

impl<A: Automaton> CycleDetector<A> {
    /// Generations simulated before giving up on finding a cycle.
    pub const DEFAULT_LIMIT: usize = 100_000;

    pub fn new(automaton: A, initial: A::State) -> Self {
        let mut seen = HashMap::new();
        seen.insert(automaton.key(&initial), 0);
        Self {
            automaton,
            history: vec![initial],
            seen,
            cycle: None,
            limit: Self::DEFAULT_LIMIT,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Every recorded snapshot, indexed by generation.
    pub fn history(&self) -> &[A::State] {
        &self.history
    }

    /// Generations simulated so far.
    pub fn generations(&self) -> usize {
        self.history.len() - 1
    }

    pub fn cycle(&self) -> Option<Cycle> {
        self.cycle
    }

    /// The state after `generation` steps.
    ///
    /// Simulates until either that generation is recorded or a cycle closes;
    /// with a cycle the answer is read from inside it.
    pub fn state_at(&mut self, generation: u64) -> Result<Projection<'_, A::State>, AutomatonError> {
        loop {
            if let Some(cycle) = self.cycle {
                let (index, skipped_periods) = cycle.project(generation);
                return Ok(Projection {
                    state: &self.history[index],
                    index,
                    skipped_periods,
                });
            }
            if generation < self.history.len() as u64 {
                let index = generation as usize;
                return Ok(Projection {
                    state: &self.history[index],
                    index,
                    skipped_periods: 0,
                });
            }
            if self.generations() >= self.limit {
                return Err(AutomatonError::NoCycle { limit: self.limit });
            }
            self.advance();
        }
    }

    /// Simulate until a cycle closes.
    pub fn find_cycle(&mut self) -> Result<Cycle, AutomatonError> {
        while self.cycle.is_none() {
            if self.generations() >= self.limit {
                return Err(AutomatonError::NoCycle { limit: self.limit });
            }
            self.advance();
        }
        self.cycle.ok_or(AutomatonError::NoCycle { limit: self.limit })
    }

    fn advance(&mut self) {
        let Some(last) = self.history.last() else {
            return;
        };
        let next = self.automaton.step(last);
        let generation = self.history.len();
        let key = self.automaton.key(&next);
        self.history.push(next);

        match self.seen.get(&key) {
            Some(&start) => {
                let period = generation - start;
                info!(start, period, "state cycle detected");
                self.cycle = Some(Cycle { start, period });
            }
            None => {
                self.seen.insert(key, generation);
            }
        }
        if generation % 1000 == 0 {
            debug!(generation, "automaton progress");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Counts 0..5, then loops through 5..33 forever.
    struct Counter;

    impl Automaton for Counter {
        type State = u64;
        type Key = u64;

        fn step(&self, state: &u64) -> u64 {
            if *state < 5 { state + 1 } else { 5 + (state - 5 + 1) % 28 }
        }

        fn key(&self, state: &u64) -> u64 {
            *state
        }
    }

    /// Never repeats.
    struct Runaway;

    impl Automaton for Runaway {
        type State = u64;
        type Key = u64;

        fn step(&self, state: &u64) -> u64 {
            state + 1
        }

        fn key(&self, state: &u64) -> u64 {
            *state
        }
    }

    #[test]
    fn test_detects_start_and_period() {
        let mut detector = CycleDetector::new(Counter, 0);
        let cycle = detector.find_cycle().unwrap();
        assert_eq!(cycle, Cycle { start: 5, period: 28 });
        assert_eq!(detector.generations(), 33);
    }

    #[test]
    fn test_literal_state_before_cycle() {
        let mut detector = CycleDetector::new(Counter, 0);
        let projection = detector.state_at(3).unwrap();
        assert_eq!(*projection.state, 3);
        assert_eq!(projection.skipped_periods, 0);
        // Nothing beyond the requested generation was simulated
        assert_eq!(detector.generations(), 3);
        assert_eq!(detector.cycle(), None);
    }

    #[test]
    fn test_huge_generation_is_extrapolated() {
        let mut detector = CycleDetector::new(Counter, 0);
        let projection = detector.state_at(1_000_000_000).unwrap();
        let expected = 5 + (1_000_000_000u64 - 5) % 28;
        assert_eq!(*projection.state, expected);
        assert_eq!(projection.skipped_periods, (1_000_000_000 - 5) / 28);
    }

    #[test]
    fn test_limit_is_enforced() {
        let mut detector = CycleDetector::new(Runaway, 0).with_limit(50);
        assert_eq!(detector.state_at(10).map(|p| *p.state), Ok(10));
        assert_eq!(
            detector.state_at(1_000).map(|p| *p.state),
            Err(AutomatonError::NoCycle { limit: 50 })
        );
    }

    #[test]
    fn test_project_before_start() {
        let cycle = Cycle { start: 10, period: 4 };
        assert_eq!(cycle.project(7), (7, 0));
        assert_eq!(cycle.project(10), (10, 0));
        assert_eq!(cycle.project(15), (11, 1));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(10))]

        /// **Feature: cycle-detector, Property 1: Periodic extrapolation**
        /// *For any* k and r < period, generation start + k*period + r equals
        /// generation start + r.
        #[test]
        fn prop_periodic_extrapolation(k in 0u64..1_000_000_000, r in 0u64..28) {
            let mut detector = CycleDetector::new(Counter, 0);
            let cycle = detector.find_cycle().unwrap();
            let base = cycle.start as u64 + r;

            let near = *detector.state_at(base).unwrap().state;
            let far = *detector.state_at(base + k * cycle.period as u64).unwrap().state;
            prop_assert_eq!(near, far);
        }
    }
}
