//! Kahn scheduling of named steps, with or without parallel workers.

use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("dependency cycle among steps {remaining}")]
    Cycle { remaining: String },
}

#[derive(Debug, Clone, Default)]
struct Node {
    parents: BTreeSet<char>,
    children: BTreeSet<char>,
}

/// Completion order and elapsed ticks of a simulated run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub order: String,
    pub duration: u64,
}

/// Steps named by single characters, with "must finish before" edges.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    nodes: BTreeMap<char, Node>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_step(&mut self, name: char) {
        self.nodes.entry(name).or_default();
    }

    /// `before` must finish before `after` can start.
    pub fn add_dependency(&mut self, before: char, after: char) {
        self.nodes.entry(before).or_default().children.insert(after);
        self.nodes.entry(after).or_default().parents.insert(before);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Lexicographically smallest topological order.
    pub fn topological_order(&self) -> Result<String, ScheduleError> {
        self.schedule(1, |_| 1).map(|schedule| schedule.order)
    }

    /// Simulate `workers` workers tick by tick.
    ///
    /// Whenever a worker is free it takes the alphabetically first ready step;
    /// a step becomes ready once every parent has finished. Steps finishing on
    /// the same tick are recorded alphabetically. The graph itself is left
    /// untouched, so a schedule can be recomputed with other parameters.
    pub fn schedule(
        &self,
        workers: usize,
        duration: impl Fn(char) -> u64,
    ) -> Result<Schedule, ScheduleError> {
        let workers = workers.max(1);
        let mut waiting: BTreeMap<char, usize> = self
            .nodes
            .iter()
            .map(|(&name, node)| (name, node.parents.len()))
            .collect();
        let mut ready: BTreeSet<char> = waiting
            .iter()
            .filter(|&(_, &parents)| parents == 0)
            .map(|(&name, _)| name)
            .collect();

        let mut busy: Vec<(char, u64)> = Vec::with_capacity(workers);
        let mut order = String::with_capacity(self.nodes.len());
        let mut elapsed = 0;

        loop {
            while busy.len() < workers {
                let Some(name) = ready.pop_first() else { break };
                busy.push((name, duration(name)));
            }
            if busy.is_empty() {
                break;
            }

            elapsed += 1;
            for (_, remaining) in busy.iter_mut() {
                *remaining = remaining.saturating_sub(1);
            }

            let mut finished: Vec<char> = busy
                .iter()
                .filter(|&&(_, remaining)| remaining == 0)
                .map(|&(name, _)| name)
                .collect();
            busy.retain(|&(_, remaining)| remaining > 0);
            finished.sort_unstable();

            for name in finished {
                order.push(name);
                for child in &self.nodes[&name].children {
                    if let Some(parents) = waiting.get_mut(child) {
                        *parents -= 1;
                        if *parents == 0 {
                            ready.insert(*child);
                        }
                    }
                }
            }
        }

        if order.len() < self.nodes.len() {
            let remaining: String = waiting
                .iter()
                .filter(|&(_, &parents)| parents > 0)
                .map(|(&name, _)| name)
                .collect();
            return Err(ScheduleError::Cycle { remaining });
        }

        debug!(workers, elapsed, %order, "schedule complete");
        Ok(Schedule {
            order,
            duration: elapsed,
        })
    }
}

/// Duration of a lettered step: `base` plus its position in the alphabet.
pub fn lettered_duration(base: u64) -> impl Fn(char) -> u64 {
    move |name| base + (name as u64).saturating_sub('A' as u64) + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DependencyGraph {
        let mut graph = DependencyGraph::new();
        for (before, after) in [
            ('C', 'A'),
            ('C', 'F'),
            ('A', 'B'),
            ('A', 'D'),
            ('B', 'E'),
            ('D', 'E'),
            ('F', 'E'),
        ] {
            graph.add_dependency(before, after);
        }
        graph
    }

    #[test]
    fn test_lexicographic_order() {
        assert_eq!(sample().topological_order().unwrap(), "CABDFE");
    }

    #[test]
    fn test_two_workers() {
        let schedule = sample().schedule(2, lettered_duration(0)).unwrap();
        assert_eq!(schedule.duration, 15);
        assert_eq!(schedule.order, "CABFDE");
    }

    #[test]
    fn test_schedule_is_repeatable() {
        let graph = sample();
        let first = graph.schedule(2, lettered_duration(0)).unwrap();
        let second = graph.schedule(2, lettered_duration(0)).unwrap();
        assert_eq!(first, second);
        assert_eq!(graph.topological_order().unwrap(), "CABDFE");
    }

    #[test]
    fn test_empty_graph() {
        let graph = DependencyGraph::new();
        assert_eq!(graph.topological_order().unwrap(), "");
        assert_eq!(
            graph.schedule(5, lettered_duration(60)).unwrap(),
            Schedule {
                order: String::new(),
                duration: 0
            }
        );
    }

    #[test]
    fn test_isolated_steps() {
        let mut graph = DependencyGraph::new();
        graph.add_step('B');
        graph.add_step('A');
        assert_eq!(graph.topological_order().unwrap(), "AB");
        assert_eq!(graph.schedule(2, lettered_duration(0)).unwrap().duration, 2);
    }

    #[test]
    fn test_cycle_is_reported() {
        let mut graph = sample();
        graph.add_dependency('E', 'C');
        graph.add_step('Z');
        assert_eq!(
            graph.topological_order(),
            Err(ScheduleError::Cycle {
                remaining: "ABCDEF".into()
            })
        );
    }

    #[test]
    fn test_lettered_duration() {
        let d = lettered_duration(60);
        assert_eq!(d('A'), 61);
        assert_eq!(d('Z'), 86);
    }
}
