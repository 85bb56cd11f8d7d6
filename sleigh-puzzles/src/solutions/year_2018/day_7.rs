use std::sync::LazyLock;

use anyhow::anyhow;
use regex::Regex;
use sleigh_core::{ParseError, PartSolver, PuzzleParser, PuzzleSolver, SolveError};

use crate::utils::graph::{DependencyGraph, lettered_duration};
use crate::utils::parsing::lenient_lines;

const WORKERS: usize = 5;
const BASE_DURATION: u64 = 60;

static STEP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Step ([A-Z]) must be finished before step ([A-Z]) can begin\.$").unwrap()
});

#[derive(PuzzleSolver)]
#[puzzle(parts = 2)]
pub struct Solver;

impl PuzzleParser for Solver {
    type SharedData<'a> = DependencyGraph;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut graph = DependencyGraph::new();
        for (before, after) in lenient_lines(input, parse_edge) {
            graph.add_dependency(before, after);
        }
        Ok(graph)
    }
}

fn parse_edge(line: &str) -> anyhow::Result<(char, char)> {
    let caps = STEP
        .captures(line)
        .ok_or_else(|| anyhow!("expected \"Step X must be finished before step Y can begin.\""))?;
    let letter = |i: usize| caps[i].chars().next().ok_or_else(|| anyhow!("missing step name"));
    Ok((letter(1)?, letter(2)?))
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared.topological_order().map_err(SolveError::failed)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        assembly_time(shared, WORKERS, BASE_DURATION).map(|t| t.to_string())
    }
}

fn assembly_time(graph: &DependencyGraph, workers: usize, base: u64) -> Result<u64, SolveError> {
    graph
        .schedule(workers, lettered_duration(base))
        .map(|schedule| schedule.duration)
        .map_err(SolveError::failed)
}
