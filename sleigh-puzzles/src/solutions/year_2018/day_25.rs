use anyhow::anyhow;
use sleigh_core::{ParseError, PartSolver, PuzzleParser, PuzzleSolver, SolveError};

use crate::utils::graph::{count_components, proximity_graph};
use crate::utils::parsing::lenient_lines;

/// Points this close (Manhattan distance) share a constellation.
const LINK_DISTANCE: i64 = 3;

type Point = [i64; 4];

#[derive(PuzzleSolver)]
#[puzzle(parts = 1)]
pub struct Solver;

impl PuzzleParser for Solver {
    type SharedData<'a> = Vec<Point>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Ok(lenient_lines(input, parse_point))
    }
}

fn parse_point(line: &str) -> anyhow::Result<Point> {
    let coords = line
        .split(',')
        .map(|c| c.trim().parse::<i64>())
        .collect::<Result<Vec<_>, _>>()?;
    coords
        .try_into()
        .map_err(|c: Vec<i64>| anyhow!("expected 4 coordinates, got {}", c.len()))
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let graph = proximity_graph(shared, LINK_DISTANCE);
        Ok(count_components(&graph).to_string())
    }
}
