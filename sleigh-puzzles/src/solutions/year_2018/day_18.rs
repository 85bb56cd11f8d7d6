use sleigh_core::{ParseError, PartSolver, PuzzleParser, PuzzleSolver, SolveError};

use crate::utils::automaton::{Automaton, CycleDetector};
use crate::utils::grid::Grid;
use crate::utils::parsing::invalid;

const SHORT_RUN: u64 = 10;
const LONG_RUN: u64 = 1_000_000_000;

#[derive(PuzzleSolver)]
#[puzzle(parts = 2)]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Acre {
    Open,
    Trees,
    Lumberyard,
}

impl Acre {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(Acre::Open),
            '|' => Some(Acre::Trees),
            '#' => Some(Acre::Lumberyard),
            _ => None,
        }
    }
}

/// The lumber collection area's transition rules.
struct LumberRules;

impl Automaton for LumberRules {
    type State = Grid<Acre>;
    type Key = Grid<Acre>;

    fn step(&self, area: &Grid<Acre>) -> Grid<Acre> {
        Grid::from_fn(area.width(), area.height(), |x, y| {
            let (mut trees, mut yards) = (0, 0);
            for acre in area.neighbors8(x, y) {
                match acre {
                    Acre::Trees => trees += 1,
                    Acre::Lumberyard => yards += 1,
                    Acre::Open => {}
                }
            }
            match area.get(x, y) {
                Some(Acre::Open) if trees >= 3 => Acre::Trees,
                Some(Acre::Trees) if yards >= 3 => Acre::Lumberyard,
                Some(Acre::Lumberyard) if yards == 0 || trees == 0 => Acre::Open,
                Some(&acre) => acre,
                None => Acre::Open,
            }
        })
    }

    fn key(&self, area: &Grid<Acre>) -> Grid<Acre> {
        area.clone()
    }
}

fn resource_value(area: &Grid<Acre>) -> usize {
    let count = |kind: Acre| area.cells().filter(|&&acre| acre == kind).count();
    count(Acre::Trees) * count(Acre::Lumberyard)
}

fn value_after(area: &Grid<Acre>, minutes: u64) -> Result<usize, SolveError> {
    let mut detector = CycleDetector::new(LumberRules, area.clone());
    let projection = detector.state_at(minutes).map_err(SolveError::failed)?;
    Ok(resource_value(projection.state))
}

impl PuzzleParser for Solver {
    type SharedData<'a> = Grid<Acre>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Grid::parse(input, Acre::from_char).map_err(invalid)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        value_after(shared, SHORT_RUN).map(|v| v.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        value_after(shared, LONG_RUN).map(|v| v.to_string())
    }
}
