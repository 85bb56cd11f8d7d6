use anyhow::{Context, anyhow};
use sleigh_core::{ParseError, PartSolver, PuzzleParser, PuzzleSolver, SolveError};
use tracing::info;

use crate::utils::memo::{HashMapBackend, MemoTable, Recurrence};
use crate::utils::parsing::invalid;
use crate::utils::search::{StateSpace, shortest_path};

const X_FACTOR: u64 = 16807;
const Y_FACTOR: u64 = 48271;
const EROSION_MODULUS: u64 = 20183;
const SWITCH_MINUTES: u64 = 7;
const MOVE_MINUTES: u64 = 1;
/// How far past the target the rescuer may wander.
const SEARCH_MARGIN: usize = 1000;

type Point = (usize, usize);

#[derive(PuzzleSolver)]
#[puzzle(parts = 2)]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scan {
    depth: u64,
    target: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Region {
    Rocky,
    Wet,
    Narrow,
}

impl Region {
    fn from_erosion(erosion: u64) -> Self {
        match erosion % 3 {
            0 => Region::Rocky,
            1 => Region::Wet,
            _ => Region::Narrow,
        }
    }

    fn risk(self) -> u64 {
        self as u64
    }

    fn allows(self, tool: Tool) -> bool {
        !matches!(
            (self, tool),
            (Region::Rocky, Tool::Neither) | (Region::Wet, Tool::Torch) | (Region::Narrow, Tool::ClimbingGear)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
enum Tool {
    Neither,
    Torch,
    ClimbingGear,
}

impl Tool {
    const ALL: [Tool; 3] = [Tool::Neither, Tool::Torch, Tool::ClimbingGear];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct Explorer {
    x: usize,
    y: usize,
    tool: Tool,
}

/// Erosion level of every coordinate, each defined through its west and
/// north neighbours.
struct Erosion {
    depth: u64,
    target: Point,
}

impl Recurrence<Point, u64> for Erosion {
    fn deps(&self, &(x, y): &Point) -> Vec<Point> {
        if x == 0 || y == 0 || (x, y) == self.target {
            vec![]
        } else {
            vec![(x - 1, y), (x, y - 1)]
        }
    }

    fn compute(&self, &(x, y): &Point, deps: &[u64]) -> u64 {
        let geologic = if (x, y) == self.target {
            0
        } else if y == 0 {
            x as u64 * X_FACTOR
        } else if x == 0 {
            y as u64 * Y_FACTOR
        } else {
            deps[0] * deps[1]
        };
        (geologic + self.depth) % EROSION_MODULUS
    }
}

struct Cave {
    erosion: MemoTable<Point, u64, HashMapBackend<Point, u64>, Erosion>,
    target: Point,
    bounds: Point,
}

impl Cave {
    fn new(scan: &Scan) -> Self {
        let (tx, ty) = scan.target;
        Self {
            erosion: MemoTable::new(
                HashMapBackend::new(),
                Erosion {
                    depth: scan.depth,
                    target: scan.target,
                },
            ),
            target: scan.target,
            bounds: (tx + SEARCH_MARGIN, ty + SEARCH_MARGIN),
        }
    }

    fn region(&self, x: usize, y: usize) -> Region {
        Region::from_erosion(self.erosion.get(&(x, y)))
    }

    fn risk_level(&self) -> u64 {
        let (tx, ty) = self.target;
        (0..=ty)
            .flat_map(|y| (0..=tx).map(move |x| (x, y)))
            .map(|(x, y)| self.region(x, y).risk())
            .sum()
    }
}

impl StateSpace for Cave {
    type State = Explorer;

    fn successors(&self, at: &Explorer, out: &mut Vec<(Explorer, u64)>) {
        let here = self.region(at.x, at.y);
        for tool in Tool::ALL {
            if tool != at.tool && here.allows(tool) {
                out.push((Explorer { tool, ..*at }, SWITCH_MINUTES));
            }
        }

        let steps = [
            at.x.checked_sub(1).map(|x| (x, at.y)),
            at.y.checked_sub(1).map(|y| (at.x, y)),
            Some((at.x + 1, at.y)).filter(|&(x, _)| x <= self.bounds.0),
            Some((at.x, at.y + 1)).filter(|&(_, y)| y <= self.bounds.1),
        ];
        for (x, y) in steps.into_iter().flatten() {
            if self.region(x, y).allows(at.tool) {
                out.push((Explorer { x, y, tool: at.tool }, MOVE_MINUTES));
            }
        }
    }

    fn is_goal(&self, state: &Explorer) -> bool {
        (state.x, state.y) == self.target && state.tool == Tool::Torch
    }
}

impl PuzzleParser for Solver {
    type SharedData<'a> = Scan;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut depth = None;
        let mut target = None;
        for line in input.lines().map(str::trim).filter(|l| !l.is_empty()) {
            if let Some(value) = line.strip_prefix("depth:") {
                let value = value.trim();
                let parsed = value.parse::<u64>().with_context(|| format!("bad depth {value:?}"));
                depth = Some(parsed.map_err(invalid)?);
            } else if let Some(value) = line.strip_prefix("target:") {
                target = Some(parse_point(value.trim()).map_err(invalid)?);
            } else {
                return Err(invalid(anyhow!("unexpected line {line:?}")));
            }
        }
        Ok(Scan {
            depth: depth.ok_or_else(|| ParseError::MissingData("depth".into()))?,
            target: target.ok_or_else(|| ParseError::MissingData("target".into()))?,
        })
    }
}

fn parse_point(text: &str) -> anyhow::Result<Point> {
    let (x, y) = text.split_once(',').ok_or_else(|| anyhow!("expected x,y, got {text:?}"))?;
    Ok((x.trim().parse()?, y.trim().parse()?))
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(Cave::new(shared).risk_level().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let cave = Cave::new(shared);
        let start = Explorer {
            x: 0,
            y: 0,
            tool: Tool::Torch,
        };
        let found = shortest_path(&cave, start)
            .ok_or_else(|| SolveError::failed("target unreachable within the search bounds"))?;
        info!(
            minutes = found.cost,
            expanded = found.expanded,
            regions = cave.erosion.len(),
            "rescue route found"
        );
        Ok(found.cost.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "depth: 510\ntarget: 10,10\n";

    #[test]
    fn test_region_types() {
        let scan = Solver::parse(SAMPLE).unwrap();
        let cave = Cave::new(&scan);
        assert_eq!(cave.erosion.get(&(1, 0)), 17317);
        assert_eq!(cave.erosion.get(&(0, 1)), 8415);
        assert_eq!(cave.erosion.get(&(1, 1)), 1805);
        assert_eq!(cave.region(0, 0), Region::Rocky);
        assert_eq!(cave.region(1, 0), Region::Wet);
        assert_eq!(cave.region(1, 1), Region::Narrow);
        assert_eq!(cave.region(10, 10), Region::Rocky);
    }

    #[test]
    fn test_risk_level() {
        let mut scan = Solver::parse(SAMPLE).unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut scan).unwrap(), "114");
    }

    #[test]
    fn test_rescue_time() {
        let mut scan = Solver::parse(SAMPLE).unwrap();
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut scan).unwrap(), "45");
    }

    #[test]
    fn test_target_at_mouth() {
        let mut scan = Solver::parse("depth: 510\ntarget: 0,0\n").unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut scan).unwrap(), "0");
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut scan).unwrap(), "0");
    }

    #[test]
    fn test_tools_per_region() {
        assert!(Region::Rocky.allows(Tool::Torch) && Region::Rocky.allows(Tool::ClimbingGear));
        assert!(Region::Wet.allows(Tool::ClimbingGear) && Region::Wet.allows(Tool::Neither));
        assert!(Region::Narrow.allows(Tool::Torch) && Region::Narrow.allows(Tool::Neither));
        assert!(!Region::Rocky.allows(Tool::Neither));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(Solver::parse("depth: 510\n"), Err(ParseError::MissingData(_))));
        assert!(matches!(Solver::parse("target: 1,2\n"), Err(ParseError::MissingData(_))));
        assert!(Solver::parse("depth: x\ntarget: 1,2\n").is_err());
        assert!(Solver::parse("depth: 5\ntarget: 12\n").is_err());
    }
}
