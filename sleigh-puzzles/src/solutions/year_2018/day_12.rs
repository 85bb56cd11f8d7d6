use std::sync::LazyLock;

use anyhow::{anyhow, bail};
use regex::Regex;
use sleigh_core::{ParseError, PartSolver, PuzzleParser, PuzzleSolver, SolveError};

use crate::utils::automaton::{Automaton, CycleDetector};
use crate::utils::parsing::{invalid, lenient_lines};

const PART_1_GENERATIONS: u64 = 20;
const PART_2_GENERATIONS: u64 = 50_000_000_000;

static RULE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([#.]{5}) => ([#.])$").unwrap());

#[derive(PuzzleSolver)]
#[puzzle(parts = 2)]
pub struct Solver;

/// Outcome for each of the 32 five-pot neighbourhoods, leftmost pot as the
/// most significant bit.
#[derive(Debug, Clone, Copy)]
pub struct Rules([bool; 32]);

impl Automaton for Rules {
    type State = PotRow;
    type Key = Vec<bool>;

    fn step(&self, state: &PotRow) -> PotRow {
        let len = state.pots.len() as isize;
        let pot = |i: isize| i >= 0 && i < len && state.pots[i as usize];

        // New pot k sits at old index k - 2 and reads old indices k - 4 ..= k.
        let pots = (0..len + 4)
            .map(|k| {
                let pattern = (k - 4..=k).fold(0usize, |acc, i| (acc << 1) | pot(i) as usize);
                self.0[pattern]
            })
            .collect();
        PotRow::new(state.first - 2, pots)
    }

    /// The pattern without its position, so a drifting row still repeats.
    fn key(&self, state: &PotRow) -> Vec<bool> {
        state.pots.clone()
    }
}

/// A row of pots trimmed to its first and last plant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PotRow {
    first: i64,
    pots: Vec<bool>,
}

impl PotRow {
    fn new(first: i64, mut pots: Vec<bool>) -> Self {
        let Some(lead) = pots.iter().position(|&p| p) else {
            return Self {
                first: 0,
                pots: Vec::new(),
            };
        };
        let tail = pots.iter().rposition(|&p| p).map_or(pots.len(), |i| i + 1);
        pots.truncate(tail);
        pots.drain(..lead);
        Self {
            first: first + lead as i64,
            pots,
        }
    }

    fn plants(&self) -> i64 {
        self.pots.iter().filter(|&&p| p).count() as i64
    }

    fn position_sum(&self) -> i64 {
        self.pots
            .iter()
            .enumerate()
            .filter(|&(_, &p)| p)
            .map(|(i, _)| self.first + i as i64)
            .sum()
    }
}

pub struct Garden {
    initial: PotRow,
    rules: Rules,
}

impl PuzzleParser for Solver {
    type SharedData<'a> = Garden;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut lines = input.lines().map(str::trim).skip_while(|l| l.is_empty());
        let header = lines
            .next()
            .ok_or_else(|| ParseError::MissingData("initial state".into()))?;
        let state = header
            .strip_prefix("initial state:")
            .ok_or_else(|| ParseError::MissingData("initial state".into()))?
            .trim();
        let pots = state.chars().map(pot).collect::<anyhow::Result<Vec<_>>>().map_err(invalid)?;

        let mut table = [false; 32];
        let rest = lines.collect::<Vec<_>>().join("\n");
        for (pattern, grows) in lenient_lines(&rest, parse_rule) {
            table[pattern] = grows;
        }
        if table[0] {
            return Err(ParseError::InvalidFormat(
                "rule \".....\" => \"#\" would grow an infinite row".into(),
            ));
        }

        Ok(Garden {
            initial: PotRow::new(0, pots),
            rules: Rules(table),
        })
    }
}

fn pot(c: char) -> anyhow::Result<bool> {
    match c {
        '#' => Ok(true),
        '.' => Ok(false),
        other => bail!("unexpected pot {other:?}"),
    }
}

fn parse_rule(line: &str) -> anyhow::Result<(usize, bool)> {
    let caps = RULE.captures(line).ok_or_else(|| anyhow!("expected \"LLCRR => N\""))?;
    let pattern = caps[1]
        .chars()
        .try_fold(0usize, |acc, c| Ok::<_, anyhow::Error>((acc << 1) | pot(c)? as usize))?;
    let grows = caps[2].chars().next().map(pot).transpose()?.unwrap_or(false);
    Ok((pattern, grows))
}

/// Sum of plant positions after `generations`, extrapolating along a cycle
/// by the row's drift per period.
fn sum_after(garden: &Garden, generations: u64) -> Result<i64, SolveError> {
    let mut detector = CycleDetector::new(garden.rules, garden.initial.clone());
    let (index, skipped) = {
        let projection = detector.state_at(generations).map_err(SolveError::failed)?;
        (projection.index, projection.skipped_periods)
    };

    let history = detector.history();
    let state = &history[index];
    let mut total = state.position_sum();
    if let Some(cycle) = detector.cycle().filter(|_| skipped > 0) {
        let drift = history[cycle.start + cycle.period].first - history[cycle.start].first;
        total += state.plants() * drift * skipped as i64;
    }
    Ok(total)
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        sum_after(shared, PART_1_GENERATIONS).map(|s| s.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        sum_after(shared, PART_2_GENERATIONS).map(|s| s.to_string())
    }
}
