use itertools::Itertools;
use sleigh_core::{ParseError, PartSolver, PuzzleParser, PuzzleSolver, SolveError};

/// Give up searching for the digit pattern past this many recipes.
const MAX_RECIPES: usize = 100_000_000;

#[derive(PuzzleSolver)]
#[puzzle(parts = 2)]
pub struct Solver;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    digits: Vec<u8>,
}

impl PuzzleParser for Solver {
    type SharedData<'a> = Puzzle;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ParseError::MissingData("recipe count".into()));
        }
        let digits = input
            .chars()
            .map(|c| c.to_digit(10).map(|d| d as u8))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| ParseError::InvalidFormat(format!("not a number: {input:?}")))?;
        Ok(Puzzle { digits })
    }
}

struct Scoreboard {
    scores: Vec<u8>,
    elves: [usize; 2],
}

impl Scoreboard {
    fn new() -> Self {
        Self {
            scores: vec![3, 7],
            elves: [0, 1],
        }
    }

    fn len(&self) -> usize {
        self.scores.len()
    }

    fn mix(&mut self) {
        let sum: u8 = self.elves.iter().map(|&e| self.scores[e]).sum();
        if sum >= 10 {
            self.scores.push(sum / 10);
        }
        self.scores.push(sum % 10);

        let len = self.scores.len();
        for elf in &mut self.elves {
            *elf = (*elf + 1 + self.scores[*elf] as usize) % len;
        }
    }
}

fn ten_after(count: usize) -> String {
    let mut board = Scoreboard::new();
    while board.len() < count + 10 {
        board.mix();
    }
    board.scores[count..count + 10].iter().join("")
}

/// Recipes to the left of the first occurrence of `pattern`.
fn recipes_before(pattern: &[u8]) -> Option<usize> {
    let mut board = Scoreboard::new();
    let mut checked = 0;
    loop {
        while checked + pattern.len() <= board.len() {
            if board.scores[checked..checked + pattern.len()] == *pattern {
                return Some(checked);
            }
            checked += 1;
        }
        if board.len() > MAX_RECIPES {
            return None;
        }
        board.mix();
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let count = shared
            .digits
            .iter()
            .try_fold(0usize, |acc, &d| acc.checked_mul(10)?.checked_add(d as usize))
            .ok_or_else(|| SolveError::failed("recipe count overflows"))?;
        Ok(ten_after(count))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        recipes_before(&shared.digits)
            .map(|n| n.to_string())
            .ok_or_else(|| SolveError::failed(format!("pattern not found within {MAX_RECIPES} recipes")))
    }
}
