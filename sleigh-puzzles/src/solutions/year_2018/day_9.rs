use std::sync::LazyLock;

use anyhow::anyhow;
use regex::Regex;
use sleigh_core::{ParseError, PartSolver, PuzzleParser, PuzzleSolver, SolveError};

use crate::utils::parsing::invalid;
use crate::utils::ring::LinkedRing;

/// Every marble divisible by this is scored instead of placed.
const SCORING_MARBLE: u64 = 23;
const PART_2_SCALE: u64 = 100;
/// Largest game the ring is allocated for.
const MAX_MARBLES: u64 = 100_000_000;

static GAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+) players?; last marble is worth (\d+) points?").unwrap()
});

#[derive(PuzzleSolver)]
#[puzzle(parts = 2)]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Game {
    players: usize,
    last_marble: u64,
}

impl PuzzleParser for Solver {
    type SharedData<'a> = Game;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let caps = GAME
            .captures(input)
            .ok_or_else(|| ParseError::InvalidFormat("expected \"N players; last marble is worth M points\"".into()))?;
        let players: usize = caps[1].parse().map_err(|e| invalid(anyhow!("players: {e}")))?;
        let last_marble: u64 = caps[2].parse().map_err(|e| invalid(anyhow!("last marble: {e}")))?;
        if players == 0 {
            return Err(ParseError::InvalidFormat("a game needs at least one player".into()));
        }
        Ok(Game {
            players,
            last_marble,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let last = playable(Some(shared.last_marble))?;
        Ok(high_score(shared.players, last).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let last = playable(shared.last_marble.checked_mul(PART_2_SCALE))?;
        Ok(high_score(shared.players, last).to_string())
    }
}

/// The last marble, if the game fits in memory.
fn playable(last_marble: Option<u64>) -> Result<u64, SolveError> {
    last_marble
        .filter(|&last| last <= MAX_MARBLES)
        .ok_or_else(|| SolveError::failed(format!("games above {MAX_MARBLES} marbles are not supported")))
}

/// The marble circle: a ring with the placement rules of the game.
struct MarbleCircle {
    ring: LinkedRing<u64>,
}

impl MarbleCircle {
    fn new(capacity: usize) -> Self {
        Self {
            ring: LinkedRing::with_capacity(0, capacity),
        }
    }

    /// Place `marble` two positions clockwise of the current one.
    fn insert_after_current(&mut self, marble: u64) {
        self.ring.rotate(1);
        self.ring.insert_after(marble);
    }

    /// Take out the marble `offset` positions away; its clockwise neighbour
    /// becomes current.
    fn remove_relative(&mut self, offset: isize) -> u64 {
        self.ring.remove_relative(offset).unwrap_or_default()
    }
}

fn high_score(players: usize, last_marble: u64) -> u64 {
    let marbles = usize::try_from(last_marble).unwrap_or(usize::MAX).saturating_add(1);
    let mut circle = MarbleCircle::new(marbles);
    // Only players who can place a scoring marble need a slot.
    let mut scores = vec![0u64; players.min(marbles)];

    for marble in 1..=last_marble {
        if marble % SCORING_MARBLE == 0 {
            let removed = circle.remove_relative(-7);
            scores[(marble % players as u64) as usize] += marble + removed;
        } else {
            circle.insert_after_current(marble);
        }
    }

    scores.into_iter().max().unwrap_or_default()
}
