//! Tests for the `PuzzleSolver` derive

use proptest::prelude::*;
use sleigh_core::{
    ParseError, PartSolver, PuzzleParser, PuzzleSolver, SolveError, Solver, SolverExt,
};

#[derive(Debug, Clone)]
struct Tally {
    numbers: Vec<i64>,
    sum: Option<i64>,
}

#[derive(PuzzleSolver)]
#[puzzle(parts = 2)]
struct SharedTally;

impl PuzzleParser for SharedTally {
    type SharedData<'a> = Tally;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let numbers = input
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| {
                l.trim()
                    .parse()
                    .map_err(|_| ParseError::InvalidFormat("Expected integer".into()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Tally { numbers, sum: None })
    }
}

impl PartSolver<1> for SharedTally {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let sum = *shared
            .sum
            .get_or_insert_with(|| shared.numbers.iter().sum());
        Ok(sum.to_string())
    }
}

impl PartSolver<2> for SharedTally {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let sum = shared.sum.unwrap_or_else(|| shared.numbers.iter().sum());
        Ok((sum * shared.numbers.len() as i64).to_string())
    }
}

#[derive(PuzzleSolver)]
#[puzzle(parts = 1)]
struct SinglePart;

impl PuzzleParser for SinglePart {
    type SharedData<'a> = &'a str;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Ok(input)
    }
}

impl PartSolver<1> for SinglePart {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.len().to_string())
    }
}

#[test]
fn test_parts_constant_follows_attribute() {
    assert_eq!(<SharedTally as Solver>::PARTS, 2);
    assert_eq!(<SinglePart as Solver>::PARTS, 1);
}

#[test]
fn test_part1_stores_data_for_part2() {
    let mut shared = SharedTally::parse("10\n20\n30").unwrap();

    assert_eq!(SharedTally::solve_part(&mut shared, 1).unwrap(), "60");
    assert_eq!(shared.sum, Some(60));
    assert_eq!(SharedTally::solve_part(&mut shared, 2).unwrap(), "180");
}

#[test]
fn test_part2_solves_independently() {
    let mut shared = SharedTally::parse("10\n20\n30").unwrap();
    assert_eq!(SharedTally::solve_part(&mut shared, 2).unwrap(), "180");
}

#[test]
fn test_borrowed_shared_data() {
    let mut shared = SinglePart::parse("abcd").unwrap();
    assert_eq!(SinglePart::solve_part(&mut shared, 1).unwrap(), "4");
    assert!(matches!(
        SinglePart::solve_part(&mut shared, 2),
        Err(SolveError::PartNotImplemented(2))
    ));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(10))]

    /// **Feature: puzzle-solver-derive, Property 1: Part dispatch correctness**
    /// *For any* part in 1..=PARTS, `solve_part` matches the `PartSolver` impl.
    #[test]
    fn prop_dispatch_matches_part_solver(
        numbers in prop::collection::vec(-50i64..50, 1..8),
        part in 1u8..=2,
    ) {
        let input = numbers.iter().map(|n| n.to_string()).collect::<Vec<_>>().join("\n");
        let mut via_dispatch = SharedTally::parse(&input).unwrap();
        let mut direct = SharedTally::parse(&input).unwrap();

        let dispatched = SharedTally::solve_part(&mut via_dispatch, part).unwrap();
        let expected = match part {
            1 => <SharedTally as PartSolver<1>>::solve(&mut direct).unwrap(),
            _ => <SharedTally as PartSolver<2>>::solve(&mut direct).unwrap(),
        };
        prop_assert_eq!(dispatched, expected);
    }

    /// **Feature: puzzle-solver-derive, Property 2: Invalid part rejection**
    /// *For any* part outside 1..=PARTS, the checked entry point refuses it.
    #[test]
    fn prop_out_of_range_rejected(part in 3u8..=255) {
        let mut shared = SharedTally::parse("1").unwrap();
        let result = SharedTally::solve_part_checked_range(&mut shared, part);
        prop_assert!(matches!(result, Err(SolveError::PartOutOfRange(p)) if p == part));
    }
}
