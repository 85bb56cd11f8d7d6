use std::collections::HashSet;

use sleigh_core::{ParseError, PartSolver, PuzzleParser, PuzzleSolver, SolveError};
use tracing::{debug, info};

use crate::utils::parsing::invalid;
use crate::utils::register_machine::{Intercept, Machine, Opcode, Program, RunOutcome, Word};

/// Register 0 holds no value the program can produce, so the halting
/// comparison is observed on every pass without ever succeeding.
const UNREACHABLE: Word = -1;

/// Instructions executed before a program that never repeats is abandoned.
const STEP_LIMIT: u64 = 50_000_000_000;

#[derive(PuzzleSolver)]
#[puzzle(parts = 2)]
pub struct Solver;

impl PuzzleParser for Solver {
    type SharedData<'a> = Program;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let program = Program::parse(input).map_err(|e| invalid(e.into()))?;
        program.validate::<6>().map_err(|e| invalid(e.into()))?;
        Ok(program)
    }
}

/// The instruction comparing register 0 against another register, and that
/// other register.
fn halting_check(program: &Program) -> Result<(Word, usize), SolveError> {
    program
        .instructions()
        .iter()
        .enumerate()
        .find_map(|(pc, ins)| {
            if ins.opcode != Opcode::Eqrr {
                return None;
            }
            let watched = match (ins.a, ins.b) {
                (0, other) | (other, 0) => other,
                _ => return None,
            };
            Some((pc as Word, watched as usize))
        })
        .ok_or_else(|| SolveError::failed("no eqrr instruction reads register 0"))
}

/// Run the program, handing each value compared against register 0 to
/// `observe` until it asks to stop.
fn watch(program: &Program, mut observe: impl FnMut(Word) -> bool) -> Result<RunOutcome, SolveError> {
    let (check_pc, watched) = halting_check(program)?;
    debug!(check_pc, watched, "halting comparison found");

    let mut registers = [0; 6];
    registers[0] = UNREACHABLE;
    let mut machine = Machine::new(program, registers)
        .map_err(SolveError::failed)?
        .with_step_limit(STEP_LIMIT);
    machine
        .run_with(|m| {
            if m.pc() == check_pc && !observe(m.registers()[watched]) {
                Intercept::Stop
            } else {
                Intercept::Proceed
            }
        })
        .map_err(SolveError::failed)
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut first = None;
        watch(shared, |value| {
            first = Some(value);
            false
        })?;
        first
            .map(|v| v.to_string())
            .ok_or_else(|| SolveError::failed("program halted before reaching the comparison"))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut seen = HashSet::new();
        let mut last = None;
        let outcome = watch(shared, |value| {
            if !seen.insert(value) {
                return false;
            }
            last = Some(value);
            true
        })?;
        if outcome == RunOutcome::Halted {
            return Err(SolveError::failed("program halted before its values repeated"));
        }
        info!(distinct = seen.len(), "comparison values repeat");
        last.map(|v| v.to_string())
            .ok_or_else(|| SolveError::failed("no comparison values observed"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Cycles register 3 through all sixteen values of (r3 + 7) & 15, starting at 8.
    const SAMPLE: &str = "\
#ip 1
seti 1 0 3
addi 3 7 3
bani 3 15 3
eqrr 3 0 2
addr 2 1 1
seti 0 0 1
";

    #[test]
    fn test_first_value() {
        let mut program = Solver::parse(SAMPLE).unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut program).unwrap(), "8");
    }

    #[test]
    fn test_last_value_before_repeat() {
        let mut program = Solver::parse(SAMPLE).unwrap();
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut program).unwrap(), "1");
    }

    #[test]
    fn test_finds_check_with_swapped_operands() {
        let program = Solver::parse("#ip 1\nseti 0 0 0\neqrr 0 4 2\n").unwrap();
        assert_eq!(halting_check(&program).unwrap(), (1, 4));
    }

    #[test]
    fn test_missing_check() {
        let mut program = Solver::parse("#ip 1\nseti 5 0 3\n").unwrap();
        assert!(<Solver as PartSolver<1>>::solve(&mut program).is_err());
    }

    #[test]
    fn test_halts_before_comparison() {
        let mut program = Solver::parse("#ip 1\nseti 9 0 1\neqrr 3 0 2\n").unwrap();
        assert!(<Solver as PartSolver<1>>::solve(&mut program).is_err());
        assert!(<Solver as PartSolver<2>>::solve(&mut program).is_err());
    }
}
