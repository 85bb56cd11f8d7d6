use sleigh_core::{ParseError, PartSolver, PuzzleParser, PuzzleSolver, SolveError};
use tracing::info;

use crate::utils::parsing::invalid;
use crate::utils::register_machine::{Intercept, Machine, Program, Word};

/// Once the setup code jumps here, the target number sits in a register and
/// the rest of the program sums its divisors into register 0.
const LOOP_ENTRY: Word = 1;

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

fn divisor_sum(n: Word) -> Word {
    let mut total = 0;
    let mut d = 1;
    while d * d <= n {
        if n % d == 0 {
            total += d;
            if d * d != n {
                total += n / d;
            }
        }
        d += 1;
    }
    total
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let registers = Machine::new(shared, [0; 6])
            .and_then(|mut machine| machine.run())
            .map_err(SolveError::failed)?;
        Ok(registers[0].to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut machine = Machine::new(shared, [1, 0, 0, 0, 0, 0]).map_err(SolveError::failed)?;
        machine
            .run_with(|m| {
                if m.pc() != LOOP_ENTRY {
                    return Intercept::Proceed;
                }
                let target = m.registers().iter().copied().max().unwrap_or_default();
                info!(target, steps = m.steps(), "replacing divisor loop");
                m.registers_mut()[0] = divisor_sum(target);
                m.halt();
                Intercept::Replaced
            })
            .map_err(SolveError::failed)?;
        Ok(machine.registers()[0].to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
#ip 0
seti 5 0 1
seti 6 0 2
addi 0 1 0
addr 1 2 3
setr 1 0 0
seti 8 0 4
seti 9 0 5
";

    /// Loads 10 into a register, then enters the loop at pc 1.
    const SETUP: &str = "\
#ip 4
addi 4 2 4
seti 99 0 4
seti 0 0 0
seti 10 0 2
seti 0 0 4
";

    #[test]
    fn test_sample_program() {
        let mut program = Solver::parse(SAMPLE).unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut program).unwrap(), "6");
    }

    #[test]
    fn test_loop_is_intercepted() {
        let mut program = Solver::parse(SETUP).unwrap();
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut program).unwrap(), "18");
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut program).unwrap(), "0");
    }

    #[test]
    fn test_divisor_sum() {
        assert_eq!(divisor_sum(1), 1);
        assert_eq!(divisor_sum(10), 18);
        assert_eq!(divisor_sum(16), 31);
        assert_eq!(divisor_sum(10_551_347), (1..=10_551_347).filter(|d| 10_551_347 % d == 0).sum());
    }

    #[test]
    fn test_rejects_bad_register() {
        assert!(Solver::parse("#ip 7\nseti 0 0 0\n").is_err());
        assert!(Solver::parse("#ip 0\nseti 0 0 6\n").is_err());
    }
}
