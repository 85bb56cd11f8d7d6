//! Instructions, programs and the pure step function.

use std::fmt;
use std::str::FromStr;

use super::MachineError;
use super::opcode::{Opcode, Operand, Word, register_index};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub opcode: Opcode,
    pub a: Word,
    pub b: Word,
    pub c: Word,
}

impl Instruction {
    pub fn execute<const N: usize>(&self, registers: &[Word; N]) -> Result<[Word; N], MachineError> {
        self.opcode.execute(registers, self.a, self.b, self.c)
    }

    /// Whether every register this instruction touches exists in an `N`-register file.
    fn check_registers<const N: usize>(&self) -> Result<(), MachineError> {
        let (kind_a, kind_b) = self.opcode.operand_kinds();
        if kind_a == Operand::Register {
            register_index::<N>(self.a)?;
        }
        if kind_b == Operand::Register {
            register_index::<N>(self.b)?;
        }
        register_index::<N>(self.c)?;
        Ok(())
    }
}

impl FromStr for Instruction {
    type Err = MachineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let opcode = parts
            .next()
            .ok_or_else(|| MachineError::Syntax("empty instruction".into()))?
            .parse()?;

        let mut operand = || -> Result<Word, MachineError> {
            let token = parts
                .next()
                .ok_or_else(|| MachineError::Syntax(format!("missing operand in {s:?}")))?;
            token
                .parse()
                .map_err(|_| MachineError::Syntax(format!("bad operand {token:?} in {s:?}")))
        };
        let (a, b, c) = (operand()?, operand()?, operand()?);

        if parts.next().is_some() {
            return Err(MachineError::Syntax(format!("trailing tokens in {s:?}")));
        }
        Ok(Self { opcode, a, b, c })
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.opcode, self.a, self.b, self.c)
    }
}

/// Outcome of executing the instruction at one program counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult<const N: usize> {
    Continue { pc: Word, registers: [Word; N] },
    /// The program counter was outside the program.
    Halted,
}

/// An immutable instruction list with an optional program-counter register.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    ip_register: Option<usize>,
    instructions: Vec<Instruction>,
}

impl Program {
    pub fn new(ip_register: Option<usize>, instructions: Vec<Instruction>) -> Self {
        Self {
            ip_register,
            instructions,
        }
    }

    /// Parse an optional `#ip N` directive followed by one instruction per line.
    pub fn parse(input: &str) -> Result<Self, MachineError> {
        let mut ip_register = None;
        let mut instructions = Vec::new();

        for (line_no, line) in input.lines().map(str::trim).enumerate() {
            if line.is_empty() {
                continue;
            }
            let at_line = |e: MachineError| MachineError::Syntax(format!("(line {}) {}", line_no + 1, e));

            if let Some(register) = line.strip_prefix("#ip") {
                if ip_register.is_some() || !instructions.is_empty() {
                    return Err(at_line(MachineError::Syntax(
                        "#ip must come first and only once".into(),
                    )));
                }
                let register = register.trim().parse().map_err(|_| {
                    at_line(MachineError::Syntax(format!("bad register {:?}", register.trim())))
                })?;
                ip_register = Some(register);
            } else {
                instructions.push(line.parse().map_err(at_line)?);
            }
        }

        Ok(Self::new(ip_register, instructions))
    }

    pub fn ip_register(&self) -> Option<usize> {
        self.ip_register
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Instruction at `pc`, or `None` once the counter leaves the program.
    pub fn fetch(&self, pc: Word) -> Option<&Instruction> {
        usize::try_from(pc).ok().and_then(|i| self.instructions.get(i))
    }

    /// Check that the program only names registers an `N`-register file has.
    pub fn validate<const N: usize>(&self) -> Result<(), MachineError> {
        if let Some(ip) = self.ip_register {
            register_index::<N>(ip as Word)?;
        }
        for (pc, instruction) in self.instructions.iter().enumerate() {
            instruction
                .check_registers::<N>()
                .map_err(|e| MachineError::Syntax(format!("(pc {pc}) {e}")))?;
        }
        Ok(())
    }

    /// Execute the instruction at `pc`.
    ///
    /// With a bound program-counter register, `pc` is written to it first and
    /// read back afterwards; either way the next counter is that value plus one.
    pub fn step<const N: usize>(
        &self,
        pc: Word,
        mut registers: [Word; N],
    ) -> Result<StepResult<N>, MachineError> {
        let Some(instruction) = self.fetch(pc) else {
            return Ok(StepResult::Halted);
        };

        let bound = match self.ip_register {
            Some(ip) => {
                let slot = register_index::<N>(ip as Word)?;
                registers[slot] = pc;
                Some(slot)
            }
            None => None,
        };

        let registers = instruction.execute(&registers)?;
        // Saturating: a counter at Word::MAX stays outside the program and halts.
        let pc = bound.map_or(pc, |slot| registers[slot]).saturating_add(1);
        Ok(StepResult::Continue { pc, registers })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "#ip 0
seti 5 0 1
seti 6 0 2
addi 0 1 0
addr 1 2 3
setr 1 0 0
seti 8 0 4
seti 9 0 5
";

    #[test]
    fn test_parse_with_ip_directive() {
        let program = Program::parse(SAMPLE).unwrap();
        assert_eq!(program.ip_register(), Some(0));
        assert_eq!(program.len(), 7);
        assert_eq!(program.instructions()[3].to_string(), "addr 1 2 3");
        assert!(program.validate::<6>().is_ok());
        assert!(program.validate::<4>().is_err());
    }

    #[test]
    fn test_parse_errors() {
        assert!(Program::parse("seti 1 2").is_err());
        assert!(Program::parse("jmp 1 2 3").is_err());
        assert!(Program::parse("seti 1 2 3 4").is_err());
        assert!(Program::parse("seti 1 2 3\n#ip 1").is_err());
        assert!(Program::parse("#ip x").is_err());
    }

    #[test]
    fn test_step_writes_and_reads_pc_register() {
        let program = Program::parse(SAMPLE).unwrap();

        let step = program.step(2, [0; 6]).unwrap();
        // r0 = pc (2) + 1, then next pc = r0 + 1
        assert_eq!(
            step,
            StepResult::Continue {
                pc: 4,
                registers: [3, 0, 0, 0, 0, 0]
            }
        );
    }

    #[test]
    fn test_step_outside_program_halts() {
        let program = Program::parse(SAMPLE).unwrap();
        assert_eq!(program.step(7, [0; 6]).unwrap(), StepResult::Halted);
        assert_eq!(program.step(-1, [0; 6]).unwrap(), StepResult::Halted);
    }

    #[test]
    fn test_step_without_pc_register() {
        let program = Program::parse("addi 0 5 0\n").unwrap();
        assert_eq!(
            program.step(0, [1, 0, 0, 0]).unwrap(),
            StepResult::Continue {
                pc: 1,
                registers: [6, 0, 0, 0]
            }
        );
    }

    #[test]
    fn test_pc_register_at_word_max_halts() {
        let program = Program::parse("#ip 0\nseti 9223372036854775807 0 0\n").unwrap();
        let step = program.step(0, [0; 2]).unwrap();
        assert_eq!(
            step,
            StepResult::Continue {
                pc: Word::MAX,
                registers: [Word::MAX, 0]
            }
        );
        assert_eq!(program.step(Word::MAX, [Word::MAX, 0]).unwrap(), StepResult::Halted);
    }
}
