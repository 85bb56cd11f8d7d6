//! Register machine with a sixteen-opcode instruction set.
//!
//! [`Program::step`] is the pure transition (registers and pc in, registers
//! and next pc out); [`Machine`] wraps it with mutable state, a step budget
//! and an interception hook so callers can replace a hot loop with its closed
//! form. A program counter outside the program is a normal halt.
//!
//! ```
//! use sleigh_puzzles::utils::register_machine::{Machine, Program};
//!
//! let program = Program::parse("#ip 0\nseti 5 0 1\nseti 6 0 2\naddi 0 1 0\naddr 1 2 3\nsetr 1 0 0\nseti 8 0 4\nseti 9 0 5").unwrap();
//! let registers = Machine::new(&program, [0; 6]).unwrap().run().unwrap();
//! assert_eq!(registers[0], 6);
//! ```

mod machine;
mod opcode;
mod program;

use thiserror::Error;

pub use machine::{Intercept, Machine, RunOutcome, Step};
pub use opcode::{Opcode, Operand, Word, register_index};
pub use program::{Instruction, Program, StepResult};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MachineError {
    #[error("register {index} out of range for a {registers}-register machine")]
    RegisterOutOfRange { index: Word, registers: usize },
    #[error("unknown opcode {0:?}")]
    UnknownOpcode(String),
    #[error("syntax error: {0}")]
    Syntax(String),
    #[error("no halt within {limit} steps")]
    StepLimit { limit: u64 },
}
