//! The sixteen-instruction set.

use std::fmt;
use std::str::FromStr;

use super::MachineError;

/// Register and immediate value type.
pub type Word = i64;

/// How an instruction reads one of its two inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Register,
    Immediate,
    /// Ignored by the instruction.
    Unused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Opcode {
    Addr,
    Addi,
    Mulr,
    Muli,
    Banr,
    Bani,
    Borr,
    Bori,
    Setr,
    Seti,
    Gtir,
    Gtri,
    Gtrr,
    Eqir,
    Eqri,
    Eqrr,
}

impl Opcode {
    pub const ALL: [Opcode; 16] = [
        Opcode::Addr,
        Opcode::Addi,
        Opcode::Mulr,
        Opcode::Muli,
        Opcode::Banr,
        Opcode::Bani,
        Opcode::Borr,
        Opcode::Bori,
        Opcode::Setr,
        Opcode::Seti,
        Opcode::Gtir,
        Opcode::Gtri,
        Opcode::Gtrr,
        Opcode::Eqir,
        Opcode::Eqri,
        Opcode::Eqrr,
    ];

    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Addr => "addr",
            Opcode::Addi => "addi",
            Opcode::Mulr => "mulr",
            Opcode::Muli => "muli",
            Opcode::Banr => "banr",
            Opcode::Bani => "bani",
            Opcode::Borr => "borr",
            Opcode::Bori => "bori",
            Opcode::Setr => "setr",
            Opcode::Seti => "seti",
            Opcode::Gtir => "gtir",
            Opcode::Gtri => "gtri",
            Opcode::Gtrr => "gtrr",
            Opcode::Eqir => "eqir",
            Opcode::Eqri => "eqri",
            Opcode::Eqrr => "eqrr",
        }
    }

    /// How inputs `a` and `b` are read.
    pub fn operand_kinds(self) -> (Operand, Operand) {
        use Operand::{Immediate as I, Register as R, Unused as U};
        match self {
            Opcode::Addr | Opcode::Mulr | Opcode::Banr | Opcode::Borr => (R, R),
            Opcode::Addi | Opcode::Muli | Opcode::Bani | Opcode::Bori => (R, I),
            Opcode::Setr => (R, U),
            Opcode::Seti => (I, U),
            Opcode::Gtir | Opcode::Eqir => (I, R),
            Opcode::Gtri | Opcode::Eqri => (R, I),
            Opcode::Gtrr | Opcode::Eqrr => (R, R),
        }
    }

    /// Apply the instruction to a register file, returning the updated copy.
    ///
    /// Only register `c` changes. Fails if an operand read as a register, or
    /// `c`, names a register that does not exist.
    pub fn execute<const N: usize>(
        self,
        registers: &[Word; N],
        a: Word,
        b: Word,
        c: Word,
    ) -> Result<[Word; N], MachineError> {
        let (kind_a, kind_b) = self.operand_kinds();
        let a = read(registers, kind_a, a)?;
        let b = read(registers, kind_b, b)?;

        let value = match self {
            Opcode::Addr | Opcode::Addi => a.wrapping_add(b),
            Opcode::Mulr | Opcode::Muli => a.wrapping_mul(b),
            Opcode::Banr | Opcode::Bani => a & b,
            Opcode::Borr | Opcode::Bori => a | b,
            Opcode::Setr | Opcode::Seti => a,
            Opcode::Gtir | Opcode::Gtri | Opcode::Gtrr => Word::from(a > b),
            Opcode::Eqir | Opcode::Eqri | Opcode::Eqrr => Word::from(a == b),
        };

        let mut out = *registers;
        out[register_index::<N>(c)?] = value;
        Ok(out)
    }
}

/// Checked conversion of an operand to a register slot.
pub fn register_index<const N: usize>(operand: Word) -> Result<usize, MachineError> {
    usize::try_from(operand)
        .ok()
        .filter(|&i| i < N)
        .ok_or(MachineError::RegisterOutOfRange {
            index: operand,
            registers: N,
        })
}

fn read<const N: usize>(registers: &[Word; N], kind: Operand, operand: Word) -> Result<Word, MachineError> {
    match kind {
        Operand::Register => Ok(registers[register_index::<N>(operand)?]),
        Operand::Immediate | Operand::Unused => Ok(operand),
    }
}

impl FromStr for Opcode {
    type Err = MachineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Opcode::ALL
            .into_iter()
            .find(|op| op.mnemonic() == s)
            .ok_or_else(|| MachineError::UnknownOpcode(s.to_string()))
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
