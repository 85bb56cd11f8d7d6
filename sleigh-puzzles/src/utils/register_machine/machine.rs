//! A running program: register file, program counter and step count.

use super::MachineError;
use super::opcode::Word;
use super::program::{Program, StepResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Halted,
}

/// What an interception hook wants done before the next instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intercept {
    /// Execute the instruction at the current counter.
    Proceed,
    /// The hook rewrote registers or the counter; consult it again without executing.
    Replaced,
    /// Stop running and hand control back to the caller.
    Stop,
}

/// How [`Machine::run_with`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Halted,
    Stopped,
}

#[derive(Debug, Clone)]
pub struct Machine<'p, const N: usize> {
    program: &'p Program,
    registers: [Word; N],
    pc: Word,
    steps: u64,
    step_limit: Option<u64>,
}

impl<'p, const N: usize> Machine<'p, N> {
    /// A machine at pc 0. Fails if the program names registers outside `0..N`.
    pub fn new(program: &'p Program, registers: [Word; N]) -> Result<Self, MachineError> {
        program.validate::<N>()?;
        Ok(Self {
            program,
            registers,
            pc: 0,
            steps: 0,
            step_limit: None,
        })
    }

    /// Fail with [`MachineError::StepLimit`] after `limit` executed instructions.
    pub fn with_step_limit(mut self, limit: u64) -> Self {
        self.step_limit = Some(limit);
        self
    }

    pub fn pc(&self) -> Word {
        self.pc
    }

    pub fn registers(&self) -> &[Word; N] {
        &self.registers
    }

    pub fn registers_mut(&mut self) -> &mut [Word; N] {
        &mut self.registers
    }

    /// Executed instruction count.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Send the program counter past the last instruction.
    pub fn halt(&mut self) {
        self.pc = self.program.len() as Word;
    }

    pub fn step(&mut self) -> Result<Step, MachineError> {
        if let Some(limit) = self.step_limit.filter(|&limit| self.steps >= limit) {
            return Err(MachineError::StepLimit { limit });
        }

        match self.program.step(self.pc, self.registers)? {
            StepResult::Continue { pc, registers } => {
                self.pc = pc;
                self.registers = registers;
                self.steps += 1;
                Ok(Step::Continue)
            }
            StepResult::Halted => Ok(Step::Halted),
        }
    }

    /// Run to completion and return the final registers.
    pub fn run(&mut self) -> Result<[Word; N], MachineError> {
        while self.step()? == Step::Continue {}
        Ok(self.registers)
    }

    /// Run with `hook` consulted before every instruction.
    ///
    /// The hook sees the machine as it is about to execute `pc()` and may
    /// rewrite it, for instance to replace a loop with its closed form.
    pub fn run_with<F>(&mut self, mut hook: F) -> Result<RunOutcome, MachineError>
    where
        F: FnMut(&mut Self) -> Intercept,
    {
        loop {
            match hook(self) {
                Intercept::Stop => return Ok(RunOutcome::Stopped),
                Intercept::Replaced => continue,
                Intercept::Proceed => {}
            }
            if self.step()? == Step::Halted {
                return Ok(RunOutcome::Halted);
            }
        }
    }
}
