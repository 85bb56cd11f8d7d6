use anyhow::{Context, anyhow};
use sleigh_core::{ParseError, PartSolver, PuzzleParser, PuzzleSolver, SolveError};
use thiserror::Error;
use tracing::debug;

use crate::utils::register_machine::{Instruction, Machine, Opcode, Program, Word};

/// Samples consistent with at least this many opcodes count for part 1.
const AMBIGUITY_THRESHOLD: u32 = 3;

type Registers = [Word; 4];
type Raw = [Word; 4];

#[derive(PuzzleSolver)]
#[puzzle(parts = 2)]
pub struct Solver;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Sample {
    before: Registers,
    raw: Raw,
    after: Registers,
}

impl Sample {
    /// Bit `k` set when `Opcode::ALL[k]` explains the sample.
    fn candidates(&self) -> u16 {
        let [_, a, b, c] = self.raw;
        Opcode::ALL
            .iter()
            .enumerate()
            .filter(|(_, op)| op.execute(&self.before, a, b, c).is_ok_and(|out| out == self.after))
            .fold(0, |mask, (k, _)| mask | 1 << k)
    }
}

pub struct Manual {
    samples: Vec<Sample>,
    program: Vec<Raw>,
}

#[derive(Debug, Error, PartialEq, Eq)]
enum DecodeError {
    #[error("opcode number {0} fits no instruction")]
    Contradiction(usize),
    #[error("opcode numbers {0:?} remain ambiguous")]
    Ambiguous(Vec<usize>),
    #[error("opcode number {0} is out of range")]
    UnknownNumber(Word),
}

impl PuzzleParser for Solver {
    type SharedData<'a> = Manual;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut samples = Vec::new();
        let mut program = Vec::new();
        let mut lines = input.lines().map(str::trim).enumerate().filter(|(_, l)| !l.is_empty());

        while let Some((line_idx, line)) = lines.next() {
            let at_line = |e: anyhow::Error| ParseError::at_line(line_idx + 1, e);
            if let Some(before) = line.strip_prefix("Before:") {
                let raw = lines
                    .next()
                    .map(|(_, l)| l)
                    .ok_or_else(|| ParseError::MissingData("sample instruction".into()))?;
                let after = lines
                    .next()
                    .map(|(_, l)| l)
                    .ok_or_else(|| ParseError::MissingData("sample result".into()))?;
                let after = after
                    .strip_prefix("After:")
                    .ok_or_else(|| at_line(anyhow!("expected \"After:\" after {raw:?}")))?;
                samples.push(Sample {
                    before: parse_registers(before).map_err(at_line)?,
                    raw: parse_raw(raw).map_err(at_line)?,
                    after: parse_registers(after).map_err(at_line)?,
                });
            } else {
                program.push(parse_raw(line).map_err(at_line)?);
            }
        }

        Ok(Manual { samples, program })
    }
}

fn parse_registers(text: &str) -> anyhow::Result<Registers> {
    let inner = text
        .trim()
        .strip_prefix('[')
        .and_then(|t| t.strip_suffix(']'))
        .ok_or_else(|| anyhow!("expected [a, b, c, d], got {text:?}"))?;
    words(inner.split(','))
}

fn parse_raw(line: &str) -> anyhow::Result<Raw> {
    words(line.split_whitespace())
}

fn words<'a>(tokens: impl Iterator<Item = &'a str>) -> anyhow::Result<[Word; 4]> {
    let values = tokens
        .map(|t| t.trim().parse::<Word>().with_context(|| format!("bad number {t:?}")))
        .collect::<anyhow::Result<Vec<_>>>()?;
    values
        .try_into()
        .map_err(|v: Vec<Word>| anyhow!("expected 4 numbers, got {}", v.len()))
}

/// Pin every opcode number to one instruction by repeated elimination.
fn resolve(mut masks: [u16; 16]) -> Result<[Opcode; 16], DecodeError> {
    let mut assigned: [Option<Opcode>; 16] = [None; 16];

    while let Some(number) = (0..16).find(|&n| assigned[n].is_none() && masks[n].count_ones() == 1) {
        let bit = masks[number].trailing_zeros() as usize;
        assigned[number] = Some(Opcode::ALL[bit]);
        debug!(number, opcode = %Opcode::ALL[bit], "opcode pinned");
        for (other, mask) in masks.iter_mut().enumerate() {
            if other != number {
                *mask &= !(1 << bit);
            }
        }
    }

    if let Some(number) = (0..16).find(|&n| assigned[n].is_none() && masks[n] == 0) {
        return Err(DecodeError::Contradiction(number));
    }
    let open: Vec<usize> = (0..16).filter(|&n| assigned[n].is_none()).collect();
    if !open.is_empty() {
        return Err(DecodeError::Ambiguous(open));
    }
    Ok(assigned.map(|op| op.unwrap_or(Opcode::Addr)))
}

fn decode(mapping: &[Opcode; 16], raw: &[Raw]) -> Result<Program, DecodeError> {
    let instructions = raw
        .iter()
        .map(|&[number, a, b, c]| {
            let opcode = usize::try_from(number)
                .ok()
                .and_then(|n| mapping.get(n))
                .ok_or(DecodeError::UnknownNumber(number))?;
            Ok(Instruction {
                opcode: *opcode,
                a,
                b,
                c,
            })
        })
        .collect::<Result<Vec<_>, DecodeError>>()?;
    Ok(Program::new(None, instructions))
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let ambiguous = shared
            .samples
            .iter()
            .filter(|s| s.candidates().count_ones() >= AMBIGUITY_THRESHOLD)
            .count();
        Ok(ambiguous.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut masks = [u16::MAX; 16];
        for sample in &shared.samples {
            let number = usize::try_from(sample.raw[0])
                .ok()
                .filter(|&n| n < 16)
                .ok_or(DecodeError::UnknownNumber(sample.raw[0]))
                .map_err(SolveError::failed)?;
            masks[number] &= sample.candidates();
        }

        let mapping = resolve(masks).map_err(SolveError::failed)?;
        let program = decode(&mapping, &shared.program).map_err(SolveError::failed)?;
        let registers = Machine::new(&program, [0; 4])
            .and_then(|mut machine| machine.run())
            .map_err(SolveError::failed)?;
        Ok(registers[0].to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Before: [3, 2, 1, 1]
9 2 1 2
After:  [3, 2, 2, 1]
";

    #[test]
    fn test_sample_candidates() {
        let mut manual = Solver::parse(SAMPLE).unwrap();
        let mask = manual.samples[0].candidates();
        assert_eq!(mask.count_ones(), 3);
        for op in [Opcode::Mulr, Opcode::Addi, Opcode::Seti] {
            let k = Opcode::ALL.iter().position(|&o| o == op).unwrap();
            assert_ne!(mask & 1 << k, 0, "{op} should match");
        }
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut manual).unwrap(), "1");
    }

    #[test]
    fn test_parse_samples_and_program() {
        let input = format!("{SAMPLE}\n{SAMPLE}\n\n\n9 5 0 0\n1 0 3 0\n");
        let manual = Solver::parse(&input).unwrap();
        assert_eq!(manual.samples.len(), 2);
        assert_eq!(manual.program, vec![[9, 5, 0, 0], [1, 0, 3, 0]]);
    }

    #[test]
    fn test_parse_errors() {
        assert!(Solver::parse("Before: [3, 2, 1, 1]\n9 2 1 2\n").is_err());
        assert!(Solver::parse("Before: [3, 2, 1]\n9 2 1 2\nAfter: [3, 2, 2, 1]\n").is_err());
        assert!(matches!(
            Solver::parse("Before: [3, 2, 1, 1]\n9 2 1 2\nAfter: [3, 2, 2, 1]\n\n\n7 1 x 0\n"),
            Err(ParseError::Line { line: 6, .. })
        ));
    }

    #[test]
    fn test_resolve_by_elimination() {
        // Number n admits opcodes 0..=n, so pinning cascades upward.
        let masks: [u16; 16] = std::array::from_fn(|n| ((1u32 << (n + 1)) - 1) as u16);
        assert_eq!(resolve(masks).unwrap(), Opcode::ALL);
    }

    #[test]
    fn test_resolve_failures() {
        assert_eq!(resolve([u16::MAX; 16]), Err(DecodeError::Ambiguous((0..16).collect())));

        let mut masks: [u16; 16] = std::array::from_fn(|n| 1 << n);
        masks[3] = 1 << 2;
        assert_eq!(resolve(masks), Err(DecodeError::Contradiction(3)));
    }

    #[test]
    fn test_decoded_program_runs() {
        let program = decode(&Opcode::ALL, &[[9, 5, 0, 0], [1, 0, 3, 0]]).unwrap();
        let registers = Machine::new(&program, [0; 4]).unwrap().run().unwrap();
        assert_eq!(registers, [8, 0, 0, 0]);
        assert!(decode(&Opcode::ALL, &[[16, 0, 0, 0]]).is_err());
    }

    #[test]
    fn test_unresolvable_manual_fails_part_two() {
        let mut manual = Solver::parse(SAMPLE).unwrap();
        assert!(matches!(
            <Solver as PartSolver<2>>::solve(&mut manual),
            Err(SolveError::SolveFailed(_))
        ));
    }
}
