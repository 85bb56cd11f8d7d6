//! Error types for the solver framework

use std::fmt::Display;
use thiserror::Error;

/// Input rejected by a solver's parse step
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
    /// A section or value the puzzle cannot do without
    #[error("Missing data: {0}")]
    MissingData(String),
    /// Malformed record, with its 1-based line number
    #[error("Line {line}: {message}")]
    Line { line: usize, message: String },
}

impl ParseError {
    pub fn at_line(line: usize, err: impl Display) -> Self {
        Self::Line {
            line,
            message: err.to_string(),
        }
    }
}

/// Failure while answering one part
#[derive(Debug, Error)]
pub enum SolveError {
    /// The solver declares the part but has no implementation for it
    #[error("Part {0} is not implemented")]
    PartNotImplemented(u8),
    /// Part 0, or a part above the solver's `PARTS`
    #[error("Part {0} is out of range")]
    PartOutOfRange(u8),
    /// The engine gave up: cycle, stalemate, unreachable goal and the like
    #[error("Solve failed: {0}")]
    SolveFailed(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl SolveError {
    /// Wrap any engine error, e.g. `.map_err(SolveError::failed)`
    pub fn failed<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::SolveFailed(err.into())
    }
}

/// Anything that can go wrong between a registry lookup and an answer
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("No solver registered for {0}/{1}")]
    NotFound(u16, u8),
    #[error("{0}/{1} is outside the supported calendar")]
    InvalidYearDay(u16, u8),
    #[error("Parse error: {0}")]
    ParseError(#[from] ParseError),
    #[error("Solve error: {0}")]
    SolveError(#[from] SolveError),
}

/// Rejected registry entry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("{0}/{1} is registered twice")]
    DuplicateSolver(u16, u8),
    #[error("{0}/{1} is outside the supported calendar")]
    InvalidYearDay(u16, u8),
}
