//! Sleigh solver framework
//!
//! Each daily puzzle is a small, closed algorithm over a fixed input. This
//! crate gives those algorithms a common shape and a place to live:
//!
//! - [`PuzzleParser`] turns the raw input into shared data (the "common" step)
//! - [`PartSolver<N>`] answers part `N` from that data
//! - [`Solver`] ties the parts together; `#[derive(PuzzleSolver)]` writes it
//! - [`SolverRegistry`] maps (year, day) to factories built from an explicit
//!   static table of [`SolverPlugin`] rows
//!
//! A factory parses the input and returns a fresh [`DynSolver`] for each run,
//! recording parse and solve timestamps along the way.
//!
//! # Quick Example
//!
//! ```
//! use sleigh_core::{
//!     ParseError, PartSolver, PuzzleParser, PuzzleSolver, RegistryBuilder, SolveError,
//! };
//!
//! #[derive(PuzzleSolver)]
//! #[puzzle(parts = 2)]
//! pub struct Frequencies;
//!
//! impl PuzzleParser for Frequencies {
//!     type SharedData<'a> = Vec<i64>;
//!
//!     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
//!         input
//!             .lines()
//!             .map(|l| l.trim().parse().map_err(|_| ParseError::InvalidFormat(l.to_string())))
//!             .collect()
//!     }
//! }
//!
//! impl PartSolver<1> for Frequencies {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.iter().sum::<i64>().to_string())
//!     }
//! }
//!
//! impl PartSolver<2> for Frequencies {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.len().to_string())
//!     }
//! }
//!
//! let registry = RegistryBuilder::new()
//!     .register_solver::<Frequencies>(2018, 1)
//!     .unwrap()
//!     .build();
//!
//! let mut solver = registry.create_solver(2018, 1, "+1\n-2\n+3").unwrap();
//! assert_eq!(solver.solve(1).unwrap().answer, "2");
//! assert_eq!(solver.solve(2).unwrap().answer, "3");
//! ```

mod error;
mod instance;
mod registry;
mod solver;

pub use error::{ParseError, RegistrationError, SolveError, SolverError};
pub use instance::{DynSolver, SolveResult, SolverInstance, Span};
pub use registry::{
    FactoryInfo, RegisterableSolver, RegistryBuilder, SolverFactory, SolverPlugin, SolverRegistry,
    BASE_YEAR, DAYS_PER_YEAR, MAX_YEARS,
};
pub use solver::{PartSolver, PuzzleParser, Solver, SolverExt};

pub use sleigh_macros::PuzzleSolver;
