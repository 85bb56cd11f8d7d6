//! Puzzle solutions and the engines behind them
//!
//! `utils` holds the reusable machinery (linked ring, cycle-detecting
//! automaton, register machine, state-space search, combat, graph
//! utilities); `solutions` holds one module per puzzle day. [`PLUGINS`] is
//! the explicit registration table handed to
//! [`sleigh_core::RegistryBuilder::register_plugins`].

pub mod solutions;
pub mod utils;

use sleigh_core::SolverPlugin;

use solutions::year_2018;

/// Every solver in this crate, keyed by (year, day).
pub static PLUGINS: &[SolverPlugin] = &[
    SolverPlugin {
        year: 2018,
        day: 7,
        solver: &year_2018::day_7::Solver,
        tags: &["graph", "scheduling"],
    },
    SolverPlugin {
        year: 2018,
        day: 9,
        solver: &year_2018::day_9::Solver,
        tags: &["ring"],
    },
    SolverPlugin {
        year: 2018,
        day: 12,
        solver: &year_2018::day_12::Solver,
        tags: &["automaton"],
    },
    SolverPlugin {
        year: 2018,
        day: 14,
        solver: &year_2018::day_14::Solver,
        tags: &["sequence"],
    },
    SolverPlugin {
        year: 2018,
        day: 16,
        solver: &year_2018::day_16::Solver,
        tags: &["register-machine"],
    },
    SolverPlugin {
        year: 2018,
        day: 18,
        solver: &year_2018::day_18::Solver,
        tags: &["automaton", "grid"],
    },
    SolverPlugin {
        year: 2018,
        day: 19,
        solver: &year_2018::day_19::Solver,
        tags: &["register-machine"],
    },
    SolverPlugin {
        year: 2018,
        day: 21,
        solver: &year_2018::day_21::Solver,
        tags: &["register-machine", "slow"],
    },
    SolverPlugin {
        year: 2018,
        day: 22,
        solver: &year_2018::day_22::Solver,
        tags: &["search", "grid"],
    },
    SolverPlugin {
        year: 2018,
        day: 24,
        solver: &year_2018::day_24::Solver,
        tags: &["combat"],
    },
    SolverPlugin {
        year: 2018,
        day: 25,
        solver: &year_2018::day_25::Solver,
        tags: &["graph"],
    },
];
