//! Engines shared by the daily solvers.

pub mod automaton;
pub mod combat;
pub mod graph;
pub mod grid;
pub mod memo;
pub mod parsing;
pub mod register_machine;
pub mod ring;
pub mod search;
