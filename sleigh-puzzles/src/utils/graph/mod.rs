//! Connectivity and dependency scheduling.

mod components;
mod schedule;

pub use components::{count_components, manhattan, proximity_graph};
pub use schedule::{DependencyGraph, Schedule, ScheduleError, lettered_duration};
