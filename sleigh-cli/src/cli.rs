//! Command-line arguments

use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

/// How independent days are spread over the thread pool
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum ParallelizeBy {
    /// One day after another, in calendar order
    Sequential,
    /// Days run concurrently; the parts of one day share its parsed input (default)
    #[default]
    Day,
}

/// Run the yearly puzzle solvers
#[derive(Parser, Debug)]
#[command(name = "sleigh", about = "Run puzzle solvers against cached or downloaded inputs", version)]
pub struct Args {
    /// Year to run
    #[arg(short, long, default_value_t = 2018)]
    pub year: u16,

    /// Day to run (runs every registered day if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=25))]
    pub day: Option<u8>,

    /// Part to run (runs all parts if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=2))]
    pub part: Option<u8>,

    /// Only run solvers carrying all of these tags (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Solve this local file instead of the cached input (needs --day)
    #[arg(long, requires = "day")]
    pub input: Option<PathBuf>,

    /// Cache directory for puzzle inputs
    #[arg(long, default_value = "~/.cache/sleigh")]
    pub cache_dir: PathBuf,

    /// Number of threads for parallel execution
    #[arg(long)]
    pub threads: Option<usize>,

    /// Parallelization level: sequential or day
    #[arg(long, value_enum, default_value = "day")]
    pub parallelize_by: ParallelizeBy,

    /// Quiet mode - only output answers
    #[arg(short, long)]
    pub quiet: bool,

    /// More log output on stderr (repeat for more)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
