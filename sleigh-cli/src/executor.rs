//! Runs the selected days, sequentially or on a rayon pool

use crate::cache::InputCache;
use crate::cli::ParallelizeBy;
use crate::config::Config;
use crate::error::{ArcExecutorError, ExecutorError};
use chrono::TimeDelta;
use rayon::prelude::*;
use sleigh_core::{SolverError, SolverRegistry};
use sleigh_http::InputClient;
use std::ops::RangeInclusive;
use std::sync::mpsc::Sender;
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

/// Outcome of one part
pub struct SolverResult {
    pub year: u16,
    pub day: u8,
    pub part: u8,
    pub answer: Result<String, ArcExecutorError>,
    pub solve_duration: TimeDelta,
    /// Set on the first part of a day only, so summed times count parsing once
    pub parse_duration: Option<TimeDelta>,
}

/// One registered day and the parts to run for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub parts: RangeInclusive<u8>,
}

pub struct Executor {
    settings: RunSettings,
    thread_pool: rayon::ThreadPool,
}

/// Everything a worker thread needs, shared by reference
struct RunSettings {
    registry: SolverRegistry,
    cache: InputCache,
    client: Option<InputClient>,
    session: Zeroizing<String>,
    input_override: Option<String>,
    parallelize_by: ParallelizeBy,
    year: u16,
    day_filter: Option<u8>,
    part_filter: Option<u8>,
}

impl Executor {
    pub fn new(registry: SolverRegistry, config: &Config) -> Result<Self, ExecutorError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count)
            .build()
            .map_err(|e| ExecutorError::ThreadPool(e.to_string()))?;

        let mut executor = Self {
            settings: RunSettings {
                registry,
                cache: InputCache::new(config.cache_dir.clone()),
                client: None,
                session: Zeroizing::new(String::new()),
                input_override: config.input_override.clone(),
                parallelize_by: config.parallelize_by,
                year: config.year,
                day_filter: config.day_filter,
                part_filter: config.part_filter,
            },
            thread_pool,
        };
        if !config.session.is_empty() {
            executor.update_session(config.session.clone())?;
        }
        Ok(executor)
    }

    /// Use `session` for every download from now on
    pub fn update_session(&mut self, session: Zeroizing<String>) -> Result<(), ExecutorError> {
        let client = InputClient::new().map_err(|e| ExecutorError::InputFetch {
            year: self.settings.year,
            day: 0,
            source: Box::new(e),
        })?;
        self.settings.client = Some(client);
        self.settings.session = session;
        Ok(())
    }

    /// Registered days matching the filters, in calendar order
    pub fn collect_work_items(&self) -> Vec<WorkItem> {
        let cfg = &self.settings;
        cfg.registry
            .iter_info()
            .filter(|info| info.year == cfg.year)
            .filter(|info| cfg.day_filter.is_none_or(|d| info.day == d))
            .map(|info| WorkItem {
                year: info.year,
                day: info.day,
                parts: parts_to_run(cfg.part_filter, info.parts),
            })
            .filter(|w| !w.parts.is_empty())
            .collect()
    }

    /// Days whose input would have to be downloaded
    pub fn missing_inputs(&self, work_items: &[WorkItem]) -> Vec<(u16, u8)> {
        if self.settings.input_override.is_some() {
            return Vec::new();
        }
        work_items
            .iter()
            .filter(|w| !self.settings.cache.contains(w.year, w.day))
            .map(|w| (w.year, w.day))
            .collect()
    }

    /// Run every work item, sending one result per part to `tx`.
    ///
    /// Solver failures travel inside the results; the returned error only
    /// covers the run machinery itself.
    pub fn execute(&self, tx: Sender<SolverResult>) -> Result<(), ArcExecutorError> {
        let work_items = self.collect_work_items();
        let settings = &self.settings;

        match settings.parallelize_by {
            ParallelizeBy::Sequential => work_items
                .iter()
                .filter_map(|work| run_day(work, &tx, settings).err())
                .reduce(ArcExecutorError::combine)
                .map_or(Ok(()), Err),
            ParallelizeBy::Day => self.thread_pool.install(|| {
                work_items
                    .par_iter()
                    .filter_map(|work| run_day(work, &tx, settings).err())
                    .reduce_with(ArcExecutorError::combine)
                    .map_or(Ok(()), Err)
            }),
        }
    }
}

#[allow(clippy::reversed_empty_ranges)]
fn parts_to_run(part_filter: Option<u8>, max_parts: u8) -> RangeInclusive<u8> {
    match part_filter {
        Some(p) if p <= max_parts => p..=p,
        Some(_) => 1..=0,
        None => 1..=max_parts,
    }
}

fn failed_part(year: u16, day: u8, part: u8, error: ArcExecutorError) -> SolverResult {
    SolverResult {
        year,
        day,
        part,
        answer: Err(error),
        solve_duration: TimeDelta::zero(),
        parse_duration: None,
    }
}

fn send(tx: &Sender<SolverResult>, result: SolverResult) -> Result<(), ArcExecutorError> {
    tx.send(result)
        .map_err(|_| ArcExecutorError::from(ExecutorError::ChannelSend))
}

/// Parse once, then solve each requested part in order.
fn run_day(work: &WorkItem, tx: &Sender<SolverResult>, settings: &RunSettings) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);

    let input = match get_input(work, settings) {
        Ok(input) => input,
        Err(e) => {
            let error = ArcExecutorError::from(e);
            for part in work.parts.clone() {
                send(tx, failed_part(year, day, part, error.clone()))?;
            }
            return Ok(());
        }
    };

    let mut solver = match settings.registry.create_solver(year, day, &input) {
        Ok(solver) => solver,
        Err(e) => {
            let error = ArcExecutorError::from(ExecutorError::Solver(e));
            for part in work.parts.clone() {
                send(tx, failed_part(year, day, part, error.clone()))?;
            }
            return Ok(());
        }
    };
    debug!(year, day, parse = %solver.parse_duration(), "input parsed");

    let mut parse_duration = Some(solver.parse_duration());
    for part in work.parts.clone() {
        let result = match solver.solve(part) {
            Ok(solved) => SolverResult {
                year,
                day,
                part,
                solve_duration: solved.duration(),
                answer: Ok(solved.answer),
                parse_duration: parse_duration.take(),
            },
            Err(e) => {
                warn!(year, day, part, error = %e, "part failed");
                failed_part(year, day, part, ExecutorError::Solver(SolverError::from(e)).into())
            }
        };
        send(tx, result)?;
    }
    Ok(())
}

/// Local override, then cache, then download (cached for next time)
fn get_input(work: &WorkItem, settings: &RunSettings) -> Result<String, ExecutorError> {
    let (year, day) = (work.year, work.day);
    if let Some(input) = &settings.input_override {
        return Ok(input.clone());
    }

    let cached = settings.cache.get(year, day).map_err(|e| ExecutorError::InputFetch {
        year,
        day,
        source: Box::new(e),
    })?;
    if let Some(input) = cached {
        return Ok(input);
    }

    let client = settings
        .client
        .as_ref()
        .ok_or(ExecutorError::MissingInput { year, day })?;
    info!(year, day, "downloading input");
    let input = client.get_input(year, day, &settings.session).map_err(|e| {
        if e.is_session_rejected() {
            warn!(year, day, "session token was rejected; set a fresh one in AOC_SESSION");
        }
        ExecutorError::InputFetch {
            year,
            day,
            source: Box::new(e),
        }
    })?;

    if let Err(e) = settings.cache.put(year, day, &input) {
        warn!(year, day, error = %e, "could not cache input");
    }
    Ok(input)
}
