//! Printing answers and the closing summary

use crate::executor::SolverResult;
use chrono::TimeDelta;
use std::time::Instant;

pub struct OutputFormatter {
    quiet: bool,
    start_time: Instant,
}

impl OutputFormatter {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            start_time: Instant::now(),
        }
    }

    /// Answers go to stdout, failures to stderr
    pub fn print_result(&self, result: &SolverResult) {
        match (&result.answer, self.quiet) {
            (Ok(answer), true) => println!("{}", answer),
            (Ok(answer), false) => println!("{}", format_line(result, answer)),
            (Err(e), true) => eprintln!("Error: {}", e),
            (Err(e), false) => eprintln!("{}: Error - {}", prefix(result), e),
        }
    }

    /// Totals over every printed result plus wall-clock time
    pub fn print_summary(&self, results: &[SolverResult]) {
        if self.quiet {
            return;
        }

        let solved = results.iter().filter(|r| r.answer.is_ok()).count();
        let failed = results.len() - solved;
        let (parse_time, solve_time) = totals(results);
        let elapsed = self.start_time.elapsed();

        println!();
        println!("--- Summary ---");
        println!("Parts: {} solved, {} failed", solved, failed);
        println!("Total parse time: {}", format_duration(parse_time));
        println!("Total solve time: {}", format_duration(solve_time));
        println!(
            "Elapsed wall-clock time: {}",
            TimeDelta::from_std(elapsed).map_or_else(|_| "N/A".to_string(), format_duration)
        );
        let elapsed_secs = elapsed.as_secs_f64();
        if elapsed_secs > 0.0 {
            let compute_secs = (parse_time + solve_time).num_microseconds().unwrap_or(0) as f64 / 1e6;
            println!("Speedup factor: {:.2}x", compute_secs / elapsed_secs);
        }
    }
}

fn prefix(result: &SolverResult) -> String {
    format!("{}/{:02} Part {}", result.year, result.day, result.part)
}

fn format_line(result: &SolverResult, answer: &str) -> String {
    let parse = result
        .parse_duration
        .map(|d| format!("parse: {}, ", format_duration(d)))
        .unwrap_or_default();
    format!(
        "{}: {} ({}solve: {})",
        prefix(result),
        answer,
        parse,
        format_duration(result.solve_duration)
    )
}

/// Summed (parse, solve) time of the successful parts
fn totals(results: &[SolverResult]) -> (TimeDelta, TimeDelta) {
    results
        .iter()
        .filter(|r| r.answer.is_ok())
        .fold((TimeDelta::zero(), TimeDelta::zero()), |(parse, solve), r| {
            (parse + r.parse_duration.unwrap_or_else(TimeDelta::zero), solve + r.solve_duration)
        })
}

/// Human scale: µs below a millisecond, ms below a second, then seconds
fn format_duration(d: TimeDelta) -> String {
    let Some(micros) = d.num_microseconds() else {
        return "N/A".to_string();
    };
    if micros < 0 {
        return format!("-{}", format_duration(-d));
    }

    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", micros as f64 / 1_000_000.0)
    }
}
