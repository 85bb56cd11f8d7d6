//! Runtime configuration resolved from the command line and environment

use crate::cli::{Args, ParallelizeBy};
use crate::error::CliError;
use std::fs;
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

/// Environment variable holding the session cookie
pub const SESSION_ENV: &str = "AOC_SESSION";

/// Resolved runtime configuration
pub struct Config {
    pub year: u16,
    /// Day filter (None = every registered day)
    pub day_filter: Option<u8>,
    /// Part filter (None = all parts)
    pub part_filter: Option<u8>,
    /// Tags a solver must carry to run
    pub tags: Vec<String>,
    /// Local input replacing the cache for the selected day
    pub input_override: Option<String>,
    /// Cache directory path, `~` expanded
    pub cache_dir: PathBuf,
    pub thread_count: usize,
    pub parallelize_by: ParallelizeBy,
    /// Session key (zeroized on drop); empty when none was given
    pub session: Zeroizing<String>,
    pub quiet: bool,
}

impl Config {
    /// Build config from CLI args and `AOC_SESSION`
    pub fn from_args(args: Args) -> Result<Self, CliError> {
        let session = std::env::var(SESSION_ENV).ok().unwrap_or_default();
        Self::resolve(args, Zeroizing::new(session))
    }

    fn resolve(args: Args, session: Zeroizing<String>) -> Result<Self, CliError> {
        let input_override = match &args.input {
            Some(path) if args.day.is_none() => {
                return Err(CliError::Config(format!(
                    "--input {} needs --day to say which solver reads it",
                    path.display()
                )));
            }
            Some(path) => Some(fs::read_to_string(path)?),
            None => None,
        };

        Ok(Config {
            year: args.year,
            day_filter: args.day,
            part_filter: args.part,
            tags: args.tags,
            input_override,
            cache_dir: expand_tilde(&args.cache_dir),
            thread_count: args.threads.unwrap_or_else(num_cpus),
            parallelize_by: args.parallelize_by,
            session,
            quiet: args.quiet,
        })
    }
}

/// Expand a leading `~` to the home directory
fn expand_tilde(path: &Path) -> PathBuf {
    let Some(text) = path.to_str() else {
        return path.to_path_buf();
    };
    let rest = match text {
        "~" => "",
        _ => match text.strip_prefix("~/") {
            Some(rest) => rest,
            None => return path.to_path_buf(),
        },
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Prompt for the session token without echoing it
pub fn prompt_session(reason: &str) -> Result<Zeroizing<String>, CliError> {
    println!("{}", reason);
    let session = Zeroizing::new(
        rpassword::prompt_password("Enter session key: ")
            .map_err(|e| CliError::Config(format!("Failed to read session: {}", e)))?,
    );
    if session.trim().is_empty() {
        return Err(CliError::Config("Session token is required.".to_string()));
    }
    Ok(session)
}
