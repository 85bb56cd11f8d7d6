//! Error types for the runner

use thiserror::Error;
use thiserror_ext::Arc as ArcDerive;

/// Top-level error; anything here ends the run with a non-zero exit
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Cache error
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    /// Input download error
    #[error("HTTP client error: {0}")]
    Http(#[from] sleigh_http::FetchError),

    /// Registration error
    #[error("Registration error: {0}")]
    Registration(#[from] sleigh_core::RegistrationError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Executor error
    #[error("{0}")]
    Executor(#[from] ArcExecutorError),
}

/// Errors raised while running one day; cloned cheaply through the `Arc` newtype
#[derive(Error, Debug, ArcDerive)]
#[thiserror_ext(newtype(name = ArcExecutorError))]
pub enum ExecutorError {
    /// Input could not be read from the cache or downloaded
    #[error("Input fetch failed for {year}/{day}: {source}")]
    InputFetch {
        year: u16,
        day: u8,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Not cached and no session to download it with
    #[error("No input for {year}/{day}: not cached and no session token")]
    MissingInput { year: u16, day: u8 },

    /// Parsing or solving failed
    #[error("{0}")]
    Solver(#[from] sleigh_core::SolverError),

    /// Channel send error
    #[error("Channel send error")]
    ChannelSend,

    /// Thread pool creation failed
    #[error("Thread pool creation failed: {0}")]
    ThreadPool(String),

    /// Several days failed
    #[error("Multiple errors occurred ({} total)", .0.len())]
    Multiple(Vec<ArcExecutorError>),
}

impl ArcExecutorError {
    /// Merge two errors into one `Multiple`, flattening nested lists.
    pub fn combine(first: ArcExecutorError, second: ArcExecutorError) -> ArcExecutorError {
        let flatten = |e: ArcExecutorError| match e.inner() {
            ExecutorError::Multiple(list) => list.clone(),
            _ => vec![e],
        };
        let mut errors = flatten(first);
        errors.extend(flatten(second));
        ExecutorError::Multiple(errors).into()
    }

    pub fn combine_opt(existing: Option<ArcExecutorError>, new: ArcExecutorError) -> ArcExecutorError {
        match existing {
            Some(e) => Self::combine(e, new),
            None => new,
        }
    }
}

/// Cache-specific errors
#[derive(Error, Debug)]
pub enum CacheError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Cache directory creation failed
    #[error("Cache directory creation failed: {0}")]
    DirCreation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(day: u8) -> ArcExecutorError {
        ExecutorError::MissingInput { year: 2018, day }.into()
    }

    fn days(e: &ArcExecutorError) -> Vec<u8> {
        match e.inner() {
            ExecutorError::Multiple(list) => list.iter().flat_map(days).collect(),
            ExecutorError::MissingInput { day, .. } => vec![*day],
            _ => vec![],
        }
    }

    #[test]
    fn test_combine_flattens() {
        let ab = ArcExecutorError::combine(single(1), single(2));
        let cd = ArcExecutorError::combine(single(3), single(4));
        let all = ArcExecutorError::combine(ab, cd);
        assert_eq!(days(&all), vec![1, 2, 3, 4]);
        match all.inner() {
            ExecutorError::Multiple(list) => assert_eq!(list.len(), 4),
            other => panic!("expected Multiple, got {other:?}"),
        }
    }

    #[test]
    fn test_combine_opt() {
        let only = ArcExecutorError::combine_opt(None, single(7));
        assert_eq!(days(&only), vec![7]);
        let both = ArcExecutorError::combine_opt(Some(only), single(9));
        assert_eq!(both.to_string(), "Multiple errors occurred (2 total)");
    }
}
