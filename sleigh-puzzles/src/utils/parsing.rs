//! Input helpers shared by the solvers.

use sleigh_core::ParseError;
use tracing::warn;

/// Parse every non-blank line, skipping malformed ones with a warning.
///
/// For record-per-line inputs where one bad record should not sink the run.
pub fn lenient_lines<T>(input: &str, parse: impl Fn(&str) -> anyhow::Result<T>) -> Vec<T> {
    input
        .lines()
        .map(str::trim)
        .enumerate()
        .filter(|(_, line)| !line.is_empty())
        .filter_map(|(line_idx, line)| match parse(line) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(line = line_idx + 1, "skipping malformed line {:?}: {}", line, e);
                None
            }
        })
        .collect()
}

/// Report a parse failure the way every solver does.
pub fn invalid(e: anyhow::Error) -> ParseError {
    ParseError::InvalidFormat(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(line: &str) -> anyhow::Result<i64> {
        Ok(line.parse()?)
    }

    #[test]
    fn test_lenient_skips_bad_lines() {
        assert_eq!(lenient_lines("1\nx\n\n3\n", number), vec![1, 3]);
    }

    #[test]
    fn test_invalid_reports_outer_context() {
        let err = invalid(anyhow::anyhow!("bad number").context("target"));
        assert_eq!(err, ParseError::InvalidFormat("target".into()));
    }
}
