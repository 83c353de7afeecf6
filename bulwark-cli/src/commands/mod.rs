//! CLI command implementations.

pub mod detect;
pub mod json;
pub mod query;
pub mod sanitize;

use crate::error::CliResult;
use std::io::BufRead;

/// Values from the command line, or one per stdin line when none were given.
pub fn values_or_lines<R: BufRead>(values: Vec<String>, input: R) -> CliResult<Vec<String>> {
    if !values.is_empty() {
        return Ok(values);
    }
    Ok(input.lines().collect::<Result<Vec<_>, _>>()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arguments_win_over_input() {
        let values = values_or_lines(vec!["a".into()], "b\nc\n".as_bytes()).unwrap();
        assert_eq!(values, ["a"]);
    }

    #[test]
    fn test_lines_read_when_no_arguments() {
        let values = values_or_lines(Vec::new(), "b\r\nc\n".as_bytes()).unwrap();
        assert_eq!(values, ["b", "c"]);
    }
}
