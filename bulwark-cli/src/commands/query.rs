//! `bulwark query`

use crate::error::{CliError, CliResult};
use bulwark_xss::{MultiMap, XssSanitizer};
use std::io::Write;

/// Sanitize every parameter of a query string and write them as a JSON
/// object of arrays.
pub fn run<W: Write>(sanitizer: &XssSanitizer, query: &str, out: &mut W) -> CliResult<()> {
    let query = query.strip_prefix('?').unwrap_or(query);
    let params = MultiMap::from_query(query).map_err(|e| CliError::Query(e.to_string()))?;

    let clean = sanitizer.sanitize_all(&params);
    serde_json::to_writer(&mut *out, &clean)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_to_json() {
        let mut out = Vec::new();
        run(
            &XssSanitizer::new(),
            "?q=%3Cscript%3Ex%3C%2Fscript%3E&q=safe&page=1",
            &mut out,
        )
        .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\"q\":[\"\",\"safe\"],\"page\":[\"1\"]}\n"
        );
    }
}
