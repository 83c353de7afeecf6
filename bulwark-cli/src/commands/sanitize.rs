//! `bulwark sanitize`

use crate::error::CliResult;
use bulwark_xss::XssSanitizer;
use std::io::Write;
use tracing::info;

/// Outcome of a sanitize run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub changed: usize,
}

/// Write the sanitized form of each value on its own line.
pub fn run<W: Write>(sanitizer: &XssSanitizer, values: &[String], out: &mut W) -> CliResult<Summary> {
    let mut summary = Summary::default();

    for value in values {
        let clean = sanitizer.sanitize_str(value);
        if clean != *value {
            summary.changed += 1;
        }
        summary.total += 1;
        writeln!(out, "{clean}")?;
    }

    info!(total = summary.total, changed = summary.changed, "Sanitize finished");
    Ok(summary)
}
