//! `bulwark detect`

use crate::error::CliResult;
use bulwark_xss::XssSanitizer;
use std::io::Write;

/// Printed for values with no recognized attack.
const CLEAN: &str = "-";

/// Write the attack label of each value, returning how many were flagged.
pub fn run<W: Write>(sanitizer: &XssSanitizer, values: &[String], out: &mut W) -> CliResult<usize> {
    let mut flagged = 0;
    for value in values {
        match sanitizer.detect_attack_type(value) {
            Some(label) => {
                flagged += 1;
                writeln!(out, "{label}")?;
            }
            None => writeln!(out, "{CLEAN}")?,
        }
    }
    Ok(flagged)
}
