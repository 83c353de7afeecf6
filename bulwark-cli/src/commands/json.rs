//! `bulwark json`

use crate::error::CliResult;
use bulwark_xss::XssSanitizer;
use serde_json::Value;
use std::io::{Read, Write};

/// Sanitize every string in a JSON document read from `input`.
pub fn run<R: Read, W: Write>(
    sanitizer: &XssSanitizer,
    input: R,
    pretty: bool,
    out: &mut W,
) -> CliResult<()> {
    let mut document: Value = serde_json::from_reader(input)?;
    sanitizer.sanitize_json_value(&mut document);

    if pretty {
        serde_json::to_writer_pretty(&mut *out, &document)?;
    } else {
        serde_json::to_writer(&mut *out, &document)?;
    }
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;

    #[test]
    fn test_document_sanitized() {
        let input = r#"{"name":"<script>x</script>bob","tags":["vbscript:a"]}"#;
        let mut out = Vec::new();
        run(&XssSanitizer::new(), input.as_bytes(), false, &mut out).unwrap();

        let value: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["name"], "bob");
        assert_eq!(value["tags"][0], "a");
    }

    #[test]
    fn test_invalid_document() {
        let mut out = Vec::new();
        let result = run(&XssSanitizer::new(), "{".as_bytes(), false, &mut out);
        assert!(matches!(result, Err(CliError::Json(_))));
    }
}
