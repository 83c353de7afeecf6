//! Fuzz target for query parameter sanitization.
//!
//! Parses arbitrary query strings and checks that sanitizing keeps the
//! parameter shape.

#![no_main]

use arbitrary::Arbitrary;
use bulwark_xss::{MultiMap, sanitize_all, sanitize_json_value};
use libfuzzer_sys::fuzz_target;

/// Arbitrary query string for fuzzing.
#[derive(Debug, Arbitrary)]
struct FuzzQuery {
    /// Raw query string
    raw: String,
    /// Individual parameters
    params: Vec<(String, String)>,
}

fuzz_target!(|data: FuzzQuery| {
    // Test 1: Parse and sanitize raw query string
    if let Ok(parsed) = MultiMap::from_query(&data.raw) {
        let clean = sanitize_all(&parsed);
        assert_eq!(clean.len(), parsed.len());
    }

    // Test 2: Structured params keep names, order and multiplicity
    let params: MultiMap = data.params.iter().cloned().collect();
    let clean = sanitize_all(&params);
    for ((name, values), (clean_name, clean_values)) in params.iter().zip(clean.iter()) {
        assert_eq!(name, clean_name);
        assert_eq!(values.len(), clean_values.len());
    }

    // Test 3: JSON object of arrays sanitizes to the same shape
    if let Ok(mut json) = serde_json::to_value(&params) {
        sanitize_json_value(&mut json);
        assert_eq!(json.as_object().map(|o| o.len()), Some(params.len()));
    }
});
