//! Fuzz target for value sanitization.
//!
//! Sanitizing must never panic and must be idempotent.

#![no_main]

use arbitrary::Arbitrary;
use bulwark_xss::{SanitizerConfig, XssSanitizer, XssValidator, decode_entities, decode_unicode_escapes};
use libfuzzer_sys::fuzz_target;

/// Arbitrary value plus small sanitizer bounds.
#[derive(Debug, Arbitrary)]
struct FuzzValue {
    value: String,
    /// Prefix glued on to steer the fuzzer toward decoder paths
    prefix: Prefix,
    max_nesting: u8,
}

#[derive(Debug, Arbitrary)]
enum Prefix {
    None,
    Entity,
    Escape,
    Base64,
    Script,
}

impl Prefix {
    fn as_str(&self) -> &'static str {
        match self {
            Prefix::None => "",
            Prefix::Entity => "&#x",
            Prefix::Escape => "\\u",
            Prefix::Base64 => "data:text/html;base64,",
            Prefix::Script => "<scr",
        }
    }
}

fuzz_target!(|data: FuzzValue| {
    let input = format!("{}{}", data.prefix.as_str(), data.value);

    // Decoders alone
    let _ = decode_entities(&input);
    let _ = decode_unicode_escapes(&input);
    let _ = XssValidator::detect_attack_type(&input);

    // Pass limit high enough that the fuzzer cannot plausibly exhaust it
    let config = SanitizerConfig::new()
        .with_max_passes(64)
        .with_max_nesting(usize::from(data.max_nesting % 6));
    let Ok(sanitizer) = XssSanitizer::with_config(&config) else {
        return;
    };

    let once = sanitizer.sanitize_str(&input);
    let twice = sanitizer.sanitize_str(&once);
    assert_eq!(once, twice, "sanitize is not idempotent for {input:?}");
    assert!(!once.contains('\0'));
});
