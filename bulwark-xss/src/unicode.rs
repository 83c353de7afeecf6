//! `\uXXXX` escape decoding.

use crate::error::DecodeFragmentError;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;

// A high surrogate escape directly followed by a low one is taken as a pair
static UNICODE_ESCAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"\\u([Dd][89ABab][0-9A-Fa-f]{2})\\u([Dd][C-Fc-f][0-9A-Fa-f]{2})",
        r"|\\u([0-9A-Fa-f]{4})"
    ))
    .unwrap()
});

/// Replace every `\u` + 4 hex digit escape with the character it encodes.
///
/// Escapes that encode an unpaired UTF-16 surrogate are logged and kept
/// verbatim.
pub fn decode_unicode_escapes(input: &str) -> Cow<'_, str> {
    if !input.contains("\\u") {
        return Cow::Borrowed(input);
    }

    UNICODE_ESCAPE.replace_all(input, |caps: &Captures| {
        let whole = &caps[0];
        match (caps.get(1), caps.get(2), caps.get(3)) {
            (Some(high), Some(low), _) => {
                match surrogate_pair(code_unit(high.as_str()), code_unit(low.as_str())) {
                    Some(c) => c.to_string(),
                    None => whole.to_string(),
                }
            }
            (_, _, Some(unit)) => decode_unit(code_unit(unit.as_str()), whole),
            _ => whole.to_string(),
        }
    })
}

fn code_unit(hex: &str) -> u32 {
    // The pattern guarantees exactly four hex digits
    u32::from_str_radix(hex, 16).unwrap_or(u32::MAX)
}

fn decode_unit(unit: u32, fragment: &str) -> String {
    match char::from_u32(unit) {
        Some(c) => c.to_string(),
        None => {
            DecodeFragmentError::UnicodeEscape {
                fragment: fragment.to_string(),
            }
            .log();
            fragment.to_string()
        }
    }
}

fn surrogate_pair(high: u32, low: u32) -> Option<char> {
    if (0xD800..0xDC00).contains(&high) && (0xDC00..0xE000).contains(&low) {
        char::from_u32(0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00))
    } else {
        None
    }
}
