// Bulwark - a fixpoint XSS value sanitizer for Rust
//
// This library strips script-injection payloads from untrusted text values
// after decoding the encodings attackers use to hide them.

// Re-export the sanitizer
pub use bulwark_xss::*;

/// Commonly used items.
pub mod prelude {
    pub use bulwark_xss::{
        MultiMap, SanitizerConfig, XssError, XssSanitizer, XssValidator, sanitize, sanitize_all,
        sanitize_all_in_place, sanitize_json_str, sanitize_json_value, sanitize_str,
    };
}
