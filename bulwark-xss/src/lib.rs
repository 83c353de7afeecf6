//! # Bulwark XSS Value Sanitizer
//!
//! Strips script-injection payloads from untrusted text values (request
//! parameters, headers, form fields, JSON strings) before they reach
//! downstream code.
//!
//! ## Features
//!
//! - ✅ **Fixpoint Sanitization** - Decode and strip until nothing changes
//! - ✅ **Entity Decoding** - HTML 4.0 named and numeric character references
//! - ✅ **Unicode Escapes** - `\uXXXX` sequences, surrogate pairs combined
//! - ✅ **Inline Base64** - Nested `base64,` payloads inspected recursively
//! - ✅ **Collections** - Multi-valued maps and JSON documents
//! - ✅ **Pattern Detection** - Report the attack type without altering values
//!
//! ## Quick Start
//!
//! ```rust
//! use bulwark_xss::{sanitize, sanitize_str};
//!
//! assert_eq!(sanitize_str("<script>alert(1)</script>"), "");
//! assert_eq!(sanitize_str("&lt;script&gt;alert(1)&lt;/script&gt;"), "");
//! assert_eq!(sanitize_str("<img onerror=alert(1)>"), "<img alert(1)>");
//!
//! // Absence is preserved
//! assert_eq!(sanitize(None), None);
//!
//! // Benign encoded text comes back as written
//! assert_eq!(sanitize_str("Tom &amp; Jerry"), "Tom &amp; Jerry");
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use bulwark_xss::{SanitizerConfig, XssSanitizer};
//!
//! let config = SanitizerConfig::new()
//!     .with_max_passes(5)
//!     .with_extra_patterns(vec![r"<iframe[^>]*>".to_string()]);
//! let sanitizer = XssSanitizer::with_config(&config).unwrap();
//!
//! assert_eq!(sanitizer.sanitize_str("<iframe src=//evil>hi"), "hi");
//! ```
//!
//! ## Collections
//!
//! ```rust
//! use bulwark_xss::{MultiMap, sanitize_all, sanitize_json_str};
//!
//! let params = MultiMap::from_query("q=%3Cscript%3Ex%3C%2Fscript%3E&q=safe").unwrap();
//! let clean = sanitize_all(&params);
//! assert_eq!(clean.get_all("q"), ["", "safe"]);
//!
//! let json = sanitize_json_str(r#"{"name":"javascript:go()"}"#).unwrap();
//! assert_eq!(json, r#"{"name":"go()"}"#);
//! ```
//!
//! ## XSS Pattern Detection
//!
//! ```rust
//! use bulwark_xss::XssValidator;
//!
//! assert!(XssValidator::contains_xss("<script>alert('XSS')</script>"));
//! assert_eq!(
//!     XssValidator::detect_attack_type("<img src=x onerror=alert('XSS')>"),
//!     Some("Event handler injection")
//! );
//! assert!(!XssValidator::contains_xss("<p>Hello World</p>"));
//! ```

pub mod collection;
pub mod config;
pub mod entities;
pub mod error;
pub mod inline_base64;
pub mod json;
pub mod patterns;
pub mod sanitizer;
pub mod unicode;
pub mod validator;

pub use collection::{MultiMap, sanitize_all, sanitize_all_in_place};
pub use config::SanitizerConfig;
pub use entities::{ENTITY_TABLE, EntityTable, decode_entities};
pub use error::{DecodeFragmentError, Result, XssError};
pub use json::{sanitize_json_str, sanitize_json_value};
pub use patterns::{DEFAULT_PATTERNS, PatternSet, ScriptPattern};
pub use sanitizer::{DEFAULT_SANITIZER, XssSanitizer, sanitize, sanitize_str};
pub use unicode::decode_unicode_escapes;
pub use validator::XssValidator;
