use crate::config::SanitizerConfig;
use crate::entities::ENTITY_TABLE;
use crate::error::Result;
use crate::inline_base64;
use crate::patterns::{DEFAULT_PATTERNS, PatternSet};
use crate::unicode::decode_unicode_escapes;
use once_cell::sync::Lazy;
use std::borrow::Cow;
use std::sync::Arc;
use tracing::{debug, warn};

/// Sanitizer built from [`SanitizerConfig::default`], shared process-wide.
pub static DEFAULT_SANITIZER: Lazy<XssSanitizer> = Lazy::new(XssSanitizer::new);

/// Fixpoint script-injection stripper for untrusted text values.
///
/// Each pass decodes unicode escapes and character references, drops
/// inline base64 blocks hiding script, and strips the script patterns.
/// Passes repeat on the decoded, stripped text until one of them changes
/// nothing.
#[derive(Debug, Clone)]
pub struct XssSanitizer {
    patterns: Arc<PatternSet>,
    max_passes: usize,
    max_nesting: usize,
}

/// Result of a single pass over a value.
#[derive(Debug, PartialEq, Eq)]
enum Pass {
    /// Nothing was removed; the pass input is the answer
    Stable,
    /// Something was removed; run again on this text
    Changed(String),
}

impl XssSanitizer {
    /// Create a sanitizer with the built-in patterns and default bounds
    pub fn new() -> Self {
        let config = SanitizerConfig::default();
        Self {
            patterns: Arc::clone(&DEFAULT_PATTERNS),
            max_passes: config.max_passes,
            max_nesting: config.max_nesting,
        }
    }

    /// Create a sanitizer from configuration
    pub fn with_config(config: &SanitizerConfig) -> Result<Self> {
        config.validate()?;

        let patterns = if config.extra_patterns.is_empty() {
            Arc::clone(&DEFAULT_PATTERNS)
        } else {
            Arc::new(PatternSet::with_extra(&config.extra_patterns)?)
        };

        Ok(Self {
            patterns,
            max_passes: config.max_passes,
            max_nesting: config.max_nesting,
        })
    }

    pub fn patterns(&self) -> &PatternSet {
        &self.patterns
    }

    /// Sanitize an optional value; absence is preserved.
    pub fn sanitize(&self, value: Option<&str>) -> Option<String> {
        value.map(|v| self.sanitize_str(v))
    }

    /// Sanitize a single value.
    ///
    /// Values that carry no recognized injection come back as written (minus
    /// NUL characters), encoded content included. Values that did are
    /// returned in their decoded, stripped form.
    pub fn sanitize_str(&self, value: &str) -> String {
        self.sanitize_nested(value, 0)
    }

    fn sanitize_nested(&self, value: &str, depth: usize) -> String {
        let mut current = strip_nul(value).into_owned();

        for pass in 1..=self.max_passes {
            match self.pass(&current, depth) {
                Pass::Stable => {
                    if pass > 1 {
                        debug!(passes = pass, depth, "Value sanitized");
                    }
                    return current;
                }
                Pass::Changed(next) => current = strip_nul(&next).into_owned(),
            }
        }

        warn!(
            max_passes = self.max_passes,
            depth,
            "Sanitizer pass limit reached, returning partially sanitized value"
        );
        current
    }

    fn pass(&self, value: &str, depth: usize) -> Pass {
        let unescaped = decode_unicode_escapes(value);
        let decoded = ENTITY_TABLE.decode(&unescaped);
        let before_base64 = decoded.len();

        let without_base64 =
            inline_base64::strip_malicious_blocks(&decoded, |text| self.hides_script(text, depth));
        let after_base64 = without_base64.len();

        let stripped = self.patterns.strip(&without_base64);
        let after_patterns = stripped.len();

        if before_base64 == after_base64 && after_base64 == after_patterns {
            Pass::Stable
        } else {
            Pass::Changed(stripped.into_owned())
        }
    }

    /// Whether sanitizing a decoded base64 payload changes its length.
    pub(crate) fn hides_script(&self, decoded: &str, depth: usize) -> bool {
        if depth >= self.max_nesting {
            warn!(depth, "Base64 nesting limit reached, dropping payload");
            return true;
        }
        self.sanitize_nested(decoded, depth + 1).len() != decoded.len()
    }
}

impl Default for XssSanitizer {
    fn default() -> Self {
        Self::new()
    }
}

fn strip_nul(value: &str) -> Cow<'_, str> {
    if value.contains('\0') {
        Cow::Owned(value.replace('\0', ""))
    } else {
        Cow::Borrowed(value)
    }
}

/// Sanitize an optional value with [`DEFAULT_SANITIZER`].
pub fn sanitize(value: Option<&str>) -> Option<String> {
    DEFAULT_SANITIZER.sanitize(value)
}

/// Sanitize a single value with [`DEFAULT_SANITIZER`].
pub fn sanitize_str(value: &str) -> String {
    DEFAULT_SANITIZER.sanitize_str(value)
}
