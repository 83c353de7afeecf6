//! Sanitizer configuration

use crate::error::{Result, XssError};
use serde::{Deserialize, Serialize};
use std::env;

/// Default bound on sanitize passes per value.
pub const DEFAULT_MAX_PASSES: usize = 10;

/// Default bound on base64-within-base64 inspection depth.
pub const DEFAULT_MAX_NESTING: usize = 4;

/// Configuration for [`XssSanitizer`](crate::XssSanitizer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SanitizerConfig {
    /// Maximum number of decode/strip passes before giving up on a value
    pub max_passes: usize,

    /// Maximum depth of nested base64 payload inspection
    pub max_nesting: usize,

    /// Extra strip patterns appended after the built-in ones
    pub extra_patterns: Vec<String>,
}

impl Default for SanitizerConfig {
    fn default() -> Self {
        Self {
            max_passes: DEFAULT_MAX_PASSES,
            max_nesting: DEFAULT_MAX_NESTING,
            extra_patterns: Vec::new(),
        }
    }
}

impl SanitizerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `BULWARK_XSS_MAX_PASSES` and
    /// `BULWARK_XSS_MAX_NESTING` when they hold valid numbers.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(passes) = read_usize("BULWARK_XSS_MAX_PASSES") {
            config.max_passes = passes;
        }
        if let Some(nesting) = read_usize("BULWARK_XSS_MAX_NESTING") {
            config.max_nesting = nesting;
        }

        config
    }

    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes;
        self
    }

    pub fn with_max_nesting(mut self, max_nesting: usize) -> Self {
        self.max_nesting = max_nesting;
        self
    }

    pub fn with_extra_patterns(mut self, patterns: Vec<String>) -> Self {
        self.extra_patterns = patterns;
        self
    }

    /// Check the configuration before building a sanitizer from it.
    pub fn validate(&self) -> Result<()> {
        if self.max_passes == 0 {
            return Err(XssError::InvalidConfig(
                "max_passes must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn read_usize(key: &str) -> Option<usize> {
    let raw = env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "Ignoring non-numeric sanitizer setting");
            None
        }
    }
}
