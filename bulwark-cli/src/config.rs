//! CLI configuration file.
//!
//! ```toml
//! [sanitizer]
//! max_passes = 10
//! max_nesting = 4
//! extra_patterns = ["<iframe[^>]*>"]
//!
//! [log]
//! level = "warn"
//! format = "compact"
//! ```

use crate::error::CliResult;
use crate::logging::LogConfig;
use bulwark_xss::SanitizerConfig;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub sanitizer: SanitizerConfig,
    pub log: LogConfig,
}

impl Default for CliConfig {
    /// Sanitizer settings come from `BULWARK_XSS_*` when no file is given
    fn default() -> Self {
        Self {
            sanitizer: SanitizerConfig::from_env(),
            log: LogConfig::default(),
        }
    }
}

impl CliConfig {
    /// Load from `path`, or the environment-derived defaults if `None`.
    pub fn load(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> CliResult<Self> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use crate::logging::{LogFormat, LogLevel};

    #[test]
    fn test_parse_full() {
        let config = CliConfig::parse(
            r#"
[sanitizer]
max_passes = 3
extra_patterns = ["<iframe[^>]*>"]

[log]
level = "debug"
format = "json"
"#,
        )
        .unwrap();

        assert_eq!(config.sanitizer.max_passes, 3);
        assert_eq!(config.sanitizer.max_nesting, 4);
        assert_eq!(config.sanitizer.extra_patterns.len(), 1);
        assert_eq!(config.log.level, LogLevel::Debug);
        assert_eq!(config.log.format, LogFormat::Json);
    }

    #[test]
    fn test_parse_empty() {
        let config = CliConfig::parse("").unwrap();
        assert_eq!(config.log, LogConfig::default());
    }

    #[test]
    fn test_parse_invalid() {
        assert!(matches!(
            CliConfig::parse("[sanitizer]\nmax_passes = \"many\""),
            Err(CliError::Config(_))
        ));
    }
}
