//! Script injection patterns stripped from every value.

use crate::error::Result;
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use std::borrow::Cow;
use std::sync::Arc;

/// Event handler name stems matched after `on`.
const EVENT_HANDLER_STEMS: &[&str] = &[
    "click", "context", "mouse", "dblclick", "key", "abort", "error", "before", "hash", "load",
    "page", "resize", "scroll", "unload", "blur", "change", "focus", "input", "invalid", "reset",
    "search", "select", "submit", "drag", "drop", "copy", "cut", "paste", "after", "can", "end",
    "duration", "emptied", "play", "progress", "seek", "stall", "suspend", "time", "volume",
    "waiting", "message", "open", "touch", "online", "offline", "popstate", "show", "storage",
    "toggle", "wheel", "animationstart", "begin",
];

/// Built-in patterns, in the order they are applied.
pub static DEFAULT_PATTERNS: Lazy<Arc<PatternSet>> = Lazy::new(|| Arc::new(PatternSet::builtin()));

/// A single strip pattern with a human readable label.
#[derive(Debug, Clone)]
pub struct ScriptPattern {
    label: &'static str,
    regex: Regex,
}

impl ScriptPattern {
    fn new(label: &'static str, pattern: &str, dot_matches_newline: bool) -> Result<Self> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .dot_matches_new_line(dot_matches_newline)
            .build()?;
        Ok(Self { label, regex })
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// Ordered, immutable list of strip patterns.
#[derive(Debug, Clone)]
pub struct PatternSet {
    patterns: Vec<ScriptPattern>,
}

impl PatternSet {
    fn builtin() -> Self {
        let event_handlers = format!(r"on({})(\s*\w*\s*)=", EVENT_HANDLER_STEMS.join("|"));

        let specs: [(&'static str, &str, bool); 10] = [
            ("Script injection", r"<script>(.*?)</script>", false),
            ("Script injection", r"<script>", false),
            ("Script injection", r"</script>", false),
            ("Script injection", r"<script(.*?)>", true),
            ("Eval call", r"eval\((.*?)\)", true),
            ("CSS expression", r"expression\((.*?)\)", true),
            ("Base64 decode call", r"atob\((.*?)\)", true),
            ("JavaScript protocol", r"javascript:", false),
            ("VBScript protocol", r"vbscript:", false),
            ("Event handler injection", &event_handlers, true),
        ];

        let patterns = specs
            .into_iter()
            .map(|(label, pattern, dotall)| ScriptPattern::new(label, pattern, dotall).unwrap())
            .collect();

        Self { patterns }
    }

    /// The built-in patterns followed by `extra` custom patterns.
    ///
    /// Custom patterns are compiled case-insensitive with `.` matching
    /// newlines.
    pub fn with_extra<S: AsRef<str>>(extra: &[S]) -> Result<Self> {
        let mut set = DEFAULT_PATTERNS.as_ref().clone();
        for pattern in extra {
            set.patterns
                .push(ScriptPattern::new("Custom pattern", pattern.as_ref(), true)?);
        }
        Ok(set)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScriptPattern> {
        self.patterns.iter()
    }

    /// Remove every match of every pattern, in order.
    ///
    /// Each pattern runs over the output of the previous one.
    pub fn strip<'a>(&self, input: &'a str) -> Cow<'a, str> {
        let mut value = Cow::Borrowed(input);
        for pattern in &self.patterns {
            let stripped = match pattern.regex.replace_all(&value, "") {
                Cow::Borrowed(_) => continue,
                Cow::Owned(stripped) => stripped,
            };
            value = Cow::Owned(stripped);
        }
        value
    }

    /// First pattern matching `text`, if any.
    pub fn first_match(&self, text: &str) -> Option<&ScriptPattern> {
        self.patterns.iter().find(|pattern| pattern.is_match(text))
    }
}
