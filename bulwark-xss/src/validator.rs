use crate::entities::ENTITY_TABLE;
use crate::error::{Result, XssError};
use crate::inline_base64;
use crate::sanitizer::{DEFAULT_SANITIZER, XssSanitizer};
use crate::unicode::decode_unicode_escapes;
use tracing::debug;

/// Label reported for inline base64 blocks that hide script.
pub const BASE64_PAYLOAD: &str = "Base64 payload";

impl XssSanitizer {
    /// Detect specific XSS attack type
    ///
    /// The text is decoded once (NUL removal, unicode escapes, character
    /// references) and matched against this sanitizer's patterns. Inline
    /// base64 blocks are judged the way [`sanitize_str`](Self::sanitize_str)
    /// judges them, nesting limit included.
    pub fn detect_attack_type(&self, text: &str) -> Option<&'static str> {
        let without_nul = text.replace('\0', "");
        let unescaped = decode_unicode_escapes(&without_nul);
        let decoded = ENTITY_TABLE.decode(&unescaped);

        if let Some(pattern) = self.patterns().first_match(&decoded) {
            debug!(label = pattern.label(), pattern = pattern.as_str(), "Attack pattern matched");
            return Some(pattern.label());
        }

        let hides_script = inline_base64::payloads(&decoded).any(|payload| {
            inline_base64::decode_payload(payload)
                .map(|inner| self.hides_script(&inner, 0))
                .unwrap_or(false)
        });

        hides_script.then_some(BASE64_PAYLOAD)
    }

    /// Check if text contains potential XSS attacks
    pub fn contains_xss(&self, text: &str) -> bool {
        self.detect_attack_type(text).is_some()
    }

    /// Validate text and return error if XSS detected
    pub fn validate(&self, text: &str) -> Result<()> {
        match self.detect_attack_type(text) {
            Some(label) => Err(XssError::MaliciousContent(label.to_string())),
            None => Ok(()),
        }
    }
}

/// XSS pattern detector backed by [`DEFAULT_SANITIZER`].
///
/// Reports what the sanitizer would strip without altering the value.
pub struct XssValidator;

impl XssValidator {
    pub fn contains_xss(text: &str) -> bool {
        DEFAULT_SANITIZER.contains_xss(text)
    }

    pub fn validate(text: &str) -> Result<()> {
        DEFAULT_SANITIZER.validate(text)
    }

    pub fn detect_attack_type(text: &str) -> Option<&'static str> {
        DEFAULT_SANITIZER.detect_attack_type(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SanitizerConfig;
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;

    #[test]
    fn test_entity_encoded_script_tag() {
        let encoded = "&lt;script&gt;document.cookie&lt;/script&gt;";
        assert_eq!(XssValidator::detect_attack_type(encoded), Some("Script injection"));
        assert!(matches!(
            XssValidator::validate(encoded),
            Err(XssError::MaliciousContent(_))
        ));
    }

    #[test]
    fn test_nul_split_scheme() {
        assert_eq!(
            XssValidator::detect_attack_type("java\0script:go()"),
            Some("JavaScript protocol")
        );
    }

    #[test]
    fn test_onerror_injection() {
        let xss = r#"<img src="x" onerror="alert('XSS')">"#;
        assert_eq!(
            XssValidator::detect_attack_type(xss),
            Some("Event handler injection")
        );
    }

    #[test]
    fn test_encoded_attacks_detected() {
        assert_eq!(
            XssValidator::detect_attack_type("&#x6A;avascript&colon;go()"),
            Some("JavaScript protocol")
        );
        let input = format!("{}u0065val(1)", '\\');
        assert_eq!(XssValidator::detect_attack_type(&input), Some("Eval call"));
    }

    #[test]
    fn test_base64_payload() {
        let payload = STANDARD.encode("<script>alert(1)</script>");
        let input = format!("data:text/html;base64,{payload}");
        assert_eq!(XssValidator::detect_attack_type(&input), Some(BASE64_PAYLOAD));

        let benign = format!("data:text/plain;base64,{}", STANDARD.encode("hello"));
        assert_eq!(XssValidator::detect_attack_type(&benign), None);
    }

    #[test]
    fn test_encoded_benign_text_is_clean() {
        for text in ["Tom &amp; Jerry", "caf&eacute; &#8364;5", "price &lt; 10"] {
            assert!(!XssValidator::contains_xss(text), "{text:?}");
            assert!(XssValidator::validate(text).is_ok());
        }
    }

    #[test]
    fn test_validate_error_carries_label() {
        match XssValidator::validate("vbscript:msgbox(1)") {
            Err(XssError::MaliciousContent(label)) => assert_eq!(label, "VBScript protocol"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_custom_patterns_detected() {
        let config = SanitizerConfig::new().with_extra_patterns(vec![r"<iframe[^>]*>".to_string()]);
        let sanitizer = XssSanitizer::with_config(&config).unwrap();

        assert_eq!(sanitizer.detect_attack_type("<iframe src=x>hi"), Some("Custom pattern"));
        assert_eq!(XssValidator::detect_attack_type("<iframe src=x>hi"), None);
    }

    #[test]
    fn test_nesting_limit_applies_to_detection() {
        let config = SanitizerConfig::new().with_max_nesting(0);
        let sanitizer = XssSanitizer::with_config(&config).unwrap();
        let input = format!("base64,{}", STANDARD.encode("harmless"));

        assert_eq!(sanitizer.detect_attack_type(&input), Some(BASE64_PAYLOAD));
        assert_eq!(XssValidator::detect_attack_type(&input), None);
    }
}
