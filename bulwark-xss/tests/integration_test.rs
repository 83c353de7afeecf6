//! Integration tests for bulwark-xss

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bulwark_xss::*;
use std::sync::Arc;
use std::thread;

fn unicode_escape(text: &str) -> String {
    text.chars()
        .map(|c| format!("{}u{:04X}", '\\', c as u32))
        .collect()
}

#[test]
fn test_xss_sanitizer_creation() {
    let sanitizer = XssSanitizer::new();
    assert!(format!("{:?}", sanitizer).contains("XssSanitizer"));
    assert_eq!(sanitizer.patterns().len(), 10);
}

#[test]
fn test_script_tag_removed() {
    assert_eq!(sanitize_str("<script>alert(1)</script>"), "");
}

#[test]
fn test_javascript_scheme_removed() {
    let clean = sanitize_str("javascript:alert(1)");
    assert!(!clean.to_lowercase().contains("javascript:"));
}

#[test]
fn test_entity_encoded_script_removed() {
    assert_eq!(sanitize_str("&lt;script&gt;alert(1)&lt;/script&gt;"), "");
}

#[test]
fn test_unicode_escaped_script_removed() {
    let lt = unicode_escape("<");
    let gt = unicode_escape(">");
    let input = format!("{lt}script{gt}alert(1){lt}/script{gt}");
    assert_eq!(sanitize_str(&input), "");
}

#[test]
fn test_fully_escaped_script_removed() {
    let input = unicode_escape("<script>alert(1)</script>");
    assert_eq!(sanitize_str(&input), "");
}

#[test]
fn test_base64_script_block_removed() {
    let payload = STANDARD.encode("<script>alert(1)</script>");
    let input = format!("<img src=\"data:image/svg+xml;base64,{payload}\">");
    let clean = sanitize_str(&input);
    assert!(!clean.contains(&payload));
    assert!(!clean.contains("base64,"));
    assert_eq!(clean, "<img src=\"data:image/svg+xml;\">");
}

#[test]
fn test_benign_base64_block_unchanged() {
    let payload = STANDARD.encode("{\"user\":\"alice\",\"roles\":[\"admin\"]}");
    let input = format!("data:application/json;base64,{payload}");
    assert_eq!(sanitize_str(&input), input);
}

#[test]
fn test_event_handler_attribute() {
    let clean = sanitize_str("<img onerror=alert(1)>");
    assert!(!clean.contains("onerror="));
    assert_eq!(clean, "<img alert(1)>");
}

#[test]
fn test_sanitize_all_shape() {
    let mut params = MultiMap::new();
    params.add("q", "<script>x</script>").add("q", "safe");

    let clean = sanitize_all(&params);
    assert_eq!(serde_json::to_string(&clean).unwrap(), r#"{"q":["","safe"]}"#);
}

#[test]
fn test_absent_value() {
    assert_eq!(sanitize(None), None);
    assert_eq!(DEFAULT_SANITIZER.sanitize(None), None);
}

#[test]
fn test_idempotence_on_attack_corpus() {
    let corpus = [
        "<script>alert(document.cookie)</script>",
        "<SCRIPT SRC=//evil/x.js></SCRIPT>",
        "<scr<script>ipt>alert(1)</scr</script>ipt>",
        "<a href=\"jav&#x09;ascript:alert(1)\">x</a>",
        "<a href=\"&#106;&#97;&#118;&#97;&#115;&#99;&#114;&#105;&#112;&#116;&#58;alert(1)\">",
        "<div style=\"width: expression(alert(1))\">",
        "<body onload=alert(1)>",
        "vbscript:msgbox(1)",
        "eval(atob('YWxlcnQoMSk='))",
        "&amp;amp;lt;script&amp;amp;gt;",
        "caf&eacute; &copy; 2024",
        "",
    ];

    for input in corpus {
        let once = sanitize_str(input);
        let twice = sanitize_str(&once);
        assert_eq!(once, twice, "sanitize is not idempotent for {input:?}");
    }
}

#[test]
fn test_custom_sanitizer_shared_across_threads() {
    let config = SanitizerConfig::new().with_extra_patterns(vec![r"<iframe[^>]*>".to_string()]);
    let sanitizer = Arc::new(XssSanitizer::with_config(&config).unwrap());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let sanitizer = Arc::clone(&sanitizer);
            thread::spawn(move || {
                let input = format!("<iframe src=//x>{i}<script>alert({i})</script>");
                sanitizer.sanitize_str(&input)
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), i.to_string());
    }
}

#[test]
fn test_default_sanitizer_concurrent_use() {
    let handles: Vec<_> = (0..8)
        .map(|_| thread::spawn(|| sanitize_str("&lt;script&gt;x&lt;/script&gt;ok")))
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), "ok");
    }
}

#[test]
fn test_json_document() {
    let input = r#"{"comments":[{"body":"<script>steal()</script>nice post"}],"votes":3}"#;
    let clean: serde_json::Value = serde_json::from_str(&sanitize_json_str(input).unwrap()).unwrap();
    assert_eq!(clean["comments"][0]["body"], "nice post");
    assert_eq!(clean["votes"], 3);
}

#[test]
fn test_validator_agrees_with_sanitizer() {
    let inputs = [
        "<script>alert(1)</script>",
        "javascript:void(0)",
        "<p onclick=go()>",
        "plain text",
        "Tom &amp; Jerry",
    ];
    for input in inputs {
        let changed = sanitize_str(input) != input;
        assert_eq!(XssValidator::contains_xss(input), changed, "{input:?}");
    }
}
