//! Property-based tests for bulwark-xss using proptest

use bulwark_xss::*;
use proptest::prelude::*;

// Printable text, occasionally seeded with fragments the decoders react to
fn value_strategy() -> impl Strategy<Value = String> {
    let fragment = prop_oneof![
        "\\PC{0,12}",
        Just("&lt;".to_string()),
        Just("&amp;".to_string()),
        Just("&#x3C;".to_string()),
        Just("&#60".to_string()),
        Just("<script>".to_string()),
        Just("</script>".to_string()),
        Just("javascript:".to_string()),
        Just("onerror=".to_string()),
        Just(format!("{}u003C", '\\')),
        Just("base64,".to_string()),
    ];
    prop::collection::vec(fragment, 0..6).prop_map(|parts| parts.concat())
}

fn payload_strategy() -> impl Strategy<Value = (&'static str, &'static str)> {
    prop_oneof![
        Just(("<script>alert(1)</script>", "<script>")),
        Just(("<SCRIPT>document.location='//x'</SCRIPT>", "<script>")),
        Just(("javascript:alert(1)", "javascript:")),
        Just(("vbscript:msgbox(1)", "vbscript:")),
    ]
}

proptest! {
    #[test]
    fn sanitize_is_idempotent(value in value_strategy()) {
        let once = sanitize_str(&value);
        let twice = sanitize_str(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn sanitize_never_panics_on_arbitrary_text(value in "\\PC*") {
        let _ = sanitize_str(&value);
        let _ = XssValidator::detect_attack_type(&value);
    }

    #[test]
    fn known_payloads_never_survive(
        prefix in "\\PC{0,20}",
        (payload, marker) in payload_strategy(),
        suffix in "\\PC{0,20}"
    ) {
        let input = format!("{prefix}{payload}{suffix}");
        let clean = sanitize_str(&input).to_lowercase();
        prop_assert!(!clean.contains(marker), "{:?} survived in {:?}", marker, clean);
    }

    #[test]
    fn output_never_contains_nul(value in "[a-z<>&;\0]{0,30}") {
        prop_assert!(!sanitize_str(&value).contains('\0'));
    }

    #[test]
    fn sanitize_all_preserves_shape(
        pairs in prop::collection::vec(("[a-c]{1,2}", value_strategy()), 0..12)
    ) {
        let params: MultiMap = pairs.into_iter().collect();
        let clean = sanitize_all(&params);

        prop_assert_eq!(clean.len(), params.len());
        for ((name, values), (clean_name, clean_values)) in params.iter().zip(clean.iter()) {
            prop_assert_eq!(name, clean_name);
            prop_assert_eq!(values.len(), clean_values.len());
            for (value, clean_value) in values.iter().zip(clean_values) {
                prop_assert_eq!(&sanitize_str(value), clean_value);
            }
        }
    }

    #[test]
    fn benign_alphanumeric_text_unchanged(value in "[a-zA-Z0-9 .,!?]{0,64}") {
        // "on" followed by an event stem and "=" cannot be formed without '='
        prop_assert_eq!(sanitize_str(&value), value);
    }
}
