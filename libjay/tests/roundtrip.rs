//! End-to-end conversion tests: JSON through YAML and back, plus the
//! rejection paths for constructs JSON cannot represent.

use libjay::{classify, json_to_yaml, needs_quoting, yaml_to_json, Error, Scalar};

fn j2y(input: &str) -> String {
    let mut buf = Vec::new();
    json_to_yaml(input, &mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}

fn y2j(input: &str) -> String {
    let mut buf = Vec::new();
    yaml_to_json(input, &mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}

/// JSON -> YAML -> JSON.
fn roundtrip(json: &str) -> String {
    y2j(&j2y(json))
}

#[test]
fn test_roundtrip_preserves_scalar_types() {
    assert_eq!(roundtrip("null"), "null");
    assert_eq!(roundtrip("true"), "true");
    assert_eq!(roundtrip("false"), "false");
    assert_eq!(roundtrip("42"), "42");
    assert_eq!(roundtrip("-17"), "-17");
    assert_eq!(roundtrip("1.5"), "1.5");
    assert_eq!(roundtrip("\"x\""), "\"x\"");
}

#[test]
fn test_roundtrip_integral_float_stays_float() {
    // 5 and 5.0 are different JSON values; the .0 must survive.
    assert_eq!(roundtrip("5.0"), "5.0");
    assert_eq!(roundtrip("-3.0"), "-3.0");
}

#[test]
fn test_roundtrip_numeric_string_stays_string() {
    assert_eq!(roundtrip("\"123\""), "\"123\"");
    assert_eq!(roundtrip("\"5.0\""), "\"5.0\"");
    assert_eq!(roundtrip("\"0x1F\""), "\"0x1F\"");
}

#[test]
fn test_roundtrip_literal_string_stays_string() {
    assert_eq!(roundtrip("\"true\""), "\"true\"");
    assert_eq!(roundtrip("\"null\""), "\"null\"");
    assert_eq!(roundtrip("\"~\""), "\"~\"");
    assert_eq!(roundtrip("\"\""), "\"\"");
    assert_eq!(roundtrip("\".inf\""), "\".inf\"");
}

#[test]
fn test_roundtrip_structures() {
    for doc in [
        "{}",
        "[]",
        "[1,2,3]",
        "{\"a\":1}",
        "{\"a\":{\"b\":{\"c\":[null]}}}",
        "[[],[[]],{\"x\":[]}]",
        "{\"a\":{},\"b\":2}",
    ] {
        assert_eq!(roundtrip(doc), doc, "document {}", doc);
    }
}

#[test]
fn test_roundtrip_exponent_normalizes_value() {
    // The text form is canonicalized, the value and type are not.
    assert_eq!(roundtrip("1e3"), "1000.0");
    assert_eq!(roundtrip("2.5e-1"), "0.25");
}

#[test]
fn test_end_to_end_example() {
    let yaml = j2y("{\"a\": 1, \"b\": [true, null, \"x\"]}");
    assert_eq!(yaml, "'a': 1\n'b':\n  - true\n  - ~\n  - 'x'\n");
    assert_eq!(y2j(&yaml), "{\"a\":1,\"b\":[true,null,\"x\"]}");
}

#[test]
fn test_key_value_parity() {
    // Four flat scalars in a mapping pair up key/value, in order.
    assert_eq!(y2j("A: B\nC: D\n"), "{\"A\":\"B\",\"C\":\"D\"}");
    // The same four scalars in a sequence are all standalone values.
    assert_eq!(y2j("[A, B, C, D]"), "[\"A\",\"B\",\"C\",\"D\"]");
}

#[test]
fn test_numeric_grammar_boundaries() {
    assert_eq!(classify("9223372036854775807"), Scalar::Int(i64::MAX));
    assert_eq!(
        classify("9223372036854775808"),
        Scalar::Str("9223372036854775808")
    );
    assert_eq!(classify("0x1F"), Scalar::Int(31));
    assert_eq!(classify("0o17"), Scalar::Int(15));
}

#[test]
fn test_second_document_fails_before_any_second_output() {
    let mut buf = Vec::new();
    let err = yaml_to_json("---\n1\n---\n2\n", &mut buf).unwrap_err();
    assert!(matches!(err, Error::Unsupported(_)));
    // Only the first document reached the writer.
    assert_eq!(buf, b"1");
}

#[test]
fn test_complex_mapping_key_fails() {
    // A sequence or mapping in key position has no JSON rendering; the
    // conversion must fail instead of writing a keyless container.
    let mut buf = Vec::new();
    let err = yaml_to_json("? [1]\n: 2\n", &mut buf).unwrap_err();
    assert!(matches!(err, Error::Unsupported(_)));
}

#[test]
fn test_u64_integer_digits_survive() {
    // json2yaml keeps every digit of a u64-range integer.
    assert_eq!(j2y("18446744073709551615"), "18446744073709551615\n");
    // Coming back, the magnitude exceeds i64 so it lands as a string,
    // still digit-exact.
    assert_eq!(
        roundtrip("18446744073709551615"),
        "\"18446744073709551615\""
    );
}

#[test]
fn test_alias_fails() {
    let mut buf = Vec::new();
    let err = yaml_to_json("x: &a 1\ny: *a\n", &mut buf).unwrap_err();
    assert!(matches!(err, Error::Unsupported(_)));
}

#[test]
fn test_inf_value_fails_for_json() {
    let mut buf = Vec::new();
    let err = yaml_to_json("v: .inf\n", &mut buf).unwrap_err();
    assert!(matches!(err, Error::Unsupported(_)));
}

#[test]
fn test_quoting_necessity() {
    for s in [
        "null", "~", "yes", "Off", ".nan", "-.inf", "123", "1.5", "- x", "*a", "--- a",
        "trailing ", "a\nb", "a\tb", "a#b", "a,b", "",
    ] {
        assert!(needs_quoting(s), "must quote {:?}", s);
    }
    for s in ["hello", "x1", "mid space", "snake_case"] {
        assert!(!needs_quoting(s), "must not quote {:?}", s);
    }
}

#[test]
fn test_strings_with_control_chars_roundtrip() {
    assert_eq!(roundtrip("\"a\\nb\""), "\"a\\nb\"");
    assert_eq!(roundtrip("\"tab\\there\""), "\"tab\\there\"");
    assert_eq!(roundtrip("\"\\u0001\""), "\"\\u0001\"");
}

#[test]
fn test_quoted_yaml_strings_keep_exact_text() {
    assert_eq!(y2j("'it''s'"), "\"it's\"");
    assert_eq!(y2j("\"a\\nb\""), "\"a\\nb\"");
    assert_eq!(y2j("'ends with space '"), "\"ends with space \"");
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    /// JSON string escaping matching the writer's output form, so text
    /// comparisons below are exact.
    fn json_quote(s: &str) -> String {
        let mut out = String::from("\"");
        for c in s.chars() {
            match c {
                '"' => out.push_str("\\\""),
                '\\' => out.push_str("\\\\"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                '\x08' => out.push_str("\\b"),
                '\x0c' => out.push_str("\\f"),
                c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
                c => out.push(c),
            }
        }
        out.push('"');
        out
    }

    proptest! {
        #[test]
        fn prop_classify_is_total(s in ".*") {
            let _ = classify(&s);
            let _ = needs_quoting(&s);
        }

        #[test]
        fn prop_string_values_roundtrip(s in ".*") {
            let doc = format!("[{}]", json_quote(&s));
            prop_assert_eq!(roundtrip(&doc), doc);
        }

        #[test]
        fn prop_string_keys_roundtrip(s in ".*") {
            let doc = format!("{{{}:1}}", json_quote(&s));
            prop_assert_eq!(roundtrip(&doc), doc);
        }

        #[test]
        fn prop_ints_roundtrip(i in (i64::MIN + 1)..=i64::MAX) {
            let doc = i.to_string();
            prop_assert_eq!(roundtrip(&doc), doc);
        }

        #[test]
        fn prop_finite_floats_roundtrip(f in any::<f64>()) {
            prop_assume!(f.is_finite());
            let doc = if format!("{}", f).contains(['.', 'e', 'E']) {
                format!("{}", f)
            } else {
                format!("{}.0", f)
            };
            prop_assert_eq!(roundtrip(&doc), doc);
        }
    }
}
