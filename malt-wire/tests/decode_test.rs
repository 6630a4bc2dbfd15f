// malt-wire - Decoding integration tests
// Copyright (c) 2025 Tom Waddington. MIT licensed.

mod common;

use common::*;
use malt_types::Number;
use serde_json::json;

#[test]
fn test_list_of_mixed_nodes() {
    let value = decode_str(r#"{"list": [1, "foo", {"symbol": "x"}]}"#).unwrap();
    assert!(value.is_list());
    assert_eq!(
        value,
        Value::list(vec![Value::int(1), Value::string("foo"), Value::symbol("x")])
    );
}

#[test]
fn test_decode_is_deterministic() {
    let text = r#"{"hashmap": {"a": {"vector": [1, 2.5, null]}, "b": {"symbol": "s"}}}"#;
    let first = decode_str(text).unwrap();
    let second = decode_str(text).unwrap();
    assert_eq!(first, second);
    assert_eq!(to_wire(&first), to_wire(&second));
}

#[test]
fn test_slice_and_str_agree() {
    let text = r#"{"vector": [true, false, "x"]}"#;
    assert_eq!(decode_slice(text.as_bytes()).unwrap(), decode_str(text).unwrap());
}

#[test]
fn test_truncated_input_is_decode_error() {
    for text in [r#"{"list": [1, 2"#, "", "{", r#"{"symbol": "#, "tru"] {
        assert!(
            matches!(decode_str(text), Err(Error::Decode(_))),
            "{:?} should fail to decode",
            text
        );
    }
}

#[test]
fn test_unknown_variant() {
    match decode_str(r#"{"unknown": 1}"#) {
        Err(Error::UnknownVariant { fields }) => assert_eq!(fields, vec!["unknown"]),
        other => panic!("expected unknown variant, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_unknown_variant_nested_fails_whole_decode() {
    let result = decode_str(r#"{"list": [1, {"vector": [{"bogus": 0}]}]}"#);
    assert!(matches!(result, Err(Error::UnknownVariant { .. })));
}

#[test]
fn test_extra_fields_rejected_at_every_level() {
    assert!(matches!(
        decode_str(r#"{"list": [], "extra": 1}"#),
        Err(Error::Decode(_))
    ));
    assert!(matches!(
        decode_str(r#"{"list": [{"symbol": "x", "extra": 1}]}"#),
        Err(Error::Decode(_))
    ));
    assert!(matches!(
        decode_str(r#"{"hashmap": {"k": {"atom": 1, "extra": 1}}}"#),
        Err(Error::Decode(_))
    ));
}

#[test]
fn test_big_integer_is_exact() {
    let value = decode_str(r#"{"list": [123456789012345678901234567890]}"#).unwrap();
    let Value::List(items, _) = &value else {
        panic!("expected list, got {:?}", value);
    };
    let Value::Number(n) = &items[0] else {
        panic!("expected number, got {:?}", items[0]);
    };
    assert_eq!(n.as_str(), "123456789012345678901234567890");
    assert_eq!(
        n.to_bigint().unwrap().to_string(),
        "123456789012345678901234567890"
    );
    assert_ne!(
        items[0],
        Value::Number(Number::parse("123456789012345678901234567891").unwrap())
    );
}

#[test]
fn test_decimal_forms_compare_equal() {
    let value = decode_str(r#"{"vector": [1, 1.0, 10e-1, 0.1e1]}"#).unwrap();
    let items = value.as_sequence().unwrap();
    for item in items.iter() {
        assert_eq!(item, &Value::int(1));
    }
}

#[test]
fn test_metadata_attached_and_ignored_by_equality() {
    let value = decode_str(r#"{"vector": [1], "meta": {"hashmap": {"line": 3}}}"#).unwrap();
    let meta = value.meta().expect("meta should be attached");
    assert_eq!(
        **meta,
        Value::new_hash_map(&[Value::string("line"), Value::int(3)]).unwrap()
    );
    assert_eq!(value, Value::vector(vec![Value::int(1)]));
}

#[test]
fn test_nested_hashmap_values_use_tag_dispatch() {
    let value = decode_str(
        r#"{"hashmap": {"inner": {"hashmap": {"s": {"symbol": "y"}}}, "n": null}}"#,
    )
    .unwrap();
    let expected_inner =
        Value::new_hash_map(&[Value::string("s"), Value::symbol("y")]).unwrap();
    let expected = Value::new_hash_map(&[
        Value::string("inner"),
        expected_inner,
        Value::string("n"),
        Value::Nil,
    ])
    .unwrap();
    assert_eq!(value, expected);
}

#[test]
fn test_keyword_keys_survive() {
    let value = decode_str("{\"hashmap\": {\"\u{029e}k\": 1}}").unwrap();
    let expected = Value::new_hash_map(&[Value::keyword("k"), Value::int(1)]).unwrap();
    assert_eq!(value, expected);
}

#[test]
fn test_atom_decodes_contents() {
    let value = decode_str(r#"{"atom": {"list": [1]}, "meta": "m"}"#).unwrap();
    let Value::Atom(atom) = &value else {
        panic!("expected atom, got {:?}", value);
    };
    assert_eq!(atom.deref(), Value::list(vec![Value::int(1)]));
    assert_eq!(value.meta().map(|m| (**m).clone()), Some(Value::string("m")));
}

#[test]
fn test_fn_placeholder_is_not_callable() {
    let value = decode_str(r#"{"fn": {"params": ["x"]}, "meta": null}"#).unwrap();
    assert!(value.is_native_fn());
    let err = malt_core::apply(&value, &[Value::int(1)]).unwrap_err();
    assert!(matches!(err, Error::NotCallable(_)));
}

#[test]
fn test_fn_rejected_when_configured() {
    let decoder = Decoder::new().with_fn_nodes(FnNodePolicy::Reject);
    assert!(matches!(
        decoder.decode_str(r#"{"list": [{"fn": null}]}"#),
        Err(Error::Decode(_))
    ));
    // Same input is fine under the default policy
    assert!(decode_str(r#"{"list": [{"fn": null}]}"#).is_ok());
}

#[test]
fn test_default_depth_limit() {
    // Built directly: the text parser has its own, tighter, container limit
    let nested = |depth: usize| {
        let mut node = json!({ "list": [] });
        for _ in 1..depth {
            node = json!({ "list": [node] });
        }
        node
    };
    let decoder = Decoder::default();
    assert!(decoder.decode_value(&nested(64)).is_ok());
    assert!(matches!(
        decoder.decode_value(&nested(65)),
        Err(Error::Decode(msg)) if msg.contains("depth")
    ));
}

#[test]
fn test_deep_text_is_decode_error() {
    let text = format!("{}{}", r#"{"list": ["#.repeat(200), "]}".repeat(200));
    assert!(matches!(decode_str(&text), Err(Error::Decode(_))));
}
