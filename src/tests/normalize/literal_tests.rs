use super::*;

use serde_json::json;

#[test]
fn decodes_json_list() {
    let items = decode_literal_list(r#"["a", "b"]"#).unwrap();
    assert_eq!(items, vec![json!("a"), json!("b")]);
}

#[test]
fn decodes_single_quoted_list() {
    let items = decode_literal_list("['cat::one', 'cat::two']").unwrap();
    assert_eq!(items, vec![json!("cat::one"), json!("cat::two")]);
}

#[test]
fn decodes_bare_words_inside_brackets() {
    let items = decode_literal_list("[alpha, beta gamma , 3, None, True]").unwrap();
    assert_eq!(
        items,
        vec![
            json!("alpha"),
            json!("beta gamma"),
            json!(3),
            Value::Null,
            json!(true)
        ]
    );
}

#[test]
fn decodes_tuples_and_nested_dicts() {
    let items = decode_literal_list("({'Qualified Name': 'q1'}, ('x', 2.5),)").unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0], json!({"Qualified Name": "q1"}));
    assert_eq!(items[1], json!(["x", 2.5]));
}

#[test]
fn escapes_inside_strings_are_kept_literal() {
    let items = decode_literal_list(r"['it\'s', 'a\nb']").unwrap();
    assert_eq!(items, vec![json!("it's"), json!("a\nb")]);
}

#[test]
fn empty_list_decodes_to_nothing() {
    assert!(decode_literal_list("[]").unwrap().is_empty());
    assert!(decode_literal_list("  ( )  ").unwrap().is_empty());
}

#[test]
fn rejects_empty_and_non_list_text() {
    assert_eq!(decode_literal_list("   "), Err(DecodeError::Empty));
    assert_eq!(decode_literal_list("hello"), Err(DecodeError::NotAList));
    assert_eq!(decode_literal_list("{'a': 1}"), Err(DecodeError::NotAList));
}

#[test]
fn reports_unterminated_input() {
    assert!(matches!(
        decode_literal_list("['a', 'b'"),
        Err(DecodeError::UnexpectedEnd { .. })
    ));
    assert!(matches!(
        decode_literal_list("['abc]"),
        Err(DecodeError::UnterminatedString { offset: 1 })
    ));
}

#[test]
fn reports_trailing_input() {
    assert!(matches!(
        decode_literal_list("['a'] extra"),
        Err(DecodeError::TrailingInput { .. })
    ));
}

#[test]
fn never_evaluates_calls() {
    // A call is just malformed input, not something to run.
    let err = decode_literal_list("[__import__('os')]").unwrap_err();
    assert!(matches!(err, DecodeError::Unexpected { found: '(', .. }));
}

#[test]
fn bounds_nesting() {
    let deep = format!("{}{}", "[".repeat(40), "]".repeat(40));
    // serde_json accepts this depth, so exercise the literal grammar instead.
    let deep_tuple = format!("{}{}", "(".repeat(40), ")".repeat(40));
    assert!(decode_literal_list(&deep).is_ok());
    assert!(matches!(
        decode_literal_list(&deep_tuple),
        Err(DecodeError::TooDeep { .. })
    ));
}

#[test]
fn looks_like_list_checks_the_opening_bracket() {
    assert!(looks_like_list("  [a]"));
    assert!(looks_like_list("(a,)"));
    assert!(!looks_like_list("a, b"));
    assert!(!looks_like_list(""));
}
