use super::*;

use serde_json::json;

use crate::model::{DiagnosticKind, NO_DATA_MESSAGE};

fn qualified_names(result: &CanonicalResult) -> Vec<&str> {
    result
        .records
        .iter()
        .filter_map(|r| r.qualified_name())
        .collect()
}

#[test]
fn unwraps_data_envelope() {
    let raw = json!({"data": [{"Qualified Name": "a"}, {"Qualified Name": "b"}]});
    let result = normalize(&raw);
    assert_eq!(qualified_names(&result), vec!["a", "b"]);
    assert!(result.diagnostic.is_none());
}

#[test]
fn envelope_and_bare_list_agree() {
    let list = json!([{"Qualified Name": "a"}, {"Qualified Name": "b"}]);
    let wrapped = json!({"data": list.clone()});
    assert_eq!(normalize(&wrapped), normalize(&list));
}

#[test]
fn single_mapping_becomes_one_record() {
    let raw = json!({"Display Name": "Catalog A", "Qualified Name": "qa"});
    let result = normalize(&raw);
    assert_eq!(result.records.len(), 1);
    assert_eq!(result.records[0].display_name(), Some("Catalog A"));
}

#[test]
fn preserves_order_and_duplicates() {
    let raw = json!([
        {"Qualified Name": "z"},
        {"Qualified Name": "a"},
        {"Qualified Name": "z"}
    ]);
    assert_eq!(qualified_names(&normalize(&raw)), vec!["z", "a", "z"]);
}

#[test]
fn preserves_field_order_within_a_record() {
    let raw: Value =
        serde_json::from_str(r#"{"Zeta": 1, "Alpha": 2, "Qualified Name": "q"}"#).unwrap();
    let result = normalize(&raw);
    let keys: Vec<&str> = result.records[0].fields().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["Zeta", "Alpha", "Qualified Name"]);
}

#[test]
fn flattens_list_of_lists() {
    let raw = json!([[{"Qualified Name": "a"}], [{"Qualified Name": "b"}, {"Qualified Name": "c"}]]);
    assert_eq!(qualified_names(&normalize(&raw)), vec!["a", "b", "c"]);
}

#[test]
fn decodes_string_encoded_list() {
    let result = normalize(&json!(r#"["a","b"]"#));
    assert_eq!(qualified_names(&result), vec!["a", "b"]);
    assert!(result.diagnostic.is_none());
}

#[test]
fn decodes_literal_list_inside_envelope() {
    let raw = json!({"data": "[{'Qualified Name': 'q1', 'Display Name': 'One'}]"});
    let result = normalize(&raw);
    assert_eq!(result.records.len(), 1);
    assert_eq!(result.records[0].display_name(), Some("One"));
}

#[test]
fn number_is_an_unknown_shape() {
    let result = normalize(&json!(42));
    assert_eq!(result.records.len(), 1);
    assert_eq!(result.diagnostic_kind(), Some(DiagnosticKind::UnrecognizedShape));
    assert_eq!(result.records[0].get("error"), Some(&json!("unknown shape")));
    assert_eq!(result.records[0].get("shape"), Some(&json!("42")));
}

#[test]
fn totality_over_degenerate_inputs() {
    let inputs = [
        Value::Null,
        json!(""),
        json!([]),
        json!({}),
        json!({"data": null}),
        json!({"data": []}),
        json!(true),
        json!("not a list"),
        json!([[[[[["deep"]]]]]]),
    ];
    for raw in &inputs {
        let result = normalize(raw);
        assert!(!result.records.is_empty(), "no records for {}", raw);
    }
}

#[test]
fn empty_inputs_report_no_data() {
    for raw in [json!([]), json!({}), json!({"data": null}), json!({"data": []})] {
        let result = normalize(&raw);
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.diagnostic_kind(), Some(DiagnosticKind::EmptyResult));
        assert_eq!(
            result.records[0].get("NoData"),
            Some(&json!(NO_DATA_MESSAGE))
        );
    }
}

#[test]
fn undecodable_text_is_a_decode_failure() {
    let result = normalize(&json!("['unterminated"));
    assert_eq!(result.diagnostic_kind(), Some(DiagnosticKind::DecodeFailure));
    assert_eq!(
        result.records[0].get("unknown"),
        Some(&json!("['unterminated"))
    );
}

#[test]
fn nesting_beyond_the_bound_is_reported_not_followed() {
    let raw = json!({"data": [[[[{"Qualified Name": "too deep"}]]]]});
    let result = normalize(&raw);
    assert_eq!(result.records.len(), 1);
    assert_eq!(result.diagnostic_kind(), Some(DiagnosticKind::UnrecognizedShape));
    assert!(qualified_names(&result).is_empty());
}

#[test]
fn nesting_within_the_bound_is_followed() {
    let raw = json!({"data": [[{"Qualified Name": "ok"}]]});
    assert_eq!(qualified_names(&normalize(&raw)), vec!["ok"]);
}

#[test]
fn upstream_error_marker_is_kept_as_diagnostic() {
    let raw = json!({"Egeria Error": "view server unavailable"});
    let result = normalize(&raw);
    assert_eq!(result.records.len(), 1);
    assert_eq!(result.diagnostic_kind(), Some(DiagnosticKind::ClientFailure));
}

#[test]
fn shape_and_unknown_attributes_alone_are_not_diagnostics() {
    let result = normalize(&json!({"data": [
        {"Qualified Name": "q1", "shape": "round"},
        {"Qualified Name": "q2", "unknown": "yes"}
    ]}));
    assert!(result.diagnostic.is_none());
    assert_eq!(result.entities().count(), 2);
    assert_eq!(qualified_names(&result), vec!["q1", "q2"]);
}

#[test]
fn diagnostics_sit_alongside_real_records() {
    let raw = json!([{"Qualified Name": "a"}, 7, {"Qualified Name": "b"}]);
    let result = normalize(&raw);
    assert_eq!(result.records.len(), 3);
    assert_eq!(result.entities().count(), 2);
    assert!(result.records[1].is_diagnostic());
}

#[test]
fn shape_classifies_values() {
    assert!(matches!(Shape::of(&json!({"data": 1})), Shape::Envelope(_)));
    assert!(matches!(Shape::of(&json!({"x": 1})), Shape::Mapping(_)));
    assert!(matches!(Shape::of(&json!([1])), Shape::Sequence(_)));
    assert!(matches!(Shape::of(&json!("s")), Shape::Text(_)));
    assert!(matches!(Shape::of(&Value::Null), Shape::Scalar(_)));
}
