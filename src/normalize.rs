//! Canonicalizes catalog responses into ordered record lists.
//!
//! The catalog answers with whatever shape the report happened to produce:
//! an envelope with a `data` field, a bare record, a list of records, a list
//! of lists, a string-encoded list, or an error marker. `normalize` turns all
//! of them into a [`CanonicalResult`] whose record list is never empty.

use serde_json::{Map, Value};

use crate::model::{CanonicalResult, Diagnostic, Record, render_for_debug};

mod literal;
pub use self::literal::{DecodeError, decode_literal_list, looks_like_list};

/// How many envelope/sequence/decoded-string levels are descended before the
/// remainder is reported as an unrecognized shape.
pub const MAX_NESTING_DEPTH: usize = 3;

/// Shape of a payload value, decided once per level.
#[derive(Debug)]
pub enum Shape<'a> {
    /// A mapping carrying the `data` envelope field.
    Envelope(&'a Value),
    Mapping(&'a Map<String, Value>),
    Sequence(&'a [Value]),
    Text(&'a str),
    Scalar(&'a Value),
}

impl<'a> Shape<'a> {
    pub fn of(value: &'a Value) -> Self {
        match value {
            Value::Object(map) => match map.get("data") {
                Some(inner) => Shape::Envelope(inner),
                None => Shape::Mapping(map),
            },
            Value::Array(items) => Shape::Sequence(items),
            Value::String(s) => Shape::Text(s),
            Value::Null | Value::Bool(_) | Value::Number(_) => Shape::Scalar(value),
        }
    }
}

/// Normalizes one raw payload. Total: never panics, never returns no records.
pub fn normalize(raw: &Value) -> CanonicalResult {
    let mut out = Vec::new();
    collect(raw, 0, Origin::Payload, &mut out);
    CanonicalResult::from_records(out)
}

/// Where a value came from; strings decoded out of a literal list are names.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Origin {
    Payload,
    DecodedList,
}

fn collect(value: &Value, depth: usize, origin: Origin, out: &mut Vec<Record>) {
    if depth > MAX_NESTING_DEPTH {
        out.push(Diagnostic::unrecognized_shape(format!(
            "nesting deeper than {} levels: {}",
            MAX_NESTING_DEPTH,
            render_for_debug(value)
        )));
        return;
    }

    match Shape::of(value) {
        Shape::Envelope(Value::Null) => {}
        Shape::Envelope(inner) => collect(inner, depth + 1, Origin::Payload, out),
        Shape::Mapping(map) => {
            if !map.is_empty() {
                out.push(Record::from_map(map.clone()));
            }
        }
        Shape::Sequence(items) => {
            for item in items {
                collect(item, depth + 1, origin, out);
            }
        }
        Shape::Text(s) if origin == Origin::DecodedList => {
            let name = s.trim();
            if !name.is_empty() {
                out.push(Record::reference(name));
            }
        }
        Shape::Text(s) => match decode_literal_list(s) {
            Ok(items) => {
                for item in &items {
                    collect(item, depth + 1, Origin::DecodedList, out);
                }
            }
            Err(err) => out.push(Diagnostic::decode_failure(s, err)),
        },
        Shape::Scalar(v) => out.push(Diagnostic::unrecognized_shape(render_for_debug(v))),
    }
}

#[cfg(test)]
#[path = "tests/normalize/normalize_tests.rs"]
mod tests;
