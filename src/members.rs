//! Expands a record's contained-members field into a flat reference list.

use serde::Serialize;
use serde_json::Value;

use crate::model::{
    Diagnostic, FIELD_CONTAINING_MEMBERS, FIELD_CONTAINS_MEMBERS, FIELD_GUID, Record,
};
use crate::normalize::{decode_literal_list, looks_like_list};

/// Fields holding contained members, canonical name first. The alias is only
/// consulted when the canonical field is absent.
pub const MEMBER_FIELDS: &[&str] = &[FIELD_CONTAINING_MEMBERS, FIELD_CONTAINS_MEMBERS];

/// List levels flattened before the remainder is summarized.
pub const MAX_MEMBER_NESTING: usize = 2;

pub const UNKNOWN_INNER_STRUCTURE: &str = "error: unknown inner data structure";
pub const UNDECODABLE_MEMBER_LIST: &str = "error: undecodable member list";
pub const MEMBER_NESTING_TOO_DEEP: &str = "error: member nesting too deep";

const DIAGNOSTIC_PREFIX: &str = "error:";

/// Qualified name of a record reachable by a follow-up query.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct MemberReference(String);

impl MemberReference {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Inline marker for an element that could not be turned into a name.
    pub fn is_diagnostic(&self) -> bool {
        self.0.starts_with(DIAGNOSTIC_PREFIX)
    }

    /// Row shown for this reference before it has been fetched.
    pub fn to_record(&self) -> Record {
        if self.is_diagnostic() {
            Diagnostic::unrecognized_shape(self.0.clone())
        } else {
            Record::reference(self.0.clone())
        }
    }
}

impl std::fmt::Display for MemberReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MemberReference {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// The raw member field of `record`, if it carries one.
pub fn member_field(record: &Record) -> Option<&Value> {
    MEMBER_FIELDS.iter().find_map(|f| record.get(f))
}

/// Returns the member references of `record`, or `None` when it is a leaf.
///
/// Repeated references are kept: they mirror what the catalog holds.
pub fn resolve_members(record: &Record) -> Option<Vec<MemberReference>> {
    let refs = match member_field(record)? {
        Value::Null => return None,
        Value::String(s) => from_text(s),
        Value::Array(items) => from_list(items, 1),
        Value::Object(map) => vec![from_record(&Record::from_map(map.clone()))],
        Value::Bool(_) | Value::Number(_) => vec![MemberReference::new(UNKNOWN_INNER_STRUCTURE)],
    };
    if refs.is_empty() { None } else { Some(refs) }
}

/// The most recently returned entity named `qualified_name`. Records of other
/// names never stand in for it.
pub fn resolve_latest<'a>(records: &'a [Record], qualified_name: &str) -> Option<&'a Record> {
    records
        .iter()
        .rev()
        .filter(|r| !r.is_diagnostic())
        .find(|r| r.qualified_name() == Some(qualified_name))
}

fn from_text(text: &str) -> Vec<MemberReference> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }
    if looks_like_list(text) {
        return match decode_literal_list(text) {
            Ok(items) => from_list(&items, 1),
            Err(_) => vec![MemberReference::new(UNDECODABLE_MEMBER_LIST)],
        };
    }
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(MemberReference::new)
        .collect()
}

fn from_list(items: &[Value], level: usize) -> Vec<MemberReference> {
    let mut out = Vec::new();
    for item in items {
        match item {
            Value::Null => {}
            Value::String(s) => {
                let s = s.trim();
                if !s.is_empty() {
                    out.push(MemberReference::new(s));
                }
            }
            Value::Object(map) => out.push(from_record(&Record::from_map(map.clone()))),
            Value::Array(inner) if level < MAX_MEMBER_NESTING => {
                out.extend(from_list(inner, level + 1));
            }
            Value::Array(_) => out.push(MemberReference::new(MEMBER_NESTING_TOO_DEEP)),
            Value::Bool(_) | Value::Number(_) => {
                out.push(MemberReference::new(UNKNOWN_INNER_STRUCTURE));
            }
        }
    }
    out
}

fn from_record(record: &Record) -> MemberReference {
    record
        .qualified_name()
        .or_else(|| record.str_field(FIELD_GUID))
        .map(MemberReference::new)
        .unwrap_or_else(|| MemberReference::new(UNKNOWN_INNER_STRUCTURE))
}

#[cfg(test)]
#[path = "tests/members_tests.rs"]
mod tests;
