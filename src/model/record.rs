use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::diagnostic::{DIAGNOSTIC_MARKERS, DiagnosticKind};

/// Placeholder shown for a field the record does not carry.
pub const MISSING_FIELD: &str = "None";

pub const FIELD_DISPLAY_NAME: &str = "Display Name";
pub const FIELD_QUALIFIED_NAME: &str = "Qualified Name";
pub const FIELD_TYPE_NAME: &str = "Type Name";
pub const FIELD_DESCRIPTION: &str = "Description";
pub const FIELD_STATUS: &str = "Status";
pub const FIELD_CATEGORIES: &str = "Categories";
pub const FIELD_GUID: &str = "GUID";
pub const FIELD_CONTAINING_MEMBERS: &str = "Containing Members";
pub const FIELD_CONTAINS_MEMBERS: &str = "Contains Members";

/// One catalog, collection or member entity as returned by the catalog.
///
/// Field order is the order the upstream sent them in. Records are value
/// snapshots: every frame owns its own copies.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// A record carrying only a qualified name, used for member references
    /// that have not been fetched yet.
    pub fn reference(qualified_name: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert(
            FIELD_QUALIFIED_NAME.to_string(),
            Value::String(qualified_name.into()),
        );
        Self(fields)
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Display text for `field`, or [`MISSING_FIELD`] when absent or null.
    pub fn text(&self, field: &str) -> String {
        match self.0.get(field) {
            None => MISSING_FIELD.to_string(),
            Some(v) => render_value(v),
        }
    }

    /// Non-empty string value of `field`, if it has one.
    pub fn str_field(&self, field: &str) -> Option<&str> {
        self.0
            .get(field)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn qualified_name(&self) -> Option<&str> {
        self.str_field(FIELD_QUALIFIED_NAME)
            .or_else(|| self.str_field("qualifiedName"))
    }

    pub fn display_name(&self) -> Option<&str> {
        self.str_field(FIELD_DISPLAY_NAME)
            .or_else(|| self.str_field("displayName"))
    }

    /// True for synthetic error rows and for upstream error markers.
    pub fn is_diagnostic(&self) -> bool {
        DIAGNOSTIC_MARKERS.iter().any(|m| self.0.contains_key(*m))
    }

    pub fn diagnostic_kind(&self) -> Option<DiagnosticKind> {
        if !self.is_diagnostic() {
            return None;
        }
        let label = self.0.get("error").and_then(Value::as_str);
        Some(
            DiagnosticKind::from_label(label)
                .or_else(|| {
                    if self.0.contains_key("NoData") {
                        Some(DiagnosticKind::EmptyResult)
                    } else if self.0.contains_key("Egeria Error") {
                        Some(DiagnosticKind::ClientFailure)
                    } else {
                        None
                    }
                })
                .unwrap_or(DiagnosticKind::ClientFailure),
        )
    }

    /// Human readable explanation for a diagnostic record.
    pub fn diagnostic_message(&self) -> String {
        let mut parts = Vec::new();
        for (key, value) in &self.0 {
            if key == "error" {
                continue;
            }
            let text = render_value(value);
            if !text.is_empty() {
                parts.push(text);
            }
        }
        let head = self
            .0
            .get("error")
            .map(render_value)
            .filter(|s| !s.is_empty());
        match (head, parts.is_empty()) {
            (Some(head), true) => head,
            (Some(head), false) => format!("{}: {}", head, parts.join("; ")),
            (None, false) => parts.join("; "),
            (None, true) => "unknown error".to_string(),
        }
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Renders one field value as a single table cell.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => MISSING_FIELD.to_string(),
        Value::String(s) => s.trim().to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(render_value)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => value.to_string(),
    }
}
