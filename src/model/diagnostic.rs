use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::record::Record;

/// Field names whose presence marks a record as a diagnostic row. `shape` and
/// `unknown` only ever accompany `error`; alone they are ordinary attributes.
pub(crate) const DIAGNOSTIC_MARKERS: &[&str] = &["error", "Egeria Error", "NoData"];

pub const NO_DATA_MESSAGE: &str = "No parsable data found in response";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// The payload did not match any known envelope.
    UnrecognizedShape,
    /// A string-encoded literal list could not be decoded.
    DecodeFailure,
    /// The catalog call failed or returned an error marker.
    ClientFailure,
    /// Well formed, but no records.
    EmptyResult,
}

impl DiagnosticKind {
    pub fn label(self) -> &'static str {
        match self {
            DiagnosticKind::UnrecognizedShape => "unknown shape",
            DiagnosticKind::DecodeFailure => "decode failure",
            DiagnosticKind::ClientFailure => "client failure",
            DiagnosticKind::EmptyResult => "no data",
        }
    }

    pub(crate) fn from_label(label: Option<&str>) -> Option<Self> {
        match label? {
            "unknown shape" => Some(DiagnosticKind::UnrecognizedShape),
            "decode failure" => Some(DiagnosticKind::DecodeFailure),
            "client failure" => Some(DiagnosticKind::ClientFailure),
            "no data" => Some(DiagnosticKind::EmptyResult),
            _ => None,
        }
    }
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Builders for the synthetic rows that stand in for failures.
pub struct Diagnostic;

impl Diagnostic {
    pub fn unrecognized_shape(rendered: impl Into<String>) -> Record {
        Record::new()
            .with("error", DiagnosticKind::UnrecognizedShape.label())
            .with("shape", rendered.into())
    }

    pub fn decode_failure(raw: impl Into<String>, reason: impl std::fmt::Display) -> Record {
        Record::new()
            .with("error", DiagnosticKind::DecodeFailure.label())
            .with("unknown", raw.into())
            .with("reason", reason.to_string())
    }

    pub fn client_failure(reason: impl Into<String>) -> Record {
        Record::new()
            .with("error", DiagnosticKind::ClientFailure.label())
            .with("Egeria Error", reason.into())
    }

    pub fn empty_result() -> Record {
        Record::new().with("NoData", NO_DATA_MESSAGE)
    }

    pub fn empty_result_with(message: impl Into<String>) -> Record {
        Record::new().with("NoData", message.into())
    }
}

/// Normalized form of one catalog response.
///
/// `records` always holds at least one entry. When any entry is a diagnostic,
/// the first one is also exposed through `diagnostic`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CanonicalResult {
    pub records: Vec<Record>,
    pub diagnostic: Option<Record>,
}

impl CanonicalResult {
    pub(crate) fn from_records(mut records: Vec<Record>) -> Self {
        if records.is_empty() {
            records.push(Diagnostic::empty_result());
        }
        let diagnostic = records.iter().find(|r| r.is_diagnostic()).cloned();
        Self {
            records,
            diagnostic,
        }
    }

    pub fn failure(reason: impl Into<String>) -> Self {
        Self::from_records(vec![Diagnostic::client_failure(reason)])
    }

    pub fn diagnostic_kind(&self) -> Option<DiagnosticKind> {
        self.diagnostic.as_ref().and_then(Record::diagnostic_kind)
    }

    /// Records that are real catalog entities rather than diagnostics.
    pub fn entities(&self) -> impl Iterator<Item = &Record> {
        self.records.iter().filter(|r| !r.is_diagnostic())
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

pub(crate) fn render_for_debug(value: &Value) -> String {
    const LIMIT: usize = 200;
    let text = value.to_string();
    if text.chars().count() <= LIMIT {
        return text;
    }
    let mut cut: String = text.chars().take(LIMIT).collect();
    cut.push_str("...");
    cut
}
