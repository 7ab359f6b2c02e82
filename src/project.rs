//! Maps records onto fixed display-column schemas.

use crate::model::{
    FIELD_CATEGORIES, FIELD_CONTAINING_MEMBERS, FIELD_DESCRIPTION, FIELD_DISPLAY_NAME,
    FIELD_QUALIFIED_NAME, FIELD_STATUS, FIELD_TYPE_NAME, Record, render_value,
};

pub const ERROR_CELL: &str = "Error";

pub const CATALOG_COLUMNS: &[&str] = &[
    FIELD_DISPLAY_NAME,
    FIELD_QUALIFIED_NAME,
    FIELD_TYPE_NAME,
    FIELD_DESCRIPTION,
];

pub const MEMBER_COLUMNS: &[&str] = &[
    FIELD_DISPLAY_NAME,
    FIELD_QUALIFIED_NAME,
    FIELD_TYPE_NAME,
    FIELD_STATUS,
    FIELD_DESCRIPTION,
];

pub const DETAIL_COLUMNS: &[&str] = &[
    FIELD_DISPLAY_NAME,
    FIELD_QUALIFIED_NAME,
    FIELD_CATEGORIES,
    FIELD_DESCRIPTION,
    FIELD_STATUS,
    FIELD_TYPE_NAME,
    FIELD_CONTAINING_MEMBERS,
];

/// One table row; always as long as the column list it was projected for.
pub type Row = Vec<String>;

pub fn project<S: AsRef<str>>(records: &[Record], columns: &[S]) -> Vec<Row> {
    records.iter().map(|r| project_record(r, columns)).collect()
}

pub fn project_record<S: AsRef<str>>(record: &Record, columns: &[S]) -> Row {
    if record.is_diagnostic() {
        return diagnostic_row(record, columns.len());
    }
    columns.iter().map(|c| record.text(c.as_ref())).collect()
}

/// Every field of `record` as `[field, value]`, in upstream order.
pub fn project_attributes(record: &Record) -> Vec<Row> {
    if record.is_diagnostic() {
        return vec![vec![ERROR_CELL.to_string(), record.diagnostic_message()]];
    }
    record
        .fields()
        .map(|(k, v)| vec![k.to_string(), render_value(v)])
        .collect()
}

fn diagnostic_row(record: &Record, width: usize) -> Row {
    let mut row = vec![String::new(); width];
    if width == 1 {
        row[0] = format!("{}: {}", ERROR_CELL, record.diagnostic_message());
        return row;
    }
    if let Some(first) = row.first_mut() {
        *first = ERROR_CELL.to_string();
    }
    if let Some(second) = row.get_mut(1) {
        *second = record.diagnostic_message();
    }
    row
}

#[cfg(test)]
#[path = "tests/project_tests.rs"]
mod tests;
