//! Delimited-table rendering of weather records.

use crate::model::{Field, FieldKind, WeatherRecord};

/// Column delimiter within a row. Stripped from text values so a value can
/// never split its row.
pub const SEPARATOR: char = ';';

/// Header row: the sixteen field names in canonical column order.
pub fn header() -> String {
    let names: Vec<&str> = Field::all().iter().map(|f| f.as_str()).collect();
    names.join(&SEPARATOR.to_string())
}

/// One data row, fields in the same order as [`header`]. Absent values
/// render as empty columns; no trailing delimiter.
pub fn format_record(record: &WeatherRecord) -> String {
    let columns: Vec<String> = Field::all()
        .iter()
        .map(|field| match field.kind() {
            FieldKind::Text => format_text(field.text_value(record)),
            FieldKind::Numeric => format_number(field.numeric_value(record)),
        })
        .collect();
    columns.join(&SEPARATOR.to_string())
}

fn format_text(value: Option<&str>) -> String {
    match value {
        Some(s) => s.replace(SEPARATOR, ""),
        None => String::new(),
    }
}

fn format_number(value: Option<f64>) -> String {
    match value {
        Some(n) => n.to_string(),
        None => String::new(),
    }
}
