//! Text rendering primitives for sections.
//!
//! Settings sections render as `[Name]` followed by `key=value` lines. Data
//! sections render as `[Name]`, a header line of column names, and one
//! comma-joined line per row. Rendering is semantic: comments and original
//! whitespace are not reproduced.

use serde_json::Value;

use crate::section::Settings;

/// Render a settings section as `[Name]` plus `key=value` lines.
pub fn settings_block(name: &str, settings: &Settings) -> String {
    let mut out = format!("[{}]\n", name);
    for (key, value) in settings {
        out.push_str(key);
        out.push('=');
        out.push_str(&scalar(value));
        out.push('\n');
    }
    out
}

/// Render a data section as `[Name]`, a column header line, and one line per
/// row. Columns are the union of row keys, first-row order first, later-row
/// extras appended in first-seen order; absent fields render empty.
pub fn data_block(name: &str, rows: &[Settings]) -> String {
    let mut columns: Vec<&str> = Vec::new();
    for row in rows {
        for key in row.keys() {
            if !columns.contains(&key.as_str()) {
                columns.push(key);
            }
        }
    }

    let mut out = format!("[{}]\n", name);
    out.push_str(&columns.join(","));
    out.push('\n');
    for row in rows {
        let fields: Vec<String> = columns
            .iter()
            .map(|column| row.get(*column).map(scalar).unwrap_or_default())
            .collect();
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out
}

/// Render a scalar value: strings bare, everything else via JSON display.
fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
